// Host-side tests for slice placement and curve emission.

use gesture_core::*;
use glam::Vec3;

// positions x = j^2 so neighbour deltas differ from neighbour-index lookups
fn squares_series(len: usize) -> MotionSeries {
    let mut series = MotionSeries::new();
    for j in 0..len {
        let j = j as f32;
        series.push(Vec3::new(j * j, 0.0, 0.0), j * 0.5);
    }
    series
}

fn indices(plan: &[Slice]) -> Vec<usize> {
    plan.iter().map(|s| s.sample_index).collect()
}

fn values(curves: &CurveSet, channel: Channel) -> Vec<f32> {
    curves
        .get(channel)
        .unwrap()
        .keys()
        .iter()
        .map(|k| k.value)
        .collect()
}

fn assert_close(got: &[f32], expected: &[f32]) {
    assert_eq!(got.len(), expected.len(), "{got:?} vs {expected:?}");
    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-4, "{got:?} vs {expected:?}");
    }
}

#[test]
fn five_ticks_three_slices_sample_one_one_three() {
    let plan = slice_plan(5, 3, SlicePlacement::Proportional);
    assert_eq!(indices(&plan), vec![1, 1, 3]);
    let times: Vec<f32> = plan.iter().map(|s| s.time).collect();
    assert_close(&times, &[0.0, 1.0 / 3.0, 2.0 / 3.0]);
}

#[test]
fn truncated_placement_divides_first() {
    let plan = slice_plan(5, 3, SlicePlacement::Truncated);
    assert_eq!(indices(&plan), vec![1, 1, 2]);
    let plan = slice_plan(25, 3, SlicePlacement::Truncated);
    assert_eq!(indices(&plan), vec![1, 8, 16]);
    let plan = slice_plan(25, 3, SlicePlacement::Proportional);
    assert_eq!(indices(&plan), vec![1, 8, 16]);
}

#[test]
fn single_slice_reads_index_one_at_time_zero() {
    let plan = slice_plan(5, 1, SlicePlacement::Proportional);
    assert_eq!(plan, vec![Slice { sample_index: 1, time: 0.0 }]);
}

#[test]
fn short_series_collapse_without_going_out_of_bounds() {
    assert_eq!(indices(&slice_plan(2, 4, SlicePlacement::Proportional)), vec![1, 1, 1, 1]);
    assert_eq!(indices(&slice_plan(1, 3, SlicePlacement::Proportional)), vec![0, 0, 0]);
    assert_eq!(indices(&slice_plan(0, 3, SlicePlacement::Proportional)), vec![0, 0, 0]);
}

#[test]
fn every_enabled_channel_gets_k_keys_with_rising_times() {
    let series = squares_series(12);
    for k in 1..=10 {
        let settings = RecorderSettings {
            interpolation_slices: k,
            ..Default::default()
        };
        let curves = build_curves(&series, &settings).unwrap();
        for channel in Channel::ALL {
            let curve = curves.get(channel).unwrap();
            assert_eq!(curve.len(), k, "{} with k={}", channel.name(), k);
            let keys = curve.keys();
            assert_eq!(keys[0].time, 0.0);
            assert!(keys.windows(2).all(|w| w[0].time <= w[1].time));
            assert!((keys[k - 1].time - (k - 1) as f32 / k as f32).abs() < 1e-6);
        }
    }
}

#[test]
fn channel_values_follow_scaled_series() {
    let series = squares_series(5);
    let settings = RecorderSettings::default();
    let curves = build_curves(&series, &settings).unwrap();

    // velocity x = [0, 1, 3, 5, 7], sampled at 1, 1, 3, scaled by 10
    assert_close(&values(&curves, Channel::VelocityX), &[10.0, 10.0, 50.0]);
    assert_close(&values(&curves, Channel::VelocityY), &[0.0, 0.0, 0.0]);
    assert_close(&values(&curves, Channel::VelocityZ), &[0.0, 0.0, 0.0]);
    assert_close(&values(&curves, Channel::Size), &[0.5, 0.5, 1.5]);
    // p[s + 1] - p[s - 1]: 4 - 0, 4 - 0, 16 - 4
    assert_close(&values(&curves, Channel::NoiseStrength), &[4.0, 4.0, 12.0]);
}

#[test]
fn scales_apply_per_channel() {
    let series = squares_series(5);
    let settings = RecorderSettings {
        simulation_scale: 2.0,
        size_over_lifetime_scale: 4.0,
        noise_scale: -0.5,
        ..Default::default()
    };
    let curves = build_curves(&series, &settings).unwrap();
    assert_close(&values(&curves, Channel::VelocityX), &[2.0, 2.0, 10.0]);
    assert_close(&values(&curves, Channel::Size), &[2.0, 2.0, 6.0]);
    assert_close(&values(&curves, Channel::NoiseStrength), &[-2.0, -2.0, -6.0]);
}

#[test]
fn index_parity_noise_reads_the_index_difference() {
    let series = squares_series(5);
    let settings = RecorderSettings {
        noise_mode: NoiseMode::IndexParity,
        ..Default::default()
    };
    let curves = build_curves(&series, &settings).unwrap();
    // (s + 1) - (s - 1) = 2 for interior slices, so every key reads p[2] = 4
    assert_close(&values(&curves, Channel::NoiseStrength), &[4.0, 4.0, 4.0]);
}

#[test]
fn disabling_a_channel_leaves_the_others_untouched() {
    let series = squares_series(9);
    let all = build_curves(&series, &RecorderSettings::default()).unwrap();

    let mut settings = RecorderSettings::default();
    settings.channels.velocity = false;
    let partial = build_curves(&series, &settings).unwrap();
    assert!(!partial.contains(Channel::VelocityX));
    assert!(!partial.contains(Channel::VelocityY));
    assert!(!partial.contains(Channel::VelocityZ));
    assert_eq!(partial.get(Channel::Size), all.get(Channel::Size));
    assert_eq!(
        partial.get(Channel::NoiseStrength),
        all.get(Channel::NoiseStrength)
    );

    settings.channels.size = false;
    settings.channels.noise = false;
    let none = build_curves(&series, &settings).unwrap();
    assert_eq!(none.iter().count(), 0);
}

#[test]
fn building_does_not_touch_the_series() {
    let series = squares_series(6);
    let before = series.clone();
    build_curves(&series, &RecorderSettings::default()).unwrap();
    assert_eq!(series.positions(), before.positions());
    assert_eq!(series.velocities(), before.velocities());
    assert_eq!(series.expansions(), before.expansions());
}

#[test]
fn empty_series_gives_flat_zero_curves() {
    let curves = build_curves(&MotionSeries::new(), &RecorderSettings::default()).unwrap();
    assert_eq!(
        curves.degenerate(),
        Some(AuthoringError::DegenerateSeries { len: 0 })
    );
    for (_, curve) in curves.iter() {
        assert_eq!(curve.len(), 3);
        assert!(curve.keys().iter().all(|k| k.value == 0.0));
    }
}

#[test]
fn single_entry_series_reads_its_only_entry() {
    let mut series = MotionSeries::new();
    series.push(Vec3::new(1.0, 2.0, 3.0), 0.25);
    let curves = build_curves(&series, &RecorderSettings::default()).unwrap();
    assert_eq!(
        curves.degenerate(),
        Some(AuthoringError::DegenerateSeries { len: 1 })
    );
    assert_close(&values(&curves, Channel::VelocityX), &[0.0, 0.0, 0.0]);
    assert_close(&values(&curves, Channel::Size), &[0.25, 0.25, 0.25]);
    assert_close(&values(&curves, Channel::NoiseStrength), &[0.0, 0.0, 0.0]);
}

#[test]
fn zero_slices_is_rejected() {
    let settings = RecorderSettings {
        interpolation_slices: 0,
        ..Default::default()
    };
    assert!(matches!(
        build_curves(&squares_series(5), &settings),
        Err(AuthoringError::InvalidSettings(_))
    ));
}

#[test]
fn emit_walks_channels_in_fixed_order() {
    let curves = build_curves(&squares_series(5), &RecorderSettings::default()).unwrap();
    let mut seen = Vec::new();
    let mut sink = |channel: Channel, keys: &[CurveKey]| -> gesture_core::Result<()> {
        seen.push((channel, keys.len()));
        Ok(())
    };
    curves.emit(&mut sink).unwrap();
    assert_eq!(
        seen,
        vec![
            (Channel::VelocityX, 3),
            (Channel::VelocityY, 3),
            (Channel::VelocityZ, 3),
            (Channel::Size, 3),
            (Channel::NoiseStrength, 3),
        ]
    );
}

#[test]
fn sink_errors_propagate() {
    let curves = build_curves(&squares_series(5), &RecorderSettings::default()).unwrap();
    let mut calls = 0;
    let mut sink = |_: Channel, _: &[CurveKey]| -> gesture_core::Result<()> {
        calls += 1;
        Err(AuthoringError::Sink("host curve locked".into()))
    };
    let err = curves.emit(&mut sink).unwrap_err();
    assert_eq!(err, AuthoringError::Sink("host curve locked".into()));
    assert_eq!(calls, 1);
}

#[test]
fn curve_evaluation_interpolates_and_clamps() {
    let curve = Curve::from_keys(vec![
        CurveKey::new(0.0, 0.0),
        CurveKey::new(0.5, 10.0),
        CurveKey::new(1.0, 20.0),
    ]);
    assert_eq!(curve.evaluate(-1.0), 0.0);
    assert!((curve.evaluate(0.25) - 5.0).abs() < 1e-5);
    assert!((curve.evaluate(0.75) - 15.0).abs() < 1e-5);
    assert_eq!(curve.evaluate(3.0), 20.0);
    assert_eq!(Curve::new().evaluate(0.5), 0.0);
}

#[test]
fn duplicate_key_times_resolve_to_the_later_key() {
    let curve = Curve::from_keys(vec![
        CurveKey::new(0.0, 1.0),
        CurveKey::new(0.0, 3.0),
        CurveKey::new(0.5, 5.0),
    ]);
    assert_eq!(curve.evaluate(0.0), 3.0);
    assert!((curve.evaluate(0.25) - 4.0).abs() < 1e-5);
}

#[test]
fn float_view_interleaves_time_and_value() {
    let mut curve = Curve::new();
    curve.add_key(0.0, 1.0);
    curve.add_key(0.5, 2.0);
    assert_eq!(curve.as_floats(), &[0.0, 1.0, 0.5, 2.0]);
}

#[test]
fn single_slice_keys_every_channel_once_from_index_one() {
    let settings = RecorderSettings {
        interpolation_slices: 1,
        ..Default::default()
    };
    let curves = build_curves(&squares_series(5), &settings).unwrap();
    for channel in Channel::ALL {
        let keys = curves.get(channel).unwrap().keys();
        assert_eq!(keys.len(), 1, "{channel:?}");
        assert_eq!(keys[0].time, 0.0);
    }
    // velocity[1] = p1 - p0, noise = p2 - p0
    assert_close(&values(&curves, Channel::VelocityX), &[10.0]);
    assert_close(&values(&curves, Channel::VelocityY), &[0.0]);
    assert_close(&values(&curves, Channel::Size), &[0.5]);
    assert_close(&values(&curves, Channel::NoiseStrength), &[4.0]);
}
