use gesture_core::{Channel, CurveSet, EffectProfile, MotionSeries};

pub fn print_series(series: &MotionSeries) {
    println!("{} tick(s) recorded", series.len());
    for (i, e) in series.iter().enumerate() {
        println!(
            "  #{:<3} pos=({:>7.3},{:>7.3},{:>7.3}) vel=({:>7.3},{:>7.3},{:>7.3}) spread={:.3}",
            i,
            e.position.x,
            e.position.y,
            e.position.z,
            e.velocity.x,
            e.velocity.y,
            e.velocity.z,
            e.expansion
        );
    }
}

pub fn print_curves(curves: &CurveSet, raw_floats: bool) {
    for (channel, curve) in curves.iter() {
        println!("{} ({} keys)", channel.name(), curve.len());
        for key in curve.keys() {
            println!("  t={:.3} v={:.4}", key.time, key.value);
        }
        if raw_floats {
            println!("  raw={:?}", curve.as_floats());
        }
    }
    for channel in Channel::ALL {
        if !curves.contains(channel) {
            println!("{} (disabled)", channel.name());
        }
    }
}

pub fn print_profile(profile: &EffectProfile) {
    println!("start lifetime: {:.2}s", profile.start_lifetime);
    println!(
        "modules: velocity={} size={} noise={} (frequency {:.1})",
        profile.velocity.enabled,
        profile.size.enabled,
        profile.noise.enabled,
        profile.noise.frequency
    );
}
