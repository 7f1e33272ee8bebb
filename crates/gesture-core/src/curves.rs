//! Downsampling a recorded series into particle curves.
//!
//! A curve is a short list of `(time, value)` keys with time normalized to the
//! particle lifetime. Each slice `i` of `k` reads one series entry and writes
//! one key per enabled channel at `t = i / k`.

use fnv::FnvHashMap;

use crate::error::{AuthoringError, Result};
use crate::series::MotionSeries;
use crate::settings::{NoiseMode, RecorderSettings, SlicePlacement};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    VelocityX,
    VelocityY,
    VelocityZ,
    Size,
    NoiseStrength,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::VelocityX,
        Channel::VelocityY,
        Channel::VelocityZ,
        Channel::Size,
        Channel::NoiseStrength,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::VelocityX => "velocity.x",
            Channel::VelocityY => "velocity.y",
            Channel::VelocityZ => "velocity.z",
            Channel::Size => "size",
            Channel::NoiseStrength => "noise.strength",
        }
    }

    pub fn is_enabled(self, settings: &RecorderSettings) -> bool {
        match self {
            Channel::VelocityX | Channel::VelocityY | Channel::VelocityZ => {
                settings.channels.velocity
            }
            Channel::Size => settings.channels.size,
            Channel::NoiseStrength => settings.channels.noise,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: Vec<CurveKey>) -> Self {
        Self { keys }
    }

    /// Keys are appended in slice order; duplicate times are kept.
    pub fn add_key(&mut self, time: f32, value: f32) {
        self.keys.push(CurveKey::new(time, value));
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Interleaved `[t0, v0, t1, v1, ..]` view for hosts that take raw floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.keys)
    }

    /// Piecewise-linear value at `t`, held flat outside the key range.
    /// Where keys share a time the later one wins.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t < first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.time && t < b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let u = (t - a.time) / span;
                return a.value + (b.value - a.value) * u;
            }
        }
        last.value
    }
}

/// Series index and key time for one slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    pub sample_index: usize,
    pub time: f32,
}

/// Lay out `slices` evenly over a series of length `len`.
///
/// Sample indices are clamped to `[1, len - 1]` so the first slice skips the
/// zero velocity at index 0. A series of one entry reads index 0 and an empty
/// series reads nothing (callers emit zeros).
pub fn slice_plan(len: usize, slices: usize, placement: SlicePlacement) -> Vec<Slice> {
    (0..slices)
        .map(|i| {
            let raw = match placement {
                SlicePlacement::Proportional => len * i / slices,
                SlicePlacement::Truncated => (len / slices) * i,
            };
            let sample_index = if len <= 1 {
                0
            } else {
                raw.clamp(1, len - 1)
            };
            let time = (i as f32 / slices as f32).clamp(0.0, 1.0);
            Slice { sample_index, time }
        })
        .collect()
}

fn noise_value(series: &MotionSeries, sample_index: usize, mode: NoiseMode) -> f32 {
    let positions = series.positions();
    let last = positions.len() - 1;
    let hi = (sample_index + 1).min(last);
    let lo = sample_index.saturating_sub(1).min(last);
    let v = match mode {
        NoiseMode::LocalDelta => positions[hi] - positions[lo],
        // hi >= lo, so the difference is always a valid index
        NoiseMode::IndexParity => positions[hi - lo],
    };
    v.x + v.y + v.z
}

/// Curves produced for one recording, keyed by channel.
#[derive(Clone, Debug, Default)]
pub struct CurveSet {
    curves: FnvHashMap<Channel, Curve>,
    series_len: usize,
}

impl CurveSet {
    pub fn get(&self, channel: Channel) -> Option<&Curve> {
        self.curves.get(&channel)
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.curves.contains_key(&channel)
    }

    pub fn series_len(&self) -> usize {
        self.series_len
    }

    /// Set when the series was too short for velocity to mean anything.
    pub fn degenerate(&self) -> Option<AuthoringError> {
        (self.series_len < 2).then_some(AuthoringError::DegenerateSeries {
            len: self.series_len,
        })
    }

    /// Enabled channels in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Curve)> + '_ {
        Channel::ALL
            .into_iter()
            .filter_map(move |c| self.curves.get(&c).map(|curve| (c, curve)))
    }

    pub fn emit(&self, sink: &mut dyn crate::output::CurveSink) -> Result<()> {
        for (channel, curve) in self.iter() {
            sink.accept(channel, curve.keys())?;
        }
        Ok(())
    }
}

/// Build every enabled channel's curve from a finished series.
pub fn build_curves(series: &MotionSeries, settings: &RecorderSettings) -> Result<CurveSet> {
    settings.validate()?;
    let len = series.len();
    let plan = slice_plan(len, settings.interpolation_slices, settings.slice_placement);

    let mut curves: FnvHashMap<Channel, Curve> = FnvHashMap::default();
    for channel in Channel::ALL {
        if channel.is_enabled(settings) {
            curves.insert(channel, Curve::new());
        }
    }

    if len < 2 {
        log::warn!(
            "[curves] series has {} entr{}; emitting flat curves",
            len,
            if len == 1 { "y" } else { "ies" }
        );
    }

    for slice in &plan {
        let i = slice.sample_index;
        let entry = series.entry(i).unwrap_or_default();
        for (channel, curve) in curves.iter_mut() {
            let value = if len == 0 {
                0.0
            } else {
                match channel {
                    Channel::VelocityX => entry.velocity.x * settings.simulation_scale,
                    Channel::VelocityY => entry.velocity.y * settings.simulation_scale,
                    Channel::VelocityZ => entry.velocity.z * settings.simulation_scale,
                    Channel::Size => entry.expansion * settings.size_over_lifetime_scale,
                    Channel::NoiseStrength => {
                        noise_value(series, i, settings.noise_mode) * settings.noise_scale
                    }
                }
            };
            curve.add_key(slice.time, value);
        }
    }

    log::info!(
        "[curves] {} slice(s) over {} tick(s) into {} curve(s)",
        plan.len(),
        len,
        curves.len()
    );
    Ok(CurveSet {
        curves,
        series_len: len,
    })
}
