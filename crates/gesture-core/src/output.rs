//! Output side: where finished curves go.
//!
//! Hosts implement `CurveSink` (or pass a closure). `EffectProfile` is a
//! host-neutral picture of the particle modules a recording configures, and is
//! itself a sink.

use crate::constants::CURVE_MULTIPLIER;
use crate::curves::{Channel, Curve, CurveKey};
use crate::error::Result;
use crate::settings::RecorderSettings;

pub trait CurveSink {
    fn accept(&mut self, channel: Channel, keys: &[CurveKey]) -> Result<()>;
}

impl<F> CurveSink for F
where
    F: FnMut(Channel, &[CurveKey]) -> Result<()>,
{
    fn accept(&mut self, channel: Channel, keys: &[CurveKey]) -> Result<()> {
        self(channel, keys)
    }
}

/// A curve scaled by a constant, as particle hosts usually store them.
#[derive(Clone, Debug, PartialEq)]
pub struct MinMaxCurve {
    pub multiplier: f32,
    pub curve: Curve,
}

impl MinMaxCurve {
    pub fn new(keys: &[CurveKey]) -> Self {
        Self {
            multiplier: CURVE_MULTIPLIER,
            curve: Curve::from_keys(keys.to_vec()),
        }
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        self.multiplier * self.curve.evaluate(t)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VelocityModule {
    pub enabled: bool,
    pub x: Option<MinMaxCurve>,
    pub y: Option<MinMaxCurve>,
    pub z: Option<MinMaxCurve>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SizeModule {
    pub enabled: bool,
    pub size: Option<MinMaxCurve>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoiseModule {
    pub enabled: bool,
    pub frequency: f32,
    pub strength: Option<MinMaxCurve>,
}

/// What a recording does to a particle system.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectProfile {
    pub start_lifetime: f32,
    pub velocity: VelocityModule,
    pub size: SizeModule,
    pub noise: NoiseModule,
}

impl EffectProfile {
    /// Lifetime and module switches known before any curve exists.
    pub fn from_settings(settings: &RecorderSettings) -> Self {
        let mut profile = Self {
            start_lifetime: settings.recording_length_sec,
            ..Default::default()
        };
        profile.velocity.enabled = settings.channels.velocity;
        profile.size.enabled = settings.channels.size;
        if settings.channels.noise {
            profile.noise.enabled = true;
            profile.noise.frequency = settings.noise_frequency;
        }
        profile
    }

    pub fn curve(&self, channel: Channel) -> Option<&MinMaxCurve> {
        match channel {
            Channel::VelocityX => self.velocity.x.as_ref(),
            Channel::VelocityY => self.velocity.y.as_ref(),
            Channel::VelocityZ => self.velocity.z.as_ref(),
            Channel::Size => self.size.size.as_ref(),
            Channel::NoiseStrength => self.noise.strength.as_ref(),
        }
    }
}

impl CurveSink for EffectProfile {
    fn accept(&mut self, channel: Channel, keys: &[CurveKey]) -> Result<()> {
        let curve = Some(MinMaxCurve::new(keys));
        match channel {
            Channel::VelocityX => self.velocity.x = curve,
            Channel::VelocityY => self.velocity.y = curve,
            Channel::VelocityZ => self.velocity.z = curve,
            Channel::Size => self.size.size = curve,
            Channel::NoiseStrength => self.noise.strength = curve,
        }
        Ok(())
    }
}
