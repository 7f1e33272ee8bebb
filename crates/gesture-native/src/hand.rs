use gesture_core::{Result, Snapshot, TrackedPointSource};
use glam::Vec3;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::str::FromStr;

const FINGER_LABELS: [&str; 5] = ["thumb", "index", "middle", "ring", "pinky"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Still,
    Swipe,
    Spread,
    Swirl,
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "still" => Ok(Gesture::Still),
            "swipe" => Ok(Gesture::Swipe),
            "spread" => Ok(Gesture::Spread),
            "swirl" => Ok(Gesture::Swirl),
            other => Err(format!(
                "unknown gesture '{other}' (expected still, swipe, spread or swirl)"
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    pub gesture: Gesture,
    pub palm: [f32; 3],
    pub finger_radius: f32, // palm centre to fingertip
    pub period_sec: f32,    // one full cycle of the gesture
    pub amplitude: f32,
    pub jitter: f32, // uniform noise added per axis per tick
    pub seed: u64,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            gesture: Gesture::Swirl,
            palm: [0.0, 1.2, 0.3],
            finger_radius: 0.08,
            period_sec: 2.0,
            amplitude: 0.25,
            jitter: 0.002,
            seed: 42,
        }
    }
}

/// Five fingertips following a scripted gesture, sampled on a fixed tick.
pub struct SyntheticHand {
    config: HandConfig,
    tick_sec: f32,
    tick: u64,
    rngs: Vec<StdRng>,
}

impl SyntheticHand {
    pub fn new(config: HandConfig, tick_sec: f32) -> Self {
        // Derive per-finger RNGs from the base seed so fingers jitter independently
        let rngs = (0..FINGER_LABELS.len())
            .map(|i| {
                let mix = config.seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                StdRng::seed_from_u64(mix)
            })
            .collect();
        Self {
            config,
            tick_sec,
            tick: 0,
            rngs,
        }
    }

    fn palm_at(&self, t: f32) -> Vec3 {
        let base = Vec3::from(self.config.palm);
        let phase = TAU * t / self.config.period_sec.max(1e-3);
        let a = self.config.amplitude;
        match self.config.gesture {
            Gesture::Still | Gesture::Spread => base,
            Gesture::Swipe => base + Vec3::new(a * phase.sin(), 0.0, 0.0),
            Gesture::Swirl => {
                base + Vec3::new(a * phase.cos(), a * 0.5 * phase.sin(), a * phase.sin())
            }
        }
    }

    fn radius_at(&self, t: f32) -> f32 {
        let r = self.config.finger_radius;
        match self.config.gesture {
            Gesture::Spread => {
                let phase = TAU * t / self.config.period_sec.max(1e-3);
                r * (1.0 + 1.5 * (0.5 - 0.5 * phase.cos()))
            }
            _ => r,
        }
    }
}

impl TrackedPointSource for SyntheticHand {
    fn labels(&self) -> Vec<String> {
        FINGER_LABELS.iter().map(|s| s.to_string()).collect()
    }

    fn point_count(&self) -> usize {
        FINGER_LABELS.len()
    }

    fn sample(&mut self, out: &mut Snapshot) -> Result<()> {
        let t = self.tick as f32 * self.tick_sec;
        let palm = self.palm_at(t);
        let radius = self.radius_at(t);
        let jitter = self.config.jitter;
        out.clear();
        for (i, rng) in self.rngs.iter_mut().enumerate() {
            // fingertips fan across a half circle in front of the palm
            let angle = std::f32::consts::PI * i as f32 / (FINGER_LABELS.len() - 1) as f32;
            let tip = palm + Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
            let noise = if jitter > 0.0 {
                Vec3::new(
                    rng.gen_range(-jitter..=jitter),
                    rng.gen_range(-jitter..=jitter),
                    rng.gen_range(-jitter..=jitter),
                )
            } else {
                Vec3::ZERO
            };
            out.push(tip + noise);
        }
        self.tick += 1;
        Ok(())
    }
}
