//! Recording and curve-fitting parameters.
//!
//! `RecorderSettings` is deserializable with every field optional, so a
//! partial config file only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{AuthoringError, Result};

/// How the per-tick average of the tracked points is divided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidMode {
    /// Sum divided by `count - 1`, as authored effects have always been built.
    Legacy,
    /// Sum divided by `count`.
    TrueMean,
}

impl CentroidMode {
    pub fn divisor(self, count: usize) -> usize {
        match self {
            CentroidMode::Legacy => count.saturating_sub(LEGACY_CENTROID_DIVISOR_OFFSET),
            CentroidMode::TrueMean => count,
        }
    }
}

/// How the noise strength key is derived from positions around a slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// Component sum of `position[s + 1] - position[s - 1]`.
    LocalDelta,
    /// Component sum of `position[(s + 1) - (s - 1)]`, i.e. an index difference.
    IndexParity,
}

/// Where slice `i` of `k` lands in a series of length `len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlicePlacement {
    /// `floor(len * i / k)`
    Proportional,
    /// `(len / k) * i` with `len / k` truncated first
    Truncated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelToggles {
    pub velocity: bool,
    pub size: bool,
    pub noise: bool,
}

impl Default for ChannelToggles {
    fn default() -> Self {
        Self {
            velocity: true,
            size: true,
            noise: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderSettings {
    pub recording_length_sec: f32,
    pub tick_interval_sec: f32,
    pub pre_roll_seconds: u32,
    pub size_node_index: usize,
    pub interpolation_slices: usize,
    pub simulation_scale: f32,
    pub size_over_lifetime_scale: f32,
    pub noise_scale: f32,
    pub noise_frequency: f32,
    pub channels: ChannelToggles,
    pub centroid_mode: CentroidMode,
    pub noise_mode: NoiseMode,
    pub slice_placement: SlicePlacement,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            recording_length_sec: RECORDING_LENGTH_SEC,
            tick_interval_sec: TICK_INTERVAL_SEC,
            pre_roll_seconds: PRE_ROLL_SECONDS,
            size_node_index: SIZE_NODE_INDEX,
            interpolation_slices: INTERPOLATION_SLICES,
            simulation_scale: SIMULATION_SCALE,
            size_over_lifetime_scale: SIZE_OVER_LIFETIME_SCALE,
            noise_scale: NOISE_SCALE,
            noise_frequency: NOISE_FREQUENCY,
            channels: ChannelToggles::default(),
            centroid_mode: CentroidMode::Legacy,
            noise_mode: NoiseMode::LocalDelta,
            slice_placement: SlicePlacement::Proportional,
        }
    }
}

impl RecorderSettings {
    /// Check everything that does not depend on the tracked point count.
    pub fn validate(&self) -> Result<()> {
        if !(self.recording_length_sec.is_finite() && self.recording_length_sec > 0.0) {
            return Err(AuthoringError::InvalidSettings(format!(
                "recording length must be positive, got {}",
                self.recording_length_sec
            )));
        }
        if !(self.tick_interval_sec.is_finite() && self.tick_interval_sec > 0.0) {
            return Err(AuthoringError::InvalidSettings(format!(
                "tick interval must be positive, got {}",
                self.tick_interval_sec
            )));
        }
        let ratio = self.recording_length_sec / self.tick_interval_sec;
        if !ratio.is_finite() || ratio > MAX_TICK_BUDGET as f32 {
            return Err(AuthoringError::InvalidSettings(format!(
                "{}s at {}s per tick exceeds {} ticks",
                self.recording_length_sec, self.tick_interval_sec, MAX_TICK_BUDGET
            )));
        }
        if self.interpolation_slices == 0 {
            return Err(AuthoringError::InvalidSettings(
                "interpolation slices must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the size node against a concrete tracked point count.
    pub fn validate_for(&self, point_count: usize) -> Result<()> {
        self.validate()?;
        if point_count == 0 {
            return Err(AuthoringError::EmptyTrackedPointSet);
        }
        if self.size_node_index == 0 || self.size_node_index >= point_count {
            return Err(AuthoringError::SizeNodeOutOfRange {
                index: self.size_node_index,
                count: point_count,
            });
        }
        if self.centroid_mode.divisor(point_count) == 0 {
            return Err(AuthoringError::InvalidSettings(format!(
                "{:?} centroid needs more than {} tracked point(s)",
                self.centroid_mode, point_count
            )));
        }
        Ok(())
    }

    /// Number of ticks needed to cover the recording length, never more than
    /// `MAX_TICK_BUDGET`.
    pub fn tick_budget(&self) -> usize {
        let ratio = self.recording_length_sec / self.tick_interval_sec;
        let rounded = ratio.round();
        let ticks = if (ratio - rounded).abs() < TICK_BUDGET_EPSILON {
            rounded
        } else {
            ratio.ceil()
        };
        (ticks as usize).clamp(1, MAX_TICK_BUDGET)
    }
}
