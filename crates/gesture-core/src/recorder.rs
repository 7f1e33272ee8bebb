use glam::Vec3;

use crate::constants::MAX_PREALLOCATED_TICKS;
use crate::error::{AuthoringError, Result};
use crate::series::MotionSeries;
use crate::settings::{CentroidMode, RecorderSettings};
use crate::tracking::{Snapshot, TrackedPointSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Finished,
}

/// Sum of the positions divided by the mode's divisor.
pub fn centroid(positions: &[Vec3], mode: CentroidMode) -> Result<Vec3> {
    if positions.is_empty() {
        return Err(AuthoringError::EmptyTrackedPointSet);
    }
    let divisor = mode.divisor(positions.len());
    if divisor == 0 {
        return Err(AuthoringError::InvalidSettings(format!(
            "{:?} centroid of a single tracked point",
            mode
        )));
    }
    let sum: Vec3 = positions.iter().copied().sum();
    Ok(sum / divisor as f32)
}

/// Distance between the first tracked point and `index`.
pub fn expansion(positions: &[Vec3], index: usize) -> Result<f32> {
    let Some(first) = positions.first() else {
        return Err(AuthoringError::EmptyTrackedPointSet);
    };
    if index == 0 || index >= positions.len() {
        return Err(AuthoringError::SizeNodeOutOfRange {
            index,
            count: positions.len(),
        });
    }
    Ok(first.distance(positions[index]))
}

/// Accumulates one motion series over a fixed number of ticks.
pub struct Recorder {
    settings: RecorderSettings,
    point_count: usize,
    series: MotionSeries,
    ticks_left: usize,
    remaining_sec: f32,
    scratch: Snapshot,
    finished: bool,
}

impl Recorder {
    pub fn new(settings: RecorderSettings, point_count: usize) -> Result<Self> {
        settings.validate_for(point_count)?;
        let ticks = settings.tick_budget();
        log::info!(
            "[recorder] {} point(s), {:.2}s at {:.2}s per tick ({} ticks)",
            point_count,
            settings.recording_length_sec,
            settings.tick_interval_sec,
            ticks
        );
        Ok(Self {
            remaining_sec: settings.recording_length_sec,
            series: MotionSeries::with_capacity(ticks.min(MAX_PREALLOCATED_TICKS)),
            ticks_left: ticks,
            settings,
            point_count,
            scratch: Snapshot::new(),
            finished: false,
        })
    }

    pub fn settings(&self) -> &RecorderSettings {
        &self.settings
    }

    pub fn series(&self) -> &MotionSeries {
        &self.series
    }

    pub fn into_series(self) -> MotionSeries {
        self.series
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn remaining_sec(&self) -> f32 {
        self.remaining_sec
    }

    pub fn ticks_left(&self) -> usize {
        self.ticks_left
    }

    /// Poll `source` once and record the result.
    pub fn tick(&mut self, source: &mut dyn TrackedPointSource) -> Result<TickOutcome> {
        if self.finished {
            return Err(AuthoringError::RecordingFinished);
        }
        let mut snapshot = std::mem::take(&mut self.scratch);
        let sampled = source
            .sample(&mut snapshot)
            .and_then(|_| self.record_snapshot(&snapshot));
        self.scratch = snapshot;
        sampled
    }

    /// Reduce one snapshot into the series and count down the window.
    pub fn record_snapshot(&mut self, positions: &[Vec3]) -> Result<TickOutcome> {
        if self.finished {
            return Err(AuthoringError::RecordingFinished);
        }
        if positions.is_empty() {
            return Err(AuthoringError::EmptyTrackedPointSet);
        }
        if positions.len() != self.point_count {
            return Err(AuthoringError::PointCountChanged {
                expected: self.point_count,
                actual: positions.len(),
            });
        }
        // Both reductions run before the push so a bad snapshot leaves no trace
        let avg = centroid(positions, self.settings.centroid_mode)?;
        let spread = expansion(positions, self.settings.size_node_index)?;
        self.series.push(avg, spread);

        self.remaining_sec -= self.settings.tick_interval_sec;
        self.ticks_left = self.ticks_left.saturating_sub(1);
        log::debug!(
            "[recorder] tick {} avg=({:.3},{:.3},{:.3}) spread={:.3}",
            self.series.len(),
            avg.x,
            avg.y,
            avg.z,
            spread
        );
        if self.ticks_left == 0 {
            self.finished = true;
            return Ok(TickOutcome::Finished);
        }
        Ok(TickOutcome::Continue)
    }

    /// End the window early; whatever was recorded is kept.
    pub fn stop(&mut self) {
        if !self.finished {
            log::info!(
                "[recorder] stopped early after {} tick(s)",
                self.series.len()
            );
        }
        self.finished = true;
    }
}
