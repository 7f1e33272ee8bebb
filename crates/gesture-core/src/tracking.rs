use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::SNAPSHOT_INLINE_POINTS;
use crate::error::Result;

/// Positions of every tracked point at one tick, in source order.
pub type Snapshot = SmallVec<[Vec3; SNAPSHOT_INLINE_POINTS]>;

/// Something that can report the current position of N labelled points.
///
/// Sampling must not depend on recorder state; the recorder polls once per
/// tick and reduces the snapshot immediately.
pub trait TrackedPointSource {
    fn labels(&self) -> Vec<String>;

    fn point_count(&self) -> usize;

    /// Overwrite `out` with the current positions.
    fn sample(&mut self, out: &mut Snapshot) -> Result<()>;
}

/// Points that never move. Useful for calibration and tests.
#[derive(Clone, Debug)]
pub struct FixedPoints {
    labels: Vec<String>,
    positions: Vec<Vec3>,
}

impl FixedPoints {
    pub fn new(positions: Vec<Vec3>) -> Self {
        let labels = (0..positions.len()).map(|i| format!("node{i}")).collect();
        Self { labels, positions }
    }

    pub fn with_labels(labels: Vec<String>, positions: Vec<Vec3>) -> Self {
        Self { labels, positions }
    }

    pub fn set_position(&mut self, index: usize, pos: Vec3) {
        if let Some(p) = self.positions.get_mut(index) {
            *p = pos;
        }
    }
}

impl TrackedPointSource for FixedPoints {
    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn point_count(&self) -> usize {
        self.positions.len()
    }

    fn sample(&mut self, out: &mut Snapshot) -> Result<()> {
        out.clear();
        out.extend(self.positions.iter().copied());
        Ok(())
    }
}

/// Closure-backed source: `f(tick, point_index)` gives each position.
pub struct FnPoints<F> {
    labels: Vec<String>,
    tick: u64,
    f: F,
}

impl<F> FnPoints<F>
where
    F: FnMut(u64, usize) -> Vec3,
{
    pub fn new(point_count: usize, f: F) -> Self {
        let labels = (0..point_count).map(|i| format!("node{i}")).collect();
        Self { labels, tick: 0, f }
    }

    pub fn ticks_sampled(&self) -> u64 {
        self.tick
    }
}

impl<F> TrackedPointSource for FnPoints<F>
where
    F: FnMut(u64, usize) -> Vec3,
{
    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn point_count(&self) -> usize {
        self.labels.len()
    }

    fn sample(&mut self, out: &mut Snapshot) -> Result<()> {
        out.clear();
        for i in 0..self.labels.len() {
            out.push((self.f)(self.tick, i));
        }
        self.tick += 1;
        Ok(())
    }
}
