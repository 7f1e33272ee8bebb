use glam::Vec3;

/// One tick's derived values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeriesEntry {
    pub position: Vec3,
    pub velocity: Vec3,
    pub expansion: f32,
}

/// Append-only record of averaged motion, one entry per tick.
///
/// The three columns always have the same length. Velocity at index 0 is zero;
/// later velocities are the difference between consecutive positions.
#[derive(Clone, Debug, Default)]
pub struct MotionSeries {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    expansions: Vec<f32>,
}

impl MotionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(ticks: usize) -> Self {
        Self {
            positions: Vec::with_capacity(ticks),
            velocities: Vec::with_capacity(ticks),
            expansions: Vec::with_capacity(ticks),
        }
    }

    /// Append a tick; the velocity is derived from the previous position.
    pub fn push(&mut self, position: Vec3, expansion: f32) {
        let velocity = match self.positions.last() {
            Some(prev) => position - *prev,
            None => Vec3::ZERO,
        };
        self.positions.push(position);
        self.velocities.push(velocity);
        self.expansions.push(expansion.max(0.0));
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn expansions(&self) -> &[f32] {
        &self.expansions
    }

    pub fn entry(&self, index: usize) -> Option<SeriesEntry> {
        Some(SeriesEntry {
            position: *self.positions.get(index)?,
            velocity: *self.velocities.get(index)?,
            expansion: *self.expansions.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SeriesEntry> + '_ {
        (0..self.len()).filter_map(move |i| self.entry(i))
    }
}
