const FIRE_SLACK_SEC: f64 = 1e-6;

/// Returned by a timer callback to keep or cancel the timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Stop,
}

/// Single-threaded repeating timer driven by explicit time steps.
///
/// After `start()`, the callback passed to `advance` fires once after
/// `first_delay` and then every `interval`. Several firings can happen in one
/// `advance` when the step is longer than the interval.
#[derive(Clone, Debug)]
pub struct RepeatingTimer {
    first_delay: f64,
    interval: f64,
    until_next: f64,
    running: bool,
    fired: u64,
}

impl RepeatingTimer {
    pub fn new(first_delay_sec: f32, interval_sec: f32) -> Self {
        Self {
            first_delay: first_delay_sec.max(0.0) as f64,
            // a zero interval would spin forever inside advance
            interval: (interval_sec as f64).max(1e-6),
            until_next: 0.0,
            running: false,
            fired: 0,
        }
    }

    pub fn start(&mut self) {
        self.until_next = self.first_delay;
        self.running = true;
        self.fired = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn interval_sec(&self) -> f32 {
        self.interval as f32
    }

    /// Time elapsed past the most recent firing, once the callback has
    /// stopped the timer. Zero while the timer is still waiting.
    pub fn overshoot_sec(&self) -> f64 {
        (-self.until_next).max(0.0)
    }

    /// Move time forward by `dt_sec`, firing `f` for each elapsed period.
    /// Returns the number of firings in this step.
    pub fn advance<F>(&mut self, dt_sec: f64, mut f: F) -> u32
    where
        F: FnMut() -> TimerControl,
    {
        if !self.running {
            return 0;
        }
        let mut fired = 0u32;
        self.until_next -= dt_sec.max(0.0);
        // intervals arrive as f32; the slack keeps 0.2f32 steps on their boundary
        while self.running && self.until_next <= FIRE_SLACK_SEC {
            fired += 1;
            self.fired += 1;
            if f() == TimerControl::Stop {
                self.running = false;
                break;
            }
            self.until_next += self.interval;
        }
        fired
    }
}
