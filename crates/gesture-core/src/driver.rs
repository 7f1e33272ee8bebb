use instant::Instant;
use std::time::Duration;

use crate::error::Result;
use crate::output::CurveSink;
use crate::session::{Session, SessionState};
use crate::tracking::TrackedPointSource;

/// Runs a session to completion against the wall clock.
pub struct RealtimeDriver {
    pub poll_interval: Duration,
    pub max_duration: Option<Duration>,
}

impl Default for RealtimeDriver {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            max_duration: None,
        }
    }
}

impl RealtimeDriver {
    pub fn run(
        &self,
        session: &mut Session,
        source: &mut dyn TrackedPointSource,
        sink: &mut dyn CurveSink,
    ) -> Result<()> {
        session.start();
        let started = Instant::now();
        let mut last = started;
        while !session.is_finished() {
            std::thread::sleep(self.poll_interval);
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;
            session.advance(dt, source, sink)?;
            if let Some(limit) = self.max_duration {
                if now.duration_since(started) >= limit && !session.is_finished() {
                    log::warn!("[driver] time limit reached; stopping early");
                    session.stop_early(sink)?;
                }
            }
        }
        Ok(())
    }
}

/// Runs a session with fixed simulated steps; no sleeping.
///
/// Returns the simulated time it took to finish.
pub fn run_simulated(
    session: &mut Session,
    source: &mut dyn TrackedPointSource,
    sink: &mut dyn CurveSink,
    step_sec: f64,
) -> Result<f64> {
    session.start();
    let step = step_sec.max(1e-4);
    let mut elapsed = 0.0;
    loop {
        elapsed += step;
        if session.advance(step, source, sink)? == SessionState::Finished {
            return Ok(elapsed);
        }
    }
}
