//! One recording session: countdown, capture window, curve emission.

use crate::constants::{PRE_ROLL_FIRST_DELAY_SEC, PRE_ROLL_PERIOD_SEC};
use crate::curves::{build_curves, CurveSet};
use crate::error::{AuthoringError, Result};
use crate::output::{CurveSink, EffectProfile};
use crate::recorder::{Recorder, TickOutcome};
use crate::scheduler::{RepeatingTimer, TimerControl};
use crate::series::MotionSeries;
use crate::settings::RecorderSettings;
use crate::tracking::TrackedPointSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PreRoll { remaining: u32 },
    Recording,
    Finished,
}

pub struct Session {
    settings: RecorderSettings,
    state: SessionState,
    countdown: u32,
    pre_roll_timer: RepeatingTimer,
    record_timer: RepeatingTimer,
    recorder: Option<Recorder>,
    series: Option<MotionSeries>,
    curves: Option<CurveSet>,
    profile: EffectProfile,
}

impl Session {
    /// Validates everything up front so a bad configuration never records.
    pub fn new(settings: RecorderSettings, point_count: usize) -> Result<Self> {
        let recorder = Recorder::new(settings.clone(), point_count)?;
        Ok(Self {
            countdown: settings.pre_roll_seconds,
            pre_roll_timer: RepeatingTimer::new(PRE_ROLL_FIRST_DELAY_SEC, PRE_ROLL_PERIOD_SEC),
            record_timer: RepeatingTimer::new(0.0, settings.tick_interval_sec),
            profile: EffectProfile::from_settings(&settings),
            recorder: Some(recorder),
            series: None,
            curves: None,
            state: SessionState::Idle,
            settings,
        })
    }

    pub fn settings(&self) -> &RecorderSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Live series while recording, final series afterwards.
    pub fn series(&self) -> Option<&MotionSeries> {
        match &self.recorder {
            Some(r) => Some(r.series()),
            None => self.series.as_ref(),
        }
    }

    pub fn curves(&self) -> Option<&CurveSet> {
        self.curves.as_ref()
    }

    pub fn profile(&self) -> &EffectProfile {
        &self.profile
    }

    pub fn start(&mut self) {
        if self.state != SessionState::Idle {
            log::warn!("[session] start ignored in state {:?}", self.state);
            return;
        }
        if self.countdown == 0 {
            self.begin_recording();
            return;
        }
        self.pre_roll_timer.start();
        self.state = SessionState::PreRoll {
            remaining: self.countdown,
        };
    }

    fn begin_recording(&mut self) {
        self.pre_roll_timer.stop();
        log::info!("[session] started recording");
        self.record_timer.start();
        self.state = SessionState::Recording;
    }

    /// Move the session forward by `dt_sec` of wall or simulated time.
    pub fn advance(
        &mut self,
        dt_sec: f64,
        source: &mut dyn TrackedPointSource,
        sink: &mut dyn CurveSink,
    ) -> Result<SessionState> {
        if let SessionState::PreRoll { .. } = self.state {
            let countdown = &mut self.countdown;
            self.pre_roll_timer.advance(dt_sec, || {
                *countdown = countdown.saturating_sub(1);
                log::info!("[preroll] {}!", countdown);
                if *countdown == 0 {
                    TimerControl::Stop
                } else {
                    TimerControl::Continue
                }
            });
            if self.countdown == 0 {
                let carry = self.pre_roll_timer.overshoot_sec();
                self.begin_recording();
                // the first tick lands on the same step that ends the countdown,
                // and time past that point still counts towards later ticks
                return self.advance_recording(carry, source, sink);
            }
            self.state = SessionState::PreRoll {
                remaining: self.countdown,
            };
            return Ok(self.state);
        }
        if self.state == SessionState::Recording {
            return self.advance_recording(dt_sec, source, sink);
        }
        Ok(self.state)
    }

    fn advance_recording(
        &mut self,
        dt_sec: f64,
        source: &mut dyn TrackedPointSource,
        sink: &mut dyn CurveSink,
    ) -> Result<SessionState> {
        let Some(recorder) = self.recorder.as_mut() else {
            return Err(AuthoringError::RecordingFinished);
        };
        let mut failure = None;
        let mut done = false;
        self.record_timer
            .advance(dt_sec, || match recorder.tick(&mut *source) {
                Ok(TickOutcome::Continue) => TimerControl::Continue,
                Ok(TickOutcome::Finished) => {
                    done = true;
                    TimerControl::Stop
                }
                Err(e) => {
                    failure = Some(e);
                    TimerControl::Stop
                }
            });
        if let Some(e) = failure {
            log::error!("[session] recording failed: {}", e);
            return Err(e);
        }
        if done {
            self.finalize(sink)?;
        }
        Ok(self.state)
    }

    /// Stop capturing now and emit curves from whatever was recorded.
    pub fn stop_early(&mut self, sink: &mut dyn CurveSink) -> Result<()> {
        match self.state {
            SessionState::Finished => Ok(()),
            _ => {
                if let Some(r) = self.recorder.as_mut() {
                    r.stop();
                }
                self.finalize(sink)
            }
        }
    }

    fn finalize(&mut self, sink: &mut dyn CurveSink) -> Result<()> {
        self.pre_roll_timer.stop();
        self.record_timer.stop();
        let Some(recorder) = self.recorder.as_ref() else {
            return Err(AuthoringError::RecordingFinished);
        };
        log::info!(
            "[session] stopped recording after {} tick(s)",
            recorder.series().len()
        );
        // the recorder stays in place until the curves exist
        let curves = build_curves(recorder.series(), &self.settings)?;
        if let Some(reason) = curves.degenerate() {
            log::warn!("[session] {}", reason);
        }
        curves.emit(&mut self.profile)?;
        self.series = self.recorder.take().map(Recorder::into_series);
        self.curves = Some(curves);
        self.state = SessionState::Finished;
        self.emit_curves(sink)
    }

    /// Send the finished curves to `sink`. Finalize does this once; call it
    /// again to retry after a sink failure.
    pub fn emit_curves(&self, sink: &mut dyn CurveSink) -> Result<()> {
        let Some(curves) = self.curves.as_ref() else {
            return Ok(());
        };
        curves.emit(sink).map_err(|e| {
            log::error!("[session] curve sink failed: {}", e);
            e
        })
    }
}
