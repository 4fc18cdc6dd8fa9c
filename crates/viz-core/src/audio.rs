//! Audio seams and the click-to-play state machine.

/// "Current average frequency magnitude" of whatever is playing.
pub trait FrequencySource {
    /// Mean analyser magnitude, 0 when nothing plays.
    fn average_frequency(&mut self) -> f32;
}

/// Start/stop control over the decoded buffer.
pub trait Playback {
    /// Audio clock in seconds.
    fn current_time(&self) -> f64;
    /// Begin playing from `offset_sec` into the buffer. Returns false if no
    /// source could be started.
    fn start(&mut self, offset_sec: f64) -> bool;
    fn stop(&mut self);
    /// True once after the buffer played to its end.
    fn take_ended(&mut self) -> bool;
}

/// Mean of the analyser's byte frequency bins.
pub fn average_frequency(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerState {
    Loading,
    Unavailable,
    Ready,
    Playing { started_at: f64 },
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackAction {
    Start { offset_sec: f64 },
    Stop,
}

/// Click / double-click gating for the soundtrack.
///
/// Clicks before the buffer has loaded are dropped, not queued. Pausing keeps
/// the play position so the next click resumes; reaching the end rewinds.
#[derive(Clone, Debug)]
pub struct AudioTrigger {
    state: TriggerState,
    progress_sec: f64,
    duration_sec: f64,
}

impl Default for AudioTrigger {
    fn default() -> Self {
        Self {
            state: TriggerState::Loading,
            progress_sec: 0.0,
            duration_sec: 0.0,
        }
    }
}

impl AudioTrigger {
    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn progress_sec(&self) -> f64 {
        self.progress_sec
    }

    pub fn duration_sec(&self) -> f64 {
        self.duration_sec
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, TriggerState::Playing { .. })
    }

    pub fn on_loaded(&mut self, duration_sec: f64) {
        if self.state != TriggerState::Loading {
            log::warn!("[audio] buffer loaded twice; ignoring");
            return;
        }
        self.duration_sec = duration_sec.max(0.0);
        self.state = TriggerState::Ready;
        log::info!("[audio] buffer ready ({:.1}s)", self.duration_sec);
    }

    pub fn on_load_failed(&mut self) {
        if self.state == TriggerState::Loading {
            self.state = TriggerState::Unavailable;
        }
    }

    pub fn on_click(&mut self, now: f64) -> Option<PlaybackAction> {
        match self.state {
            TriggerState::Loading | TriggerState::Unavailable => None,
            TriggerState::Playing { .. } => {
                log::warn!("[audio] already playing");
                None
            }
            TriggerState::Ready | TriggerState::Paused => {
                if self.progress_sec >= self.duration_sec {
                    self.progress_sec = 0.0;
                }
                self.state = TriggerState::Playing { started_at: now };
                Some(PlaybackAction::Start {
                    offset_sec: self.progress_sec,
                })
            }
        }
    }

    pub fn on_double_click(&mut self, now: f64) -> Option<PlaybackAction> {
        match self.state {
            TriggerState::Playing { started_at } => {
                self.pause_at(started_at, now);
                Some(PlaybackAction::Stop)
            }
            _ => None,
        }
    }

    /// The host stopped playback for good; keep the position like a pause.
    pub fn on_stopped(&mut self, now: f64) {
        if let TriggerState::Playing { started_at } = self.state {
            self.pause_at(started_at, now);
        }
    }

    /// The host could not start a source; undo the last click.
    pub fn on_start_failed(&mut self) {
        if self.is_playing() {
            self.state = if self.progress_sec > 0.0 {
                TriggerState::Paused
            } else {
                TriggerState::Ready
            };
        }
    }

    fn pause_at(&mut self, started_at: f64, now: f64) {
        let played = (now - started_at).max(0.0);
        self.progress_sec = (self.progress_sec + played).min(self.duration_sec);
        self.state = TriggerState::Paused;
    }

    pub fn on_ended(&mut self) {
        if self.is_playing() {
            self.state = TriggerState::Ready;
            self.progress_sec = 0.0;
        }
    }
}
