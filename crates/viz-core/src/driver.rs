//! Render driver: owns all mutable scene state and turns host callbacks into
//! ordered, synchronous updates.
//!
//! The host calls [`Driver::tick`] from its frame facility and re-arms the
//! callback only while the tick reports [`TickOutcome::Continue`]. Every input
//! event becomes a [`Command`] passed to [`Driver::dispatch`]. Both run on one
//! thread, so a command can never interleave with a frame.

use crate::audio::{AudioTrigger, FrequencySource, Playback, PlaybackAction};
use crate::bloom::BloomSettings;
use crate::camera::Camera;
use crate::input::{PointerOffset, Viewport};
use crate::params::{BloomField, ColorChannel, Parameters};
use crate::uniforms::UniformState;
use instant::Instant;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SetColorParam { channel: ColorChannel, value: f32 },
    SetBloomParam { field: BloomField, value: f32 },
    AudioLoaded { duration_sec: f64 },
    AudioLoadFailed,
    PlayClicked,
    PauseClicked,
    PlaybackEnded,
    PointerMoved(PointerOffset),
    Resized { width: u32, height: u32 },
}

/// Everything a compositor needs to draw one frame.
pub struct FrameView<'a> {
    pub uniforms: &'a UniformState,
    pub camera: &'a Camera,
    pub bloom: &'a BloomSettings,
}

/// Scene + post-processing renderer.
pub trait Compositor {
    type Error: fmt::Display;

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error>;
    /// Resize the surface and every internal buffer.
    fn set_size(&mut self, width: u32, height: u32);
}

/// Seconds since the loop started.
pub trait FrameClock {
    fn elapsed_secs(&mut self) -> f32;
}

/// Wall clock that starts on the first reading.
#[derive(Default)]
pub struct InstantClock {
    start: Option<Instant>,
}

impl FrameClock for InstantClock {
    fn elapsed_secs(&mut self) -> f32 {
        let start = *self.start.get_or_insert_with(Instant::now);
        start.elapsed().as_secs_f32()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Halt,
}

/// Scene state shared by the frame tick and the command handlers.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub params: Parameters,
    pub uniforms: UniformState,
    pub bloom: BloomSettings,
    pub camera: Camera,
    pub pointer: PointerOffset,
    pub viewport: Viewport,
    pub trigger: AudioTrigger,
}

impl AppContext {
    pub fn new(params: Parameters, viewport: Viewport) -> Self {
        Self {
            params,
            uniforms: UniformState::default(),
            bloom: BloomSettings::from_params(&params),
            camera: Camera::new(viewport.aspect()),
            pointer: PointerOffset::default(),
            viewport,
            trigger: AudioTrigger::default(),
        }
    }
}

pub struct Driver<C, A, K> {
    ctx: AppContext,
    compositor: C,
    audio: A,
    clock: K,
    state: DriverState,
    frames: u64,
}

impl<C, A, K> Driver<C, A, K>
where
    C: Compositor,
    A: FrequencySource + Playback,
    K: FrameClock,
{
    pub fn new(params: Parameters, viewport: Viewport, compositor: C, audio: A, clock: K) -> Self {
        Self {
            ctx: AppContext::new(params, viewport),
            compositor,
            audio,
            clock,
            state: DriverState::Idle,
            frames: 0,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start(&mut self) {
        match self.state {
            DriverState::Idle => {
                self.state = DriverState::Running;
                log::info!("[driver] running");
            }
            DriverState::Running => {}
            DriverState::Stopped => log::warn!("[driver] start after stop ignored"),
        }
    }

    /// Stop the loop for good. The next tick reports `Halt`.
    pub fn stop(&mut self) {
        if self.state != DriverState::Stopped {
            self.state = DriverState::Stopped;
            if self.ctx.trigger.is_playing() {
                let now = self.audio.current_time();
                self.ctx.trigger.on_stopped(now);
                self.audio.stop();
            }
            log::info!("[driver] stopped after {} frames", self.frames);
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != DriverState::Running {
            return TickOutcome::Halt;
        }
        if self.audio.take_ended() {
            self.dispatch(Command::PlaybackEnded);
        }

        self.ctx.camera.follow_pointer(self.ctx.pointer);

        let elapsed = self.clock.elapsed_secs();
        let frequency = self.audio.average_frequency();
        self.ctx.uniforms.sync(&self.ctx.params, elapsed, frequency);

        let frame = FrameView {
            uniforms: &self.ctx.uniforms,
            camera: &self.ctx.camera,
            bloom: &self.ctx.bloom,
        };
        if let Err(e) = self.compositor.render(&frame) {
            log::error!("render error: {e}");
        }
        self.frames += 1;
        TickOutcome::Continue
    }

    pub fn dispatch(&mut self, cmd: Command) {
        if self.state == DriverState::Stopped
            && matches!(
                cmd,
                Command::AudioLoaded { .. } | Command::PlayClicked | Command::PauseClicked
            )
        {
            log::debug!("[driver] {cmd:?} after stop ignored");
            return;
        }
        match cmd {
            Command::SetColorParam { channel, value } => {
                self.ctx.params.set_color(channel, value);
                self.ctx.uniforms.set_color(channel, value);
            }
            Command::SetBloomParam { field, value } => {
                self.ctx.params.set_bloom(field, value);
                self.ctx.bloom.set(field, value);
            }
            Command::AudioLoaded { duration_sec } => self.ctx.trigger.on_loaded(duration_sec),
            Command::AudioLoadFailed => {
                log::warn!("[audio] no playback available");
                self.ctx.trigger.on_load_failed();
            }
            Command::PlayClicked => {
                let now = self.audio.current_time();
                if let Some(action) = self.ctx.trigger.on_click(now) {
                    self.apply_playback(action);
                }
            }
            Command::PauseClicked => {
                let now = self.audio.current_time();
                if let Some(action) = self.ctx.trigger.on_double_click(now) {
                    self.apply_playback(action);
                }
            }
            Command::PlaybackEnded => self.ctx.trigger.on_ended(),
            Command::PointerMoved(offset) => self.ctx.pointer = offset,
            Command::Resized { width, height } => self.resize(width, height),
        }
    }

    fn apply_playback(&mut self, action: PlaybackAction) {
        match action {
            PlaybackAction::Start { offset_sec } => {
                log::info!("[audio] play from {offset_sec:.2}s");
                if !self.audio.start(offset_sec) {
                    log::warn!("[audio] playback did not start");
                    self.ctx.trigger.on_start_failed();
                }
            }
            PlaybackAction::Stop => {
                log::info!("[audio] pause at {:.2}s", self.ctx.trigger.progress_sec());
                self.audio.stop();
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let vp = Viewport::new(width, height);
        self.ctx.viewport = vp;
        self.ctx.camera.aspect = vp.aspect();
        self.ctx.camera.update_projection_matrix();
        self.compositor.set_size(vp.width, vp.height);
    }
}
