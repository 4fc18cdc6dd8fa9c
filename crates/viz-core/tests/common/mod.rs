// Shared mock host used by the driver tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use viz_core::*;

#[derive(Default)]
pub struct MockCompositor {
    pub size: Option<(u32, u32)>,
    pub renders: usize,
    pub last_time: Option<f32>,
    pub last_frequency: Option<f32>,
    pub last_bloom: Option<BloomSettings>,
    pub last_eye: Option<glam::Vec3>,
    pub fail: bool,
}

impl Compositor for MockCompositor {
    type Error = String;

    fn render(&mut self, frame: &FrameView<'_>) -> std::result::Result<(), String> {
        self.renders += 1;
        self.last_time = Some(frame.uniforms.time);
        self.last_frequency = Some(frame.uniforms.frequency);
        self.last_bloom = Some(*frame.bloom);
        self.last_eye = Some(frame.camera.eye);
        if self.fail {
            return Err("surface lost".to_string());
        }
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }
}

#[derive(Default)]
pub struct MockAudio {
    pub frequency: f32,
    pub now: f64,
    pub starts: Vec<f64>,
    pub stops: usize,
    pub ended: bool,
    pub fail_start: bool,
}

impl FrequencySource for MockAudio {
    fn average_frequency(&mut self) -> f32 {
        self.frequency
    }
}

impl Playback for MockAudio {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn start(&mut self, offset_sec: f64) -> bool {
        if self.fail_start {
            return false;
        }
        self.starts.push(offset_sec);
        true
    }

    fn stop(&mut self) {
        self.stops += 1;
    }

    fn take_ended(&mut self) -> bool {
        std::mem::take(&mut self.ended)
    }
}

/// Clock whose reading the test controls through a shared cell.
#[derive(Clone, Default)]
pub struct ManualClock(pub Rc<Cell<f32>>);

impl FrameClock for ManualClock {
    fn elapsed_secs(&mut self) -> f32 {
        self.0.get()
    }
}

pub type TestDriver = Driver<MockCompositor, MockAudio, ManualClock>;

pub fn make_driver() -> (TestDriver, Rc<Cell<f32>>) {
    let clock = ManualClock::default();
    let handle = clock.0.clone();
    let driver = Driver::new(
        Parameters::default(),
        Viewport::new(800, 600),
        MockCompositor::default(),
        MockAudio::default(),
        clock,
    );
    (driver, handle)
}

pub fn running_driver() -> (TestDriver, Rc<Cell<f32>>) {
    let (mut d, h) = make_driver();
    d.start();
    (d, h)
}
