// Host-side tests for the frame driver and command dispatch, run against a
// mock compositor, audio output and clock.

mod common;

use common::*;
use viz_core::*;

#[test]
fn idle_driver_does_not_render() {
    let (mut d, _) = make_driver();
    assert_eq!(d.state(), DriverState::Idle);
    assert_eq!(d.tick(), TickOutcome::Halt);
    assert_eq!(d.compositor().renders, 0);
}

#[test]
fn running_tick_renders_once_and_continues() {
    let (mut d, clock) = running_driver();
    clock.set(0.5);
    d.audio_mut().frequency = 12.5;
    assert_eq!(d.tick(), TickOutcome::Continue);
    assert_eq!(d.compositor().renders, 1);
    assert_eq!(d.compositor().last_time, Some(0.5));
    assert_eq!(d.compositor().last_frequency, Some(12.5));
    assert_eq!(d.frames(), 1);
}

#[test]
fn first_tick_copies_parameters_into_uniforms() {
    let (mut d, _) = running_driver();
    // Uniforms start with a dim red until the first frame
    assert_eq!(d.context().uniforms.red, 0.1);
    d.tick();
    let u = d.context().uniforms;
    assert_eq!((u.red, u.green, u.blue), (1.0, 1.0, 1.0));
}

#[test]
fn color_command_updates_uniform_immediately() {
    let (mut d, _) = running_driver();
    d.tick();
    let before = d.context().uniforms;
    d.dispatch(Command::SetColorParam {
        channel: ColorChannel::Green,
        value: 0.3,
    });
    let after = d.context().uniforms;
    assert_eq!(after.green, 0.3);
    assert_eq!(after.red, before.red);
    assert_eq!(after.blue, before.blue);
    assert_eq!(d.context().params.green, 0.3);

    // The next frame keeps the new value
    d.tick();
    assert_eq!(d.context().uniforms.green, 0.3);
}

#[test]
fn bloom_command_updates_only_its_field() {
    for field in [BloomField::Threshold, BloomField::Strength, BloomField::Radius] {
        let (mut d, _) = running_driver();
        let before = d.context().bloom;
        d.dispatch(Command::SetBloomParam { field, value: 2.25 });
        let after = d.context().bloom;
        for other in [BloomField::Threshold, BloomField::Strength, BloomField::Radius] {
            if other == field {
                assert_eq!(after.get(other), 2.25);
            } else {
                assert_eq!(after.get(other), before.get(other), "{other:?} changed");
            }
        }
        d.tick();
        assert_eq!(d.compositor().last_bloom, Some(after));
    }
}

#[test]
fn panel_commands_route_to_the_right_target() {
    let (mut d, _) = running_driver();
    for (i, id) in ParamId::ALL.into_iter().enumerate() {
        let v = 0.1 * (i as f32 + 1.0);
        d.dispatch(id.command(v));
        assert_eq!(id.get(&d.context().params), v);
        match id {
            ParamId::Color(c) => assert_eq!(d.context().uniforms.color(c), v),
            ParamId::Bloom(f) => assert_eq!(d.context().bloom.get(f), v),
        }
    }
}

#[test]
fn resize_keeps_camera_viewport_and_compositor_consistent() {
    let (mut d, _) = running_driver();
    for (w, h) in [(1024, 768), (1, 1), (3840, 1080), (0, 500), (640, 0)] {
        d.dispatch(Command::Resized { width: w, height: h });
        let ctx = d.context();
        let vp = ctx.viewport;
        assert_eq!(vp, Viewport::new(w, h));
        assert_eq!(d.compositor().size, Some((vp.width, vp.height)));
        assert_eq!(ctx.camera.aspect, vp.aspect());
        let mut expected = ctx.camera.clone();
        expected.update_projection_matrix();
        assert_eq!(ctx.camera.projection_matrix(), expected.projection_matrix());
    }
}

#[test]
fn clicks_before_load_are_dropped() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::PlayClicked);
    d.dispatch(Command::PauseClicked);
    assert!(d.audio().starts.is_empty());
    assert_eq!(d.audio().stops, 0);
    assert_eq!(d.context().trigger.state(), TriggerState::Loading);

    // Loading later does not replay the dropped click
    d.dispatch(Command::AudioLoaded { duration_sec: 30.0 });
    assert!(d.audio().starts.is_empty());
}

#[test]
fn click_plays_from_zero_and_double_click_pauses() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 30.0 });
    d.audio_mut().now = 3.0;
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.audio().starts, vec![0.0]);

    // A double-click also delivers clicks; those must not restart playback
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.audio().starts.len(), 1);

    d.audio_mut().now = 5.5;
    d.dispatch(Command::PauseClicked);
    assert_eq!(d.audio().stops, 1);
    assert_eq!(d.context().trigger.state(), TriggerState::Paused);
}

#[test]
fn resume_after_pause_continues_from_position() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 30.0 });
    d.audio_mut().now = 1.0;
    d.dispatch(Command::PlayClicked);
    d.audio_mut().now = 4.0;
    d.dispatch(Command::PauseClicked);
    d.audio_mut().now = 10.0;
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.audio().starts, vec![0.0, 3.0]);
}

#[test]
fn failed_load_makes_clicks_inert() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoadFailed);
    d.dispatch(Command::PlayClicked);
    assert!(d.audio().starts.is_empty());
    assert_eq!(d.context().trigger.state(), TriggerState::Unavailable);
}

#[test]
fn playback_end_rewinds_on_next_tick() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 2.0 });
    d.dispatch(Command::PlayClicked);
    d.audio_mut().ended = true;
    d.tick();
    assert_eq!(d.context().trigger.state(), TriggerState::Ready);
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.audio().starts, vec![0.0, 0.0]);
}

#[test]
fn time_uniform_never_decreases() {
    let (mut d, clock) = running_driver();
    let readings = [0.0, 0.016, 0.033, 0.033, 0.02, 0.5, 0.49, 1.0];
    let mut last = f32::MIN;
    for r in readings {
        clock.set(r);
        d.tick();
        let t = d.context().uniforms.time;
        assert!(t >= last, "time went from {last} to {t}");
        last = t;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn pointer_command_steers_next_frame() {
    let (mut d, _) = running_driver();
    let start = d.context().camera.eye;
    d.dispatch(Command::PointerMoved(PointerOffset { x: 4.0, y: 2.0 }));
    assert_eq!(d.context().camera.eye, start);
    d.tick();
    let eye = d.context().camera.eye;
    assert!((eye.x - (start.x + (4.0 - start.x) * 0.05)).abs() < 1e-6);
    assert!((eye.y - (start.y + (-2.0 - start.y) * 0.5)).abs() < 1e-6);
    assert_eq!(d.compositor().last_eye, Some(eye));
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let comp = MockCompositor {
        fail: true,
        ..MockCompositor::default()
    };
    let mut d = Driver::new(
        Parameters::default(),
        Viewport::new(10, 10),
        comp,
        MockAudio::default(),
        ManualClock::default(),
    );
    d.start();
    assert_eq!(d.tick(), TickOutcome::Continue);
    assert_eq!(d.tick(), TickOutcome::Continue);
    assert_eq!(d.compositor().renders, 2);
}

#[test]
fn stop_halts_for_good() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 10.0 });
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.tick(), TickOutcome::Continue);
    d.stop();
    assert_eq!(d.audio().stops, 1);
    assert_eq!(d.tick(), TickOutcome::Halt);
    d.start();
    assert_eq!(d.state(), DriverState::Stopped);
    assert_eq!(d.tick(), TickOutcome::Halt);
    assert_eq!(d.compositor().renders, 1);
}

#[test]
fn stop_pauses_the_trigger() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 10.0 });
    d.dispatch(Command::PlayClicked);
    d.audio_mut().now = 2.5;
    d.stop();
    assert_eq!(d.audio().stops, 1);
    assert_eq!(d.context().trigger.state(), TriggerState::Paused);
    assert_eq!(d.context().trigger.progress_sec(), 2.5);
}

#[test]
fn audio_commands_after_stop_are_ignored() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 10.0 });
    d.stop();
    d.dispatch(Command::PlayClicked);
    d.dispatch(Command::PauseClicked);
    assert!(d.audio().starts.is_empty());
    assert_eq!(d.audio().stops, 0);
    assert_eq!(d.context().trigger.state(), TriggerState::Ready);
}

#[test]
fn load_finishing_after_stop_is_ignored() {
    let (mut d, _) = running_driver();
    d.stop();
    d.dispatch(Command::AudioLoaded { duration_sec: 10.0 });
    assert_eq!(d.context().trigger.state(), TriggerState::Loading);
}

#[test]
fn failed_start_lets_the_next_click_retry() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 10.0 });
    d.audio_mut().fail_start = true;
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.context().trigger.state(), TriggerState::Ready);

    d.audio_mut().fail_start = false;
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.audio().starts, vec![0.0]);
    assert!(d.context().trigger.is_playing());
}

#[test]
fn failed_resume_stays_paused_at_position() {
    let (mut d, _) = running_driver();
    d.dispatch(Command::AudioLoaded { duration_sec: 10.0 });
    d.dispatch(Command::PlayClicked);
    d.audio_mut().now = 3.0;
    d.dispatch(Command::PauseClicked);
    d.audio_mut().fail_start = true;
    d.dispatch(Command::PlayClicked);
    assert_eq!(d.context().trigger.state(), TriggerState::Paused);
    assert_eq!(d.context().trigger.progress_sec(), 3.0);
}
