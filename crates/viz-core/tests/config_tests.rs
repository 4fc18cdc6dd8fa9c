// Host-side tests for configuration overrides and shader sources.

use viz_core::*;

#[test]
fn defaults_match_the_page() {
    let cfg = VisualizerConfig::default();
    assert_eq!(cfg.audio_src, "./assets/rang.mp3");
    assert_eq!(cfg.fft_size, 32);
    assert_eq!(cfg.mesh_radius, 4.0);
    assert_eq!(cfg.mesh_detail, 30);
    assert_eq!(cfg.canvas_id, "app-canvas");
}

#[test]
fn overrides_apply_in_order() {
    let cfg = VisualizerConfig::default()
        .with_overrides([
            ("audio-src", "/music/track.ogg"),
            ("fft-size", "256"),
            ("mesh-detail", "8"),
            ("msaa", "1"),
        ])
        .expect("valid overrides");
    assert_eq!(cfg.audio_src, "/music/track.ogg");
    assert_eq!(cfg.fft_size, 256);
    assert_eq!(cfg.mesh_detail, 8);
    assert_eq!(cfg.msaa_samples, 1);
}

#[test]
fn fft_size_must_be_a_supported_power_of_two() {
    let mut cfg = VisualizerConfig::default();
    for bad in ["31", "48", "16", "65536", "x"] {
        let err = cfg.apply_override("fft-size", bad).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }), "{bad}");
    }
    assert_eq!(cfg.fft_size, 32);
}

#[test]
fn invalid_values_are_reported_with_key() {
    let mut cfg = VisualizerConfig::default();
    let err = cfg.apply_override("mesh-radius", "-1").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("mesh-radius"), "{msg}");
    assert!(msg.contains("-1"), "{msg}");
    assert!(cfg.apply_override("msaa", "2").is_err());
    assert!(cfg.apply_override("mesh-detail", "65").is_err());
}

#[test]
fn unknown_keys_are_rejected() {
    let mut cfg = VisualizerConfig::default();
    let err = cfg.apply_override("colour", "red").unwrap_err();
    assert!(matches!(err, Error::UnknownConfigKey(ref k) if k == "colour"));
    for key in OVERRIDE_KEYS {
        assert!(!matches!(
            cfg.clone().apply_override(key, "1"),
            Err(Error::UnknownConfigKey(_))
        ));
    }
}

#[test]
fn bundled_shaders_expose_entry_points() {
    let s = ShaderSources::bundled();
    assert!(s.vertex.contains("fn vs_main"));
    assert!(s.fragment.contains("fn fs_main"));
    assert!(POST_WGSL.contains("fn fs_bright"));
    assert!(POST_WGSL.contains("fn fs_blur"));
    assert!(POST_WGSL.contains("fn fs_composite"));
}

#[test]
fn blank_shader_override_is_fatal() {
    let err = ShaderSources::with_overrides(Some("  \n".into()), None).unwrap_err();
    assert!(matches!(err, Error::MissingShader("vertex")));
    let err = ShaderSources::with_overrides(None, Some(String::new())).unwrap_err();
    assert!(matches!(err, Error::MissingShader("fragment")));
}

#[test]
fn missing_override_keeps_bundled_stage() {
    let s = ShaderSources::with_overrides(None, Some("custom".into())).expect("valid");
    assert_eq!(s.vertex, SCENE_VERTEX_WGSL);
    assert_eq!(s.fragment, "custom");
}
