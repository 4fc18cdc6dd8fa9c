//! Startup configuration.
//!
//! Defaults come from `constants.rs`; the web frontend overrides individual
//! keys from `data-*` attributes on the canvas element.

use crate::constants::*;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub audio_src: String,
    pub fft_size: u32,
    pub mesh_radius: f32,
    pub mesh_detail: u32,
    pub msaa_samples: u32,
    pub canvas_id: String,
    pub panel_id: String,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            audio_src: AUDIO_SRC.to_string(),
            fft_size: ANALYSER_FFT_SIZE,
            mesh_radius: MESH_RADIUS,
            mesh_detail: MESH_DETAIL,
            msaa_samples: 4,
            canvas_id: CANVAS_ID.to_string(),
            panel_id: PANEL_ID.to_string(),
        }
    }
}

/// Keys accepted by [`VisualizerConfig::apply_override`].
pub const OVERRIDE_KEYS: &[&str] = &[
    "audio-src",
    "fft-size",
    "mesh-radius",
    "mesh-detail",
    "msaa",
    "panel-id",
];

impl VisualizerConfig {
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let invalid = |reason: &'static str| Error::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };
        match key {
            "audio-src" => {
                if value.is_empty() {
                    return Err(invalid("expected a URL"));
                }
                self.audio_src = value.to_string();
            }
            "fft-size" => {
                let n: u32 = value.parse().map_err(|_| invalid("expected an integer"))?;
                // WebAudio only accepts powers of two in this range
                if !n.is_power_of_two() || !(32..=32768).contains(&n) {
                    return Err(invalid("expected a power of two in 32..=32768"));
                }
                self.fft_size = n;
            }
            "mesh-radius" => {
                let r: f32 = value.parse().map_err(|_| invalid("expected a number"))?;
                if !(r.is_finite() && r > 0.0) {
                    return Err(invalid("expected a positive number"));
                }
                self.mesh_radius = r;
            }
            "mesh-detail" => {
                let d: u32 = value.parse().map_err(|_| invalid("expected an integer"))?;
                if d > MESH_DETAIL_MAX {
                    return Err(invalid("detail too high"));
                }
                self.mesh_detail = d;
            }
            "msaa" => {
                let s: u32 = value.parse().map_err(|_| invalid("expected an integer"))?;
                if s != 1 && s != 4 {
                    return Err(invalid("expected 1 or 4"));
                }
                self.msaa_samples = s;
            }
            "panel-id" => {
                if value.is_empty() {
                    return Err(invalid("expected an element id"));
                }
                self.panel_id = value.to_string();
            }
            _ => return Err(Error::UnknownConfigKey(key.to_string())),
        }
        log::debug!("[config] {key} = {value}");
        Ok(())
    }

    /// Apply every pair, stopping at the first invalid one.
    pub fn with_overrides<'a, I>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (k, v) in pairs {
            self.apply_override(k, v)?;
        }
        Ok(self)
    }
}
