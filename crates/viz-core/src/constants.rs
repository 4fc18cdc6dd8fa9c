use glam::Vec3;

// Shared visual/audio tuning constants used by the core and the web frontend.

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: [f32; 3] = [0.0, -2.0, 14.0];

// Pointer easing (per frame, not per second)
pub const CAMERA_EASE_X: f32 = 0.05;
pub const CAMERA_EASE_Y: f32 = 0.5;

// Client pixels per world unit for the pointer offset
pub const POINTER_DIVISOR: f32 = 100.0;

// Mesh
pub const MESH_RADIUS: f32 = 4.0;
pub const MESH_DETAIL: u32 = 30;
pub const MESH_DETAIL_MAX: u32 = 64;

// Audio
pub const AUDIO_SRC: &str = "./assets/rang.mp3";
pub const ANALYSER_FFT_SIZE: u32 = 32;

// Bloom chain
pub const BLOOM_MIPS: usize = 5;
pub const BLOOM_KERNEL_RADII: [u32; BLOOM_MIPS] = [3, 5, 7, 9, 11];
pub const BLOOM_FACTORS: [f32; BLOOM_MIPS] = [1.0, 0.8, 0.6, 0.4, 0.2];
pub const BLOOM_SMOOTH_WIDTH: f32 = 0.01;

// Parameter defaults (panel starting values)
pub const DEFAULT_RED: f32 = 1.0;
pub const DEFAULT_GREEN: f32 = 1.0;
pub const DEFAULT_BLUE: f32 = 1.0;
pub const DEFAULT_THRESHOLD: f32 = 0.5;
pub const DEFAULT_STRENGTH: f32 = 0.5;
pub const DEFAULT_RADIUS: f32 = 0.8;

// Initial shader colour before the first frame copies the parameters in
pub const UNIFORM_START_RGB: [f32; 3] = [0.1, 1.0, 1.0];

pub const SLIDER_STEP: f32 = 0.01;

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const PANEL_ID: &str = "controls";
pub const VERTEX_SHADER_ID: &str = "vertexshader";
pub const FRAGMENT_SHADER_ID: &str = "fragmentshader";

#[inline]
pub fn camera_start_vec3() -> Vec3 {
    Vec3::from(CAMERA_START)
}
