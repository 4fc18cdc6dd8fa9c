pub mod audio;
pub mod bloom;
pub mod camera;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod params;
pub mod shaders;
pub mod uniforms;

pub use audio::*;
pub use bloom::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use driver::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use input::*;
pub use panel::*;
pub use params::*;
pub use shaders::*;
pub use uniforms::*;
