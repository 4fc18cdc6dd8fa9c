use crate::constants::UNIFORM_START_RGB;
use crate::params::{ColorChannel, Parameters};
use glam::Mat4;

/// Values consumed by the scene shader on the next draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformState {
    pub time: f32,
    pub frequency: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    /// Part of the shader interface; nothing drives it.
    pub audio_amplitude: f32,
}

impl Default for UniformState {
    fn default() -> Self {
        Self {
            time: 0.0,
            frequency: 0.0,
            red: UNIFORM_START_RGB[0],
            green: UNIFORM_START_RGB[1],
            blue: UNIFORM_START_RGB[2],
            audio_amplitude: 0.0,
        }
    }
}

impl UniformState {
    /// Per-frame bridge: copy the clock, the analyser reading and the colour
    /// parameters into the uniforms.
    ///
    /// `elapsed` readings lower than the current time are ignored so `time`
    /// never runs backwards.
    pub fn sync(&mut self, params: &Parameters, elapsed: f32, frequency: f32) {
        if elapsed > self.time {
            self.time = elapsed;
        }
        self.frequency = frequency;
        self.red = params.red;
        self.green = params.green;
        self.blue = params.blue;
    }

    pub fn set_color(&mut self, channel: ColorChannel, value: f32) {
        match channel {
            ColorChannel::Red => self.red = value,
            ColorChannel::Green => self.green = value,
            ColorChannel::Blue => self.blue = value,
        }
    }

    pub fn color(&self, channel: ColorChannel) -> f32 {
        match channel {
            ColorChannel::Red => self.red,
            ColorChannel::Green => self.green,
            ColorChannel::Blue => self.blue,
        }
    }

    pub fn to_gpu(&self, view_proj: Mat4) -> SceneUniforms {
        SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            time: self.time,
            frequency: self.frequency,
            red: self.red,
            green: self.green,
            blue: self.blue,
            audio_amplitude: self.audio_amplitude,
            _pad: [0.0; 2],
        }
    }
}

/// GPU layout of the scene uniform block (`scene_vertex.wgsl`).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub time: f32,
    pub frequency: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub audio_amplitude: f32,
    pub _pad: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniforms_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 96);
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    }

    #[test]
    fn sync_copies_colors_verbatim() {
        let mut u = UniformState::default();
        let params = Parameters {
            red: 0.2,
            green: 0.3,
            blue: 0.4,
            ..Parameters::default()
        };
        u.sync(&params, 1.5, 42.0);
        assert_eq!((u.red, u.green, u.blue), (0.2, 0.3, 0.4));
        assert_eq!(u.time, 1.5);
        assert_eq!(u.frequency, 42.0);
        assert_eq!(u.audio_amplitude, 0.0);
    }
}
