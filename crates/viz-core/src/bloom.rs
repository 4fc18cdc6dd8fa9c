use crate::constants::{BLOOM_FACTORS, BLOOM_MIPS, BLOOM_SMOOTH_WIDTH};
use crate::params::{BloomField, Parameters};

/// Live settings of the bloom pass, read by the compositor every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomSettings {
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
}

impl BloomSettings {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            threshold: params.threshold,
            strength: params.strength,
            radius: params.radius,
        }
    }

    pub fn set(&mut self, field: BloomField, value: f32) {
        match field {
            BloomField::Threshold => self.threshold = value,
            BloomField::Strength => self.strength = value,
            BloomField::Radius => self.radius = value,
        }
    }

    pub fn get(&self, field: BloomField) -> f32 {
        match field {
            BloomField::Threshold => self.threshold,
            BloomField::Strength => self.strength,
            BloomField::Radius => self.radius,
        }
    }

    /// Per-mip composite weights. `radius` slides each factor from its base
    /// value towards `1.2 - factor`, so larger radii favour the blurrier mips.
    pub fn mip_weights(&self) -> [f32; BLOOM_MIPS] {
        BLOOM_FACTORS.map(|f| f + (1.2 - f - f) * self.radius)
    }
}

/// GPU layout shared by every post pass (`post.wgsl`).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub direction: [f32; 2],
    pub kernel_radius: f32,
    pub threshold: f32,
    pub smooth_width: f32,
    pub strength: f32,
    pub texel_size: [f32; 2],
    pub weights: [f32; 8],
}

impl PostUniforms {
    pub fn bright(bloom: &BloomSettings) -> Self {
        Self {
            threshold: bloom.threshold,
            smooth_width: BLOOM_SMOOTH_WIDTH,
            ..Self::default()
        }
    }

    pub fn blur(direction: [f32; 2], kernel_radius: u32, width: u32, height: u32) -> Self {
        Self {
            direction,
            kernel_radius: kernel_radius as f32,
            texel_size: [1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32],
            ..Self::default()
        }
    }

    pub fn composite(bloom: &BloomSettings) -> Self {
        let mut weights = [0.0; 8];
        weights[..BLOOM_MIPS].copy_from_slice(&bloom.mip_weights());
        Self {
            strength: bloom.strength,
            weights,
            ..Self::default()
        }
    }
}
