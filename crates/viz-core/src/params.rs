use crate::constants::*;

/// User-tunable values shown in the control panel.
///
/// Ranges are enforced by the slider bounds only; nothing here clamps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED,
            green: DEFAULT_GREEN,
            blue: DEFAULT_BLUE,
            threshold: DEFAULT_THRESHOLD,
            strength: DEFAULT_STRENGTH,
            radius: DEFAULT_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BloomField {
    Threshold,
    Strength,
    Radius,
}

impl Parameters {
    pub fn color(&self, channel: ColorChannel) -> f32 {
        match channel {
            ColorChannel::Red => self.red,
            ColorChannel::Green => self.green,
            ColorChannel::Blue => self.blue,
        }
    }

    pub fn set_color(&mut self, channel: ColorChannel, value: f32) {
        match channel {
            ColorChannel::Red => self.red = value,
            ColorChannel::Green => self.green = value,
            ColorChannel::Blue => self.blue = value,
        }
    }

    pub fn bloom(&self, field: BloomField) -> f32 {
        match field {
            BloomField::Threshold => self.threshold,
            BloomField::Strength => self.strength,
            BloomField::Radius => self.radius,
        }
    }

    pub fn set_bloom(&mut self, field: BloomField, value: f32) {
        match field {
            BloomField::Threshold => self.threshold = value,
            BloomField::Strength => self.strength = value,
            BloomField::Radius => self.radius = value,
        }
    }
}
