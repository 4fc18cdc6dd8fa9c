//! Control panel description.
//!
//! The panel itself is drawn by the frontend; this module decides which
//! sliders exist, their bounds and labels, and which [`Command`] a slider
//! change turns into. Dispatching that command is what writes the new value
//! into the live uniform or bloom settings.

use crate::constants::SLIDER_STEP;
use crate::driver::Command;
use crate::params::{BloomField, ColorChannel, Parameters};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelGroup {
    Colors,
    Bloom,
}

impl PanelGroup {
    pub fn title(self) -> &'static str {
        match self {
            PanelGroup::Colors => "Colors",
            PanelGroup::Bloom => "Bloom",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    Color(ColorChannel),
    Bloom(BloomField),
}

impl ParamId {
    pub const ALL: [ParamId; 6] = [
        ParamId::Color(ColorChannel::Red),
        ParamId::Color(ColorChannel::Green),
        ParamId::Color(ColorChannel::Blue),
        ParamId::Bloom(BloomField::Threshold),
        ParamId::Bloom(BloomField::Strength),
        ParamId::Bloom(BloomField::Radius),
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParamId::Color(ColorChannel::Red) => "red",
            ParamId::Color(ColorChannel::Green) => "green",
            ParamId::Color(ColorChannel::Blue) => "blue",
            ParamId::Bloom(BloomField::Threshold) => "threshold",
            ParamId::Bloom(BloomField::Strength) => "strength",
            ParamId::Bloom(BloomField::Radius) => "radius",
        }
    }

    pub fn group(self) -> PanelGroup {
        match self {
            ParamId::Color(_) => PanelGroup::Colors,
            ParamId::Bloom(_) => PanelGroup::Bloom,
        }
    }

    /// Slider bounds `(min, max)`.
    pub fn range(self) -> (f32, f32) {
        match self {
            ParamId::Bloom(BloomField::Strength) => (0.0, 3.0),
            _ => (0.0, 1.0),
        }
    }

    pub fn get(self, params: &Parameters) -> f32 {
        match self {
            ParamId::Color(c) => params.color(c),
            ParamId::Bloom(f) => params.bloom(f),
        }
    }

    pub fn command(self, value: f32) -> Command {
        match self {
            ParamId::Color(channel) => Command::SetColorParam { channel, value },
            ParamId::Bloom(field) => Command::SetBloomParam { field, value },
        }
    }

    /// Parse slider text the way a number input reports it. Returns `None`
    /// for text that is not a finite number.
    pub fn parse_value(self, text: &str) -> Option<f32> {
        let v: f32 = text.trim().parse().ok()?;
        v.is_finite().then_some(v)
    }

    pub fn parse_command(self, text: &str) -> Option<Command> {
        self.parse_value(text).map(|v| self.command(v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub id: ParamId,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub initial: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupSpec {
    pub group: PanelGroup,
    pub sliders: Vec<SliderSpec>,
}

/// Build the two slider groups, seeded from the current parameter values.
pub fn panel_layout(params: &Parameters) -> Vec<GroupSpec> {
    [PanelGroup::Colors, PanelGroup::Bloom]
        .into_iter()
        .map(|group| GroupSpec {
            group,
            sliders: ParamId::ALL
                .iter()
                .copied()
                .filter(|id| id.group() == group)
                .map(|id| {
                    let (min, max) = id.range();
                    SliderSpec {
                        id,
                        min,
                        max,
                        step: SLIDER_STEP,
                        initial: id.get(params),
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_two_groups_of_three() {
        let groups = panel_layout(&Parameters::default());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group.title(), "Colors");
        assert_eq!(groups[1].group.title(), "Bloom");
        assert!(groups.iter().all(|g| g.sliders.len() == 3));
    }

    #[test]
    fn strength_is_the_only_wide_slider() {
        for id in ParamId::ALL {
            let (_, max) = id.range();
            let expected = if id == ParamId::Bloom(BloomField::Strength) {
                3.0
            } else {
                1.0
            };
            assert_eq!(max, expected, "{}", id.label());
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        let id = ParamId::Color(ColorChannel::Red);
        assert!(id.parse_command("abc").is_none());
        assert!(id.parse_command("NaN").is_none());
        assert_eq!(
            id.parse_command(" 0.25 "),
            Some(Command::SetColorParam {
                channel: ColorChannel::Red,
                value: 0.25
            })
        );
    }
}
