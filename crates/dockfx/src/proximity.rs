//! Maps the distance between a box and the active icon to the box's visual
//! effect.
//!
//! Every field is a clamped piecewise-linear curve over the control points
//! `[-1, 0, reach]`: `-1` is the idle sentinel, `0` is the box under the
//! pointer, and `reach` (7 by default) is where the falloff bottoms out.

use crate::interaction::ActivePosition;
use crate::interpolate::{InterpolateError, Piecewise};
use crate::layout::IconIndex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub const IDLE_DIFF: f64 = -1.0;
pub const DEFAULT_REACH: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum EffectField {
    Scale,
    TranslateY,
    ZIndex,
    Margin,
    Elevation,
}

impl EffectField {
    /// z-index reorders boxes and is applied as soon as it changes.
    pub fn is_smoothed(self) -> bool {
        !matches!(self, Self::ZIndex)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Effect {
    pub scale: f64,
    pub translate_y: f64,
    pub z_index: f64,
    /// Horizontal margin on each side of the box.
    pub margin: f64,
    pub elevation: f64,
}

impl Effect {
    pub const IDLE: Effect = Effect {
        scale: 1.0,
        translate_y: 0.0,
        z_index: 0.0,
        margin: 0.0,
        elevation: 0.0,
    };

    pub fn get(&self, field: EffectField) -> f64 {
        match field {
            EffectField::Scale => self.scale,
            EffectField::TranslateY => self.translate_y,
            EffectField::ZIndex => self.z_index,
            EffectField::Margin => self.margin,
            EffectField::Elevation => self.elevation,
        }
    }

    pub fn set(&mut self, field: EffectField, value: f64) {
        match field {
            EffectField::Scale => self.scale = value,
            EffectField::TranslateY => self.translate_y = value,
            EffectField::ZIndex => self.z_index = value,
            EffectField::Margin => self.margin = value,
            EffectField::Elevation => self.elevation = value,
        }
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Output values at `[idle, under pointer, reach]` for every field. Margin is
/// given in multiples of the icon size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectProfile {
    pub reach: f64,
    pub scale: [f64; 3],
    pub translate_y: [f64; 3],
    pub z_index: [f64; 3],
    pub margin: [f64; 3],
    pub elevation: [f64; 3],
}

impl Default for EffectProfile {
    fn default() -> Self {
        Self {
            reach: DEFAULT_REACH,
            scale: [1.0, 2.0, 0.3],
            translate_y: [0.0, -40.0, 0.0],
            z_index: [0.0, 10.0, 1.0],
            margin: [0.0, 1.0, 0.0],
            elevation: [0.0, 10.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityMapper {
    scale: Piecewise<3>,
    translate_y: Piecewise<3>,
    z_index: Piecewise<3>,
    margin: Piecewise<3>,
    elevation: Piecewise<3>,
}

impl ProximityMapper {
    pub fn new(profile: &EffectProfile, icon_size: f64) -> Result<Self, InterpolateError> {
        let inputs = [IDLE_DIFF, 0.0, profile.reach];
        let curve = |outputs: [f64; 3]| Piecewise::new(inputs, outputs);

        Ok(Self {
            scale: curve(profile.scale)?,
            translate_y: curve(profile.translate_y)?,
            z_index: curve(profile.z_index)?,
            margin: curve(profile.margin.map(|m| m * icon_size))?,
            elevation: curve(profile.elevation)?,
        })
    }

    /// Target effect for the box at `box_index` given the current position.
    pub fn effect(&self, active: ActivePosition, box_index: IconIndex) -> Effect {
        self.effect_at(active.diff(box_index))
    }

    pub fn effect_at(&self, diff: f64) -> Effect {
        Effect {
            scale: self.scale.sample(diff),
            translate_y: self.translate_y.sample(diff),
            z_index: self.z_index.sample(diff),
            margin: self.margin.sample(diff),
            elevation: self.elevation.sample(diff),
        }
    }
}
