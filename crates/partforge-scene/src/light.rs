//! Light sources

use partforge_core::Color;
use serde::{Deserialize, Serialize};

/// Light emission model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightType {
    Spot,
    Directional,
    #[default]
    Point,
    Area,
}

impl LightType {
    pub fn code(self) -> i32 {
        match self {
            LightType::Spot => 0,
            LightType::Directional => 1,
            LightType::Point => 2,
            LightType::Area => 3,
        }
    }
}

/// Light component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    #[serde(rename = "type")]
    pub light_type: LightType,
    pub intensity: f32,
    pub range: f32,
    pub color: Color,
    /// Layer bitmask of objects this light affects
    pub culling_mask: i32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            light_type: LightType::Point,
            intensity: 1.0,
            range: 10.0,
            color: Color::WHITE,
            culling_mask: -1,
        }
    }
}
