//! Materials and the texture assets they bind

use std::collections::BTreeMap;
use std::path::PathBuf;

use partforge_core::{Color, Vec2};
use serde::{Deserialize, Serialize};

use crate::graph::TextureId;

/// How a texture is meant to be sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    #[default]
    Texture,
    NormalMap,
}

impl TextureKind {
    pub fn code(self) -> i32 {
        match self {
            TextureKind::Texture => 0,
            TextureKind::NormalMap => 1,
        }
    }
}

/// Source-side import metadata of a texture asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// The source holds height data to be turned into a normal map
    pub convert_to_normal_map: bool,
    /// Bumpiness used when synthesizing the normal map
    pub heightmap_scale: f32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            convert_to_normal_map: false,
            heightmap_scale: 0.25,
        }
    }
}

/// A texture asset on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureAsset {
    /// Asset name, without directory or extension
    pub name: String,
    /// Source file, relative to the asset root unless absolute
    pub source: PathBuf,
    #[serde(default)]
    pub import: ImportSettings,
}

impl TextureAsset {
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            import: ImportSettings::default(),
        }
    }

    /// Lowercased extension of the source file, empty if it has none
    pub fn source_extension(&self) -> String {
        self.source
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default()
    }
}

/// A bound (or unbound) texture property with its UV transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSlot {
    pub texture: Option<TextureId>,
    pub scale: Vec2,
    pub offset: Vec2,
}

impl TextureSlot {
    pub fn bound(texture: TextureId) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }
}

impl Default for TextureSlot {
    fn default() -> Self {
        Self {
            texture: None,
            scale: Vec2::ONE,
            offset: Vec2::ZERO,
        }
    }
}

/// A material instance: shader name plus named properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Host shader identifier, e.g. `KSP/Bumped Specular`
    pub shader: String,
    #[serde(default)]
    pub textures: BTreeMap<String, TextureSlot>,
    #[serde(default)]
    pub colors: BTreeMap<String, Color>,
    #[serde(default)]
    pub floats: BTreeMap<String, f32>,
}

impl Material {
    pub fn new(name: impl Into<String>, shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader: shader.into(),
            textures: BTreeMap::new(),
            colors: BTreeMap::new(),
            floats: BTreeMap::new(),
        }
    }

    pub fn with_texture(mut self, property: &str, slot: TextureSlot) -> Self {
        self.textures.insert(property.to_string(), slot);
        self
    }

    pub fn with_color(mut self, property: &str, color: Color) -> Self {
        self.colors.insert(property.to_string(), color);
        self
    }

    pub fn with_float(mut self, property: &str, value: f32) -> Self {
        self.floats.insert(property.to_string(), value);
        self
    }

    /// Texture slot, or an unbound default slot when the property is absent
    pub fn texture_slot(&self, property: &str) -> TextureSlot {
        self.textures.get(property).copied().unwrap_or_default()
    }

    /// Color property, transparent black when absent
    pub fn color(&self, property: &str) -> Color {
        self.colors.get(property).copied().unwrap_or(Color::CLEAR)
    }

    /// Float property, zero when absent
    pub fn float(&self, property: &str) -> f32 {
        self.floats.get(property).copied().unwrap_or(0.0)
    }
}
