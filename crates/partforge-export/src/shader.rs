//! Shader dispatch table
//!
//! Each supported shader maps to an ordered recipe of material fields.
//! Lookup is by the host shader name; unknown names use the diffuse recipe.

use partforge_scene::TextureKind;

/// Shader tag written in the material payload
///
/// Tag 0 is reserved for custom shaders, which are never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderType {
    Diffuse,
    Specular,
    Bumped,
    BumpedSpecular,
    Emissive,
    EmissiveSpecular,
    EmissiveBumpedSpecular,
    AlphaCutout,
    AlphaCutoutBumped,
}

/// One element of a material recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    /// Texture index (or -1) followed by UV scale and offset
    Texture {
        property: &'static str,
        kind: TextureKind,
    },
    Color(&'static str),
    Float(&'static str),
}

const MAIN_TEX: MaterialField = MaterialField::Texture {
    property: "_MainTex",
    kind: TextureKind::Texture,
};
const BUMP_MAP: MaterialField = MaterialField::Texture {
    property: "_BumpMap",
    kind: TextureKind::NormalMap,
};
const EMISSIVE: MaterialField = MaterialField::Texture {
    property: "_Emissive",
    kind: TextureKind::Texture,
};
const SPEC_COLOR: MaterialField = MaterialField::Color("_SpecColor");
const SHININESS: MaterialField = MaterialField::Float("_Shininess");
const EMISSIVE_COLOR: MaterialField = MaterialField::Color("_EmissiveColor");
const CUTOFF: MaterialField = MaterialField::Float("_Cutoff");

/// Host shader names and the tag each one encodes as
static SHADER_TABLE: &[(&str, ShaderType)] = &[
    ("KSP/Specular", ShaderType::Specular),
    ("KSP/Bumped", ShaderType::Bumped),
    ("KSP/Bumped Specular", ShaderType::BumpedSpecular),
    ("KSP/Emissive/Diffuse", ShaderType::Emissive),
    ("KSP/Emissive/Specular", ShaderType::EmissiveSpecular),
    ("KSP/Emissive/Bumped Specular", ShaderType::EmissiveBumpedSpecular),
    ("KSP/Alpha/Cutoff", ShaderType::AlphaCutout),
    ("KSP/Alpha/Cutoff Bumped", ShaderType::AlphaCutoutBumped),
    ("Diffuse", ShaderType::Diffuse),
];

impl ShaderType {
    /// Resolve a host shader name; anything unrecognized is diffuse
    pub fn from_shader_name(name: &str) -> Self {
        SHADER_TABLE
            .iter()
            .find(|(shader, _)| *shader == name)
            .map_or(ShaderType::Diffuse, |(_, tag)| *tag)
    }

    pub fn code(self) -> i32 {
        match self {
            ShaderType::Diffuse => 1,
            ShaderType::Specular => 2,
            ShaderType::Bumped => 3,
            ShaderType::BumpedSpecular => 4,
            ShaderType::Emissive => 5,
            ShaderType::EmissiveSpecular => 6,
            ShaderType::EmissiveBumpedSpecular => 7,
            ShaderType::AlphaCutout => 8,
            ShaderType::AlphaCutoutBumped => 9,
        }
    }

    /// Fields written after the tag, in order
    pub fn recipe(self) -> &'static [MaterialField] {
        match self {
            ShaderType::Diffuse => &[MAIN_TEX],
            ShaderType::Specular => &[MAIN_TEX, SPEC_COLOR, SHININESS],
            ShaderType::Bumped => &[MAIN_TEX, BUMP_MAP],
            ShaderType::BumpedSpecular => &[MAIN_TEX, BUMP_MAP, SPEC_COLOR, SHININESS],
            ShaderType::Emissive => &[MAIN_TEX, EMISSIVE, EMISSIVE_COLOR],
            ShaderType::EmissiveSpecular => {
                &[MAIN_TEX, SPEC_COLOR, SHININESS, EMISSIVE, EMISSIVE_COLOR]
            }
            ShaderType::EmissiveBumpedSpecular => &[
                MAIN_TEX,
                BUMP_MAP,
                SPEC_COLOR,
                SHININESS,
                EMISSIVE,
                EMISSIVE_COLOR,
            ],
            ShaderType::AlphaCutout => &[MAIN_TEX, CUTOFF],
            ShaderType::AlphaCutoutBumped => &[MAIN_TEX, BUMP_MAP, CUTOFF],
        }
    }
}
