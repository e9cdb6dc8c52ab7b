//! Keyframed animation clips

use partforge_core::Bounds;
use serde::{Deserialize, Serialize};

/// Clip and curve extrapolation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    Default,
    Once,
    Loop,
    PingPong,
    ClampForever,
}

impl WrapMode {
    pub fn code(self) -> i32 {
        match self {
            WrapMode::Default => 0,
            WrapMode::Once => 1,
            WrapMode::Loop => 2,
            WrapMode::PingPong => 4,
            WrapMode::ClampForever => 8,
        }
    }
}

/// Component type a curve animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationTarget {
    #[default]
    Transform,
    Material,
    Light,
    AudioSource,
}

impl AnimationTarget {
    pub fn code(self) -> i32 {
        match self {
            AnimationTarget::Transform => 0,
            AnimationTarget::Material => 1,
            AnimationTarget::Light => 2,
            AnimationTarget::AudioSource => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
    pub tangent_mode: i32,
}

/// A single animated property
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationCurve {
    /// Path of the animated node relative to the animation's node
    pub path: String,
    pub property: String,
    pub target: AnimationTarget,
    pub pre_wrap: WrapMode,
    pub post_wrap: WrapMode,
    pub keys: Vec<Keyframe>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationClip {
    pub name: String,
    pub local_bounds: Bounds,
    pub wrap_mode: WrapMode,
    pub curves: Vec<AnimationCurve>,
}

/// Animation component: clips plus playback defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub clips: Vec<AnimationClip>,
    /// Name of the clip played by default
    pub default_clip: Option<String>,
    pub play_automatically: bool,
}

impl Animation {
    pub fn has_clips(&self) -> bool {
        !self.clips.is_empty()
    }
}
