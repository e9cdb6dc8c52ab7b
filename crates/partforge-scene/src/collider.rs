//! Physics collider shapes

use partforge_core::Vec3;
use serde::{Deserialize, Serialize};

use crate::graph::MeshId;

/// Suspension spring of a wheel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JointSpring {
    pub spring: f32,
    pub damper: f32,
    pub target_position: f32,
}

/// Tire friction model of a wheel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelFrictionCurve {
    pub extremum_slip: f32,
    pub extremum_value: f32,
    pub asymptote_slip: f32,
    pub asymptote_value: f32,
    pub stiffness: f32,
}

/// One collider attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Collider {
    Mesh {
        #[serde(default)]
        trigger: bool,
        #[serde(default)]
        convex: bool,
        mesh: MeshId,
    },
    Box {
        #[serde(default)]
        trigger: bool,
        size: Vec3,
        #[serde(default)]
        center: Vec3,
    },
    Capsule {
        #[serde(default)]
        trigger: bool,
        radius: f32,
        height: f32,
        /// Axis the capsule extends along (0 = X, 1 = Y, 2 = Z)
        #[serde(default)]
        direction: i32,
        #[serde(default)]
        center: Vec3,
    },
    Sphere {
        #[serde(default)]
        trigger: bool,
        radius: f32,
        #[serde(default)]
        center: Vec3,
    },
    Wheel {
        mass: f32,
        radius: f32,
        suspension_distance: f32,
        #[serde(default)]
        center: Vec3,
        #[serde(default)]
        suspension_spring: JointSpring,
        #[serde(default)]
        forward_friction: WheelFrictionCurve,
        #[serde(default)]
        sideways_friction: WheelFrictionCurve,
    },
}

/// Collider shape discriminant, declared in write precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColliderKind {
    Mesh,
    Box,
    Capsule,
    Sphere,
    Wheel,
}

impl Collider {
    pub fn kind(&self) -> ColliderKind {
        match self {
            Collider::Mesh { .. } => ColliderKind::Mesh,
            Collider::Box { .. } => ColliderKind::Box,
            Collider::Capsule { .. } => ColliderKind::Capsule,
            Collider::Sphere { .. } => ColliderKind::Sphere,
            Collider::Wheel { .. } => ColliderKind::Wheel,
        }
    }
}
