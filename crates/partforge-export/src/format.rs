//! Constants of the `.mu` model format
//!
//! The format is a write-once dump: a header followed by an append-only
//! sequence of records. Every record starts with an [`EntryType`] tag;
//! variable-length payloads are preceded by their element count.

/// File type magic written first in every model file
pub const MODEL_BINARY_MAGIC: i32 = 76543;

/// Format version. Bumped whenever the record layout changes.
pub const FORMAT_VERSION: i32 = 0;

/// Default extension of model files
pub const MODEL_EXTENSION: &str = ".mu";

/// Record tags
///
/// Discriminants are wire values. The legacy collider tags (3..=6) are
/// never written but keep their slots so later values stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EntryType {
    ChildTransformStart = 0,
    ChildTransformEnd = 1,
    Animation = 2,
    MeshCollider = 3,
    SphereCollider = 4,
    CapsuleCollider = 5,
    BoxCollider = 6,
    MeshFilter = 7,
    MeshRenderer = 8,
    SkinnedMeshRenderer = 9,
    Materials = 10,
    Material = 11,
    Textures = 12,
    MeshStart = 13,
    MeshVerts = 14,
    MeshUV = 15,
    MeshUV2 = 16,
    MeshNormals = 17,
    MeshTangents = 18,
    MeshTriangles = 19,
    MeshBoneWeights = 20,
    MeshBindPoses = 21,
    MeshEnd = 22,
    Light = 23,
    TagAndLayer = 24,
    MeshCollider2 = 25,
    SphereCollider2 = 26,
    CapsuleCollider2 = 27,
    BoxCollider2 = 28,
    WheelCollider = 29,
}

impl EntryType {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_codes_are_stable() {
        assert_eq!(EntryType::ChildTransformStart.code(), 0);
        assert_eq!(EntryType::Materials.code(), 10);
        assert_eq!(EntryType::Textures.code(), 12);
        assert_eq!(EntryType::MeshEnd.code(), 22);
        assert_eq!(EntryType::TagAndLayer.code(), 24);
        assert_eq!(EntryType::WheelCollider.code(), 29);
    }
}
