//! Face-mesh landmark sets and the static table of named landmarks
//!
//! The host tracking engine hands over the face mesh as a flat
//! `[x0, y0, z0, x1, y1, z1, ...]` float buffer expressed relative to the
//! face center pose. A [`LandmarkSet`] owns one frame's worth of those
//! vertices; [`NamedLandmark`] binds the handful of vertex ids the metrics
//! and the glasses placer care about.

use crate::error::{Error, Result};
use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// Number of vertices in the canonical face mesh produced by the tracker
pub const FACE_MESH_VERTEX_COUNT: usize = 468;

/// A symbolic label bound to a fixed vertex index of the face mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedLandmark {
    UtmostLeftEyebrow,
    UtmostRightEyebrow,
    UtmostRightApple,
    UtmostLeftApple,
    UtmostLeftForehead,
    UtmostRightForehead,
    /// Nose bridge, where the glasses rest
    NoseGlassesSupport,
    NoseLeftAla,
    NoseRightAla,
    LeftEar,
    LeftEyeOuter,
    RightEar,
    RightEyeOuter,
}

impl NamedLandmark {
    /// Every named landmark, in declaration order
    pub const ALL: [NamedLandmark; 13] = [
        NamedLandmark::UtmostLeftEyebrow,
        NamedLandmark::UtmostRightEyebrow,
        NamedLandmark::UtmostRightApple,
        NamedLandmark::UtmostLeftApple,
        NamedLandmark::UtmostLeftForehead,
        NamedLandmark::UtmostRightForehead,
        NamedLandmark::NoseGlassesSupport,
        NamedLandmark::NoseLeftAla,
        NamedLandmark::NoseRightAla,
        NamedLandmark::LeftEar,
        NamedLandmark::LeftEyeOuter,
        NamedLandmark::RightEar,
        NamedLandmark::RightEyeOuter,
    ];

    /// Vertex index of this landmark in the face mesh
    pub const fn index(self) -> usize {
        match self {
            NamedLandmark::UtmostLeftEyebrow => 225,
            NamedLandmark::UtmostRightEyebrow => 445,
            NamedLandmark::UtmostRightApple => 448,
            NamedLandmark::UtmostLeftApple => 228,
            NamedLandmark::UtmostLeftForehead => 251,
            NamedLandmark::UtmostRightForehead => 21,
            NamedLandmark::NoseGlassesSupport => 6,
            NamedLandmark::NoseLeftAla => 188,
            NamedLandmark::NoseRightAla => 412,
            NamedLandmark::LeftEar => 127,
            NamedLandmark::LeftEyeOuter => 25,
            NamedLandmark::RightEar => 356,
            NamedLandmark::RightEyeOuter => 359,
        }
    }
}

/// One frame's face-mesh vertices, indexed by the tracker's vertex id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    positions: Vec<Point3f>,
}

impl LandmarkSet {
    /// Create a landmark set from already-decoded positions
    pub fn from_points(positions: Vec<Point3f>) -> Self {
        Self { positions }
    }

    /// Create a landmark set from the tracker's flat `xyz` float buffer
    pub fn from_flat(buffer: &[f32]) -> Result<Self> {
        let positions: &[Point3f] = bytemuck::try_cast_slice(buffer).map_err(|_| {
            Error::InvalidData(format!(
                "vertex buffer length {} is not a multiple of 3",
                buffer.len()
            ))
        })?;
        Ok(Self {
            positions: positions.to_vec(),
        })
    }

    /// Number of vertices in the set
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the set holds no vertices
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of the vertex at `index`
    pub fn get(&self, index: usize) -> Result<Point3f> {
        self.positions
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.positions.len(),
            })
    }

    /// All positions in vertex-id order
    pub fn positions(&self) -> &[Point3f] {
        &self.positions
    }

    /// Flat `xyz` view of the vertices, in the same layout the tracker produced
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_buffer() {
        let set = LandmarkSet::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap(), Point3f::new(4.0, 5.0, 6.0));
        assert_eq!(set.as_flat(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_flat_rejects_partial_vertex() {
        let result = LandmarkSet::from_flat(&[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_get_out_of_range() {
        let set = LandmarkSet::from_points(vec![Point3f::origin(); 3]);
        assert_eq!(set.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn test_named_indices_fit_face_mesh() {
        for landmark in NamedLandmark::ALL {
            assert!(landmark.index() < FACE_MESH_VERTEX_COUNT, "{:?}", landmark);
        }
        assert_eq!(NamedLandmark::NoseGlassesSupport.index(), 6);
        assert_eq!(NamedLandmark::UtmostLeftEyebrow.index(), 225);
    }
}
