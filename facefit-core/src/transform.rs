//! Model transforms handed to the external renderer

use crate::point::{Point3f, Vector3f};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// A 4x4 model matrix positioning an overlay relative to a tracked face.
///
/// Builder methods post-multiply, matching the GL convention of
/// `translateM`/`scaleM`: the last operation applied is the first one
/// a vertex goes through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementTransform {
    pub matrix: Matrix4<f32>,
}

impl PlacementTransform {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Start from a pose matrix supplied by the tracker
    pub fn from_pose(pose: Matrix4<f32>) -> Self {
        Self { matrix: pose }
    }

    /// Translate in the local frame of the current matrix
    pub fn translate(self, offset: Vector3f) -> Self {
        Self {
            matrix: self.matrix * Matrix4::new_translation(&offset),
        }
    }

    /// Uniformly scale in the local frame of the current matrix
    pub fn scale(self, factor: f32) -> Self {
        Self {
            matrix: self.matrix * Matrix4::new_scaling(factor),
        }
    }

    /// World-space position of the local origin
    pub fn origin(&self) -> Point3f {
        Point3f::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Column-major element order, as GL uniform uploads expect
    pub fn to_column_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.matrix.as_slice());
        out
    }

    /// Build from a column-major array
    pub fn from_column_major(values: &[f32; 16]) -> Self {
        Self {
            matrix: Matrix4::from_column_slice(values),
        }
    }
}

impl Default for PlacementTransform {
    fn default() -> Self {
        Self::identity()
    }
}
