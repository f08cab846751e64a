//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Coordinate axis selector for signed per-axis comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of this axis in a 3D point
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Read this axis' component from a point
    pub fn component(self, point: &Point3f) -> f32 {
        point.coords[self.index()]
    }
}

/// A depth sample with the sensor's confidence in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct DepthPoint {
    pub position: Point3f,
    pub confidence: f32,
}

impl DepthPoint {
    pub fn new(position: Point3f, confidence: f32) -> Self {
        Self { position, confidence }
    }
}

impl Default for DepthPoint {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            confidence: 0.0,
        }
    }
}

impl From<DepthPoint> for Point3f {
    fn from(point: DepthPoint) -> Self {
        point.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_component() {
        let p = Point3f::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.component(&p), 1.0);
        assert_eq!(Axis::Y.component(&p), 2.0);
        assert_eq!(Axis::Z.component(&p), 3.0);
    }
}
