//! Distances and axis deltas between face landmarks

use crate::error::Result;
use crate::frame::FrameLandmarkSampler;
use crate::landmark::NamedLandmark;
use crate::point::{Axis, Point3f};
use serde::{Deserialize, Serialize};

/// Mesh units are metres; reported measurements are centimetres
pub const CENTIMETRES_PER_UNIT: f32 = 100.0;

/// Pairwise metrics over the landmarks of one tracking frame
#[derive(Debug, Clone, Copy)]
pub struct DistanceMetrics<'a> {
    sampler: FrameLandmarkSampler<'a>,
}

impl<'a> DistanceMetrics<'a> {
    pub fn new(sampler: FrameLandmarkSampler<'a>) -> Self {
        Self { sampler }
    }

    /// Euclidean distance between two vertices
    pub fn distance(&self, a_index: usize, b_index: usize) -> Result<f32> {
        let a = self.sampler.position(a_index)?;
        let b = self.sampler.position(b_index)?;
        Ok((a - b).norm())
    }

    /// Signed difference `a - b` along one axis
    pub fn axis_delta(&self, a_index: usize, b_index: usize, axis: Axis) -> Result<f32> {
        let a = self.sampler.position(a_index)?;
        let b = self.sampler.position(b_index)?;
        Ok(axis.component(&a) - axis.component(&b))
    }

    pub fn named_distance(&self, a: NamedLandmark, b: NamedLandmark) -> Result<f32> {
        self.distance(a.index(), b.index())
    }

    pub fn named_axis_delta(&self, a: NamedLandmark, b: NamedLandmark, axis: Axis) -> Result<f32> {
        self.axis_delta(a.index(), b.index(), axis)
    }

    /// How far the nose bridge sits in front of the right nose ala.
    ///
    /// Used as a cheap proxy for the face being close enough to the camera.
    pub fn nose_depth_proxy(&self) -> Result<f32> {
        self.named_axis_delta(
            NamedLandmark::NoseGlassesSupport,
            NamedLandmark::NoseRightAla,
            Axis::Z,
        )
    }

    pub fn sampler(&self) -> FrameLandmarkSampler<'a> {
        self.sampler
    }
}

/// The fixed set of measurements reported for a captured face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceMeasurements {
    pub between_eyebrows: f32,
    pub adjustment_hatch: f32,
    pub forehead: f32,
    pub nose: Point3f,
    pub left_ear_to_eye: f32,
    pub right_ear_to_eye: f32,
    pub first_nose_z_comparison: f32,
    pub second_nose_z_comparison: f32,
}

impl FaceMeasurements {
    /// Measure a tracking frame; `scale_factor` is the manual adjustment in `[0, 2]`
    pub fn measure(metrics: &DistanceMetrics<'_>, scale_factor: f32) -> Result<Self> {
        use NamedLandmark::*;

        let nose = metrics.sampler().named(NoseGlassesSupport)?;
        Ok(Self {
            between_eyebrows: metrics.named_distance(UtmostLeftEyebrow, UtmostRightEyebrow)?
                * CENTIMETRES_PER_UNIT,
            adjustment_hatch: scale_factor * 10.0,
            forehead: metrics.named_distance(UtmostLeftForehead, UtmostRightForehead)?
                * CENTIMETRES_PER_UNIT,
            nose,
            left_ear_to_eye: metrics.named_distance(LeftEar, LeftEyeOuter)? * CENTIMETRES_PER_UNIT,
            right_ear_to_eye: metrics.named_distance(RightEar, RightEyeOuter)? * CENTIMETRES_PER_UNIT,
            first_nose_z_comparison: metrics.named_axis_delta(NoseGlassesSupport, NoseLeftAla, Axis::Z)?
                * CENTIMETRES_PER_UNIT,
            second_nose_z_comparison: metrics.nose_depth_proxy()? * CENTIMETRES_PER_UNIT,
        })
    }

    /// Labelled values in report order
    pub fn entries(&self) -> [(&'static str, f32); 10] {
        [
            ("between_eyebrows", self.between_eyebrows),
            ("adjustment_hatch", self.adjustment_hatch),
            ("forehead_measurement", self.forehead),
            ("nose_coordinates_x", self.nose.x),
            ("nose_coordinates_y", self.nose.y),
            ("nose_coordinates_z", self.nose.z),
            ("leftear_measurement", self.left_ear_to_eye),
            ("rightear_measurement", self.right_ear_to_eye),
            ("first_nose_z_comparison", self.first_nose_z_comparison),
            ("second_nose_z_comparison", self.second_nose_z_comparison),
        ]
    }

    /// Rows for the results screen, with display units
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Between eyebrows", format!("{}", self.between_eyebrows)),
            ("Adjustment", format!("+ {}%", self.adjustment_hatch)),
            ("Forehead", format!("{} cm", self.forehead)),
            ("Nose X", format!("{}", self.nose.x)),
            ("Nose Y", format!("{}", self.nose.y)),
            ("Nose Z", format!("{}", self.nose.z)),
            ("Left ear to eye", format!("{} cm", self.left_ear_to_eye)),
            ("Right ear to eye", format!("{} cm", self.right_ear_to_eye)),
            ("Nose depth (left)", format!("{} cm", self.first_nose_z_comparison)),
            ("Nose depth (right)", format!("{} cm", self.second_nose_z_comparison)),
        ]
    }
}
