//! Per-frame tracking data and landmark sampling

use crate::error::Result;
use crate::landmark::{LandmarkSet, NamedLandmark};
use crate::point::Point3f;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Tracking state reported by the host engine for a face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    Tracking,
    Paused,
    Stopped,
}

impl TrackingState {
    pub fn is_tracking(self) -> bool {
        self == TrackingState::Tracking
    }
}

/// A tracked face as delivered by the host engine for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceFrame {
    pub tracking_state: TrackingState,
    /// Face center pose (rotation + translation) in world space
    pub center_pose: Matrix4<f32>,
    /// Mesh vertices relative to the center pose
    pub landmarks: LandmarkSet,
}

impl FaceFrame {
    pub fn new(tracking_state: TrackingState, center_pose: Matrix4<f32>, landmarks: LandmarkSet) -> Self {
        Self {
            tracking_state,
            center_pose,
            landmarks,
        }
    }

    /// Create a tracking frame from the flat vertex buffer
    pub fn tracking(center_pose: Matrix4<f32>, vertices: &[f32]) -> Result<Self> {
        Ok(Self::new(
            TrackingState::Tracking,
            center_pose,
            LandmarkSet::from_flat(vertices)?,
        ))
    }

    /// Create a frame the host reports as not tracking; it carries no vertices
    pub fn lost(tracking_state: TrackingState) -> Self {
        Self::new(tracking_state, Matrix4::identity(), LandmarkSet::from_points(Vec::new()))
    }
}

/// Reads landmark positions out of a tracking frame.
///
/// A sampler only exists for frames in [`TrackingState::Tracking`], so
/// everything built on top of it is unavailable for any other frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameLandmarkSampler<'a> {
    landmarks: &'a LandmarkSet,
}

impl<'a> FrameLandmarkSampler<'a> {
    /// Returns `None` when the frame is not tracking
    pub fn for_frame(frame: &'a FaceFrame) -> Option<Self> {
        if frame.tracking_state.is_tracking() {
            Some(Self {
                landmarks: &frame.landmarks,
            })
        } else {
            None
        }
    }

    /// Sample directly from a landmark set known to come from a tracking frame
    #[cfg(test)]
    pub(crate) fn from_landmarks(landmarks: &'a LandmarkSet) -> Self {
        Self { landmarks }
    }

    /// Position of the vertex at `index`
    pub fn position(&self, index: usize) -> Result<Point3f> {
        self.landmarks.get(index)
    }

    /// Position of a named landmark
    pub fn named(&self, landmark: NamedLandmark) -> Result<Point3f> {
        self.position(landmark.index())
    }

    pub fn landmarks(&self) -> &'a LandmarkSet {
        self.landmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_sampler_unavailable_when_not_tracking() {
        let paused = FaceFrame::lost(TrackingState::Paused);
        assert!(FrameLandmarkSampler::for_frame(&paused).is_none());

        let mut stopped = FaceFrame::tracking(Matrix4::identity(), &[0.0; 9]).unwrap();
        stopped.tracking_state = TrackingState::Stopped;
        assert!(FrameLandmarkSampler::for_frame(&stopped).is_none());
    }

    #[test]
    fn test_sampler_reads_positions() {
        let frame = FaceFrame::tracking(Matrix4::identity(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]).unwrap();
        let sampler = FrameLandmarkSampler::for_frame(&frame).unwrap();
        assert_eq!(sampler.position(1).unwrap(), Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(
            sampler.position(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_named_out_of_range_on_short_mesh() {
        let frame = FaceFrame::tracking(Matrix4::identity(), &[0.0; 30]).unwrap();
        let sampler = FrameLandmarkSampler::for_frame(&frame).unwrap();
        assert!(sampler.named(NamedLandmark::NoseGlassesSupport).is_ok());
        assert_eq!(
            sampler.named(NamedLandmark::UtmostLeftEyebrow),
            Err(Error::IndexOutOfRange { index: 225, len: 10 })
        );
    }
}
