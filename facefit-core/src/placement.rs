//! Glasses placement on the tracked face

use crate::config::PlacementConfig;
use crate::error::Result;
use crate::landmark::NamedLandmark;
use crate::metrics::DistanceMetrics;
use crate::point::{Point3f, Vector3f};
use crate::transform::PlacementTransform;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Upper bound of the manual scale adjustment
pub const MAX_MANUAL_SCALE: f32 = 2.0;

/// How the glasses model is drawn over the face mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayMode {
    /// Glasses fitted on the face
    #[default]
    Fitted,
    /// Glasses drawn at model scale over the visible mesh
    Debug,
}

/// Everything the placer needs from one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub center_pose: Matrix4<f32>,
    pub nose_bridge: Point3f,
    pub depth_proxy: f32,
    pub manual_scale: f32,
    pub mode: OverlayMode,
}

/// Result of a placement attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Placed(PlacementTransform),
    /// The face is too far away; show a prompt instead of the glasses
    MoveCloser,
}

impl Placement {
    pub fn transform(&self) -> Option<&PlacementTransform> {
        match self {
            Placement::Placed(transform) => Some(transform),
            Placement::MoveCloser => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }

    /// User-facing hint for this outcome
    pub fn prompt(&self) -> &'static str {
        match self {
            Placement::Placed(_) => "Hold this position",
            Placement::MoveCloser => "Move closer",
        }
    }
}

/// Derives the glasses model matrix from the nose bridge landmark
#[derive(Debug, Clone, Copy, Default)]
pub struct GlassesPlacer {
    config: PlacementConfig,
}

impl GlassesPlacer {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    fn model_scale(&self, mode: OverlayMode) -> f32 {
        match mode {
            OverlayMode::Fitted => self.config.fitted_model_scale,
            OverlayMode::Debug => self.config.debug_model_scale,
        }
    }

    /// Place the glasses, or ask the user to move closer when the depth
    /// proxy does not clear the threshold. A non-finite manual scale counts
    /// as the neutral 1.0.
    pub fn place(&self, request: &PlacementRequest) -> Placement {
        if request.depth_proxy.is_nan() || request.depth_proxy <= self.config.depth_threshold {
            log::debug!(
                "depth proxy {:.4} below threshold {:.4}, not placing",
                request.depth_proxy,
                self.config.depth_threshold
            );
            return Placement::MoveCloser;
        }

        let offset = Vector3f::new(
            0.0,
            request.nose_bridge.y + self.config.vertical_offset,
            request.nose_bridge.z,
        );
        let manual_scale = if request.manual_scale.is_finite() {
            request.manual_scale.clamp(0.0, MAX_MANUAL_SCALE)
        } else {
            1.0
        };
        let scale = manual_scale * self.model_scale(request.mode);

        Placement::Placed(
            PlacementTransform::from_pose(request.center_pose)
                .translate(offset)
                .scale(scale),
        )
    }

    /// Sample the nose landmarks from `metrics` and place the glasses
    pub fn place_on_face(
        &self,
        metrics: &DistanceMetrics<'_>,
        center_pose: Matrix4<f32>,
        manual_scale: f32,
        mode: OverlayMode,
    ) -> Result<Placement> {
        let request = PlacementRequest {
            center_pose,
            nose_bridge: metrics.sampler().named(NamedLandmark::NoseGlassesSupport)?,
            depth_proxy: metrics.nose_depth_proxy()?,
            manual_scale,
            mode,
        };
        Ok(self.place(&request))
    }
}
