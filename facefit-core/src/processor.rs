//! The per-frame processing loops
//!
//! Each stage (sampling, measuring, placing) returns a `Result`; the
//! processor aggregates them once per frame and turns any failure into a
//! skipped frame so the render loop keeps going.
//!
//! A host render loop runs each tick behind the session's [`FrameGate`]:
//!
//! ```
//! use facefit_core::{FaceFrame, FrameGate, FrameProcessor, PlacementConfig, TrackingState};
//!
//! let gate = FrameGate::new();
//! let mut processor = FrameProcessor::new(PlacementConfig::default()).unwrap();
//! let frame = FaceFrame::lost(TrackingState::Paused);
//!
//! // Sessions start paused, so nothing runs until the host resumes
//! assert!(processor.tick_gated(&gate, &frame).is_none());
//! gate.resume();
//! assert!(processor.tick_gated(&gate, &frame).is_some());
//! ```

use crate::config::PlacementConfig;
use crate::depth::DepthTracker;
use crate::error::{Error, Result};
use crate::frame::{FaceFrame, FrameLandmarkSampler, TrackingState};
use crate::input::{FrameInput, IntentQueue};
use crate::metrics::{DistanceMetrics, FaceMeasurements};
use crate::placement::{GlassesPlacer, Placement};
use crate::point_cloud::DepthPointCloud;
use crate::session::FrameGate;
use std::sync::Arc;

/// Data captured on a user request, ready to be exported
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    pub vertices: Vec<f32>,
    pub measurements: FaceMeasurements,
}

/// Everything computed for one tracking frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub input: FrameInput,
    pub measurements: FaceMeasurements,
    pub placement: Placement,
    pub capture: Option<CaptureRequest>,
}

/// What happened to a frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The face was not tracked; nothing was computed
    NotTracking(TrackingState),
    Processed(FrameReport),
    /// A stage failed; the frame was dropped
    Skipped(Error),
}

impl FrameOutcome {
    pub fn report(&self) -> Option<&FrameReport> {
        match self {
            FrameOutcome::Processed(report) => Some(report),
            _ => None,
        }
    }
}

/// Drives landmark measurement and glasses placement frame by frame
#[derive(Debug)]
pub struct FrameProcessor {
    placer: GlassesPlacer,
    input: FrameInput,
    intents: Arc<IntentQueue>,
}

impl FrameProcessor {
    pub fn new(config: PlacementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            placer: GlassesPlacer::new(config),
            input: FrameInput::default(),
            intents: Arc::new(IntentQueue::new()),
        })
    }

    /// Handle for UI callbacks to queue intents on
    pub fn intents(&self) -> Arc<IntentQueue> {
        Arc::clone(&self.intents)
    }

    /// Input snapshot used by the most recent frame
    pub fn input(&self) -> &FrameInput {
        &self.input
    }

    /// Process one frame. Never fails: errors are logged and the frame skipped.
    pub fn tick(&mut self, frame: &FaceFrame) -> FrameOutcome {
        self.input = self.input.next(self.intents.drain());

        match self.process(frame) {
            Ok(Some(report)) => FrameOutcome::Processed(report),
            Ok(None) => {
                if self.input.capture_requested {
                    log::debug!("capture requested while not tracking, ignored");
                }
                FrameOutcome::NotTracking(frame.tracking_state)
            }
            Err(err) => {
                log::warn!("skipping frame: {}", err);
                FrameOutcome::Skipped(err)
            }
        }
    }

    /// [`tick`](Self::tick) under the session lock; `None` while paused
    pub fn tick_gated(&mut self, gate: &FrameGate, frame: &FaceFrame) -> Option<FrameOutcome> {
        gate.with_frame(|| self.tick(frame))
    }

    fn process(&self, frame: &FaceFrame) -> Result<Option<FrameReport>> {
        let Some(sampler) = FrameLandmarkSampler::for_frame(frame) else {
            return Ok(None);
        };
        let metrics = DistanceMetrics::new(sampler);
        let input = self.input;

        let measurements = FaceMeasurements::measure(&metrics, input.manual_scale())?;
        let placement = self.placer.place_on_face(
            &metrics,
            frame.center_pose,
            input.manual_scale(),
            input.overlay_mode,
        )?;

        let capture = input.capture_requested.then(|| CaptureRequest {
            vertices: frame.landmarks.as_flat().to_vec(),
            measurements,
        });

        Ok(Some(FrameReport {
            input,
            measurements,
            placement,
            capture,
        }))
    }
}

/// One raw depth image from the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthFrame<'a> {
    pub tracking_state: TrackingState,
    /// Timestamp of the depth image, not of the camera frame
    pub timestamp: i64,
    /// Flat `[x, y, z, confidence, ...]` buffer
    pub points: &'a [f32],
}

/// The point cloud to render for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DepthReport {
    pub input: FrameInput,
    /// Whether this frame carried a new depth image
    pub is_new: bool,
    /// Point count of the latest depth image before filtering
    pub total: usize,
    /// Points the point-amount slider lets through
    pub visible: DepthPointCloud,
    pub capture: Option<DepthPointCloud>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DepthOutcome {
    NotTracking(TrackingState),
    Processed(DepthReport),
    /// The depth buffer could not be decoded; the frame was dropped
    Skipped(Error),
}

impl DepthOutcome {
    pub fn report(&self) -> Option<&DepthReport> {
        match self {
            DepthOutcome::Processed(report) => Some(report),
            _ => None,
        }
    }
}

/// Drives the raw depth point cloud view frame by frame.
///
/// A depth image is decoded only when its timestamp moves; repeated
/// timestamps re-render the latest image through the current point amount.
#[derive(Debug, Default)]
pub struct DepthProcessor {
    tracker: DepthTracker,
    input: FrameInput,
    intents: Arc<IntentQueue>,
    latest: DepthPointCloud,
}

impl DepthProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for UI callbacks to queue intents on
    pub fn intents(&self) -> Arc<IntentQueue> {
        Arc::clone(&self.intents)
    }

    /// Input snapshot used by the most recent frame
    pub fn input(&self) -> &FrameInput {
        &self.input
    }

    /// Whether any depth image has arrived since the processor was created
    pub fn has_received(&self) -> bool {
        self.tracker.has_received()
    }

    /// Process one depth frame. Never fails: errors are logged and the frame skipped.
    pub fn tick(&mut self, frame: &DepthFrame<'_>) -> DepthOutcome {
        self.input = self.input.next(self.intents.drain());

        if !frame.tracking_state.is_tracking() {
            self.tracker.reset();
            return DepthOutcome::NotTracking(frame.tracking_state);
        }

        let is_new = self.tracker.observe(frame.timestamp);
        if is_new {
            match DepthPointCloud::from_flat(frame.points) {
                Ok(cloud) => self.latest = cloud,
                Err(err) => {
                    // Decode the same timestamp again if it is repeated
                    self.tracker.reset();
                    log::warn!("skipping depth frame: {}", err);
                    return DepthOutcome::Skipped(err);
                }
            }
        }

        let visible = self.latest.filter_by_amount(self.input.point_amount);
        let capture = self.input.capture_requested.then(|| visible.clone());
        DepthOutcome::Processed(DepthReport {
            input: self.input,
            is_new,
            total: self.latest.len(),
            visible,
            capture,
        })
    }

    /// [`tick`](Self::tick) under the session lock; `None` while paused
    pub fn tick_gated(&mut self, gate: &FrameGate, frame: &DepthFrame<'_>) -> Option<DepthOutcome> {
        gate.with_frame(|| self.tick(frame))
    }
}
