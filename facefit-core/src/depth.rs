//! Raw depth point clouds
//!
//! The depth sensor hands over a flat `[x, y, z, confidence, ...]` buffer
//! together with the timestamp of the depth image it came from. The tracker
//! may repeat a reprojection of older data under the same timestamp, so
//! [`DepthTracker`] only reports data as new when the timestamp moves.

use crate::error::{Error, Result};
use crate::input::DEFAULT_POINT_AMOUNT;
use crate::point::{DepthPoint, Point3f};
use crate::point_cloud::DepthPointCloud;

const FLOATS_PER_DEPTH_POINT: usize = 4;

impl DepthPointCloud {
    /// Decode the sensor's flat `xyzc` buffer
    pub fn from_flat(buffer: &[f32]) -> Result<Self> {
        if buffer.len() % FLOATS_PER_DEPTH_POINT != 0 {
            return Err(Error::InvalidData(format!(
                "depth buffer length {} is not a multiple of {}",
                buffer.len(),
                FLOATS_PER_DEPTH_POINT
            )));
        }
        Ok(buffer
            .chunks_exact(FLOATS_PER_DEPTH_POINT)
            .map(|c| DepthPoint::new(Point3f::new(c[0], c[1], c[2]), c[3]))
            .collect())
    }

    /// Keep the points the "point amount" slider lets through.
    ///
    /// `amount` in `[0, 1]`: 1 keeps every point, 0 keeps only points with
    /// full confidence. A non-finite amount falls back to the slider default.
    pub fn filter_by_amount(&self, amount: f32) -> Self {
        let amount = if amount.is_finite() {
            amount.clamp(0.0, 1.0)
        } else {
            DEFAULT_POINT_AMOUNT
        };
        let min_confidence = 1.0 - amount;
        self.iter()
            .filter(|p| p.confidence >= min_confidence)
            .copied()
            .collect()
    }
}

/// Detects whether a depth image carries new data
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthTracker {
    last_timestamp: Option<i64>,
    received: bool,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `timestamp`; true when it differs from the previous one
    pub fn observe(&mut self, timestamp: i64) -> bool {
        let is_new = self.last_timestamp != Some(timestamp);
        self.last_timestamp = Some(timestamp);
        if is_new {
            self.received = true;
        }
        is_new
    }

    /// Whether any depth data has arrived since the session started
    pub fn has_received(&self) -> bool {
        self.received
    }

    /// Forget the last timestamp, e.g. after the session was paused
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat() {
        let cloud = DepthPointCloud::from_flat(&[1.0, 2.0, 3.0, 0.5, 4.0, 5.0, 6.0, 1.0]).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[1].position, Point3f::new(4.0, 5.0, 6.0));
        assert_eq!(cloud[0].confidence, 0.5);

        assert!(DepthPointCloud::from_flat(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_filter_by_amount() {
        let cloud: DepthPointCloud = [0.1, 0.5, 0.9, 1.0]
            .iter()
            .map(|&c| DepthPoint::new(Point3f::origin(), c))
            .collect();

        assert_eq!(cloud.filter_by_amount(1.0).len(), 4);
        assert_eq!(cloud.filter_by_amount(0.5).len(), 3);
        assert_eq!(cloud.filter_by_amount(0.0).len(), 1);
        assert_eq!(cloud.filter_by_amount(-3.0).len(), 1);
    }

    #[test]
    fn test_filter_by_non_finite_amount_uses_default() {
        let cloud: DepthPointCloud = [0.1, 0.5, 0.9, 1.0]
            .iter()
            .map(|&c| DepthPoint::new(Point3f::origin(), c))
            .collect();

        // NaN would otherwise drop every point
        assert_eq!(cloud.filter_by_amount(f32::NAN).len(), 3);
        assert_eq!(cloud.filter_by_amount(f32::NEG_INFINITY).len(), 3);
    }

    #[test]
    fn test_depth_tracker() {
        let mut tracker = DepthTracker::new();
        assert!(!tracker.has_received());
        assert!(tracker.observe(100));
        assert!(!tracker.observe(100));
        assert!(tracker.observe(133));
        assert!(tracker.has_received());

        tracker.reset();
        assert!(tracker.observe(133));
    }
}
