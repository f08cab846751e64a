//! User input: slider mappings and the intent queue drained once per frame
//!
//! UI callbacks never touch frame state directly. They push a
//! [`FrameIntent`]; the next frame tick folds all pending intents into a
//! fresh, immutable [`FrameInput`] and processes the frame against it.

use crate::placement::{OverlayMode, MAX_MANUAL_SCALE};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The glasses adjustment slider, progress `0..=100` centred on 50
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentSlider {
    progress: u8,
}

impl AdjustmentSlider {
    pub const MAX: u8 = 100;
    pub const CENTER: u8 = 50;

    /// Progress is clamped to `0..=100`
    pub fn new(progress: u8) -> Self {
        Self {
            progress: progress.min(Self::MAX),
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Manual scale factor in `[0, 2]`; 1.0 at the centre
    pub fn scale_factor(&self) -> f32 {
        self.progress as f32 / Self::CENTER as f32
    }

    /// Signed offset from the centre, in percent
    pub fn percentage(&self) -> f32 {
        self.progress as f32 - Self::CENTER as f32
    }

    /// Label shown next to the slider, e.g. `+10.0%` or `-4.0%`
    pub fn percentage_label(&self) -> String {
        let percentage = self.percentage();
        if percentage >= 0.0 {
            format!("+{:.1}%", percentage)
        } else {
            format!("{:.1}%", percentage)
        }
    }
}

impl Default for AdjustmentSlider {
    fn default() -> Self {
        Self::new(Self::CENTER)
    }
}

/// Point amount used until the user moves the slider
pub const DEFAULT_POINT_AMOUNT: f32 = 0.5;

/// Normalise a depth "point amount" slider position to `[0, 1]`
pub fn point_amount(progress: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (progress.min(max) as f32) / max as f32
}

/// A UI event waiting for the next frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameIntent {
    SetAdjustment(u8),
    SetOverlayMode(OverlayMode),
    SetPointAmount(f32),
    /// Export the current frame's mesh and measurements
    Capture,
}

/// Immutable per-frame input snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub adjustment: AdjustmentSlider,
    pub overlay_mode: OverlayMode,
    pub point_amount: f32,
    pub capture_requested: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            adjustment: AdjustmentSlider::default(),
            overlay_mode: OverlayMode::default(),
            point_amount: DEFAULT_POINT_AMOUNT,
            capture_requested: false,
        }
    }
}

impl FrameInput {
    /// Fold intents into the next frame's input; a capture only lasts one frame
    pub fn next<I>(&self, intents: I) -> Self
    where
        I: IntoIterator<Item = FrameIntent>,
    {
        let mut next = Self {
            capture_requested: false,
            ..*self
        };
        for intent in intents {
            match intent {
                FrameIntent::SetAdjustment(progress) => next.adjustment = AdjustmentSlider::new(progress),
                FrameIntent::SetOverlayMode(mode) => next.overlay_mode = mode,
                FrameIntent::SetPointAmount(amount) if amount.is_finite() => {
                    next.point_amount = amount.clamp(0.0, 1.0)
                }
                FrameIntent::SetPointAmount(amount) => {
                    log::debug!("ignoring non-finite point amount {}", amount)
                }
                FrameIntent::Capture => next.capture_requested = true,
            }
        }
        next
    }

    pub fn manual_scale(&self) -> f32 {
        self.adjustment.scale_factor().min(MAX_MANUAL_SCALE)
    }
}

/// Intents pushed from UI callbacks, drained by the frame loop
#[derive(Debug, Default)]
pub struct IntentQueue {
    pending: Mutex<VecDeque<FrameIntent>>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, intent: FrameIntent) {
        self.pending.lock().push_back(intent);
    }

    /// Take every pending intent in arrival order
    pub fn drain(&self) -> Vec<FrameIntent> {
        self.pending.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_adjustment_slider_mapping() {
        assert_eq!(AdjustmentSlider::new(0).scale_factor(), 0.0);
        assert_eq!(AdjustmentSlider::new(50).scale_factor(), 1.0);
        assert_eq!(AdjustmentSlider::new(100).scale_factor(), 2.0);
        assert_eq!(AdjustmentSlider::new(250).progress(), 100);
    }

    #[test]
    fn test_percentage_label() {
        assert_eq!(AdjustmentSlider::new(60).percentage_label(), "+10.0%");
        assert_eq!(AdjustmentSlider::new(50).percentage_label(), "+0.0%");
        assert_eq!(AdjustmentSlider::new(46).percentage_label(), "-4.0%");
    }

    #[test]
    fn test_point_amount() {
        assert_relative_eq!(point_amount(25, 100), 0.25);
        assert_eq!(point_amount(300, 100), 1.0);
        assert_eq!(point_amount(3, 0), 0.0);
    }

    #[test]
    fn test_intents_fold_in_order() {
        let queue = IntentQueue::new();
        queue.push(FrameIntent::SetAdjustment(20));
        queue.push(FrameIntent::SetOverlayMode(OverlayMode::Debug));
        queue.push(FrameIntent::SetAdjustment(75));
        queue.push(FrameIntent::Capture);
        assert_eq!(queue.len(), 4);

        let input = FrameInput::default().next(queue.drain());
        assert!(queue.is_empty());
        assert_eq!(input.adjustment.progress(), 75);
        assert_eq!(input.overlay_mode, OverlayMode::Debug);
        assert!(input.capture_requested);
        assert_relative_eq!(input.manual_scale(), 1.5);

        let following = input.next(Vec::new());
        assert!(!following.capture_requested);
        assert_eq!(following.adjustment.progress(), 75);
    }

    #[test]
    fn test_non_finite_point_amount_keeps_previous() {
        let input = FrameInput::default().next([FrameIntent::SetPointAmount(0.8)]);
        assert_relative_eq!(input.point_amount, 0.8);

        let input = input.next([FrameIntent::SetPointAmount(f32::NAN)]);
        assert_relative_eq!(input.point_amount, 0.8);
        let input = input.next([FrameIntent::SetPointAmount(f32::INFINITY)]);
        assert_relative_eq!(input.point_amount, 0.8);

        let input = input.next([FrameIntent::SetPointAmount(7.0)]);
        assert_eq!(input.point_amount, 1.0);
    }
}
