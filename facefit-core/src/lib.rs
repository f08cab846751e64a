//! Core data structures and per-frame logic for facefit
//!
//! This crate turns the face mesh delivered by a host AR tracking engine into
//! facial measurements and a glasses placement matrix, and carries the small
//! amount of state the frame loop needs between frames.

pub mod point;
pub mod point_cloud;
pub mod landmark;
pub mod frame;
pub mod metrics;
pub mod placement;
pub mod transform;
pub mod input;
pub mod depth;
pub mod session;
pub mod processor;
pub mod config;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use landmark::*;
pub use frame::*;
pub use metrics::*;
pub use placement::*;
pub use transform::*;
pub use input::*;
pub use depth::*;
pub use session::*;
pub use processor::*;
pub use config::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
