//! Export of facefit captures
//!
//! Captures are written as plain-text files into a documents directory:
//! `mesh_<ts>.txt` (comma-separated vertex floats), `distances_<ts>.txt`
//! (`label: value` lines) and `pointcloud_<ts>.txt` (depth snapshots).

pub mod error;
pub mod export;
pub mod storage;
pub mod text;

pub use error::*;
pub use export::{read_mesh, CaptureFiles, MeasurementExporter, Timestamp};
pub use storage::{FilesystemProbe, StorageProbe, StorageState};
pub use text::{format_measurements, format_vertex_buffer, parse_measurements, parse_vertex_buffer};
