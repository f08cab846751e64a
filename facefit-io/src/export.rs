//! Writing captures to the documents directory

use crate::error::{IoError, Result};
use crate::storage::{FilesystemProbe, StorageProbe, StorageState};
use crate::text;
use facefit_core::{CaptureRequest, DepthPointCloud, FaceMeasurements};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, shared by every file of one capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    /// `<prefix>_<millis>.txt`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}_{}.txt", prefix, self.0)
    }
}

/// Paths written for one capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFiles {
    pub mesh: PathBuf,
    pub distances: PathBuf,
}

/// Serializes measurements, meshes and depth snapshots to text files
pub struct MeasurementExporter {
    documents_dir: PathBuf,
    probe: Box<dyn StorageProbe>,
}

impl MeasurementExporter {
    /// Export into `documents_dir`, checking the local filesystem before writing
    pub fn new<P: Into<PathBuf>>(documents_dir: P) -> Self {
        Self::with_probe(documents_dir, FilesystemProbe)
    }

    pub fn with_probe<P, S>(documents_dir: P, probe: S) -> Self
    where
        P: Into<PathBuf>,
        S: StorageProbe + 'static,
    {
        Self {
            documents_dir: documents_dir.into(),
            probe: Box::new(probe),
        }
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Fail unless the documents directory can take writes
    pub fn check_writable(&self) -> Result<()> {
        let path = self.documents_dir.clone();
        match self.probe.state(&self.documents_dir) {
            StorageState::Mounted => Ok(()),
            StorageState::MountedReadOnly => {
                log::warn!("refusing to export, {} is read-only", path.display());
                Err(IoError::StorageReadOnly { path })
            }
            StorageState::Unmounted => {
                log::warn!("refusing to export, {} is not available", path.display());
                Err(IoError::StorageUnavailable { path })
            }
        }
    }

    /// Write the raw vertex buffer as `mesh_<ts>.txt`
    pub fn export_mesh(&self, vertices: &[f32], timestamp: Timestamp) -> Result<PathBuf> {
        self.check_writable()?;
        self.write_file(&timestamp.file_name("mesh"), &text::format_vertex_buffer(vertices))
    }

    /// Write the measurements as `distances_<ts>.txt`
    pub fn export_distances(&self, measurements: &FaceMeasurements, timestamp: Timestamp) -> Result<PathBuf> {
        self.check_writable()?;
        self.write_file(
            &timestamp.file_name("distances"),
            &text::format_measurements(measurements),
        )
    }

    /// Write both files of a capture under one timestamp.
    ///
    /// Either both files end up in the documents directory or neither does.
    pub fn export_capture(&self, capture: &CaptureRequest, timestamp: Timestamp) -> Result<CaptureFiles> {
        self.check_writable()?;
        let mesh = self.documents_dir.join(timestamp.file_name("mesh"));
        let distances = self.documents_dir.join(timestamp.file_name("distances"));
        let mesh_part = partial_path(&mesh);
        let distances_part = partial_path(&distances);

        let staged = write_contents(&mesh_part, &text::format_vertex_buffer(&capture.vertices))
            .and_then(|_| write_contents(&distances_part, &text::format_measurements(&capture.measurements)));
        if let Err(err) = staged {
            let _ = fs::remove_file(&mesh_part);
            let _ = fs::remove_file(&distances_part);
            return Err(err.into());
        }

        if let Err(err) = fs::rename(&mesh_part, &mesh) {
            let _ = fs::remove_file(&mesh_part);
            let _ = fs::remove_file(&distances_part);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&distances_part, &distances) {
            let _ = fs::remove_file(&mesh);
            let _ = fs::remove_file(&distances_part);
            return Err(err.into());
        }

        log::info!("file created: {}", mesh.display());
        log::info!("file created: {}", distances.display());
        Ok(CaptureFiles { mesh, distances })
    }

    /// Write a depth snapshot as `pointcloud_<ts>.txt`
    pub fn export_depth_snapshot(&self, cloud: &DepthPointCloud, timestamp: Timestamp) -> Result<PathBuf> {
        self.check_writable()?;
        self.write_file(&timestamp.file_name("pointcloud"), &text::format_depth_points(cloud))
    }

    fn write_file(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.documents_dir.join(file_name);
        if let Err(err) = write_contents(&path, content) {
            let _ = fs::remove_file(&path);
            return Err(err.into());
        }
        log::info!("file created: {}", path.display());
        Ok(path)
    }
}

fn write_contents(path: &Path, content: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

/// Hidden sibling name a capture file is staged under before the rename
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.part"))
}

/// Read a mesh file written by [`MeasurementExporter::export_mesh`]
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Vec<f32>> {
    let content = fs::read_to_string(path)?;
    text::parse_vertex_buffer(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let ts = Timestamp(1700000000123);
        assert_eq!(ts.file_name("mesh"), "mesh_1700000000123.txt");
        assert_eq!(ts.file_name("distances"), "distances_1700000000123.txt");
        assert!(Timestamp::now().0 > 0);
    }

    #[test]
    fn test_export_mesh_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = MeasurementExporter::new(dir.path());
        let vertices: Vec<f32> = (0..30).map(|i| i as f32 * 0.013 - 0.1).collect();

        let path = exporter.export_mesh(&vertices, Timestamp(42)).unwrap();
        assert_eq!(path, dir.path().join("mesh_42.txt"));
        assert_eq!(read_mesh(&path).unwrap(), vertices);
    }

    #[test]
    fn test_unavailable_storage() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = MeasurementExporter::new(dir.path().join("not-mounted"));
        let err = exporter.export_mesh(&[1.0, 2.0, 3.0], Timestamp(1)).unwrap_err();
        assert!(matches!(err, IoError::StorageUnavailable { .. }));
        assert_eq!(err.user_message(), "Storage is not available.");
    }
}
