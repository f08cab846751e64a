//! Integration tests for facefit-io
//!
//! These tests run frames through the core processor and export the
//! resulting captures the way the app's capture button does.

use approx::assert_relative_eq;
use facefit_core::{
    DepthFrame, DepthProcessor, FaceFrame, FrameIntent, FrameProcessor, LandmarkSet, Matrix4,
    NamedLandmark, PlacementConfig, Point3f, TrackingState, FACE_MESH_VERTEX_COUNT,
};
use facefit_io::*;
use std::fs;

/// A face mesh with the nose pushed forward enough to place the glasses
fn create_test_face() -> FaceFrame {
    let mut positions: Vec<Point3f> = (0..FACE_MESH_VERTEX_COUNT)
        .map(|i| Point3f::new(i as f32 * 1e-4, -(i as f32) * 2e-4, 0.01))
        .collect();
    positions[NamedLandmark::UtmostLeftEyebrow.index()] = Point3f::new(-0.05, 0.03, 0.02);
    positions[NamedLandmark::UtmostRightEyebrow.index()] = Point3f::new(0.05, 0.03, 0.02);
    positions[NamedLandmark::NoseGlassesSupport.index()] = Point3f::new(0.0, 0.02, 0.09);
    positions[NamedLandmark::NoseRightAla.index()] = Point3f::new(0.01, -0.02, 0.03);

    let flat: Vec<f32> = LandmarkSet::from_points(positions).as_flat().to_vec();
    FaceFrame::tracking(Matrix4::identity(), &flat).unwrap()
}

#[test]
fn test_capture_exports_mesh_and_distances() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = MeasurementExporter::new(dir.path());

    let mut processor = FrameProcessor::new(PlacementConfig::default()).unwrap();
    processor.intents().push(FrameIntent::Capture);
    let frame = create_test_face();
    let outcome = processor.tick(&frame);
    let report = outcome.report().expect("tracking frame should be processed");
    let capture = report.capture.as_ref().expect("capture was requested");

    let files = exporter.export_capture(capture, Timestamp(1234)).unwrap();
    assert_eq!(files.mesh.file_name().unwrap(), "mesh_1234.txt");
    assert_eq!(files.distances.file_name().unwrap(), "distances_1234.txt");

    let vertices = read_mesh(&files.mesh).unwrap();
    assert_eq!(vertices.len(), FACE_MESH_VERTEX_COUNT * 3);
    for (original, loaded) in frame.landmarks.as_flat().iter().zip(vertices.iter()) {
        assert_relative_eq!(*original, *loaded, epsilon = 1e-6);
    }

    let distances = parse_measurements(&fs::read_to_string(&files.distances).unwrap()).unwrap();
    assert_eq!(distances.len(), 10);
    assert_eq!(distances[0].0, "between_eyebrows");
    assert_relative_eq!(distances[0].1, 10.0, epsilon = 1e-3);
}

#[test]
fn test_read_only_storage_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = MeasurementExporter::with_probe(dir.path(), StorageState::MountedReadOnly);

    let mut processor = FrameProcessor::new(PlacementConfig::default()).unwrap();
    processor.intents().push(FrameIntent::Capture);
    let outcome = processor.tick(&create_test_face());
    let capture = outcome.report().unwrap().capture.clone().unwrap();

    let err = exporter.export_capture(&capture, Timestamp(99)).unwrap_err();
    assert!(matches!(err, IoError::StorageReadOnly { .. }));
    assert!(err.user_message().contains("Write permission"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_failed_capture_leaves_no_partial_files() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on the distances file name makes that write fail
    fs::create_dir(dir.path().join("distances_5.txt")).unwrap();
    let exporter = MeasurementExporter::new(dir.path());

    let mut processor = FrameProcessor::new(PlacementConfig::default()).unwrap();
    processor.intents().push(FrameIntent::Capture);
    let outcome = processor.tick(&create_test_face());
    let capture = outcome.report().unwrap().capture.clone().unwrap();

    let err = exporter.export_capture(&capture, Timestamp(5)).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
    assert!(err.user_message().starts_with("Error creating the file"));
    assert!(!dir.path().join("mesh_5.txt").exists());
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["distances_5.txt"]);
}

#[test]
fn test_depth_snapshot_export() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = MeasurementExporter::new(dir.path());

    let mut processor = DepthProcessor::new();
    processor.intents().push(FrameIntent::SetPointAmount(0.5));
    processor.intents().push(FrameIntent::Capture);
    let buffer = [0.0, 0.0, 1.0, 0.2, 0.1, 0.0, 1.1, 0.9, 0.2, 0.1, 1.2, 1.0];
    let outcome = processor.tick(&DepthFrame {
        tracking_state: TrackingState::Tracking,
        timestamp: 5_000,
        points: &buffer,
    });
    let cloud = outcome.report().unwrap().capture.clone().unwrap();
    assert_eq!(cloud.len(), 2);

    let path = exporter.export_depth_snapshot(&cloud, Timestamp(7)).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(path.file_name().unwrap(), "pointcloud_7.txt");
    assert_eq!(content.lines().count(), 2);
    assert!(content.starts_with("0.1,0,1.1,0.9\n"));
}
