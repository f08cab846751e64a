//! Plain-text layouts of exported captures
//!
//! - vertex buffers: one line of comma-separated floats
//! - measurements: `label: value` lines
//! - depth snapshots: `x,y,z,confidence` per line
//!
//! Floats are written with `Display`, which prints the shortest text that
//! parses back to the same `f32`.

use crate::error::{IoError, Result};
use facefit_core::{DepthPointCloud, FaceMeasurements};
use std::fmt::Write;

/// Join a flat float buffer with commas
pub fn format_vertex_buffer(values: &[f32]) -> String {
    let mut out = String::with_capacity(values.len() * 10);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", value);
    }
    out
}

/// Parse a comma-separated float list back into a buffer
pub fn parse_vertex_buffer(text: &str) -> Result<Vec<f32>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(i, field)| {
            field.trim().parse::<f32>().map_err(|e| IoError::ParseError {
                message: format!("value {} ({:?}): {}", i, field.trim(), e),
            })
        })
        .collect()
}

/// Render measurements as `label: value` lines
pub fn format_measurements(measurements: &FaceMeasurements) -> String {
    let mut out = String::new();
    for (label, value) in measurements.entries() {
        let _ = writeln!(out, "{}: {}", label, value);
    }
    out
}

/// Parse `label: value` lines; blank lines are ignored
pub fn parse_measurements(text: &str) -> Result<Vec<(String, f32)>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (label, value) = line.split_once(':').ok_or_else(|| IoError::ParseError {
                message: format!("missing ':' in line {:?}", line),
            })?;
            let value = value.trim().parse::<f32>().map_err(|e| IoError::ParseError {
                message: format!("bad value for {}: {}", label.trim(), e),
            })?;
            Ok((label.trim().to_string(), value))
        })
        .collect()
}

/// Render a depth cloud as `x,y,z,confidence` lines
pub fn format_depth_points(cloud: &DepthPointCloud) -> String {
    let mut out = String::with_capacity(cloud.len() * 32);
    for point in cloud {
        let p = point.position;
        let _ = writeln!(out, "{},{},{},{}", p.x, p.y, p.z, point.confidence);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use facefit_core::{DepthPoint, Point3f};

    #[test]
    fn test_vertex_buffer_round_trip() {
        let values = vec![0.0, -1.5, 3.25e-4, 0.1, 12345.678, -0.031];
        let text = format_vertex_buffer(&values);
        assert_eq!(text.matches(',').count(), values.len() - 1);
        assert_eq!(parse_vertex_buffer(&text).unwrap(), values);
    }

    #[test]
    fn test_empty_vertex_buffer() {
        assert_eq!(format_vertex_buffer(&[]), "");
        assert!(parse_vertex_buffer("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_vertex_buffer_rejects_garbage() {
        let err = parse_vertex_buffer("1.0,abc,2.0").unwrap_err();
        assert!(matches!(err, IoError::ParseError { .. }));
    }

    #[test]
    fn test_measurements_lines() {
        let m = FaceMeasurements {
            between_eyebrows: 10.5,
            adjustment_hatch: 10.0,
            forehead: 12.0,
            nose: Point3f::new(0.0, 0.02, 0.09),
            left_ear_to_eye: 5.0,
            right_ear_to_eye: 5.5,
            first_nose_z_comparison: 4.0,
            second_nose_z_comparison: 6.0,
        };
        let text = format_measurements(&m);
        assert!(text.starts_with("between_eyebrows: 10.5\n"));
        assert_eq!(text.lines().count(), 10);

        let parsed = parse_measurements(&text).unwrap();
        assert_eq!(parsed[7], ("rightear_measurement".to_string(), 5.5));
        assert_eq!(parsed[4].1, 0.02);
    }

    #[test]
    fn test_depth_lines() {
        let cloud = DepthPointCloud::from_points(vec![
            DepthPoint::new(Point3f::new(1.0, 2.0, 3.0), 0.5),
            DepthPoint::new(Point3f::new(-1.0, 0.0, 0.25), 1.0),
        ]);
        assert_eq!(format_depth_points(&cloud), "1,2,3,0.5\n-1,0,0.25,1\n");
    }
}
