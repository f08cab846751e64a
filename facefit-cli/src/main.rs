//! facefit command-line driver
//!
//! Feeds a recorded face mesh (or depth buffer) through the same per-frame
//! pipeline the app runs, prints the results and optionally exports them.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use facefit_core::{
    point_amount, DepthFrame, DepthOutcome, DepthProcessor, FaceFrame, FacefitConfig, FrameIntent,
    FrameOutcome, FrameProcessor, Matrix4, OverlayMode, Placement, PlacementTransform,
    TrackingState,
};
use facefit_io::{read_mesh, MeasurementExporter, Timestamp};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "facefit", version, about = "Face measurements and glasses placement from recorded frames")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Measure a recorded face mesh and place the glasses on it
    Face {
        /// Mesh file: comma-separated x,y,z floats
        #[arg(long)]
        vertices: PathBuf,

        /// Face center pose as 16 comma-separated column-major floats
        #[arg(long)]
        pose: Option<String>,

        /// Adjustment slider position, 0..=100
        #[arg(long, default_value_t = 50)]
        adjust: u8,

        /// Draw the glasses at model scale over the mesh
        #[arg(long)]
        debug_overlay: bool,

        /// Export mesh and distances
        #[arg(long)]
        capture: bool,

        /// Export directory, overriding the configured documents directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Filter a recorded raw depth buffer by confidence
    Depth {
        /// Depth file: comma-separated x,y,z,confidence floats
        #[arg(long)]
        points: PathBuf,

        /// Share of points to keep by confidence, 0..=100
        #[arg(long, default_value_t = 50)]
        amount: u32,

        /// Export the filtered snapshot
        #[arg(long)]
        capture: bool,

        /// Export directory, overriding the configured documents directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_logger() {
    env_logger::Builder::new()
        .filter(None, LevelFilter::Warn)
        .filter(Some("facefit_core"), LevelFilter::Info)
        .filter(Some("facefit_io"), LevelFilter::Info)
        .filter(Some(env!("CARGO_CRATE_NAME")), LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .ok();
}

fn load_config(path: Option<&Path>) -> Result<FacefitConfig> {
    let config: FacefitConfig = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => FacefitConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn parse_pose(text: &str) -> Result<Matrix4<f32>> {
    let values = facefit_io::parse_vertex_buffer(text)?;
    let Ok(values) = <[f32; 16]>::try_from(values.as_slice()) else {
        bail!("pose needs 16 values, got {}", values.len());
    };
    Ok(PlacementTransform::from_column_major(&values).matrix)
}

fn run_face(
    config: &FacefitConfig,
    vertices: &Path,
    pose: Option<&str>,
    adjust: u8,
    debug_overlay: bool,
    export: Option<&Path>,
) -> Result<()> {
    let buffer = read_mesh(vertices)
        .with_context(|| format!("failed to read mesh {}", vertices.display()))?;
    let pose = pose.map(parse_pose).transpose()?.unwrap_or_else(Matrix4::identity);
    let frame = FaceFrame::tracking(pose, &buffer)?;
    log::info!("loaded {} vertices from {}", frame.landmarks.len(), vertices.display());

    let mut processor = FrameProcessor::new(config.placement)?;
    let intents = processor.intents();
    intents.push(FrameIntent::SetAdjustment(adjust));
    if debug_overlay {
        intents.push(FrameIntent::SetOverlayMode(OverlayMode::Debug));
    }
    if export.is_some() {
        intents.push(FrameIntent::Capture);
    }

    let report = match processor.tick(&frame) {
        FrameOutcome::Processed(report) => report,
        FrameOutcome::NotTracking(state) => bail!("face not tracked ({:?})", state),
        FrameOutcome::Skipped(err) => bail!("frame skipped: {}", err),
    };

    println!("Adjustment: {}", report.input.adjustment.percentage_label());
    for (label, value) in report.measurements.display_rows() {
        println!("{:<20} {}", label, value);
    }
    println!("{}", report.placement.prompt());
    if let Placement::Placed(transform) = report.placement {
        println!("Glasses model matrix:{}", transform.matrix);
    }

    if let (Some(dir), Some(capture)) = (export, report.capture.as_ref()) {
        let exporter = MeasurementExporter::new(dir);
        match exporter.export_capture(capture, Timestamp::now()) {
            Ok(files) => {
                println!("File created: {}", files.mesh.display());
                println!("File created: {}", files.distances.display());
            }
            Err(err) => bail!(err.user_message()),
        }
    }
    Ok(())
}

fn run_depth(points: &Path, amount: u32, export: Option<&Path>) -> Result<()> {
    let buffer = read_mesh(points)
        .with_context(|| format!("failed to read depth points {}", points.display()))?;

    let mut processor = DepthProcessor::new();
    let intents = processor.intents();
    intents.push(FrameIntent::SetPointAmount(point_amount(amount, 100)));
    if export.is_some() {
        intents.push(FrameIntent::Capture);
    }

    let timestamp = Timestamp::now();
    let frame = DepthFrame {
        tracking_state: TrackingState::Tracking,
        timestamp: timestamp.0 as i64,
        points: &buffer,
    };
    let report = match processor.tick(&frame) {
        DepthOutcome::Processed(report) => report,
        DepthOutcome::NotTracking(state) => bail!("depth not tracked ({:?})", state),
        DepthOutcome::Skipped(err) => bail!("depth frame skipped: {}", err),
    };
    println!("{} of {} depth points kept", report.visible.len(), report.total);

    if let (Some(dir), Some(snapshot)) = (export, report.capture.as_ref()) {
        let exporter = MeasurementExporter::new(dir);
        match exporter.export_depth_snapshot(snapshot, timestamp) {
            Ok(path) => println!("File created: {}", path.display()),
            Err(err) => bail!(err.user_message()),
        }
    }
    Ok(())
}

/// Export directory for a run, if it captures at all
fn export_dir(config: &FacefitConfig, capture: bool, out: Option<PathBuf>) -> Option<PathBuf> {
    capture.then(|| out.unwrap_or_else(|| config.export.documents_dir.clone()))
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Face {
            vertices,
            pose,
            adjust,
            debug_overlay,
            capture,
            out,
        } => {
            let export = export_dir(&config, capture, out);
            run_face(
                &config,
                &vertices,
                pose.as_deref(),
                adjust,
                debug_overlay,
                export.as_deref(),
            )
        }
        Command::Depth {
            points,
            amount,
            capture,
            out,
        } => {
            let export = export_dir(&config, capture, out);
            run_depth(&points, amount, export.as_deref())
        }
    }
}
