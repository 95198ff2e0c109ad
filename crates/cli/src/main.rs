mod settings;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use crossbeam_channel::Receiver;

use blinkshot_core::detection::infrastructure::scripted_face_detector::{
    DetectionTrace, ScriptedFaceDetector,
};
use blinkshot_core::outline::infrastructure::outline_factory::{create_outline, OutlineShape};
use blinkshot_core::pipeline::capture_decision_use_case::CaptureDecisionUseCase;
use blinkshot_core::pipeline::capture_event::CaptureEvent;
use blinkshot_core::pipeline::detection_coordinator::{DetectionCoordinator, Submission};
use blinkshot_core::pipeline::infrastructure::threaded_detection_coordinator::ThreadedDetectionCoordinator;
use blinkshot_core::pipeline::pipeline_logger::StatsPipelineLogger;
use blinkshot_core::shared::geometry::Rect;

use settings::Settings;

/// Replays a recorded face detection trace through the blink capture engine.
#[derive(Parser)]
#[command(name = "blinkshot")]
struct Cli {
    /// Detection trace (JSON) to replay.
    trace: PathBuf,

    /// Settings file (defaults to the per-user config file).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to the per-user config file.
    #[arg(long)]
    save_settings: bool,

    /// Overlay width in display pixels.
    #[arg(long)]
    overlay_width: Option<f32>,

    /// Overlay height in display pixels.
    #[arg(long)]
    overlay_height: Option<f32>,

    /// Outline shape: oval or rect.
    #[arg(long)]
    outline: Option<OutlineShape>,

    /// Outline width in overlay pixels.
    #[arg(long)]
    outline_width: Option<f32>,

    /// Outline height in overlay pixels.
    #[arg(long)]
    outline_height: Option<f32>,

    /// Disable the smile prompts.
    #[arg(long)]
    no_smile_prompts: bool,
}

#[derive(Debug, Default, PartialEq)]
struct ReplaySummary {
    frames: usize,
    dropped: usize,
    errors: usize,
    captures: Vec<(usize, i32, Rect)>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = resolve_settings(&cli)?;
    settings.validate()?;
    if cli.save_settings {
        let path = settings.save()?;
        log::info!("Settings saved to {}", path.display());
    }

    let trace = DetectionTrace::load(&cli.trace)?;
    log::info!(
        "Replaying {} batches from {}",
        trace.batches.len(),
        cli.trace.display()
    );

    let summary = replay(&trace, &settings)?;
    println!(
        "{} frames, {} dropped, {} errors, {} captures",
        summary.frames,
        summary.dropped,
        summary.errors,
        summary.captures.len()
    );
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };

    if let Some(w) = cli.overlay_width {
        settings.overlay_width = w;
    }
    if let Some(h) = cli.overlay_height {
        settings.overlay_height = h;
    }
    if let Some(shape) = cli.outline {
        settings.outline_shape = shape;
    }
    if let Some(w) = cli.outline_width {
        settings.outline_width = w;
    }
    if let Some(h) = cli.outline_height {
        settings.outline_height = h;
    }
    if cli.no_smile_prompts {
        settings.liveness.smile_prompts = false;
    }
    Ok(settings)
}

/// Feeds every batch of the trace through a threaded coordinator, one frame
/// at a time, printing the events each frame produces.
fn replay(
    trace: &DetectionTrace,
    settings: &Settings,
) -> Result<ReplaySummary, Box<dyn std::error::Error>> {
    let outline = create_outline(
        settings.outline_shape,
        settings.overlay_size(),
        settings.outline_width,
        settings.outline_height,
    );
    let b = outline.bounds();
    log::info!(
        "{:?} outline at [{:.1}, {:.1}, {:.1}, {:.1}]",
        settings.outline_shape,
        b.left,
        b.top,
        b.right,
        b.bottom
    );
    let use_case = CaptureDecisionUseCase::new(outline, settings.liveness.clone());
    let detector = ScriptedFaceDetector::new(trace.batches.clone());
    let (tx, rx) = crossbeam_channel::unbounded();

    let coordinator = ThreadedDetectionCoordinator::new(
        Box::new(detector),
        use_case,
        Box::new(StatsPipelineLogger::new()),
        tx,
    );
    coordinator.attach()?;

    let mut summary = ReplaySummary::default();
    for index in 0..trace.batches.len() {
        let frame_number = index + 1;
        summary.frames += 1;
        match coordinator.submit(trace.frame.to_frame()) {
            Submission::Dropped => {
                log::warn!("Frame {frame_number} dropped");
                summary.dropped += 1;
            }
            Submission::Accepted | Submission::Rejected => {
                for event in wait_for_frame(&rx)? {
                    record(frame_number, &event, &mut summary);
                    println!("frame {frame_number}: {}", describe(&event));
                }
            }
        }
    }

    Ok(summary)
}

/// Collects events until the one that closes the current frame.
fn wait_for_frame(
    rx: &Receiver<CaptureEvent>,
) -> Result<Vec<CaptureEvent>, Box<dyn std::error::Error>> {
    let mut events = Vec::new();
    loop {
        let event = rx.recv().map_err(|_| "capture engine stopped unexpectedly")?;
        let done = event.ends_frame();
        events.push(event);
        if done {
            return Ok(events);
        }
    }
}

fn record(frame_number: usize, event: &CaptureEvent, summary: &mut ReplaySummary) {
    match event {
        CaptureEvent::Capture {
            tracking_id,
            frame_box,
            ..
        } => summary.captures.push((frame_number, *tracking_id, *frame_box)),
        CaptureEvent::Error(_) => summary.errors += 1,
        _ => {}
    }
}

fn describe(event: &CaptureEvent) -> String {
    match event {
        CaptureEvent::FacesUpdated(faces) => format!("{} face(s)", faces.len()),
        CaptureEvent::OutlineShown(true) => "face inside outline".to_string(),
        CaptureEvent::OutlineShown(false) => "outline empty".to_string(),
        CaptureEvent::Advisory { tracking_id, kind } => {
            format!("face {tracking_id}: {kind:?}")
        }
        CaptureEvent::Capture {
            tracking_id,
            frame_box: b,
            ..
        } => format!(
            "CAPTURE face {tracking_id} at [{:.1}, {:.1}, {:.1}, {:.1}]",
            b.left, b.top, b.right, b.bottom
        ),
        CaptureEvent::Error(e) => format!("error: {e}"),
    }
}
