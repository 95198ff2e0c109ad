use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::capture_decision_use_case::CaptureDecisionUseCase;
use crate::pipeline::capture_event::CaptureEvent;
use crate::pipeline::detection_coordinator::{DetectionCoordinator, Submission};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::error::EngineError;
use crate::shared::frame::{Frame, FrameGeometry};

/// A single slot: the busy flag already guarantees at most one frame in
/// flight, so the worker never needs a backlog.
const FRAME_CHANNEL_CAPACITY: usize = 1;

struct DetectionOutcome {
    geometry: FrameGeometry,
    detect_ms: f64,
    result: Result<Vec<DetectedFace>, String>,
}

struct DetectionWorker {
    frame_tx: Sender<Frame>,
    handle: JoinHandle<Box<dyn FaceDetector>>,
}

/// Runs detection on one dedicated worker and post-processing on one
/// coordination thread.
///
/// Layout: `submit → [busy gate] → detect worker → coordination [transform/gate/track] → events`
///
/// Frames arriving while a detection is in flight are dropped, never
/// queued. The busy flag is released as soon as the detector returns, so
/// the next frame can start detecting while the previous result is still
/// being routed.
pub struct ThreadedDetectionCoordinator {
    busy: Arc<Mutex<bool>>,
    worker: Mutex<Option<DetectionWorker>>,
    parked: Mutex<Option<Box<dyn FaceDetector>>>,
    outcome_tx: Option<Sender<DetectionOutcome>>,
    events: Sender<CaptureEvent>,
    coordination: Option<JoinHandle<()>>,
    accepted: AtomicUsize,
    dropped: AtomicUsize,
}

impl ThreadedDetectionCoordinator {
    /// Starts the coordination thread. Detection stays unavailable until
    /// [`attach`](Self::attach) is called.
    pub fn new(
        detector: Box<dyn FaceDetector>,
        use_case: CaptureDecisionUseCase,
        logger: Box<dyn PipelineLogger>,
        events: Sender<CaptureEvent>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<DetectionOutcome>();
        let coordination = spawn_coordination(use_case, logger, outcome_rx, events.clone());

        Self {
            busy: Arc::new(Mutex::new(false)),
            worker: Mutex::new(None),
            parked: Mutex::new(Some(detector)),
            outcome_tx: Some(outcome_tx),
            events,
            coordination: Some(coordination),
            accepted: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Starts the detection worker. Attaching twice is a no-op.
    pub fn attach(&self) -> Result<(), EngineError> {
        let mut slot = lock(&self.worker);
        if slot.is_some() {
            return Ok(());
        }
        let Some(outcome_tx) = self.outcome_tx.clone() else {
            return Err(EngineError::EngineNotReady);
        };
        let Some(detector) = lock(&self.parked).take() else {
            log::error!("No detector available to attach");
            return Err(EngineError::EngineNotReady);
        };

        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Frame>(FRAME_CHANNEL_CAPACITY);
        let handle = spawn_detector(detector, frame_rx, outcome_tx, self.busy.clone());
        *slot = Some(DetectionWorker { frame_tx, handle });
        log::info!("Detection worker attached");
        Ok(())
    }

    /// Stops the detection worker after any in-flight detection completes,
    /// keeping the detector for a later [`attach`](Self::attach).
    pub fn detach(&self) {
        let Some(worker) = lock(&self.worker).take() else {
            return;
        };
        drop(worker.frame_tx);
        match worker.handle.join() {
            Ok(detector) => {
                *lock(&self.parked) = Some(detector);
                log::info!("Detection worker detached");
            }
            Err(_) => log::error!("Detection worker panicked; detector discarded"),
        }
    }

    pub fn is_attached(&self) -> bool {
        lock(&self.worker).is_some()
    }

    pub fn is_busy(&self) -> bool {
        *lock(&self.busy)
    }

    pub fn accepted_frames(&self) -> usize {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn dropped_frames(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reports a rejected frame. Called with no lock held; a full event
    /// channel loses the event rather than blocking the caller.
    fn reject(&self, error: EngineError) -> Submission {
        log::error!("{error}");
        match self.events.try_send(CaptureEvent::Error(error)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::warn!("Event channel full, rejection not delivered"),
            Err(TrySendError::Disconnected(_)) => log::debug!("Event receiver gone"),
        }
        Submission::Rejected
    }
}

impl DetectionCoordinator for ThreadedDetectionCoordinator {
    fn submit(&self, frame: Frame) -> Submission {
        let failure = {
            let mut busy = lock(&self.busy);
            if *busy {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::trace!("Detector busy, dropping frame");
                return Submission::Dropped;
            }

            let worker_slot = lock(&self.worker);
            let Some(worker) = worker_slot.as_ref() else {
                drop(worker_slot);
                drop(busy);
                return self.reject(EngineError::EngineNotReady);
            };

            *busy = true;
            match worker.frame_tx.try_send(frame) {
                Ok(()) => {
                    self.accepted.fetch_add(1, Ordering::Relaxed);
                    return Submission::Accepted;
                }
                Err(TrySendError::Full(_)) => {
                    *busy = false;
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    return Submission::Dropped;
                }
                Err(TrySendError::Disconnected(_)) => {
                    *busy = false;
                    EngineError::DetectionFailure("detection worker stopped".into())
                }
            }
        };
        self.reject(failure)
    }
}

impl Drop for ThreadedDetectionCoordinator {
    fn drop(&mut self) {
        self.detach();
        self.outcome_tx.take();
        if let Some(handle) = self.coordination.take() {
            if handle.join().is_err() {
                log::error!("Coordination thread panicked");
            }
        }
        log::info!(
            "Detection coordinator stopped: {} frames accepted, {} dropped",
            self.accepted_frames(),
            self.dropped_frames()
        );
    }
}

/// Clears the busy flag when dropped, including on unwind.
struct BusyRelease<'a>(&'a Mutex<bool>);

impl Drop for BusyRelease<'_> {
    fn drop(&mut self) {
        *lock(self.0) = false;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn spawn_detector(
    mut detector: Box<dyn FaceDetector>,
    frame_rx: Receiver<Frame>,
    outcome_tx: Sender<DetectionOutcome>,
    busy: Arc<Mutex<bool>>,
) -> JoinHandle<Box<dyn FaceDetector>> {
    std::thread::spawn(move || {
        for frame in frame_rx {
            let geometry = frame.geometry();
            let start = Instant::now();
            let result = {
                let _release = BusyRelease(&busy);
                run_detection(detector.as_mut(), &frame)
            };
            let detect_ms = start.elapsed().as_secs_f64() * 1000.0;
            drop(frame);

            let outcome = DetectionOutcome {
                geometry,
                detect_ms,
                result,
            };
            if outcome_tx.send(outcome).is_err() {
                break;
            }
        }
        detector
    })
}

/// A panicking detector fails only the frame it was given; the worker
/// keeps serving later frames.
fn run_detection(
    detector: &mut dyn FaceDetector,
    frame: &Frame,
) -> Result<Vec<DetectedFace>, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| detector.detect(frame))) {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(_) => Err("detector panicked".into()),
    }
}

fn spawn_coordination(
    mut use_case: CaptureDecisionUseCase,
    mut logger: Box<dyn PipelineLogger>,
    outcome_rx: Receiver<DetectionOutcome>,
    events: Sender<CaptureEvent>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for outcome in outcome_rx {
            logger.timing("detect", outcome.detect_ms);
            match outcome.result {
                Ok(faces) => {
                    let start = Instant::now();
                    let batch = use_case.execute(&outcome.geometry, &faces);
                    logger.timing("decide", start.elapsed().as_secs_f64() * 1000.0);
                    logger.metric("faces", faces.len() as f64);
                    logger.metric("contained", use_case.contained_count() as f64);
                    logger.frame_processed();
                    for event in batch {
                        let _ = events.send(event);
                    }
                }
                Err(message) => {
                    log::warn!("Face detection failed: {message}");
                    let _ = events.send(CaptureEvent::Error(EngineError::DetectionFailure(message)));
                }
            }
        }
        logger.summary();
    })
}
