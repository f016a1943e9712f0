//! Speech capture and feedback pipeline.
//!
//! A single-owner state machine driving one record -> encode -> analyze
//! cycle. All waiting happens off the UI thread: recording accumulates in
//! the cpal callback, and the network call runs on a worker thread that
//! reports back over a channel tagged with a generation token. A response
//! whose token no longer matches is stale (the user moved on) and is
//! discarded.

pub mod capture;
pub mod cues;

use base64::Engine;
use std::sync::mpsc;

use crate::analysis::{self, ANALYSIS_FAILED_MESSAGE, ENCODING_FAILED_MESSAGE, Feedback, Rubric};
use crate::config::AnalysisConfig;
use capture::MicCapture;

pub const MIC_UNAVAILABLE_MESSAGE: &str =
    "Could not access the microphone. Check that it is connected and not in use.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Idle,
    Recording,
    Encoding,
    AwaitingAnalysis,
    /// Feedback is available; ready to record again.
    Done,
    /// Something went wrong; ready to record again.
    Failed,
}

impl PipelineStatus {
    /// States from which a new recording may begin. Done and Failed are
    /// presentationally equivalent to Idle.
    pub fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Done | Self::Failed)
    }

    pub fn is_busy(self) -> bool {
        matches!(self, Self::Recording | Self::Encoding | Self::AwaitingAnalysis)
    }
}

type AnalysisOutcome = (u64, Result<String, String>);

pub struct RecordingPipeline {
    status: PipelineStatus,
    capture: Option<MicCapture>,
    rx: Option<mpsc::Receiver<AnalysisOutcome>>,
    /// Bumped on every start and cancel; responses carrying an older
    /// value are dropped.
    generation: u64,
    feedback: Option<Feedback>,
    error: Option<String>,
}

impl RecordingPipeline {
    pub fn new() -> Self {
        Self {
            status: PipelineStatus::Idle,
            capture: None,
            rx: None,
            generation: 0,
            feedback: None,
            error: None,
        }
    }

    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// User-visible notice for the most recent failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Begin a new recording. Ignored unless the pipeline is at rest, so
    /// a double-tap cannot open a second stream or prompt twice.
    pub fn start(&mut self) {
        if !self.status.can_start() {
            return;
        }
        self.generation += 1;
        self.feedback = None;
        self.error = None;
        match MicCapture::open() {
            Ok(capture) => {
                self.capture = Some(capture);
                self.status = PipelineStatus::Recording;
            }
            Err(e) => {
                log::error!("microphone unavailable: {e:#}");
                self.error = Some(MIC_UNAVAILABLE_MESSAGE.to_string());
                self.status = PipelineStatus::Failed;
            }
        }
    }

    /// Finish the recording and hand it to the analysis service. The
    /// microphone is released here no matter what happens afterwards.
    pub fn stop(&mut self, config: AnalysisConfig, slide_text: String, rubric: Rubric) {
        if self.status != PipelineStatus::Recording {
            return;
        }
        let Some(capture) = self.capture.take() else {
            self.status = PipelineStatus::Failed;
            return;
        };
        self.status = PipelineStatus::Encoding;
        let buffer = capture.finish();

        let wav = match capture::encode_wav(&buffer) {
            Ok(wav) => wav,
            Err(e) => {
                log::error!("audio encoding failed: {e:#}");
                self.error = Some(ENCODING_FAILED_MESSAGE.to_string());
                self.status = PipelineStatus::Failed;
                return;
            }
        };
        let wav_base64 = base64::engine::general_purpose::STANDARD.encode(wav);

        let (tx, rx) = mpsc::channel();
        let token = self.generation;
        std::thread::spawn(move || {
            let result =
                analysis::analyze(&config, &wav_base64, &slide_text, rubric).map_err(|e| {
                    log::error!("speech analysis failed: {e:#}");
                    ANALYSIS_FAILED_MESSAGE.to_string()
                });
            // The receiver may already be gone if the user navigated away.
            let _ = tx.send((token, result));
        });
        self.rx = Some(rx);
        self.status = PipelineStatus::AwaitingAnalysis;
    }

    /// Drive the pipeline from the frame loop: pick up a finished
    /// analysis if one arrived.
    pub fn poll(&mut self) {
        let Some(rx) = &self.rx else { return };
        match rx.try_recv() {
            Ok((token, result)) => {
                self.rx = None;
                self.apply_outcome(token, result);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.rx = None;
                if self.status == PipelineStatus::AwaitingAnalysis {
                    self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
                    self.status = PipelineStatus::Failed;
                }
            }
        }
    }

    fn apply_outcome(&mut self, token: u64, result: Result<String, String>) {
        if token != self.generation {
            log::debug!("discarding stale analysis response");
            return;
        }
        match result {
            Ok(raw) => {
                self.feedback = Some(analysis::parse_feedback(&raw));
                self.status = PipelineStatus::Done;
            }
            Err(message) => {
                self.error = Some(message);
                self.status = PipelineStatus::Failed;
            }
        }
    }

    /// Abandon the current cycle: stop any active recording, drop any
    /// in-flight analysis, clear feedback. Called on slide or mode
    /// change so nothing leaks across slides.
    pub fn cancel(&mut self) {
        self.capture = None;
        self.rx = None;
        self.generation += 1;
        self.feedback = None;
        self.error = None;
        self.status = PipelineStatus::Idle;
    }
}

impl Default for RecordingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let pipeline = RecordingPipeline::new();
        assert_eq!(pipeline.status(), PipelineStatus::Idle);
        assert!(pipeline.feedback().is_none());
        assert!(pipeline.error().is_none());
    }

    #[test]
    fn test_can_start_only_at_rest() {
        assert!(PipelineStatus::Idle.can_start());
        assert!(PipelineStatus::Done.can_start());
        assert!(PipelineStatus::Failed.can_start());
        assert!(!PipelineStatus::Recording.can_start());
        assert!(!PipelineStatus::Encoding.can_start());
        assert!(!PipelineStatus::AwaitingAnalysis.can_start());
    }

    #[test]
    fn test_stop_ignored_unless_recording() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.stop(
            AnalysisConfig::default(),
            "prompt".to_string(),
            Rubric::Speaking,
        );
        assert_eq!(pipeline.status(), PipelineStatus::Idle);
    }

    #[test]
    fn test_matching_outcome_is_applied() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.status = PipelineStatus::AwaitingAnalysis;
        pipeline.generation = 3;

        pipeline.apply_outcome(3, Ok("Speaking Score: 6/10\nGood pacing.".to_string()));
        assert_eq!(pipeline.status(), PipelineStatus::Done);
        let feedback = pipeline.feedback().unwrap();
        assert_eq!(feedback.body, "Good pacing.");
        assert_eq!(feedback.badge.as_ref().unwrap().value, 6.0);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.status = PipelineStatus::AwaitingAnalysis;
        pipeline.generation = 5;

        // A response from an older cycle arrives late.
        pipeline.apply_outcome(4, Ok("stale feedback".to_string()));
        assert_eq!(pipeline.status(), PipelineStatus::AwaitingAnalysis);
        assert!(pipeline.feedback().is_none());
    }

    #[test]
    fn test_failed_outcome_surfaces_fixed_message() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.status = PipelineStatus::AwaitingAnalysis;
        pipeline.generation = 1;

        pipeline.apply_outcome(1, Err(ANALYSIS_FAILED_MESSAGE.to_string()));
        assert_eq!(pipeline.status(), PipelineStatus::Failed);
        assert_eq!(pipeline.error(), Some(ANALYSIS_FAILED_MESSAGE));
        // Failed is ready for another attempt.
        assert!(pipeline.status().can_start());
    }

    #[test]
    fn test_cancel_resets_everything_and_invalidates_token() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.status = PipelineStatus::AwaitingAnalysis;
        pipeline.generation = 2;
        pipeline.feedback = Some(analysis::parse_feedback("old feedback"));

        pipeline.cancel();
        assert_eq!(pipeline.status(), PipelineStatus::Idle);
        assert!(pipeline.feedback().is_none());

        // The pre-cancel token no longer applies.
        pipeline.apply_outcome(2, Ok("late response".to_string()));
        assert!(pipeline.feedback().is_none());
        assert_eq!(pipeline.status(), PipelineStatus::Idle);
    }

    #[test]
    fn test_poll_without_channel_is_noop() {
        let mut pipeline = RecordingPipeline::new();
        pipeline.poll();
        assert_eq!(pipeline.status(), PipelineStatus::Idle);
    }

    #[test]
    fn test_poll_applies_queued_outcome() {
        let mut pipeline = RecordingPipeline::new();
        let (tx, rx) = mpsc::channel();
        pipeline.rx = Some(rx);
        pipeline.status = PipelineStatus::AwaitingAnalysis;
        pipeline.generation = 7;

        tx.send((7, Ok("Pronunciation Score: 8/10\nClear.".to_string())))
            .unwrap();
        pipeline.poll();
        assert_eq!(pipeline.status(), PipelineStatus::Done);
        assert_eq!(pipeline.feedback().unwrap().body, "Clear.");
    }

    #[test]
    fn test_dropped_worker_maps_to_failure() {
        let mut pipeline = RecordingPipeline::new();
        let (tx, rx) = mpsc::channel::<AnalysisOutcome>();
        pipeline.rx = Some(rx);
        pipeline.status = PipelineStatus::AwaitingAnalysis;
        drop(tx);

        pipeline.poll();
        assert_eq!(pipeline.status(), PipelineStatus::Failed);
        assert_eq!(pipeline.error(), Some(ANALYSIS_FAILED_MESSAGE));
    }
}
