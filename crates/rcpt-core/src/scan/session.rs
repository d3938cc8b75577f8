//! Lifecycle of a single receipt scan.
//!
//! A session owns the original upload and tracks one attempt at a time.
//! It always ends in `Succeeded` or `Failed`, and a failed attempt can
//! be retried from the bytes it was created with, so callers never need
//! to re-upload or poll a state that cannot resolve.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rcpt_ocr::{ScanProgress, ScanStage};

use crate::error::ScanError;

/// Where a scan session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Processing,
    Succeeded,
    Failed,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Processing => "processing",
            SessionState::Succeeded => "succeeded",
            SessionState::Failed => "failed",
        }
    }
}

/// One receipt upload and its scan attempts.
#[derive(Debug)]
pub struct ScanSession {
    original: Vec<u8>,
    state: SessionState,
    progress: ScanProgress,
    error: Option<String>,
}

impl ScanSession {
    /// Accept an upload, rejecting anything that is clearly not an
    /// image before any work is spent on it.
    pub fn new(bytes: Vec<u8>) -> Result<Self, ScanError> {
        if bytes.is_empty() {
            return Err(ScanError::InputRejected("empty image data".to_string()));
        }
        image::guess_format(&bytes)
            .map_err(|_| ScanError::InputRejected("unrecognized image format".to_string()))?;

        Ok(Self {
            original: bytes,
            state: SessionState::Idle,
            progress: ScanProgress::new(ScanStage::Preparing, 0),
            error: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn progress(&self) -> ScanProgress {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The bytes this session was created with. Retries always start
    /// from these, never from any intermediate image.
    pub fn bytes(&self) -> &[u8] {
        &self.original
    }

    /// Start an attempt. Starting over from a finished or failed
    /// session is the retry path; starting while one is running is
    /// refused.
    pub fn begin(&mut self) -> Result<(), ScanError> {
        if self.state == SessionState::Processing {
            return Err(ScanError::AlreadyRunning);
        }
        debug!("scan attempt starting from state {}", self.state.label());
        self.state = SessionState::Processing;
        self.progress = ScanProgress::new(ScanStage::Preparing, 0);
        self.error = None;
        Ok(())
    }

    /// Record a progress update, clamped so observers never see the
    /// stage or percentage move backwards within an attempt. Returns
    /// what observers should be shown.
    pub fn advance(&mut self, update: ScanProgress) -> ScanProgress {
        let clamped = ScanProgress::new(
            self.progress.stage.max(update.stage),
            self.progress.percent.max(update.percent),
        );
        self.progress = clamped;
        clamped
    }

    pub fn finish(&mut self) {
        self.state = SessionState::Succeeded;
        self.progress = ScanProgress::new(ScanStage::Done, 100);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("scan attempt failed: {}", message);
        self.state = SessionState::Failed;
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png_bytes() -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(4, 4)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn rejects_empty_uploads() {
        let err = ScanSession::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ScanError::InputRejected(_)));
    }

    #[test]
    fn rejects_non_image_bytes() {
        let err = ScanSession::new(b"just some text".to_vec()).unwrap_err();
        assert!(matches!(err, ScanError::InputRejected(_)));
    }

    #[test]
    fn accepts_a_png_upload() {
        let session = ScanSession::new(png_bytes()).unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.progress().percent, 0);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn refuses_concurrent_attempts() {
        let mut session = ScanSession::new(png_bytes()).unwrap();
        session.begin().unwrap();
        assert!(matches!(session.begin(), Err(ScanError::AlreadyRunning)));
    }

    #[test]
    fn progress_never_moves_backwards() {
        let mut session = ScanSession::new(png_bytes()).unwrap();
        session.begin().unwrap();

        let p = session.advance(ScanProgress::new(ScanStage::RecognizingText, 40));
        assert_eq!(p.percent, 40);

        // A misbehaving reporter drops back; observers must not see it.
        let p = session.advance(ScanProgress::new(ScanStage::Preparing, 25));
        assert_eq!(p.stage, ScanStage::RecognizingText);
        assert_eq!(p.percent, 40);

        let p = session.advance(ScanProgress::new(ScanStage::RecognizingText, 70));
        assert_eq!(p.percent, 70);
    }

    #[test]
    fn finish_snaps_to_done() {
        let mut session = ScanSession::new(png_bytes()).unwrap();
        session.begin().unwrap();
        session.advance(ScanProgress::new(ScanStage::RecognizingText, 55));
        session.finish();

        assert_eq!(session.state(), SessionState::Succeeded);
        assert_eq!(session.progress(), ScanProgress::new(ScanStage::Done, 100));
    }

    #[test]
    fn failure_keeps_the_original_bytes_for_retry() {
        let bytes = png_bytes();
        let mut session = ScanSession::new(bytes.clone()).unwrap();
        session.begin().unwrap();
        session.advance(ScanProgress::new(ScanStage::RecognizingText, 60));
        session.fail("engine exploded");

        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.error(), Some("engine exploded"));
        assert_eq!(session.bytes(), bytes.as_slice());

        // Retrying resets the attempt but not the upload.
        session.begin().unwrap();
        assert_eq!(session.state(), SessionState::Processing);
        assert_eq!(session.progress().percent, 0);
        assert_eq!(session.error(), None);
        assert_eq!(session.bytes(), bytes.as_slice());
    }
}
