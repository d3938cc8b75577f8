//! Progress reporting for scan operations.

use serde::{Deserialize, Serialize};

/// Coarse stages of a receipt scan. Ordered by progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    Preparing,
    RecognizingText,
    Done,
}

impl ScanStage {
    /// Human-readable label shown next to progress indicators.
    pub fn label(&self) -> &'static str {
        match self {
            ScanStage::Preparing => "preparing",
            ScanStage::RecognizingText => "recognizing text",
            ScanStage::Done => "done",
        }
    }
}

/// A progress update emitted while a scan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Current stage.
    pub stage: ScanStage,

    /// Completion estimate, 0-100.
    pub percent: u8,
}

impl ScanProgress {
    pub fn new(stage: ScanStage, percent: u8) -> Self {
        Self {
            stage,
            percent: percent.min(100),
        }
    }
}

/// Receiver for progress updates.
///
/// Implemented for any `FnMut(ScanProgress)`, so a closure driving a
/// progress bar can be passed directly.
pub trait ProgressSink {
    fn report(&mut self, progress: ScanProgress);
}

impl<F: FnMut(ScanProgress)> ProgressSink for F {
    fn report(&mut self, progress: ScanProgress) {
        self(progress)
    }
}

/// Sink that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&mut self, _progress: ScanProgress) {}
}
