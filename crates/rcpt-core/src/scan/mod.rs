//! Receipt scanning: preprocessing, recognition, and field extraction.

pub mod assemble;
pub mod layout;
pub mod patterns;
pub mod preprocess;
pub mod session;
pub mod text;

pub use session::{ScanSession, SessionState};

use tracing::{debug, info};

use rcpt_ocr::{OcrEngine, ProgressSink, ScanProgress, ScanStage};

use crate::error::ScanError;
use crate::models::config::RcptConfig;
use crate::models::entry::ExtractedEntry;
use layout::LayoutExtractor;

/// Drives a receipt from uploaded bytes to a draft ledger entry.
///
/// The scanner itself is stateless; per-upload state lives in the
/// [`ScanSession`], which is why the same scanner can serve any number
/// of sessions and retries.
pub struct ReceiptScanner {
    config: RcptConfig,
}

impl ReceiptScanner {
    pub fn new() -> Self {
        Self {
            config: RcptConfig::default(),
        }
    }

    pub fn with_config(config: RcptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RcptConfig {
        &self.config
    }

    /// Run one scan attempt on the session.
    ///
    /// The attempt always resolves: on success the session ends
    /// `Succeeded` with the draft entry returned, on any failure it ends
    /// `Failed` with the cause recorded on the session and returned.
    pub fn scan(
        &self,
        session: &mut ScanSession,
        engine: &dyn OcrEngine,
        sink: &mut dyn ProgressSink,
    ) -> Result<ExtractedEntry, ScanError> {
        session.begin()?;
        match self.run(session, engine, sink) {
            Ok(entry) => {
                session.finish();
                sink.report(session.progress());
                info!(
                    "scan succeeded: amount {} vendor {:?}",
                    entry.amount, entry.vendor
                );
                Ok(entry)
            }
            Err(err) => {
                session.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Re-run a session from the bytes it was created with.
    ///
    /// Identical to [`scan`](Self::scan); the name marks call sites that
    /// react to an earlier failure.
    pub fn retry(
        &self,
        session: &mut ScanSession,
        engine: &dyn OcrEngine,
        sink: &mut dyn ProgressSink,
    ) -> Result<ExtractedEntry, ScanError> {
        self.scan(session, engine, sink)
    }

    fn run(
        &self,
        session: &mut ScanSession,
        engine: &dyn OcrEngine,
        sink: &mut dyn ProgressSink,
    ) -> Result<ExtractedEntry, ScanError> {
        report(session, sink, ScanStage::Preparing, 5);
        let image = preprocess::prepare(session.bytes(), &self.config.preprocess)?;
        debug!(
            "prepared {}x{} image, {} bytes",
            image.width,
            image.height,
            image.bytes.len()
        );
        report(session, sink, ScanStage::Preparing, 20);

        let ocr = {
            let mut clamped = ClampedSink {
                session: &mut *session,
                inner: &mut *sink,
            };
            engine.recognize(&image, &mut clamped)?
        };
        info!(
            "engine {} recognized {} lines, {} words",
            engine.name(),
            ocr.lines.len(),
            ocr.words.len()
        );
        report(session, sink, ScanStage::RecognizingText, 90);

        let extractor = LayoutExtractor::new(&ocr);
        let amount = extractor.amount();
        let vendor = extractor.vendor(&self.config.extraction);
        let entry = assemble::assemble(&ocr.full_text, amount, vendor, &self.config.extraction);
        Ok(entry)
    }
}

impl Default for ReceiptScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn report(
    session: &mut ScanSession,
    sink: &mut dyn ProgressSink,
    stage: ScanStage,
    percent: u8,
) {
    let clamped = session.advance(ScanProgress::new(stage, percent));
    sink.report(clamped);
}

/// Routes engine-reported progress through the session clamp so that
/// whatever an engine reports, observers see a monotonic sequence.
struct ClampedSink<'a> {
    session: &'a mut ScanSession,
    inner: &'a mut dyn ProgressSink,
}

impl ProgressSink for ClampedSink<'_> {
    fn report(&mut self, progress: ScanProgress) {
        let clamped = self.session.advance(progress);
        self.inner.report(clamped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rcpt_ocr::{BoundingBox, OcrLine, OcrWord, RawOcrResult, ScanImage};

    /// Engine double: fails the first `failures` calls, then returns a
    /// fixed result. Reports deliberately out-of-order progress to
    /// exercise the clamp.
    struct MockEngine {
        output: RawOcrResult,
        failures: AtomicUsize,
        calls: AtomicUsize,
    }

    impl MockEngine {
        fn ok(output: RawOcrResult) -> Self {
            Self {
                output,
                failures: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
            }
        }

        fn flaky(output: RawOcrResult, failures: usize) -> Self {
            Self {
                output,
                failures: AtomicUsize::new(failures),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl OcrEngine for MockEngine {
        fn recognize(
            &self,
            _image: &ScanImage,
            progress: &mut dyn ProgressSink,
        ) -> rcpt_ocr::Result<RawOcrResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            progress.report(ScanProgress::new(ScanStage::RecognizingText, 40));
            // Out-of-order report a real engine could emit.
            progress.report(ScanProgress::new(ScanStage::Preparing, 10));
            progress.report(ScanProgress::new(ScanStage::RecognizingText, 80));

            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(rcpt_ocr::OcrError::RecognitionFailed(
                    "mock engine failure".to_string(),
                ));
            }
            Ok(self.output.clone())
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn png_bytes() -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(8, 8)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn receipt_ocr() -> RawOcrResult {
        let line = |id: u32, y0: f32, y1: f32, text: &str| OcrLine {
            id,
            bbox: BoundingBox::new(0.0, y0, 600.0, y1),
            text: text.to_string(),
        };
        let word = |line_id: u32, x0: f32, x1: f32, text: &str| OcrWord {
            line_id,
            bbox: BoundingBox::new(x0, 0.0, x1, 20.0),
            text: text.to_string(),
            confidence: 0.92,
        };
        RawOcrResult {
            full_text: "CORNER CAFE\n03/14/2026\nTOTAL $45.67".to_string(),
            lines: vec![
                line(0, 10.0, 60.0, "CORNER CAFE"),
                line(1, 70.0, 90.0, "03/14/2026"),
                line(2, 700.0, 730.0, "TOTAL $45.67"),
            ],
            words: vec![
                word(0, 10.0, 150.0, "CORNER"),
                word(0, 160.0, 250.0, "CAFE"),
                word(1, 10.0, 120.0, "03/14/2026"),
                word(2, 10.0, 120.0, "TOTAL"),
                word(2, 400.0, 500.0, "$45.67"),
            ],
        }
    }

    #[test]
    fn scan_produces_a_draft_entry() {
        let scanner = ReceiptScanner::new();
        let engine = MockEngine::ok(receipt_ocr());
        let mut session = ScanSession::new(png_bytes()).unwrap();

        let entry = scanner
            .scan(&mut session, &engine, &mut rcpt_ocr::NullSink)
            .unwrap();

        assert_eq!(entry.amount, Decimal::from_str("45.67").unwrap());
        assert_eq!(entry.vendor, "CORNER CAFE");
        assert_eq!(entry.description, "Purchase from CORNER CAFE");
        assert_eq!(
            entry.date,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
        );
        assert_eq!(session.state(), SessionState::Succeeded);
        assert_eq!(session.progress(), ScanProgress::new(ScanStage::Done, 100));
    }

    #[test]
    fn observers_see_monotonic_progress() {
        let scanner = ReceiptScanner::new();
        let engine = MockEngine::ok(receipt_ocr());
        let mut session = ScanSession::new(png_bytes()).unwrap();

        let mut seen: Vec<u8> = Vec::new();
        {
            let mut sink = |p: ScanProgress| seen.push(p.percent);
            scanner.scan(&mut session, &engine, &mut sink).unwrap();
        }

        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "saw {seen:?}");
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn failed_scan_can_be_retried_from_the_same_upload() {
        let scanner = ReceiptScanner::new();
        let engine = MockEngine::flaky(receipt_ocr(), 1);
        let mut session = ScanSession::new(png_bytes()).unwrap();

        let err = scanner
            .scan(&mut session, &engine, &mut rcpt_ocr::NullSink)
            .unwrap_err();
        assert!(matches!(err, ScanError::Ocr(_)));
        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.error().unwrap().contains("mock engine failure"));

        let entry = scanner
            .retry(&mut session, &engine, &mut rcpt_ocr::NullSink)
            .unwrap();
        assert_eq!(entry.vendor, "CORNER CAFE");
        assert_eq!(session.state(), SessionState::Succeeded);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_recognition_still_yields_a_draft() {
        let scanner = ReceiptScanner::new();
        let engine = MockEngine::ok(RawOcrResult::default());
        let mut session = ScanSession::new(png_bytes()).unwrap();

        let entry = scanner
            .scan(&mut session, &engine, &mut rcpt_ocr::NullSink)
            .unwrap();

        assert_eq!(entry.amount, Decimal::ZERO);
        assert_eq!(entry.vendor, "");
        assert_eq!(entry.description, "Scanned receipt");
        assert_eq!(entry.category, "Supplies");
        assert_eq!(session.state(), SessionState::Succeeded);
    }
}
