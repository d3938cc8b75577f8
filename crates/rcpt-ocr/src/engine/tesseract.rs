//! OCR engine backed by the `tesseract` command-line binary.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::OcrError;
use crate::progress::{ProgressSink, ScanProgress, ScanStage};
use crate::result::{BoundingBox, OcrLine, OcrWord, RawOcrResult};
use crate::{OcrEngine, Result, ScanImage};

/// Engine that shells out to an installed `tesseract` binary.
///
/// The image is staged in a temporary file and recognized with the TSV
/// output format, which carries word geometry alongside the text. The
/// staging file is removed when the call returns, on success and on every
/// error path.
pub struct TesseractCli {
    binary: PathBuf,
    language: String,
    psm: Option<u8>,
}

impl TesseractCli {
    /// Create an engine using `tesseract` from `PATH` and English data.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            psm: None,
        }
    }

    /// Use a specific tesseract binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the recognition language (tesseract `-l` argument).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode (tesseract `--psm` argument).
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(
        &self,
        image: &ScanImage,
        progress: &mut dyn ProgressSink,
    ) -> Result<RawOcrResult> {
        progress.report(ScanProgress::new(ScanStage::RecognizingText, 30));

        let mut staged = tempfile::Builder::new()
            .prefix("rcpt-scan-")
            .suffix(&format!(".{}", image.encoding.extension()))
            .tempfile()?;
        staged.write_all(&image.bytes)?;
        staged.flush()?;

        debug!(
            "running {} on {} ({} bytes)",
            self.binary.display(),
            staged.path().display(),
            image.bytes.len()
        );

        let mut command = Command::new(&self.binary);
        command
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language);
        if let Some(psm) = self.psm {
            command.arg("--psm").arg(psm.to_string());
        }
        command.arg("tsv");

        let output = command.output().map_err(|e| {
            OcrError::EngineUnavailable(format!("{}: {}", self.binary.display(), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::RecognitionFailed(stderr.trim().to_string()));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let result = parse_tsv(&tsv)?;

        progress.report(ScanProgress::new(ScanStage::RecognizingText, 85));
        debug!(
            "recognized {} words across {} lines",
            result.words.len(),
            result.lines.len()
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// Parse tesseract TSV output into lines and words.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Level 4 rows are lines, level 5
/// rows are words; each (block, paragraph, line) triple gets a sequential
/// line id. Malformed rows are skipped.
fn parse_tsv(tsv: &str) -> Result<RawOcrResult> {
    let mut lines: Vec<OcrLine> = Vec::new();
    let mut words: Vec<OcrWord> = Vec::new();
    let mut line_ids: HashMap<(u32, u32, u32), u32> = HashMap::new();
    let mut saw_rows = false;

    for (idx, row) in tsv.lines().enumerate() {
        if idx == 0 {
            // header row
            continue;
        }
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }
        saw_rows = true;

        let level: u8 = match cols[0].parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if level != 4 && level != 5 {
            continue;
        }

        let block: u32 = cols[2].parse().unwrap_or(0);
        let par: u32 = cols[3].parse().unwrap_or(0);
        let line: u32 = cols[4].parse().unwrap_or(0);
        let left: f32 = cols[6].parse().unwrap_or(0.0);
        let top: f32 = cols[7].parse().unwrap_or(0.0);
        let width: f32 = cols[8].parse().unwrap_or(0.0);
        let height: f32 = cols[9].parse().unwrap_or(0.0);
        let bbox = BoundingBox::new(left, top, left + width, top + height);

        let next_id = line_ids.len() as u32;
        let id = *line_ids.entry((block, par, line)).or_insert(next_id);

        if level == 4 {
            lines.push(OcrLine {
                id,
                bbox,
                text: String::new(),
            });
        } else {
            let confidence: f32 = cols[10].parse().unwrap_or(-1.0);
            let text = cols[11].trim();
            if text.is_empty() || confidence < 0.0 {
                continue;
            }
            words.push(OcrWord {
                line_id: id,
                bbox,
                text: text.to_string(),
                confidence: confidence / 100.0,
            });
        }
    }

    if !saw_rows {
        return Err(OcrError::MalformedOutput(
            "no TSV rows in engine output".to_string(),
        ));
    }

    // Line text is assembled from the line's words, in TSV order.
    for line in &mut lines {
        let parts: Vec<&str> = words
            .iter()
            .filter(|w| w.line_id == line.id)
            .map(|w| w.text.as_str())
            .collect();
        line.text = parts.join(" ");
    }
    lines.retain(|l| !l.text.is_empty());

    let full_text = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(RawOcrResult {
        full_text,
        lines,
        words,
    })
}
