//! Accession extraction from homology-search reports
//!
//! A search report is semi-structured text in one of two layouts. The
//! caller selects the layout; it is never auto-detected.
//!
//! - [`ReportFormat::SummaryTable`]: numbered summary rows whose second
//!   column is a pipe-delimited reference token, e.g.
//!   `1  tr|P12345|SOME_DESC ...`
//! - [`ReportFormat::HitBlock`]: a `No Hit` banner line followed by a run
//!   of lines carrying `UniRef100_<acc>` reference tokens
//!
//! "No hits" (no banner, empty block, no matching rows) yields an empty
//! sequence. A line that looks like a reference row but whose accession
//! cannot be extracted is a fatal [`PmaError::MalformedReport`], so a
//! non-conforming file is reported instead of silently skipped.

use pma_common::{AccessionId, PmaError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Banner marking the start of the hit block in HHblits-style reports.
const HIT_BANNER: &str = "No Hit";

/// Reference prefix carried by every candidate line inside the hit block.
const BLOCK_REF_PREFIX: &str = "UniRef100";

// Rank number followed by a pipe-bearing reference token.
static SUMMARY_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s+\S*\|").expect("summary row pattern"));

// Accession between the first pair of pipes.
static SUMMARY_ACC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|(\w+)\|").expect("summary accession pattern"));

static BLOCK_ACC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"UniRef100_(\w+)").expect("block accession pattern"));

/// Supported report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Numbered summary rows with `db|accession|name` reference tokens.
    SummaryTable,
    /// Banner-delimited block of `UniRef100_<acc>` lines.
    HitBlock,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::SummaryTable => write!(f, "summary-table"),
            ReportFormat::HitBlock => write!(f, "hit-block"),
        }
    }
}

/// A loaded report ready for accession extraction.
///
/// Owns the report lines; [`ReportScan::accessions`] hands out a lazy
/// iterator over them and can be called any number of times.
#[derive(Debug, Clone)]
pub struct ReportScan {
    lines: Vec<String>,
    format: ReportFormat,
}

impl ReportScan {
    pub fn new(text: &str, format: ReportFormat) -> Self {
        Self {
            lines: text.lines().map(|l| l.to_string()).collect(),
            format,
        }
    }

    pub fn from_file(path: impl AsRef<Path>, format: ReportFormat) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(&text, format))
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Accessions in document order.
    ///
    /// Yields `Err` once and then fuses if a reference-shaped line fails
    /// the accession sub-pattern.
    pub fn accessions(&self) -> Accessions<'_> {
        Accessions {
            lines: &self.lines,
            format: self.format,
            pos: 0,
            in_block: false,
            done: false,
        }
    }
}

/// Iterator over the accessions of a [`ReportScan`].
pub struct Accessions<'a> {
    lines: &'a [String],
    format: ReportFormat,
    pos: usize,
    in_block: bool,
    done: bool,
}

impl<'a> Accessions<'a> {
    fn next_summary(&mut self) -> Option<Result<AccessionId>> {
        while self.pos < self.lines.len() {
            let line = &self.lines[self.pos];
            self.pos += 1;

            if !SUMMARY_ROW_RE.is_match(line) {
                continue;
            }

            return match SUMMARY_ACC_RE.captures(line) {
                Some(caps) => Some(Ok(AccessionId::new(&caps[1]))),
                None => {
                    self.done = true;
                    Some(Err(PmaError::malformed_report(self.pos, line)))
                }
            };
        }
        None
    }

    fn next_block(&mut self) -> Option<Result<AccessionId>> {
        if !self.in_block {
            // Skip ahead to the banner; no banner means no hits.
            while self.pos < self.lines.len() {
                let found = self.lines[self.pos].contains(HIT_BANNER);
                self.pos += 1;
                if found {
                    self.in_block = true;
                    break;
                }
            }
            if !self.in_block {
                return None;
            }
        }

        if self.pos >= self.lines.len() {
            return None;
        }

        let line = &self.lines[self.pos];
        self.pos += 1;

        // First line without the reference prefix closes the block.
        if !line.contains(BLOCK_REF_PREFIX) {
            self.done = true;
            return None;
        }

        match BLOCK_ACC_RE.captures(line) {
            Some(caps) => Some(Ok(AccessionId::new(&caps[1]))),
            None => {
                self.done = true;
                Some(Err(PmaError::malformed_report(self.pos, line)))
            }
        }
    }
}

impl<'a> Iterator for Accessions<'a> {
    type Item = Result<AccessionId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.format {
            ReportFormat::SummaryTable => self.next_summary(),
            ReportFormat::HitBlock => self.next_block(),
        }
    }
}
