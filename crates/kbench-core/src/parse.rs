//! Line-oriented scanner for solver benchmark logs.
//!
//! The benchmark harness interleaves section banners, progress chatter, and
//! tab-separated data rows in a single text stream. A small state machine
//! tracks which section is active and decodes the row shape that section
//! uses; anything that does not decode cleanly is treated as noise and
//! dropped, so a truncated or partially written log still parses.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{KbenchError, KbenchResult};
use crate::record::{ExistenceRecord, ResultSet, VerificationRecord};

const VERIFICATION_HEADER: &str = "Benchmarking k-Stability Verification Complexity";
const EXISTENCE_HEADER: &str = "Benchmarking k-Stable Matching Existence Complexity";
const MODEL_COMPARISON_HEADER: &str = "Comparing Different Matching Models";

/// Minimum tab-separated tokens before a line is worth decoding.
const MIN_FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Verification,
    Existence,
    ModelComparison,
}

impl Section {
    /// Match a header phrase anywhere in the trimmed line, case-sensitive.
    fn detect(line: &str) -> Option<Self> {
        if line.contains(VERIFICATION_HEADER) {
            Some(Self::Verification)
        } else if line.contains(EXISTENCE_HEADER) {
            Some(Self::Existence)
        } else if line.contains(MODEL_COMPARISON_HEADER) {
            Some(Self::ModelComparison)
        } else {
            None
        }
    }
}

/// Read a whole benchmark log and parse it.
///
/// The only failure is an unreadable source; log content itself never
/// produces an error.
pub fn parse_file(path: &Path) -> KbenchResult<ResultSet> {
    let text = fs::read_to_string(path).map_err(|source| KbenchError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_str(&text))
}

/// Parse benchmark log text into typed records, in file order.
pub fn parse_str(text: &str) -> ResultSet {
    let mut results = ResultSet::default();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(section) = Section::detect(line) {
            debug!(?section, "entering section");
            current = Some(section);
            continue;
        }

        let Some(section) = current else {
            // Nothing before the first header is data.
            continue;
        };
        if line.is_empty() || line.starts_with('=') || line.starts_with("Testing") {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            continue;
        }

        match section {
            Section::Verification => {
                if let Some(record) = decode_verification(&fields) {
                    results.verification.push(record);
                } else {
                    trace!(line, "skipping undecodable verification row");
                }
            }
            Section::Existence => {
                if let Some(record) = decode_existence(&fields) {
                    results.existence.push(record);
                } else {
                    trace!(line, "skipping undecodable existence row");
                }
            }
            // No row format is defined for model comparison yet.
            Section::ModelComparison => {}
        }
    }

    results
}

fn decode_verification(fields: &[&str]) -> Option<VerificationRecord> {
    Some(VerificationRecord {
        agent_count: fields.first()?.trim().parse().ok()?,
        avg_time_ms: fields.get(1)?.trim().parse().ok()?,
        std_dev_ms: fields.get(2)?.trim().parse().ok()?,
        trial_count: fields.get(3)?.trim().parse().ok()?,
    })
}

fn decode_existence(fields: &[&str]) -> Option<ExistenceRecord> {
    Some(ExistenceRecord {
        agent_count: fields.first()?.trim().parse().ok()?,
        k_ratio: fields.get(1)?.trim().parse().ok()?,
        avg_time_ms: fields.get(2)?.trim().parse().ok()?,
        std_dev_ms: fields.get(3)?.trim().parse().ok()?,
        trial_count: fields.get(4)?.trim().parse().ok()?,
        exists_rate: fields.get(5)?.trim().parse().ok()?,
    })
}
