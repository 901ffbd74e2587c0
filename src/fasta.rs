//src/fasta.rs

use crate::error::{ReportError, Result};
use crate::types::{ClassificationRequest, ModelConfig, SequenceInput};

/// Parse pasted FASTA text into classification inputs.
///
/// Sequence lines are trimmed and upper-cased; an empty header gets a
/// positional id (`seq_N`). Bare sequence text with no header at all becomes a
/// single `seq_1` entry. Headers without any sequence are dropped.
pub fn parse_fasta(text: &str) -> Vec<SequenceInput> {
    let mut sequences = Vec::new();
    let mut current_id = String::new();
    let mut current_seq = String::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            // flush the previous record
            if !current_id.is_empty() && !current_seq.is_empty() {
                sequences.push(SequenceInput {
                    id: std::mem::take(&mut current_id),
                    sequence: std::mem::take(&mut current_seq),
                });
            }
            current_id = if header.is_empty() {
                format!("seq_{}", sequences.len() + 1)
            } else {
                header.to_string()
            };
            current_seq.clear();
        } else {
            current_seq.push_str(&line.to_ascii_uppercase());
        }
    }

    if !current_id.is_empty() && !current_seq.is_empty() {
        sequences.push(SequenceInput {
            id: current_id,
            sequence: current_seq,
        });
    } else if sequences.is_empty() && !current_seq.is_empty() {
        sequences.push(SequenceInput {
            id: "seq_1".to_string(),
            sequence: current_seq,
        });
    }

    sequences
}

impl ClassificationRequest {
    /// Build a request from pasted FASTA text. Fails when nothing parses.
    pub fn from_fasta(text: &str, config: Option<ModelConfig>, source: &str) -> Result<Self> {
        let sequences = parse_fasta(text);
        if sequences.is_empty() {
            return Err(ReportError::NoSequences);
        }
        log::debug!("Parsed {} sequence(s) from FASTA input", sequences.len());
        Ok(Self {
            sequences,
            config,
            source: source.to_string(),
        })
    }
}
