use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Result;
use crate::types::ClassificationResponse;

/// Read a classification response saved as JSON; `.gz` files are decompressed.
///
/// Only parses. Call [`crate::validate::validate_response`] before trusting the
/// numbers.
pub fn read_response<P: AsRef<Path>>(path: P) -> Result<ClassificationResponse> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    let response: ClassificationResponse = serde_json::from_reader(reader)?;
    log::info!(
        "Loaded {} result(s) from {} (source: {})",
        response.detailed_results.len(),
        path.display(),
        response.source
    );
    Ok(response)
}
