//! Recipient list input
//!
//! Loads the delimited recipient list: two fields per record (address,
//! amount), no header row. Any malformed record is a configuration-time
//! error naming the offending line; nothing is submitted first.

use crate::error::{Error, Result};
use crate::types::{Address, TokenAmount, Transfer};
use std::path::Path;
use tracing::info;

/// Load and validate the recipient list
pub fn load_recipients(path: impl AsRef<Path>, delimiter: char) -> Result<Vec<Transfer>> {
    let path = path.as_ref();

    if !delimiter.is_ascii() {
        return Err(Error::Config(format!(
            "delimiter must be a single ASCII character, got {:?}",
            delimiter
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter as u8)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut transfers = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 2 {
            return Err(Error::Recipients {
                line,
                reason: format!("expected 2 fields (address, amount), got {}", record.len()),
            });
        }

        let recipient = Address::new(&record[0]).map_err(|e| Error::Recipients {
            line,
            reason: e.to_string(),
        })?;
        let amount = TokenAmount::parse(&record[1]).map_err(|e| Error::Recipients {
            line,
            reason: e.to_string(),
        })?;

        transfers.push(Transfer { recipient, amount });
    }

    info!(
        "Loaded {} recipients from {}",
        transfers.len(),
        path.display()
    );

    Ok(transfers)
}
