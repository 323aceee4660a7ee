//! Parsing helpers for CLI arguments.

use passfort_core::EntryId;

use crate::errors::CliError;

/// Parse a positive entry ID.
pub fn parse_entry_id(value: &str) -> anyhow::Result<EntryId> {
    let id: EntryId = value
        .parse()
        .map_err(|_| CliError::invalid_input(format!("Invalid entry ID: {}", value.trim())))?;
    if id.get() < 1 {
        return Err(CliError::invalid_input(format!("Invalid entry ID: {}", id)).into());
    }
    Ok(id)
}
