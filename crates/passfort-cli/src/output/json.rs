//! JSON output formatting.

use passfort_core::storage::EntrySummary;
use passfort_core::strength::{SecurityLevel, StrengthReport};
use passfort_core::DecryptedEntry;

/// Convert a decrypted entry to JSON, secrets included.
pub fn entry_json(entry: &DecryptedEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "site": entry.site,
        "username": entry.username,
        "password": entry.password.as_str(),
        "notes": entry.notes.as_ref().map(|n| n.as_str()),
        "created_at": entry.created_at,
        "updated_at": entry.updated_at,
    })
}

/// Convert entry summaries to a JSON array.
pub fn summaries_json(summaries: &[EntrySummary]) -> serde_json::Value {
    serde_json::json!(summaries)
}

/// Convert a strength report to JSON.
pub fn strength_json(report: &StrengthReport) -> serde_json::Value {
    serde_json::json!({
        "score": report.score,
        "level": report.level,
        "label": report.level.label(),
        "entropy_bits": report.entropy_bits,
        "length": report.length,
        "security_level": SecurityLevel::for_length(report.length),
        "patterns": report.patterns.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        "feedback": report.feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use passfort_core::strength::analyze;

    #[test]
    fn test_strength_json_fields() {
        let value = strength_json(&analyze("password123"));
        assert_eq!(value["length"], 11);
        assert!(value["patterns"]
            .as_array()
            .expect("array")
            .iter()
            .any(|p| *p == "Common word: password"));
        assert_eq!(value["security_level"], "medium");
    }
}
