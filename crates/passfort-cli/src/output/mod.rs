//! Output formatting for entries and reports.

mod json;
mod text;

pub use json::{entry_json, strength_json, summaries_json};
pub use text::{print_entry, print_entry_list, print_strength};
