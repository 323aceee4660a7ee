//! Helper functions for the CLI.
//!
//! - **input**: PIN, password and confirmation prompts
//! - **parsing**: argument parsing

mod input;
mod parsing;

pub use input::{
    confirm, prompt_export_passphrase, prompt_pin, prompt_pin_confirmed, read_entry_password,
    read_stdin_secret,
};
pub use parsing::parse_entry_id;
