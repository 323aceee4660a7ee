//! Input handling for PINs, passwords and confirmations.
//!
//! Secrets are read from the environment first, then from a hidden prompt.
//! Everything returned here is wrapped in `Zeroizing`.

use std::io::{self, Read};

use dialoguer::{Confirm, Password};
use passfort_core::crypto::validate_pin;
use zeroize::Zeroizing;

use crate::constants::{EXPORT_PASSPHRASE_ENV, PIN_ENV};
use crate::errors::CliError;

fn env_secret(name: &str) -> Option<Zeroizing<String>> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Zeroizing::new)
}

fn no_tty(what: &str, env: &str) -> anyhow::Error {
    CliError::invalid_input(format!(
        "No {} provided and no TTY available. Set {}.",
        what, env
    ))
    .into()
}

/// Read the vault PIN from `PASSFORT_PIN` or a hidden prompt.
pub fn prompt_pin(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(pin) = env_secret(PIN_ENV) {
        return Ok(pin);
    }
    if !interactive {
        return Err(no_tty("PIN", PIN_ENV));
    }
    Password::new()
        .with_prompt("PIN")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))
}

/// Read a PIN that will encrypt new data, asking twice when prompting.
///
/// A mistyped PIN here would leave data nobody can decrypt, so the prompt
/// loops until both entries match and the PIN is long enough.
pub fn prompt_pin_confirmed(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(pin) = env_secret(PIN_ENV) {
        validate_pin(&pin)?;
        return Ok(pin);
    }
    if !interactive {
        return Err(no_tty("PIN", PIN_ENV));
    }
    loop {
        let pin = Password::new()
            .with_prompt("PIN")
            .with_confirmation("Confirm PIN", "PINs do not match")
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))?;
        if let Err(err) = validate_pin(&pin) {
            eprintln!("{}", err);
            continue;
        }
        return Ok(pin);
    }
}

/// Read the passphrase for a sealed export.
pub fn prompt_export_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(passphrase) = env_secret(EXPORT_PASSPHRASE_ENV) {
        return Ok(passphrase);
    }
    if !interactive {
        return Err(no_tty("export passphrase", EXPORT_PASSPHRASE_ENV));
    }
    Password::new()
        .with_prompt("Export passphrase")
        .with_confirmation("Confirm export passphrase", "Passphrases do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Prompt for the password to store in a new entry.
pub fn read_entry_password() -> anyhow::Result<Zeroizing<String>> {
    Password::new()
        .with_prompt("Password to store")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Read a single secret from stdin, dropping the trailing newline.
pub fn read_stdin_secret() -> anyhow::Result<Zeroizing<String>> {
    let mut buffer = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    let trimmed = buffer.trim_end_matches(|c: char| c == '\n' || c == '\r');
    if trimmed.is_empty() {
        return Err(CliError::invalid_input("No input provided on stdin").into());
    }
    Ok(Zeroizing::new(trimmed.to_string()))
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
