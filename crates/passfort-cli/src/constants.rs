//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, also clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, vault, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Decryption failed (wrong PIN or tampered record).
    pub const AUTH_FAILED: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variable holding the vault PIN.
pub const PIN_ENV: &str = "PASSFORT_PIN";

/// Environment variable holding the export passphrase.
pub const EXPORT_PASSPHRASE_ENV: &str = "PASSFORT_EXPORT_PASSPHRASE";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PASSFORT_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PASSFORT_LOG";
