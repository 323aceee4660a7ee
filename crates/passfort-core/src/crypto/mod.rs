//! Cryptographic operations for PassFort.
//!
//! - **Argon2id** turns a low-entropy PIN plus a per-vault salt into a
//!   256-bit key. The salt and cost parameters live in the vault metadata;
//!   the key never touches disk.
//! - **AES-256-GCM** seals each sensitive field with a fresh 96-bit nonce.
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the vault file
//! - Offline brute-force of the PIN (made expensive, not impossible)
//! - Tampering with or swapping stored ciphertext
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session in memory

pub mod cipher;
pub mod key;
pub mod pin;

pub use cipher::{decrypt, encrypt, Field, SealedBlob, NONCE_LEN, TAG_LEN};
pub use key::{derive_key, generate_salt, DerivedKey, KdfParams, SALT_LEN};
pub use pin::{validate_pin, MIN_PIN_LENGTH};
