//! Key derivation using Argon2id.
//!
//! PINs are short, so the key is derived with a memory-hard function and a
//! random per-vault salt. The same PIN in two vaults yields two unrelated keys.

use argon2::Argon2;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use super::pin::validate_pin;
use crate::error::{Result, VaultError};

/// Length of the per-vault salt in bytes.
pub const SALT_LEN: usize = 16;

/// Length of derived key in bytes (256 bits for AES-256-GCM).
const KEY_LENGTH: usize = 32;

/// Argon2id cost parameters, stored in the vault so it always re-derives
/// with the values it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl KdfParams {
    /// Default memory cost: 64 MiB.
    pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
    /// Default number of passes.
    pub const DEFAULT_ITERATIONS: u32 = 3;
    /// Default parallelism.
    pub const DEFAULT_PARALLELISM: u32 = 1;

    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    fn to_argon2(self) -> Result<argon2::Params> {
        argon2::Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LENGTH),
        )
        .map_err(|e| VaultError::Crypto(format!("Invalid Argon2 params: {}", e)))
    }

    /// Check the parameters are accepted by Argon2 without deriving anything.
    pub fn validate(self) -> Result<()> {
        self.to_argon2().map(|_| ())
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MEMORY_KIB,
            Self::DEFAULT_ITERATIONS,
            Self::DEFAULT_PARALLELISM,
        )
    }
}

/// A symmetric key derived from a PIN.
///
/// Key material is zeroized when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Raw key bytes. Never store or log this value.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh random salt from the OS CSPRNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive an encryption key from a PIN using Argon2id.
///
/// Deterministic: the same PIN, salt and params always produce the same key.
///
/// # Errors
///
/// - `VaultError::InvalidPin` if the PIN fails [`validate_pin`]
/// - `VaultError::Crypto` if the salt is shorter than 16 bytes or the
///   params are rejected
pub fn derive_key(pin: &str, salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    validate_pin(pin)?;

    if salt.len() < SALT_LEN {
        return Err(VaultError::Crypto(format!(
            "Salt must be at least {} bytes",
            SALT_LEN
        )));
    }

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params.to_argon2()?,
    );

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(pin.as_bytes(), salt, &mut key_bytes)
        .map_err(|e| VaultError::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey::from_bytes(key_bytes))
}

#[cfg(test)]
pub(crate) fn test_params() -> KdfParams {
    KdfParams::new(1024, 1, 1)
}
