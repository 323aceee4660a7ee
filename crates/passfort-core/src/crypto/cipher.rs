//! Authenticated field encryption with AES-256-GCM.
//!
//! Every call to [`encrypt`] draws a fresh 96-bit nonce from the OS CSPRNG.
//! Decryption fails closed: a wrong key, a flipped bit in the nonce or
//! ciphertext, or a blob moved into another field all surface as
//! `VaultError::Decryption` and no plaintext is released.
//!
//! Wire format (`SealedBlob::to_bytes`):
//!   [ nonce (12 bytes) | ciphertext + tag (16 bytes) ]

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use zeroize::Zeroizing;

use super::key::DerivedKey;
use crate::error::{Result, VaultError};

/// AES-GCM nonce length (96 bits).
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// The record field a blob belongs to. Bound into the tag as associated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Password,
    Notes,
}

impl Field {
    fn aad(self) -> &'static [u8] {
        match self {
            Field::Password => b"passfort/v1/password",
            Field::Notes => b"passfort/v1/notes",
        }
    }
}

/// Output of [`encrypt`]: the nonce and the ciphertext with its tag appended.
///
/// Only constructed by [`encrypt`] or by parsing stored bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl SealedBlob {
    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Serialize as `nonce || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse `nonce || ciphertext`. Anything shorter than a nonce plus an
    /// empty message's tag cannot authenticate and is rejected up front.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(VaultError::decryption());
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

fn cipher_for(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Encrypt one field under `key` with a freshly drawn nonce.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey, field: Field) -> Result<SealedBlob> {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher_for(key)
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: field.aad(),
            },
        )
        .map_err(|_| VaultError::Crypto("AES-GCM encryption failed".to_string()))?;

    Ok(SealedBlob {
        nonce: nonce.into(),
        ciphertext,
    })
}

/// Decrypt one field. Fails with `VaultError::Decryption` on any
/// authentication failure.
pub fn decrypt(blob: &SealedBlob, key: &DerivedKey, field: Field) -> Result<Zeroizing<Vec<u8>>> {
    let plaintext = cipher_for(key)
        .decrypt(
            Nonce::from_slice(&blob.nonce),
            Payload {
                msg: &blob.ciphertext,
                aad: field.aad(),
            },
        )
        .map_err(|_| VaultError::decryption())?;

    Ok(Zeroizing::new(plaintext))
}
