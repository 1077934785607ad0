// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from the master password.
//!
//! Deterministic and pure: the same password, salt, and iteration count
//! always produce the same 32-byte key. The iteration count is the
//! brute-force knob; the config default is 200_000.

use std::num::NonZeroU32;

use latch_core::LatchError;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Length of the derived symmetric key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the per-vault salt in bytes.
pub const SALT_LEN: usize = 16;

/// Derive a 32-byte key from the password using PBKDF2-HMAC-SHA256.
///
/// The returned key is wrapped in [`Zeroizing`] so the bytes are wiped when
/// it drops.
pub fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_LEN]>, LatchError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| LatchError::Config("kdf iterations must be non-zero".to_string()))?;

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password,
        key.as_mut(),
    );
    Ok(key)
}

/// Generate a random 16-byte salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], LatchError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| LatchError::Internal("failed to generate random salt".to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low iteration counts keep tests fast; determinism is what matters here.

    #[test]
    fn derive_key_is_deterministic() {
        let salt = [1u8; SALT_LEN];
        let key1 = derive_key(b"correct horse", &salt, 1000).unwrap();
        let key2 = derive_key(b"correct horse", &salt, 1000).unwrap();
        assert_eq!(*key1, *key2);
    }

    #[test]
    fn different_password_different_key() {
        let salt = [2u8; SALT_LEN];
        let key1 = derive_key(b"password one", &salt, 1000).unwrap();
        let key2 = derive_key(b"password two", &salt, 1000).unwrap();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn different_salt_different_key() {
        let key1 = derive_key(b"same password", &[1u8; SALT_LEN], 1000).unwrap();
        let key2 = derive_key(b"same password", &[2u8; SALT_LEN], 1000).unwrap();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn different_iterations_different_key() {
        let salt = [3u8; SALT_LEN];
        let key1 = derive_key(b"same password", &salt, 1000).unwrap();
        let key2 = derive_key(b"same password", &salt, 1001).unwrap();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn zero_iterations_is_config_error() {
        let result = derive_key(b"pw", &[0u8; SALT_LEN], 0);
        assert!(matches!(result, Err(LatchError::Config(_))));
    }

    #[test]
    fn generate_salt_produces_random_values() {
        let salt1 = generate_salt().unwrap();
        let salt2 = generate_salt().unwrap();
        assert_ne!(salt1, salt2);
    }
}
