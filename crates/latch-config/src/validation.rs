// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as the KDF iteration floor and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::LatchConfig;

/// Iteration counts below this offer too little offline brute-force
/// resistance to be a deliberate choice. Raising the default is fine;
/// lowering it below the floor is rejected.
const KDF_ITERATIONS_FLOOR: u32 = 100_000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LatchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.vault.kdf_iterations < KDF_ITERATIONS_FLOOR {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_iterations must be at least {KDF_ITERATIONS_FLOOR}, got {}",
                config.vault.kdf_iterations
            ),
        });
    }

    if config.vault.idle_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "vault.idle_timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = LatchConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = LatchConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn low_kdf_iterations_fails_validation() {
        let mut config = LatchConfig::default();
        config.vault.kdf_iterations = 1000;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("kdf_iterations"))
        ));
    }

    #[test]
    fn default_iterations_meet_the_floor() {
        let config = LatchConfig::default();
        assert!(config.vault.kdf_iterations >= KDF_ITERATIONS_FLOOR);
    }

    #[test]
    fn zero_idle_timeout_fails_validation() {
        let mut config = LatchConfig::default();
        config.vault.idle_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("idle_timeout_secs"))
        ));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = LatchConfig::default();
        config.storage.database_path = " ".to_string();
        config.vault.kdf_iterations = 1;
        config.vault.idle_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
