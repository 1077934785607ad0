// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Latch secrets vault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at load time, so typos surface as actionable errors instead
//! of silently falling back to defaults.

use serde::{Deserialize, Serialize};

/// Top-level Latch configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LatchConfig {
    /// Vault crypto and behavior settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Vault crypto and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// PBKDF2 iteration count used when initializing a new vault.
    ///
    /// Existing vaults keep the count recorded in their header; changing
    /// this value affects newly created vaults only.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Whether `search` matches labels case-sensitively.
    ///
    /// Defaults to false (case-insensitive, ASCII folding).
    #[serde(default)]
    pub search_case_sensitive: bool,

    /// Idle timeout in seconds after which the embedding shell's timer
    /// should call `lock()`. The vault itself keeps no clock; this value is
    /// only surfaced for the external timer.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: default_kdf_iterations(),
            search_case_sensitive: false,
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

fn default_kdf_iterations() -> u32 {
    200_000
}

fn default_idle_timeout_secs() -> u64 {
    300
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the vault's SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "latch.db".to_string()
}
