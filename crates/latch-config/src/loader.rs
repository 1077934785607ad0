// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./latch.toml` > `~/.config/latch/latch.toml`
//! > `/etc/latch/latch.toml`, with environment variable overrides via the
//! `LATCH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LatchConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/latch/latch.toml` (system-wide)
/// 3. `~/.config/latch/latch.toml` (user XDG config)
/// 4. `./latch.toml` (local directory)
/// 5. `LATCH_*` environment variables
pub fn load_config() -> Result<LatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LatchConfig::default()))
        .merge(Toml::file("/etc/latch/latch.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("latch/latch.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("latch.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file or env lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LatchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LatchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that key names
/// containing underscores stay unambiguous: `LATCH_VAULT_KDF_ITERATIONS`
/// must map to `vault.kdf_iterations`, not `vault.kdf.iterations`.
fn env_provider() -> Env {
    Env::prefixed("LATCH_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("vault_", "vault.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
