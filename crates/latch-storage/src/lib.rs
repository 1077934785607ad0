// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Latch secrets vault.
//!
//! Provides WAL-mode SQLite storage with embedded migrations and a
//! single-writer, fully synchronous access model: one [`Database`] per vault
//! file, every mutation a single durably-committed statement.

pub mod database;
pub mod migrations;

pub use database::{map_sql_err, Database};
