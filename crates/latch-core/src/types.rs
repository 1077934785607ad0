// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type aliases for domain concepts.

/// Identifier of a stored entry.
///
/// SQLite rowid of the `entries` table; assigned by AUTOINCREMENT on insert
/// and never reused within a vault.
pub type EntryId = i64;
