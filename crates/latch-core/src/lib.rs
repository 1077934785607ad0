// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Latch secrets vault.
//!
//! This crate provides the shared error taxonomy and common type aliases used
//! throughout the Latch workspace. It deliberately carries no cryptographic
//! or storage dependencies.

pub mod error;
pub mod types;

pub use error::LatchError;
pub use types::EntryId;
