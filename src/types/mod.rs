// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for the ingestion data model.
//!
//! Row records are explicit structs validated at the RPC boundary, so
//! malformed node responses are rejected before any persistence code runs:
//! - [`BlockRecord`] / [`BlockPayload`] - decoded block data
//! - [`TransactionRecord`] - decoded transaction data

mod block;
mod transaction;

pub use block::{BlockPayload, BlockRecord};
pub use transaction::TransactionRecord;
