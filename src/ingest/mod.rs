// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The block-range ingestion pipeline.
//!
//! Three pieces cooperate here:
//!
//! - the range partitioner (in [`crate::range`]) splits the requested
//!   interval into super-chunks and deals each chunk's blocks round-robin
//!   across workers;
//! - each worker fetches its assigned blocks from the node and commits them
//!   block-by-block, stopping at its first failure;
//! - the [`Pipeline`] joins all workers and raises recorded failures once,
//!   as a single aggregate, after the run.
//!
//! The [`gaps`] module exposes the gap checker used to skip
//! already-ingested blocks and to reconcile holes after a partial run.

pub mod gaps;
mod pipeline;
mod worker;

pub use pipeline::{IngestReport, Pipeline};
pub use worker::WorkerReport;
