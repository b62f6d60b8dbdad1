// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport-layer middleware for RPC providers.
//!
//! Currently a single concern: request pacing via [`ThrottleLayer`], which
//! composes with Alloy's transport stack through `tower`.
//!
//! Note: RPC request/response logging is handled natively by alloy's
//! transport layer at DEBUG/TRACE level.

mod throttle;

pub use throttle::{ThrottleLayer, ThrottleService};
