// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Funkwerk — Tiered send strategies and the capability-probing selector.
//
// Radio firmware fragments: command sets differ in signature, go missing
// on older revisions, and one vendor revision double-sends through its
// standard multipart entry point. This crate hides all of that behind one
// four-operation contract. At first use the selector probes, in order, a
// defect-workaround tier, a full-capability tier, and a guaranteed
// baseline, then caches whichever constructed first for the rest of the
// process. Callers send; they never learn which tier is underneath.

pub mod baseline;
pub mod compensating;
pub mod selector;
pub mod standard;
pub mod strategy;

pub use baseline::BaselineStrategy;
pub use compensating::CompensatingStrategy;
pub use selector::{Selector, default_strategy};
pub use standard::StandardStrategy;
pub use strategy::SmsStrategy;
