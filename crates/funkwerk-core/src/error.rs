// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Funkwerk.

use thiserror::Error;

/// Top-level error type for all Funkwerk operations.
#[derive(Debug, Error)]
pub enum FunkwerkError {
    // -- Capability probing --
    /// A required radio command set does not exist on this firmware.
    /// Raised only while constructing a strategy; the selector consumes it
    /// and moves on to the next tier.
    #[error("radio capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// The lookup of an alternate entry point for a defect workaround
    /// failed. Same lifecycle as `CapabilityUnavailable` — this is the
    /// routine outcome on every firmware that does not need the workaround.
    #[error("defect workaround unavailable: {0}")]
    WorkaroundUnavailable(String),

    // -- Call-time transport --
    /// The radio rejected a send after a strategy was already selected.
    /// Propagates to the caller unchanged; no retry, no downgrade.
    #[error("radio transport rejected the send: {0}")]
    TransportUnavailable(String),

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FunkwerkError>;
