// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Funkwerk send router.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier the radio assigns to an accepted send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final status the radio reports through a completion token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// The radio handed the message to the network.
    Sent,
    /// The network confirmed delivery to the destination.
    Delivered,
    /// The send failed after handoff — detail from the radio.
    Failed(String),
}

/// What the radio hands back through a completion token.
#[derive(Debug, Clone)]
pub struct DeliveryReport {
    pub message_id: MessageId,
    pub status: ReportStatus,
    pub at: DateTime<Utc>,
}

impl DeliveryReport {
    pub fn new(message_id: MessageId, status: ReportStatus) -> Self {
        Self {
            message_id,
            status,
            at: Utc::now(),
        }
    }
}

/// Opaque notification handle supplied by the caller.
///
/// The send layer forwards tokens to the radio unmodified — it never
/// creates, inspects, or invokes them. Only the radio calls [`notify`]
/// when the corresponding event fires. Clones share identity: equality is
/// pointer equality, so a forwarded clone compares equal to the original.
///
/// [`notify`]: CompletionToken::notify
#[derive(Clone)]
pub struct CompletionToken {
    callback: Arc<dyn Fn(DeliveryReport) + Send + Sync>,
}

impl CompletionToken {
    pub fn new(callback: impl Fn(DeliveryReport) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Fire the token. Called by the radio, never by the send layer.
    pub fn notify(&self, report: DeliveryReport) {
        (self.callback)(report);
    }
}

impl PartialEq for CompletionToken {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl Eq for CompletionToken {}

impl fmt::Debug for CompletionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompletionToken")
            .field(&Arc::as_ptr(&self.callback))
            .finish()
    }
}

/// Which send strategy tier the selector resolved.
///
/// Surfaced for logs and diagnostics only — callers send through the
/// uniform trait without branching on the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyTier {
    /// Legacy command set passthrough; the guaranteed floor.
    Baseline,
    /// Modern command set with the single-send-to-multipart adaptation.
    Standard,
    /// Standard plus the extended-entry-point multipart workaround.
    Compensating,
}

impl StrategyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Standard => "standard",
            Self::Compensating => "compensating",
        }
    }
}

impl fmt::Display for StrategyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radio firmware profiles the loopback radio can emulate.
///
/// A profile decides which command sets a platform binding advertises,
/// which in turn decides where the selector's capability probe lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirmwareProfile {
    /// Oldest firmware: legacy command set only.
    Legacy,
    /// Current firmware: legacy plus the modern command set.
    Modern,
    /// Vendor firmware that additionally exposes the extended multipart
    /// entry point outside the stable command surface.
    Vendor,
}

impl FirmwareProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Modern => "modern",
            Self::Vendor => "vendor",
        }
    }
}
