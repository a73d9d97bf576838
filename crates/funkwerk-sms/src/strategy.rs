// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The uniform send contract every tier implements.
//
// Callers get these four operations and nothing else — which command set
// sits underneath, and whether a defect workaround is active, is invisible
// on this surface. Call-time radio rejections propagate unchanged as
// `TransportUnavailable`; this layer adds no retry and no downgrade.

use funkwerk_core::error::Result;
use funkwerk_core::types::{CompletionToken, StrategyTier};

/// One interchangeable implementation of the four-operation send contract.
pub trait SmsStrategy: Send + Sync {
    /// Split `text` into transport-sized parts per the active command
    /// set's rule. Pure delegation; deterministic for a given tier.
    fn divide_message(&self, text: &str) -> Vec<String>;

    /// Hand off a single logical text message.
    fn send_text_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        text: &str,
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()>;

    /// Hand off a pre-split message. Token vectors, when present, must
    /// match `parts` in length — the radio enforces that contract, not
    /// this layer.
    fn send_multipart_text_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: Vec<String>,
        sent: Option<Vec<CompletionToken>>,
        delivered: Option<Vec<CompletionToken>>,
    ) -> Result<()>;

    /// Hand off a binary payload addressed to an application port.
    fn send_data_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        port: u16,
        payload: &[u8],
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()>;

    /// Which tier this is. For logs and diagnostics; sending never needs it.
    fn tier(&self) -> StrategyTier;
}

/// Route a single text through the strategy's own multipart path.
///
/// The single-send entry points double-send on some handsets, so the
/// standard and compensating tiers send everything multipart. Taking
/// `&dyn SmsStrategy` keeps the caller's own `send_multipart_text_message`
/// override in the loop — the compensating tier's workaround must see
/// these messages too.
///
/// A present token is wrapped into a one-element vector; an absent token
/// stays absent rather than becoming a vector of nothing.
pub(crate) fn send_text_as_multipart(
    strategy: &dyn SmsStrategy,
    destination: &str,
    service_center: Option<&str>,
    text: &str,
    sent: Option<CompletionToken>,
    delivered: Option<CompletionToken>,
) -> Result<()> {
    let parts = strategy.divide_message(text);
    let sent = sent.map(|token| vec![token]);
    let delivered = delivered.map(|token| vec![token]);
    strategy.send_multipart_text_message(destination, service_center, parts, sent, delivered)
}
