// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Baseline tier: direct passthrough to the legacy command set.
//
// Every firmware ships the legacy set, so constructing this tier cannot
// fail — it is where the selector's fallback chain terminates. Single
// sends go straight through; the legacy set splits oversize text on its
// own side, so no adaptation is needed here.

use std::sync::Arc;

use funkwerk_core::error::Result;
use funkwerk_core::types::{CompletionToken, StrategyTier};
use funkwerk_radio::{LegacyRadio, RadioPlatform};

use crate::strategy::SmsStrategy;

/// Guaranteed-available tier over the legacy command set.
pub struct BaselineStrategy {
    radio: Arc<dyn LegacyRadio>,
}

impl BaselineStrategy {
    /// Bind the legacy command set. Infallible by contract.
    pub fn new(platform: &dyn RadioPlatform) -> Self {
        Self {
            radio: platform.legacy(),
        }
    }
}

impl SmsStrategy for BaselineStrategy {
    fn divide_message(&self, text: &str) -> Vec<String> {
        self.radio.divide_message(text)
    }

    fn send_text_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        text: &str,
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()> {
        self.radio
            .send_text(destination, service_center, text, sent, delivered)
    }

    fn send_multipart_text_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: Vec<String>,
        sent: Option<Vec<CompletionToken>>,
        delivered: Option<Vec<CompletionToken>>,
    ) -> Result<()> {
        // The legacy surface takes slices; an absent sequence maps to the
        // empty slice it uses for "no per-part notification".
        self.radio.send_multipart(
            destination,
            service_center,
            &parts,
            sent.as_deref().unwrap_or(&[]),
            delivered.as_deref().unwrap_or(&[]),
        )
    }

    fn send_data_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        port: u16,
        payload: &[u8],
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()> {
        self.radio
            .send_data(destination, service_center, port, payload, sent, delivered)
    }

    fn tier(&self) -> StrategyTier {
        StrategyTier::Baseline
    }
}
