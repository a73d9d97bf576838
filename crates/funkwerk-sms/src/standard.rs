// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Standard tier: the modern command set, with single sends rerouted.
//
// Construction probes for the modern command set and fails with
// `CapabilityUnavailable` on firmware that predates it — that failure is
// what drops the selector down to the baseline tier.
//
// `send_text_message` is deliberately not a passthrough. The modern
// single-send entry point double-sends on a known handset family, so every
// single message is split and pushed down the multipart path instead. The
// multipart overhead on short messages is the accepted price for dodging
// the defect uniformly.

use std::sync::Arc;

use funkwerk_core::error::Result;
use funkwerk_core::types::{CompletionToken, StrategyTier};
use funkwerk_radio::{ModernRadio, RadioPlatform};

use crate::strategy::{SmsStrategy, send_text_as_multipart};

/// Full-capability tier over the modern command set.
pub struct StandardStrategy {
    radio: Arc<dyn ModernRadio>,
}

impl StandardStrategy {
    /// Bind the modern command set, or fail the capability probe.
    pub fn new(platform: &dyn RadioPlatform) -> Result<Self> {
        Ok(Self {
            radio: platform.modern()?,
        })
    }
}

impl SmsStrategy for StandardStrategy {
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
        send_text_as_multipart(self, destination, service_center, text, sent, delivered)
    }

    fn send_multipart_text_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: Vec<String>,
        sent: Option<Vec<CompletionToken>>,
        delivered: Option<Vec<CompletionToken>>,
    ) -> Result<()> {
        self.radio
            .send_multipart(destination, service_center, parts, sent, delivered)
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
        StrategyTier::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funkwerk_core::FunkwerkError;
    use funkwerk_core::types::FirmwareProfile;
    use funkwerk_radio::{EntryPoint, LoopbackRadio};

    fn modern() -> LoopbackRadio {
        LoopbackRadio::new(FirmwareProfile::Modern)
    }

    #[test]
    fn construction_fails_without_modern_set() {
        let radio = LoopbackRadio::new(FirmwareProfile::Legacy);
        let err = StandardStrategy::new(&radio).err().expect("probe must fail");
        assert!(matches!(err, FunkwerkError::CapabilityUnavailable(_)));
    }

    #[test]
    fn single_send_reroutes_through_multipart() {
        let radio = modern();
        let strategy = StandardStrategy::new(&radio).expect("construct");

        strategy
            .send_text_message("+15551234", None, "hello", None, None)
            .expect("send");

        let outbox = radio.outbox();
        assert_eq!(outbox.len(), 1);
        let frame = &outbox[0];
        // Never the single-send entry point — that is the whole point.
        assert_eq!(frame.entry_point, EntryPoint::ModernMultipart);
        assert_eq!(frame.parts, strategy.divide_message("hello"));
    }

    #[test]
    fn long_single_send_carries_all_parts() {
        let radio = modern();
        let strategy = StandardStrategy::new(&radio).expect("construct");

        let text = "a".repeat(400);
        strategy
            .send_text_message("+15551234", None, &text, None, None)
            .expect("send");

        let outbox = radio.outbox();
        let frame = &outbox[0];
        assert_eq!(frame.entry_point, EntryPoint::ModernMultipart);
        assert_eq!(frame.parts.len(), 3);
        assert_eq!(frame.parts.concat(), text);
    }

    #[test]
    fn present_token_becomes_one_element_vector() {
        let radio = modern();
        let strategy = StandardStrategy::new(&radio).expect("construct");

        let sent = CompletionToken::new(|_| {});
        strategy
            .send_text_message("+15551234", None, "hello", Some(sent.clone()), None)
            .expect("send");

        let outbox = radio.outbox();
        let frame = &outbox[0];
        assert_eq!(frame.sent_tokens, Some(vec![sent]));
        // Absent stays absent — not a vector holding nothing.
        assert_eq!(frame.delivered_tokens, None);
    }

    #[test]
    fn multipart_is_a_passthrough() {
        let radio = modern();
        let strategy = StandardStrategy::new(&radio).expect("construct");

        let tokens = vec![CompletionToken::new(|_| {})];
        strategy
            .send_multipart_text_message(
                "+15551234",
                Some("+15550000"),
                vec!["only part".into()],
                None,
                Some(tokens.clone()),
            )
            .expect("send");

        let frame = &radio.outbox()[0];
        assert_eq!(frame.entry_point, EntryPoint::ModernMultipart);
        assert_eq!(frame.parts, vec!["only part"]);
        assert_eq!(frame.sent_tokens, None);
        assert_eq!(frame.delivered_tokens, Some(tokens));
    }

    #[test]
    fn data_send_is_a_passthrough() {
        let radio = modern();
        let strategy = StandardStrategy::new(&radio).expect("construct");

        strategy
            .send_data_message("+15551234", None, 16962, &[1, 2, 3], None, None)
            .expect("send");

        let frame = &radio.outbox()[0];
        assert_eq!(frame.entry_point, EntryPoint::ModernData);
        assert_eq!(frame.port, Some(16962));
        assert_eq!(frame.payload.as_deref(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn divide_is_idempotent() {
        let radio = modern();
        let strategy = StandardStrategy::new(&radio).expect("construct");
        let text = "déjà vu €100 ".repeat(30);
        assert_eq!(strategy.divide_message(&text), strategy.divide_message(&text));
    }

    #[test]
    fn call_time_rejection_propagates() {
        let radio = LoopbackRadio::rejecting(FirmwareProfile::Modern);
        let strategy = StandardStrategy::new(&radio).expect("construct");
        let err = strategy
            .send_text_message("+15551234", None, "hello", None, None)
            .expect_err("rejecting radio must fail");
        assert!(matches!(err, FunkwerkError::TransportUnavailable(_)));
    }
}
