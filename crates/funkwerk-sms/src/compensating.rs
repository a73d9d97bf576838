// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compensating tier: multipart sends through an alternate entry point.
//
// One vendor firmware revision duplicates every message pushed through the
// standard multipart entry point. The same firmware exports an alternate
// nine-parameter variant of the operation outside the stable command
// surface, and invoking that one instead avoids the duplication.
//
// This tier wraps the standard tier and overrides exactly one operation:
// multipart sends go through the alternate entry point, resolved at
// construction time by name and parameter signature. On every firmware
// that does not export it — that is, every device except the affected one —
// resolution fails with `WorkaroundUnavailable` and the selector falls
// back to the standard tier.

use std::sync::Arc;

use funkwerk_core::error::Result;
use funkwerk_core::types::{CompletionToken, StrategyTier};
use funkwerk_radio::{ExtendedMultipart, MethodSignature, ParamType, RadioPlatform};

use crate::standard::StandardStrategy;
use crate::strategy::{SmsStrategy, send_text_as_multipart};

/// Name and parameter signature of the alternate multipart entry point:
/// the five ordinary parameters followed by a replace-pending flag and
/// three vendor-defined integer fields.
const EXTENDED_SEND: MethodSignature = MethodSignature {
    name: "send_multipart_ext",
    params: &[
        ParamType::Str,
        ParamType::OptStr,
        ParamType::StringList,
        ParamType::TokenList,
        ParamType::TokenList,
        ParamType::Bool,
        ParamType::Int,
        ParamType::Int,
        ParamType::Int,
    ],
};

/// Defect-workaround tier for the affected vendor firmware.
pub struct CompensatingStrategy {
    standard: StandardStrategy,
    extended: Arc<dyn ExtendedMultipart>,
}

impl CompensatingStrategy {
    /// Bind the modern command set and resolve the alternate entry point.
    ///
    /// Fails with `CapabilityUnavailable` when the modern set is absent and
    /// with `WorkaroundUnavailable` when the entry point cannot be located;
    /// either way the selector moves on.
    pub fn new(platform: &dyn RadioPlatform) -> Result<Self> {
        let standard = StandardStrategy::new(platform)?;
        let extended = platform.resolve_extended_multipart(&EXTENDED_SEND)?;
        Ok(Self { standard, extended })
    }
}

impl SmsStrategy for CompensatingStrategy {
    fn divide_message(&self, text: &str) -> Vec<String> {
        self.standard.divide_message(text)
    }

    fn send_text_message(
        &self,
        destination: &str,
        service_center: Option<&str>,
        text: &str,
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()> {
        // Re-applied against self rather than delegated, so single sends
        // land on the overridden multipart path below.
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
        // Ordinary parameters pass through unchanged; the trailing fields
        // are pinned: no replacement, all vendor fields zero.
        self.extended.send_multipart_ext(
            destination,
            service_center,
            parts,
            sent,
            delivered,
            false,
            0,
            0,
            0,
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
        self.standard
            .send_data_message(destination, service_center, port, payload, sent, delivered)
    }

    fn tier(&self) -> StrategyTier {
        StrategyTier::Compensating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funkwerk_core::FunkwerkError;
    use funkwerk_core::types::FirmwareProfile;
    use funkwerk_radio::{EntryPoint, LoopbackRadio};

    fn vendor() -> LoopbackRadio {
        LoopbackRadio::new(FirmwareProfile::Vendor)
    }

    #[test]
    fn construction_fails_without_the_entry_point() {
        let radio = LoopbackRadio::new(FirmwareProfile::Modern);
        let err = CompensatingStrategy::new(&radio).err().expect("resolution must fail");
        assert!(matches!(err, FunkwerkError::WorkaroundUnavailable(_)));
    }

    #[test]
    fn construction_fails_without_modern_set() {
        let radio = LoopbackRadio::new(FirmwareProfile::Legacy);
        let err = CompensatingStrategy::new(&radio).err().expect("probe must fail");
        assert!(matches!(err, FunkwerkError::CapabilityUnavailable(_)));
    }

    #[test]
    fn multipart_uses_the_alternate_entry_point_with_pinned_trailing_args() {
        let radio = vendor();
        let strategy = CompensatingStrategy::new(&radio).expect("construct");

        let tokens = vec![CompletionToken::new(|_| {}), CompletionToken::new(|_| {})];
        strategy
            .send_multipart_text_message(
                "+15551234",
                Some("+15550000"),
                vec!["one".into(), "two".into()],
                Some(tokens.clone()),
                None,
            )
            .expect("send");

        let outbox = radio.outbox();
        assert_eq!(outbox.len(), 1);
        let frame = &outbox[0];
        assert_eq!(frame.entry_point, EntryPoint::ExtendedMultipart);
        assert_eq!(frame.destination, "+15551234");
        assert_eq!(frame.service_center.as_deref(), Some("+15550000"));
        assert_eq!(frame.parts, vec!["one", "two"]);
        assert_eq!(frame.sent_tokens, Some(tokens));
        assert_eq!(frame.delivered_tokens, None);
        // The workaround pins these regardless of input.
        assert_eq!(frame.replace_pending, Some(false));
        assert_eq!(frame.trailing, Some([0, 0, 0]));
    }

    #[test]
    fn single_send_lands_on_the_overridden_multipart_path() {
        let radio = vendor();
        let strategy = CompensatingStrategy::new(&radio).expect("construct");

        strategy
            .send_text_message("+15551234", None, "hello", None, None)
            .expect("send");

        let outbox = radio.outbox();
        assert_eq!(outbox.len(), 1);
        // Not ModernMultipart: the override must see rerouted singles too.
        assert_eq!(outbox[0].entry_point, EntryPoint::ExtendedMultipart);
        assert_eq!(outbox[0].parts, vec!["hello"]);
    }

    #[test]
    fn data_send_delegates_to_the_standard_tier() {
        let radio = vendor();
        let strategy = CompensatingStrategy::new(&radio).expect("construct");

        strategy
            .send_data_message("+15551234", None, 5366, &[7, 7, 7], None, None)
            .expect("send");

        let frame = &radio.outbox()[0];
        assert_eq!(frame.entry_point, EntryPoint::ModernData);
    }

    #[test]
    fn call_time_rejection_propagates() {
        let radio = LoopbackRadio::rejecting(FirmwareProfile::Vendor);
        let strategy = CompensatingStrategy::new(&radio).expect("construct");
        let err = strategy
            .send_multipart_text_message("+15551234", None, vec!["hi".into()], None, None)
            .expect_err("rejecting radio must fail");
        assert!(matches!(err, FunkwerkError::TransportUnavailable(_)));
    }
}
