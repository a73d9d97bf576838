// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process loopback radio.
//
// Stands in for a real baseband on desktop/CI builds and in tests. Every
// accepted handoff is recorded in an inspectable outbox and completion
// tokens fire synchronously at handoff — "sent" then "delivered" — so the
// whole stack is exercisable without hardware.
//
// A firmware profile decides which command sets the loopback advertises,
// which is what the send layer's capability probe runs against.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use funkwerk_core::error::{FunkwerkError, Result};
use funkwerk_core::types::{
    CompletionToken, DeliveryReport, FirmwareProfile, MessageId, ReportStatus,
};

use crate::split;
use crate::traits::{
    ExtendedMultipart, LegacyRadio, MethodSignature, ModernRadio, ParamType, RadioPlatform,
};

/// The one entry point the vendor profile exports outside the stable
/// command surface. Resolution must match this name and parameter list
/// exactly — the caller describes what it expects to find, the firmware
/// table is the source of truth.
const VENDOR_TABLE: &[MethodSignature] = &[MethodSignature {
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
}];

/// Which collaborator entry point accepted a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    LegacySingle,
    LegacyMultipart,
    LegacyData,
    ModernSingle,
    ModernMultipart,
    ModernData,
    ExtendedMultipart,
}

/// One accepted handoff recorded in the loopback outbox.
///
/// Token fields mirror exactly what crossed the boundary: `None` means the
/// caller passed no sequence at all, `Some(vec![])` means an empty one.
#[derive(Debug, Clone)]
pub struct RadioFrame {
    pub message_id: MessageId,
    pub entry_point: EntryPoint,
    pub destination: String,
    pub service_center: Option<String>,
    /// Text parts; a single-message handoff records one part, a data
    /// handoff records none.
    pub parts: Vec<String>,
    pub port: Option<u16>,
    pub payload: Option<Vec<u8>>,
    pub sent_tokens: Option<Vec<CompletionToken>>,
    pub delivered_tokens: Option<Vec<CompletionToken>>,
    /// Trailing arguments of an extended-entry-point call.
    pub replace_pending: Option<bool>,
    pub trailing: Option<[i32; 3]>,
    pub accepted_at: DateTime<Utc>,
}

struct Inner {
    profile: FirmwareProfile,
    reject_sends: bool,
    outbox: Mutex<Vec<RadioFrame>>,
}

/// Loopback radio. Cheap to clone; clones share one outbox.
#[derive(Clone)]
pub struct LoopbackRadio {
    inner: Arc<Inner>,
}

impl LoopbackRadio {
    pub fn new(profile: FirmwareProfile) -> Self {
        Self {
            inner: Arc::new(Inner {
                profile,
                reject_sends: false,
                outbox: Mutex::new(Vec::new()),
            }),
        }
    }

    /// A loopback radio that rejects every send at call time, for
    /// exercising transport-failure propagation.
    pub fn rejecting(profile: FirmwareProfile) -> Self {
        Self {
            inner: Arc::new(Inner {
                profile,
                reject_sends: true,
                outbox: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn profile(&self) -> FirmwareProfile {
        self.inner.profile
    }

    /// Snapshot of every frame accepted so far, oldest first.
    pub fn outbox(&self) -> Vec<RadioFrame> {
        self.inner
            .outbox
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }

    /// Record one handoff, then fire the tokens.
    fn accept(&self, mut frame: RadioFrame) -> Result<()> {
        if self.inner.reject_sends {
            warn!(
                destination = %frame.destination,
                entry = ?frame.entry_point,
                "loopback radio rejecting send"
            );
            return Err(FunkwerkError::TransportUnavailable(
                "loopback radio is configured to reject sends".into(),
            ));
        }

        frame.message_id = MessageId::new();
        frame.accepted_at = Utc::now();
        debug!(
            message_id = %frame.message_id,
            destination = %frame.destination,
            entry = ?frame.entry_point,
            parts = frame.parts.len(),
            "loopback radio accepted send"
        );

        let id = frame.message_id;
        let sent = frame.sent_tokens.clone();
        let delivered = frame.delivered_tokens.clone();

        if let Ok(mut outbox) = self.inner.outbox.lock() {
            outbox.push(frame);
        }

        // Loopback "network": handoff and delivery collapse into one step.
        for token in sent.iter().flatten() {
            token.notify(DeliveryReport::new(id, ReportStatus::Sent));
        }
        for token in delivered.iter().flatten() {
            token.notify(DeliveryReport::new(id, ReportStatus::Delivered));
        }
        Ok(())
    }

    fn has_modern(&self) -> bool {
        matches!(
            self.inner.profile,
            FirmwareProfile::Modern | FirmwareProfile::Vendor
        )
    }
}

fn frame(entry_point: EntryPoint, destination: &str, service_center: Option<&str>) -> RadioFrame {
    RadioFrame {
        message_id: MessageId::new(),
        entry_point,
        destination: destination.to_string(),
        service_center: service_center.map(str::to_string),
        parts: Vec::new(),
        port: None,
        payload: None,
        sent_tokens: None,
        delivered_tokens: None,
        replace_pending: None,
        trailing: None,
        accepted_at: Utc::now(),
    }
}

impl LegacyRadio for LoopbackRadio {
    fn divide_message(&self, text: &str) -> Vec<String> {
        split::divide_fixed(text)
    }

    fn send_text(
        &self,
        destination: &str,
        service_center: Option<&str>,
        text: &str,
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()> {
        let mut f = frame(EntryPoint::LegacySingle, destination, service_center);
        f.parts = vec![text.to_string()];
        f.sent_tokens = sent.map(|t| vec![t]);
        f.delivered_tokens = delivered.map(|t| vec![t]);
        self.accept(f)
    }

    fn send_multipart(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: &[String],
        sent: &[CompletionToken],
        delivered: &[CompletionToken],
    ) -> Result<()> {
        let mut f = frame(EntryPoint::LegacyMultipart, destination, service_center);
        f.parts = parts.to_vec();
        f.sent_tokens = Some(sent.to_vec());
        f.delivered_tokens = Some(delivered.to_vec());
        self.accept(f)
    }

    fn send_data(
        &self,
        destination: &str,
        service_center: Option<&str>,
        port: u16,
        payload: &[u8],
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()> {
        let mut f = frame(EntryPoint::LegacyData, destination, service_center);
        f.port = Some(port);
        f.payload = Some(payload.to_vec());
        f.sent_tokens = sent.map(|t| vec![t]);
        f.delivered_tokens = delivered.map(|t| vec![t]);
        self.accept(f)
    }
}

impl ModernRadio for LoopbackRadio {
    fn divide_message(&self, text: &str) -> Vec<String> {
        split::divide(text)
    }

    fn send_text(
        &self,
        destination: &str,
        service_center: Option<&str>,
        text: &str,
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()> {
        let mut f = frame(EntryPoint::ModernSingle, destination, service_center);
        f.parts = vec![text.to_string()];
        f.sent_tokens = sent.map(|t| vec![t]);
        f.delivered_tokens = delivered.map(|t| vec![t]);
        self.accept(f)
    }

    fn send_multipart(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: Vec<String>,
        sent: Option<Vec<CompletionToken>>,
        delivered: Option<Vec<CompletionToken>>,
    ) -> Result<()> {
        let mut f = frame(EntryPoint::ModernMultipart, destination, service_center);
        f.parts = parts;
        f.sent_tokens = sent;
        f.delivered_tokens = delivered;
        self.accept(f)
    }

    fn send_data(
        &self,
        destination: &str,
        service_center: Option<&str>,
        port: u16,
        payload: &[u8],
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()> {
        let mut f = frame(EntryPoint::ModernData, destination, service_center);
        f.port = Some(port);
        f.payload = Some(payload.to_vec());
        f.sent_tokens = sent.map(|t| vec![t]);
        f.delivered_tokens = delivered.map(|t| vec![t]);
        self.accept(f)
    }
}

impl ExtendedMultipart for LoopbackRadio {
    fn send_multipart_ext(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: Vec<String>,
        sent: Option<Vec<CompletionToken>>,
        delivered: Option<Vec<CompletionToken>>,
        replace_pending: bool,
        validity_period: i32,
        priority: i32,
        encoding_hint: i32,
    ) -> Result<()> {
        let mut f = frame(EntryPoint::ExtendedMultipart, destination, service_center);
        f.parts = parts;
        f.sent_tokens = sent;
        f.delivered_tokens = delivered;
        f.replace_pending = Some(replace_pending);
        f.trailing = Some([validity_period, priority, encoding_hint]);
        self.accept(f)
    }
}

impl RadioPlatform for LoopbackRadio {
    fn platform_name(&self) -> &str {
        match self.inner.profile {
            FirmwareProfile::Legacy => "loopback (legacy firmware)",
            FirmwareProfile::Modern => "loopback (modern firmware)",
            FirmwareProfile::Vendor => "loopback (vendor firmware)",
        }
    }

    fn legacy(&self) -> Arc<dyn LegacyRadio> {
        Arc::new(self.clone())
    }

    fn modern(&self) -> Result<Arc<dyn ModernRadio>> {
        if self.has_modern() {
            Ok(Arc::new(self.clone()))
        } else {
            Err(FunkwerkError::CapabilityUnavailable(format!(
                "modern command set not present on {}",
                self.platform_name()
            )))
        }
    }

    fn resolve_extended_multipart(
        &self,
        signature: &MethodSignature,
    ) -> Result<Arc<dyn ExtendedMultipart>> {
        if self.inner.profile != FirmwareProfile::Vendor {
            return Err(FunkwerkError::WorkaroundUnavailable(format!(
                "no entry point `{}` on {}",
                signature.name,
                self.platform_name()
            )));
        }
        let exported = VENDOR_TABLE
            .iter()
            .find(|entry| entry.name == signature.name)
            .ok_or_else(|| {
                FunkwerkError::WorkaroundUnavailable(format!(
                    "no entry point `{}` on {}",
                    signature.name,
                    self.platform_name()
                ))
            })?;
        if exported.params != signature.params {
            return Err(FunkwerkError::WorkaroundUnavailable(format!(
                "entry point `{}` exists but the parameter signature differs",
                signature.name
            )));
        }
        Ok(Arc::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXT: MethodSignature = MethodSignature {
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

    #[test]
    fn legacy_is_always_present() {
        for profile in [
            FirmwareProfile::Legacy,
            FirmwareProfile::Modern,
            FirmwareProfile::Vendor,
        ] {
            let radio = LoopbackRadio::new(profile);
            let legacy = radio.legacy();
            assert_eq!(legacy.divide_message("hi"), vec!["hi".to_string()]);
        }
    }

    #[test]
    fn modern_absent_on_legacy_firmware() {
        let radio = LoopbackRadio::new(FirmwareProfile::Legacy);
        let err = radio.modern().err().expect("legacy firmware has no modern set");
        assert!(matches!(err, FunkwerkError::CapabilityUnavailable(_)));

        assert!(LoopbackRadio::new(FirmwareProfile::Modern).modern().is_ok());
    }

    #[test]
    fn extended_resolution_requires_vendor_profile() {
        let modern = LoopbackRadio::new(FirmwareProfile::Modern);
        let err = modern
            .resolve_extended_multipart(&EXT)
            .err()
            .expect("modern firmware has no extended entry point");
        assert!(matches!(err, FunkwerkError::WorkaroundUnavailable(_)));

        let vendor = LoopbackRadio::new(FirmwareProfile::Vendor);
        assert!(vendor.resolve_extended_multipart(&EXT).is_ok());
    }

    #[test]
    fn extended_resolution_rejects_wrong_name_or_signature() {
        let vendor = LoopbackRadio::new(FirmwareProfile::Vendor);

        let wrong_name = MethodSignature {
            name: "send_multipart_v2",
            params: EXT.params,
        };
        assert!(matches!(
            vendor.resolve_extended_multipart(&wrong_name),
            Err(FunkwerkError::WorkaroundUnavailable(_))
        ));

        let wrong_params = MethodSignature {
            name: EXT.name,
            params: &[ParamType::Str, ParamType::Bool],
        };
        assert!(matches!(
            vendor.resolve_extended_multipart(&wrong_params),
            Err(FunkwerkError::WorkaroundUnavailable(_))
        ));
    }

    #[test]
    fn accepted_send_is_recorded_and_tokens_fire() {
        let radio = LoopbackRadio::new(FirmwareProfile::Modern);
        let reports: Arc<Mutex<Vec<DeliveryReport>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = reports.clone();
        let sent = CompletionToken::new(move |r| {
            sink.lock().expect("report sink poisoned").push(r);
        });
        let sink = reports.clone();
        let delivered = CompletionToken::new(move |r| {
            sink.lock().expect("report sink poisoned").push(r);
        });

        ModernRadio::send_multipart(
            &radio,
            "+15551234",
            Some("+15550000"),
            vec!["part one".into(), "part two".into()],
            Some(vec![sent.clone(), sent.clone()]),
            Some(vec![delivered.clone(), delivered]),
        )
        .expect("send");

        let outbox = radio.outbox();
        assert_eq!(outbox.len(), 1);
        let frame = &outbox[0];
        assert_eq!(frame.entry_point, EntryPoint::ModernMultipart);
        assert_eq!(frame.destination, "+15551234");
        assert_eq!(frame.service_center.as_deref(), Some("+15550000"));
        assert_eq!(frame.parts, vec!["part one", "part two"]);

        let reports = reports.lock().expect("report sink poisoned");
        assert_eq!(reports.len(), 4);
        assert!(reports[..2].iter().all(|r| r.status == ReportStatus::Sent));
        assert!(
            reports[2..]
                .iter()
                .all(|r| r.status == ReportStatus::Delivered)
        );
        assert!(reports.iter().all(|r| r.message_id == frame.message_id));
    }

    #[test]
    fn rejecting_radio_fails_every_send() {
        let radio = LoopbackRadio::rejecting(FirmwareProfile::Vendor);
        let err = LegacyRadio::send_text(&radio, "+15551234", None, "hi", None, None)
            .expect_err("rejecting radio must fail");
        assert!(matches!(err, FunkwerkError::TransportUnavailable(_)));
        assert!(radio.outbox().is_empty());
    }

    #[test]
    fn clones_share_one_outbox() {
        let radio = LoopbackRadio::new(FirmwareProfile::Vendor);
        let via_platform = radio.legacy();
        via_platform
            .send_text("+15551234", None, "hi", None, None)
            .expect("send");
        assert_eq!(radio.outbox().len(), 1);
    }
}
