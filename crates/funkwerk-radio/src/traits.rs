// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Radio command-set trait definitions.
//
// A bound firmware exposes zero or more of these surfaces. Which ones exist
// on a given device is discovered by the send layer's construction-time
// probing — there is no version query. The send layer treats everything
// behind these traits as opaque: transport framing, concatenation headers,
// and radio scheduling all live on the firmware side.

use std::sync::Arc;

use funkwerk_core::error::Result;
use funkwerk_core::types::CompletionToken;

/// Legacy command set. Every firmware revision ships this; it is the floor
/// the baseline strategy stands on.
///
/// Token sequences are slices here — an empty slice means "no per-part
/// notification". The modern set uses `Option` instead; the two surfaces
/// genuinely differ in signature and the strategies adapt between them.
pub trait LegacyRadio: Send + Sync {
    /// Split `text` by the legacy fixed-length rule.
    fn divide_message(&self, text: &str) -> Vec<String>;

    /// Hand off a single text message. The legacy set splits oversize text
    /// internally, so callers pass the full text through.
    fn send_text(
        &self,
        destination: &str,
        service_center: Option<&str>,
        text: &str,
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()>;

    /// Hand off a pre-split message.
    fn send_multipart(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: &[String],
        sent: &[CompletionToken],
        delivered: &[CompletionToken],
    ) -> Result<()>;

    /// Hand off a binary payload addressed to an application port.
    fn send_data(
        &self,
        destination: &str,
        service_center: Option<&str>,
        port: u16,
        payload: &[u8],
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()>;
}

/// Modern command set. Absent on older firmware — `RadioPlatform::modern`
/// fails there and the selector falls back to the legacy set.
pub trait ModernRadio: Send + Sync {
    /// Split `text` into transport-sized parts, encoding-aware.
    fn divide_message(&self, text: &str) -> Vec<String>;

    /// Hand off a single text message.
    ///
    /// Present for completeness of the command set, but known to
    /// double-send on some handsets — the standard strategy never calls it
    /// and routes single messages through [`send_multipart`] instead.
    ///
    /// [`send_multipart`]: ModernRadio::send_multipart
    fn send_text(
        &self,
        destination: &str,
        service_center: Option<&str>,
        text: &str,
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()>;

    /// Hand off a pre-split message. Token vectors, when present, must match
    /// `parts` in length — that contract is the firmware's to enforce.
    fn send_multipart(
        &self,
        destination: &str,
        service_center: Option<&str>,
        parts: Vec<String>,
        sent: Option<Vec<CompletionToken>>,
        delivered: Option<Vec<CompletionToken>>,
    ) -> Result<()>;

    /// Hand off a binary payload addressed to an application port.
    fn send_data(
        &self,
        destination: &str,
        service_center: Option<&str>,
        port: u16,
        payload: &[u8],
        sent: Option<CompletionToken>,
        delivered: Option<CompletionToken>,
    ) -> Result<()>;
}

/// Alternate nine-parameter multipart entry point.
///
/// Ships only on certain vendor firmware, outside the stable command
/// surface — it cannot be reached through [`ModernRadio`] and must be
/// resolved by name and signature via
/// [`RadioPlatform::resolve_extended_multipart`].
pub trait ExtendedMultipart: Send + Sync {
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<()>;
}

/// Parameter types used to describe a radio entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Str,
    OptStr,
    StringList,
    TokenList,
    Bool,
    Int,
}

/// Name-plus-parameter-types description of an entry point outside the
/// stable command surface. Resolution succeeds only when both the name and
/// the full parameter list match what the firmware actually exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: &'static str,
    pub params: &'static [ParamType],
}

/// A bound radio platform: what one firmware revision exposes.
///
/// Vendor baseband bindings implement this out of tree; desktop and CI
/// builds use the in-process [`LoopbackRadio`].
///
/// [`LoopbackRadio`]: crate::loopback::LoopbackRadio
pub trait RadioPlatform: Send + Sync {
    /// Human-readable firmware/platform name.
    fn platform_name(&self) -> &str;

    /// The legacy command set. Infallible — every firmware ships it.
    fn legacy(&self) -> Arc<dyn LegacyRadio>;

    /// The modern command set, or `CapabilityUnavailable` on older
    /// firmware.
    fn modern(&self) -> Result<Arc<dyn ModernRadio>>;

    /// Resolve an entry point outside the stable command surface, or
    /// `WorkaroundUnavailable` when nothing with that name and signature
    /// exists on this firmware.
    fn resolve_extended_multipart(
        &self,
        signature: &MethodSignature,
    ) -> Result<Arc<dyn ExtendedMultipart>>;
}
