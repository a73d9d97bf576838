// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Funkwerk — Radio command-set boundary.
//
// This crate defines the traits a firmware binding exposes to the send
// layer and ships the in-process loopback radio used on desktop/CI builds
// and in tests. Vendor baseband bindings implement `RadioPlatform` out of
// tree.

pub mod loopback;
pub mod split;
pub mod traits;

use std::sync::Arc;

pub use funkwerk_core::types::FirmwareProfile;
pub use loopback::{EntryPoint, LoopbackRadio, RadioFrame};
pub use traits::{
    ExtendedMultipart, LegacyRadio, MethodSignature, ModernRadio, ParamType, RadioPlatform,
};

/// Retrieves the default radio platform for this build.
///
/// Targets with a real baseband attach their binding here; desktop and CI
/// builds talk to the loopback radio with the full vendor command set so
/// the whole stack stays exercisable without hardware.
pub fn default_platform() -> Arc<dyn RadioPlatform> {
    Arc::new(LoopbackRadio::new(FirmwareProfile::Vendor))
}
