// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// The strategy-selection layer itself takes no configuration — which tier
// runs is discovered by probing, never declared. These settings belong to
// the demo binary and the loopback radio it drives.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::FirmwareProfile;

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Firmware profile the loopback radio emulates.
    pub firmware_profile: FirmwareProfile,
    /// Service-centre address attached to outgoing messages.
    pub service_center: Option<String>,
    /// Make the loopback radio reject every send (failure-path testing).
    pub reject_sends: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            firmware_profile: FirmwareProfile::Vendor,
            service_center: None,
            reject_sends: false,
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write settings to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
