// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-time capability probe and strategy cache.
//
// The probe order is fixed and significant: the vendor-defect workaround
// first, full modern capability second, the guaranteed floor last. Known
// defects outrank raw capability, and capability outranks nothing-can-fail.
// On devices that need no workaround the first probe fails once per
// process — an accepted, negligible cost.
//
// Construction failures are consumed here and turned into "try the next
// tier"; they never reach callers. Once a tier is cached it stays for the
// process lifetime — no re-probing, no downgrade, regardless of later
// device state.

use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use funkwerk_radio::RadioPlatform;

use crate::baseline::BaselineStrategy;
use crate::compensating::CompensatingStrategy;
use crate::standard::StandardStrategy;
use crate::strategy::SmsStrategy;

/// Lazily-resolved strategy slot.
///
/// `get` runs the ordered probe on first access and returns the cached
/// strategy on every access after that. The slot serializes the first
/// access, so concurrent callers all converge on one instance and none
/// ever observes an absent strategy.
pub struct Selector {
    slot: OnceLock<Arc<dyn SmsStrategy>>,
}

impl Selector {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Resolve (first call) or return the cached strategy.
    pub fn get(&self, platform: &dyn RadioPlatform) -> Arc<dyn SmsStrategy> {
        self.slot.get_or_init(|| probe(platform)).clone()
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered construction probe. Infallible: the chain terminates at the
/// baseline tier, which cannot fail to construct.
fn probe(platform: &dyn RadioPlatform) -> Arc<dyn SmsStrategy> {
    let strategy: Arc<dyn SmsStrategy> = match CompensatingStrategy::new(platform) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            debug!(error = %e, "compensating tier unavailable");
            match StandardStrategy::new(platform) {
                Ok(s) => Arc::new(s),
                Err(e) => {
                    debug!(error = %e, "standard tier unavailable");
                    Arc::new(BaselineStrategy::new(platform))
                }
            }
        }
    };
    info!(
        tier = strategy.tier().as_str(),
        platform = platform.platform_name(),
        "selected send strategy"
    );
    strategy
}

static DEFAULT: Selector = Selector::new();

/// Process-wide strategy over the default radio platform.
///
/// The first call probes and caches; every later call returns the same
/// instance, whatever the device has done in the meantime.
pub fn default_strategy() -> Arc<dyn SmsStrategy> {
    DEFAULT.get(funkwerk_radio::default_platform().as_ref())
}
