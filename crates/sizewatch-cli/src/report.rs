//! Console and webhook presentation of a verdict.

use sizewatch_core::{Availability, Verdict};

/// Human-readable result line followed by the page URL.
pub(crate) fn format_message(size: &str, url: &str, verdict: &Verdict) -> String {
    let detail = verdict.detail();
    match verdict.availability() {
        Availability::InStock => format!("✅ Size {size} appears IN STOCK ({detail})\n{url}"),
        Availability::OutOfStock => {
            format!("❌ Size {size} appears OUT OF STOCK ({detail})\n{url}")
        }
        Availability::Unknown => {
            format!("⚠️ Could not determine stock for {size} ({detail})\n{url}")
        }
    }
}

/// Output rules for one run.
///
/// `quiet` only affects the console and `always_notify` only affects the
/// webhook; neither flag changes the other channel.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct OutputPolicy {
    pub quiet: bool,
    pub always_notify: bool,
}

impl OutputPolicy {
    /// Quiet runs stay silent on out-of-stock, the routine outcome when
    /// polling a page.
    pub(crate) fn should_print(self, availability: Availability) -> bool {
        !self.quiet || availability != Availability::OutOfStock
    }

    pub(crate) fn should_notify(self, availability: Availability) -> bool {
        self.always_notify || availability == Availability::InStock
    }
}
