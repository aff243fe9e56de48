//! The outcome of a single stock check.

use std::fmt;

/// Detail attached to every [`Availability::Unknown`] verdict.
pub const UNKNOWN_DETAIL: &str = "could not determine";

/// Tri-state stock outcome for one size on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    InStock,
    OutOfStock,
    Unknown,
}

impl Availability {
    #[must_use]
    pub fn is_conclusive(self) -> bool {
        !matches!(self, Availability::Unknown)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::InStock => write!(f, "in_stock"),
            Availability::OutOfStock => write!(f, "out_of_stock"),
            Availability::Unknown => write!(f, "unknown"),
        }
    }
}

/// An [`Availability`] paired with the signal that produced it.
///
/// Conclusive verdicts always name their signal (a quantity, a raw field
/// value, or a text rule). Unknown verdicts always carry [`UNKNOWN_DETAIL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    availability: Availability,
    detail: String,
}

impl Verdict {
    /// # Panics
    ///
    /// Debug builds panic when `detail` is empty.
    #[must_use]
    pub fn in_stock(detail: impl Into<String>) -> Self {
        Self::conclusive(Availability::InStock, detail.into())
    }

    /// # Panics
    ///
    /// Debug builds panic when `detail` is empty.
    #[must_use]
    pub fn out_of_stock(detail: impl Into<String>) -> Self {
        Self::conclusive(Availability::OutOfStock, detail.into())
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self {
            availability: Availability::Unknown,
            detail: UNKNOWN_DETAIL.to_string(),
        }
    }

    fn conclusive(availability: Availability, detail: String) -> Self {
        debug_assert!(
            !detail.is_empty(),
            "conclusive verdicts must name their signal"
        );
        Self {
            availability,
            detail,
        }
    }

    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}
