// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::error::XdpiError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DpiOrigin {
    /// Computed from the screen's own pixel and mm size.
    Protocol,
    /// Taken from the user's `Xft.dpi` resource.
    FontResource,
}

/// Baseline DPI of a screen, the denominator-side of prorated scaling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceDpi {
    pub value: f64,
    pub origin: DpiOrigin,
}

impl ReferenceDpi {
    pub fn protocol(dpi: u32) -> Self {
        Self {
            value: dpi as f64,
            origin: DpiOrigin::Protocol,
        }
    }

    pub fn is_overridden(&self) -> bool {
        self.origin == DpiOrigin::FontResource
    }
}

/// Parse an `Xft.dpi` value. `Ok(None)` means "not set".
pub fn parse_font_dpi(value: &str) -> Result<Option<f64>, XdpiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = |reason: &str| XdpiError::InvalidOverride {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let dpi: f64 = trimmed.parse().map_err(|_| invalid("not a number"))?;
    if !dpi.is_finite() {
        return Err(invalid("not a finite number"));
    }
    if dpi <= 0.0 {
        return Err(invalid("must be positive"));
    }

    Ok(Some(dpi))
}

/// Apply the font-DPI preference on top of a protocol baseline.
///
/// An unusable override leaves the baseline untouched and is returned as a
/// warning for the caller to log.
pub fn resolve(baseline: ReferenceDpi, font_dpi: Option<&str>) -> (ReferenceDpi, Option<XdpiError>) {
    let Some(raw) = font_dpi else {
        return (baseline, None);
    };

    match parse_font_dpi(raw) {
        Ok(Some(value)) => (
            ReferenceDpi {
                value,
                origin: DpiOrigin::FontResource,
            },
            None,
        ),
        Ok(None) => (baseline, None),
        Err(e) => (baseline, Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_override_keeps_baseline() {
        let (r, warn) = resolve(ReferenceDpi::protocol(96), None);
        assert_eq!(r, ReferenceDpi::protocol(96));
        assert!(warn.is_none());
    }

    #[test]
    fn valid_override_wins() {
        let (r, warn) = resolve(ReferenceDpi::protocol(96), Some("144"));
        assert_eq!(r.value, 144.0);
        assert!(r.is_overridden());
        assert!(warn.is_none());
    }

    #[test]
    fn fractional_override_with_whitespace() {
        let (r, _) = resolve(ReferenceDpi::protocol(96), Some(" 120.5\n"));
        assert_eq!(r.value, 120.5);
    }

    #[test]
    fn garbage_override_is_ignored_with_warning() {
        for bad in ["abc", "-5", "0", "NaN", "inf"] {
            let (r, warn) = resolve(ReferenceDpi::protocol(96), Some(bad));
            assert_eq!(r, ReferenceDpi::protocol(96), "override {bad:?}");
            assert!(
                matches!(warn, Some(XdpiError::InvalidOverride { .. })),
                "override {bad:?}"
            );
        }
    }

    #[test]
    fn empty_override_counts_as_unset() {
        let (r, warn) = resolve(ReferenceDpi::protocol(96), Some("   "));
        assert_eq!(r, ReferenceDpi::protocol(96));
        assert!(warn.is_none());
    }
}
