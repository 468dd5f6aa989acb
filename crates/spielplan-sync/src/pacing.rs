//! Pacing policy for outbound provider requests.
//!
//! The schedule provider tolerates only a modest request rate. The fixed
//! delay between consecutive subjects is deliberate backpressure, not an
//! artifact: removing it risks provider-side throttling or blocking. A
//! parallel reimplementation must keep the aggregate request rate at or
//! below this spacing.

use std::time::Duration;

/// Spacing between consecutive outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Minimum delay between two consecutive subjects.
    pub request_spacing: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            request_spacing: Duration::from_millis(500),
        }
    }
}

impl PacingPolicy {
    /// Creates a policy with the given spacing.
    pub fn new(request_spacing: Duration) -> Self {
        Self { request_spacing }
    }

    /// No spacing. Test use; production passes keep the default.
    pub fn none() -> Self {
        Self {
            request_spacing: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spacing_is_half_a_second() {
        assert_eq!(
            PacingPolicy::default().request_spacing,
            Duration::from_millis(500)
        );
    }

    #[test]
    fn none_disables_spacing() {
        assert_eq!(PacingPolicy::none().request_spacing, Duration::ZERO);
    }
}
