#![forbid(unsafe_code)]

//! Runtime capability flags sampled from the host environment.
//!
//! [`Capabilities`] is a plain value object. The host samples it at mount
//! and again whenever a media feature changes, then hands the new value to
//! the deck. Nothing mutates it in place.
//!
//! # Failure Modes
//!
//! - A host without media-feature queries reports `None` for each query;
//!   the sampled value falls back to "motion allowed, fine pointer", which
//!   selects the richer desktop code path.

use serde::{Deserialize, Serialize};

/// Media query for the reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Media query for a coarse primary pointer (touch screens).
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";

/// Source of media-feature answers.
///
/// Implemented by the web host over `matchMedia`, and by tests with fixed
/// answers. Returning `None` means the query API is unavailable.
pub trait MediaFeatures {
    fn matches(&self, query: &str) -> Option<bool>;
}

/// Environment capabilities read by the transition engine and gesture router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// The user asked the platform to minimize motion.
    pub prefers_reduced_motion: bool,
    /// The primary pointer is coarse (touch).
    pub coarse_pointer: bool,
}

impl Capabilities {
    /// Desktop defaults: motion allowed, fine pointer.
    #[must_use]
    pub const fn desktop() -> Self {
        Self {
            prefers_reduced_motion: false,
            coarse_pointer: false,
        }
    }

    /// Typical touch device.
    #[must_use]
    pub const fn touch() -> Self {
        Self {
            prefers_reduced_motion: false,
            coarse_pointer: true,
        }
    }

    #[must_use]
    pub const fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.prefers_reduced_motion = reduced;
        self
    }

    #[must_use]
    pub const fn with_coarse_pointer(mut self, coarse: bool) -> Self {
        self.coarse_pointer = coarse;
        self
    }

    /// Sample capabilities from the host's media features.
    #[must_use]
    pub fn sample(media: &impl MediaFeatures) -> Self {
        let caps = Self {
            prefers_reduced_motion: media.matches(REDUCED_MOTION_QUERY).unwrap_or(false),
            coarse_pointer: media.matches(COARSE_POINTER_QUERY).unwrap_or(false),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "folio.capabilities",
            reduced_motion = caps.prefers_reduced_motion,
            coarse_pointer = caps.coarse_pointer,
            "sampled capabilities"
        );
        caps
    }

    /// Whether wheel input should be routed at all.
    #[inline]
    #[must_use]
    pub const fn routes_wheel(self) -> bool {
        !self.coarse_pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        reduced: Option<bool>,
        coarse: Option<bool>,
    }

    impl MediaFeatures for Fixed {
        fn matches(&self, query: &str) -> Option<bool> {
            match query {
                REDUCED_MOTION_QUERY => self.reduced,
                COARSE_POINTER_QUERY => self.coarse,
                _ => None,
            }
        }
    }

    #[test]
    fn sample_reads_both_queries() {
        let caps = Capabilities::sample(&Fixed {
            reduced: Some(true),
            coarse: Some(true),
        });
        assert!(caps.prefers_reduced_motion);
        assert!(caps.coarse_pointer);
        assert!(!caps.routes_wheel());
    }

    #[test]
    fn absent_api_falls_back_to_desktop() {
        let caps = Capabilities::sample(&Fixed {
            reduced: None,
            coarse: None,
        });
        assert_eq!(caps, Capabilities::desktop());
        assert_eq!(caps, Capabilities::default());
        assert!(caps.routes_wheel());
    }

    #[test]
    fn builders() {
        let caps = Capabilities::desktop().with_reduced_motion(true);
        assert!(caps.prefers_reduced_motion);
        assert!(!caps.coarse_pointer);
        assert_eq!(Capabilities::desktop().with_coarse_pointer(true), Capabilities::touch());
    }
}
