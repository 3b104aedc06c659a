#![forbid(unsafe_code)]

//! Deck configuration as data.
//!
//! [`DeckConfig`] groups every tunable of the deck (gesture thresholds,
//! cooldown, transition timing profiles, inspection mode) so a site can
//! ship a TOML or JSON file instead of recompiling.
//!
//! ```toml
//! inspection_mode = false
//!
//! [gesture]
//! touch_threshold_px = 50.0
//! cooldown_ms = 700
//!
//! [transition.mobile]
//! enter_ms = 520
//! enter_blur_px = 0.0
//! ```
//!
//! # Defaults
//!
//! Every field has a default, and `#[serde(default)]` lets a file override
//! only what it names.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gesture
// ---------------------------------------------------------------------------

/// Thresholds for converting wheel and touch input into navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Vertical drag distance before a touch gesture may navigate.
    pub touch_threshold_px: f64,
    /// Window after a boundary hit during which further boundary input is swallowed.
    pub cooldown_ms: u64,
    /// Distance from an edge still counted as "at the edge".
    pub edge_tolerance_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_threshold_px: 50.0,
            cooldown_ms: 700,
            edge_tolerance_px: folio_core::scroll::EDGE_TOLERANCE,
        }
    }
}

impl GestureConfig {
    #[inline]
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Timing and magnitude of one crossfade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionProfile {
    /// Duration of the incoming panel's tween.
    pub enter_ms: u64,
    /// Duration of the outgoing panel's tween.
    pub exit_ms: u64,
    /// Fraction of `enter_ms` after which the outgoing tween starts.
    pub overlap: f32,
    /// Initial vertical offset of the incoming panel.
    pub enter_offset_px: f32,
    /// Final vertical offset of the outgoing panel.
    pub exit_offset_px: f32,
    /// Initial scale of the incoming panel.
    pub enter_scale: f32,
    /// Initial blur radius of the incoming panel.
    pub enter_blur_px: f32,
    /// Final blur radius of the outgoing panel.
    pub exit_blur_px: f32,
}

impl Default for TransitionProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

impl TransitionProfile {
    /// Fine-pointer profile: longer, wider travel, soft blur.
    #[must_use]
    pub fn desktop() -> Self {
        Self {
            enter_ms: 850,
            exit_ms: 600,
            overlap: 0.12,
            enter_offset_px: 80.0,
            exit_offset_px: 40.0,
            enter_scale: 0.96,
            enter_blur_px: 10.0,
            exit_blur_px: 4.0,
        }
    }

    /// Coarse-pointer profile: shorter, smaller offsets, no blur.
    #[must_use]
    pub fn mobile() -> Self {
        Self {
            enter_ms: 520,
            exit_ms: 380,
            overlap: 0.1,
            enter_offset_px: 36.0,
            exit_offset_px: 16.0,
            enter_scale: 0.985,
            enter_blur_px: 0.0,
            exit_blur_px: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn enter_duration(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    #[inline]
    #[must_use]
    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }

    /// Offset at which the outgoing tween starts.
    #[must_use]
    pub fn exit_delay(&self) -> Duration {
        self.enter_duration()
            .mul_f32(self.overlap.clamp(0.0, 1.0))
    }

    fn validate_into(&self, prefix: &str, errors: &mut Vec<String>) {
        if self.enter_ms == 0 {
            errors.push(format!("{prefix}.enter_ms must be > 0"));
        }
        if self.exit_ms == 0 {
            errors.push(format!("{prefix}.exit_ms must be > 0"));
        }
        if !(0.0..1.0).contains(&self.overlap) {
            errors.push(format!(
                "{prefix}.overlap must be in [0, 1), got {}",
                self.overlap
            ));
        }
        if !(self.enter_scale > 0.0 && self.enter_scale <= 1.0) {
            errors.push(format!(
                "{prefix}.enter_scale must be in (0, 1], got {}",
                self.enter_scale
            ));
        }
        for (name, value) in [
            ("enter_offset_px", self.enter_offset_px),
            ("exit_offset_px", self.exit_offset_px),
            ("enter_blur_px", self.enter_blur_px),
            ("exit_blur_px", self.exit_blur_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{prefix}.{name} must be finite and >= 0, got {value}"));
            }
        }
    }
}

/// Desktop and mobile transition profiles.
///
/// Deserialization merges each profile over its own defaults, so a file that
/// only sets `[transition.mobile] enter_ms` keeps the other mobile values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTransitionConfig")]
pub struct TransitionConfig {
    pub desktop: TransitionProfile,
    pub mobile: TransitionProfile,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            desktop: TransitionProfile::desktop(),
            mobile: TransitionProfile::mobile(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTransitionConfig {
    desktop: PartialProfile,
    mobile: PartialProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialProfile {
    enter_ms: Option<u64>,
    exit_ms: Option<u64>,
    overlap: Option<f32>,
    enter_offset_px: Option<f32>,
    exit_offset_px: Option<f32>,
    enter_scale: Option<f32>,
    enter_blur_px: Option<f32>,
    exit_blur_px: Option<f32>,
}

impl PartialProfile {
    fn over(self, base: TransitionProfile) -> TransitionProfile {
        TransitionProfile {
            enter_ms: self.enter_ms.unwrap_or(base.enter_ms),
            exit_ms: self.exit_ms.unwrap_or(base.exit_ms),
            overlap: self.overlap.unwrap_or(base.overlap),
            enter_offset_px: self.enter_offset_px.unwrap_or(base.enter_offset_px),
            exit_offset_px: self.exit_offset_px.unwrap_or(base.exit_offset_px),
            enter_scale: self.enter_scale.unwrap_or(base.enter_scale),
            enter_blur_px: self.enter_blur_px.unwrap_or(base.enter_blur_px),
            exit_blur_px: self.exit_blur_px.unwrap_or(base.exit_blur_px),
        }
    }
}

impl From<RawTransitionConfig> for TransitionConfig {
    fn from(raw: RawTransitionConfig) -> Self {
        Self {
            desktop: raw.desktop.over(TransitionProfile::desktop()),
            mobile: raw.mobile.over(TransitionProfile::mobile()),
        }
    }
}

impl TransitionConfig {
    /// Profile for the given pointer modality.
    #[must_use]
    pub fn profile(&self, coarse_pointer: bool) -> &TransitionProfile {
        if coarse_pointer {
            &self.mobile
        } else {
            &self.desktop
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level DeckConfig
// ---------------------------------------------------------------------------

/// Every tunable of the deck.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Keep every panel visible and accessible for automated inspection.
    ///
    /// Trades the one-exposed-panel accessibility guarantee for
    /// queryability; never enable in production builds.
    pub inspection_mode: bool,
    pub gesture: GestureConfig,
    pub transition: TransitionConfig,
}

impl DeckConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, DeckConfigError> {
        let config: Self = toml::from_str(s).map_err(DeckConfigError::Toml)?;
        config.validated()
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DeckConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DeckConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, DeckConfigError> {
        let config: Self = serde_json::from_str(s).map_err(DeckConfigError::Json)?;
        config.validated()
    }

    /// Read, parse, and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DeckConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DeckConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, DeckConfigError> {
        toml::to_string_pretty(self).map_err(DeckConfigError::TomlSerialize)
    }

    /// Check every parameter. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let threshold = self.gesture.touch_threshold_px;
        if !threshold.is_finite() || threshold <= 0.0 {
            errors.push(format!(
                "gesture.touch_threshold_px must be > 0, got {}",
                self.gesture.touch_threshold_px
            ));
        }
        let tolerance = self.gesture.edge_tolerance_px;
        if !tolerance.is_finite() || tolerance < 0.0 {
            errors.push(format!(
                "gesture.edge_tolerance_px must be finite and >= 0, got {}",
                self.gesture.edge_tolerance_px
            ));
        }

        self.transition
            .desktop
            .validate_into("transition.desktop", &mut errors);
        self.transition
            .mobile
            .validate_into("transition.mobile", &mut errors);

        errors
    }

    fn validated(self) -> Result<Self, DeckConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DeckConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a deck configuration.
#[derive(Debug)]
pub enum DeckConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// TOML serialization error.
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for DeckConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for DeckConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::TomlSerialize(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = DeckConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn default_transition_profiles() {
        let config = DeckConfig::default();
        assert_eq!(config.transition.desktop, TransitionProfile::desktop());
        assert_eq!(config.transition.mobile, TransitionProfile::mobile());
        assert_eq!(config.transition.profile(true).enter_blur_px, 0.0);
        assert!(config.transition.profile(false).enter_blur_px > 0.0);
    }

    #[test]
    fn mobile_is_cheaper_than_desktop() {
        let desktop = TransitionProfile::desktop();
        let mobile = TransitionProfile::mobile();
        assert!(mobile.enter_ms < desktop.enter_ms);
        assert!(mobile.exit_ms < desktop.exit_ms);
        assert!(mobile.enter_offset_px < desktop.enter_offset_px);
        assert_eq!(mobile.exit_blur_px, 0.0);
    }

    #[test]
    fn exit_delay_is_fraction_of_enter() {
        let profile = TransitionProfile {
            enter_ms: 1000,
            overlap: 0.25,
            ..TransitionProfile::desktop()
        };
        assert_eq!(profile.exit_delay(), Duration::from_millis(250));
    }

    #[test]
    fn validate_catches_zero_threshold() {
        let mut config = DeckConfig::default();
        config.gesture.touch_threshold_px = 0.0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("touch_threshold_px")));
    }

    #[test]
    fn validate_catches_nan_threshold() {
        let mut config = DeckConfig::default();
        config.gesture.touch_threshold_px = f64::NAN;
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn toml_nan_values_fail_validation() {
        let err = DeckConfig::from_toml_str(
            r#"
            [gesture]
            edge_tolerance_px = nan

            [transition.desktop]
            enter_scale = nan
            enter_offset_px = nan
            "#,
        )
        .unwrap_err();
        let errors = match err {
            DeckConfigError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        };
        assert!(errors.iter().any(|e| e.contains("gesture.edge_tolerance_px")));
        assert!(errors.iter().any(|e| e.contains("transition.desktop.enter_scale")));
        assert!(errors.iter().any(|e| e.contains("transition.desktop.enter_offset_px")));
    }

    #[test]
    fn validate_catches_infinite_blur() {
        let mut config = DeckConfig::default();
        config.transition.mobile.enter_blur_px = f32::INFINITY;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("transition.mobile.enter_blur_px")));
    }

    #[test]
    fn validate_catches_bad_profile() {
        let mut config = DeckConfig::default();
        config.transition.mobile.enter_ms = 0;
        config.transition.desktop.overlap = 1.0;
        config.transition.desktop.enter_scale = 1.5;
        config.transition.desktop.exit_blur_px = -1.0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("transition.mobile.enter_ms")));
        assert!(errors.iter().any(|e| e.contains("transition.desktop.overlap")));
        assert!(errors.iter().any(|e| e.contains("transition.desktop.enter_scale")));
        assert!(errors.iter().any(|e| e.contains("transition.desktop.exit_blur_px")));
    }

    #[test]
    fn toml_partial_override() {
        let config = DeckConfig::from_toml_str(
            r#"
            inspection_mode = true

            [gesture]
            cooldown_ms = 400

            [transition.mobile]
            enter_ms = 300
            "#,
        )
        .expect("valid toml");
        assert!(config.inspection_mode);
        assert_eq!(config.gesture.cooldown(), Duration::from_millis(400));
        assert_eq!(config.gesture.touch_threshold_px, 50.0);
        assert_eq!(config.transition.mobile.enter_ms, 300);
        assert_eq!(config.transition.mobile.exit_ms, TransitionProfile::mobile().exit_ms);
        assert_eq!(config.transition.desktop, TransitionProfile::desktop());
    }

    #[test]
    fn json_roundtrip_and_validation_error() {
        let config = DeckConfig::from_json_str(r#"{"gesture": {"cooldown_ms": 250}}"#)
            .expect("valid json");
        assert_eq!(config.gesture.cooldown_ms, 250);

        let err = DeckConfig::from_json_str(r#"{"gesture": {"touch_threshold_px": -3}}"#)
            .unwrap_err();
        assert!(matches!(err, DeckConfigError::Validation(_)));
        assert!(err.to_string().contains("touch_threshold_px"));
    }

    #[test]
    fn malformed_inputs_report_parser() {
        let err = DeckConfig::from_toml_str("gesture = [").unwrap_err();
        assert!(matches!(err, DeckConfigError::Toml(_)));
        assert!(std::error::Error::source(&err).is_some());

        let err = DeckConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, DeckConfigError::Json(_)));
    }

    #[test]
    fn to_toml_reparses() {
        let mut config = DeckConfig::default();
        config.gesture.cooldown_ms = 900;
        let text = config.to_toml_string().expect("serializes");
        let back = DeckConfig::from_toml_str(&text).expect("reparses");
        assert_eq!(back, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DeckConfig::from_toml_file("/nonexistent/folio-deck.toml").unwrap_err();
        assert!(matches!(err, DeckConfigError::Io(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("deck.json");
        std::fs::write(&path, r#"{"inspection_mode": true}"#).expect("write");
        let config = DeckConfig::from_json_file(&path).expect("loads");
        assert!(config.inspection_mode);
    }
}
