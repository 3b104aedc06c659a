#![forbid(unsafe_code)]

//! Ordered section registry.
//!
//! A [`Section`] names one full-viewport panel of the deck. The
//! [`SectionRegistry`] fixes their order: a section's position is its
//! navigation index, and panels are bound to sections by that position.
//!
//! # Invariants
//!
//! 1. Section ids are non-empty and unique within a registry.
//! 2. The order never changes after construction; there is no mutation API.
//!
//! # Failure Modes
//!
//! - Constructing a registry with an empty or duplicate id fails with
//!   [`SectionError`]. This is a build-time configuration mistake, not a
//!   runtime navigation error.

use serde::{Deserialize, Serialize};

/// One named panel of the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier, also used as the URL fragment.
    pub id: String,
    /// Human-readable name shown by navigation UI.
    pub display_name: String,
}

impl Section {
    /// Create a section.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Error building a [`SectionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// A section had an empty id at the given position.
    EmptyId(usize),
    /// The same id appeared twice.
    DuplicateId(String),
}

impl std::fmt::Display for SectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId(index) => write!(f, "section at position {index} has an empty id"),
            Self::DuplicateId(id) => write!(f, "duplicate section id: {id:?}"),
        }
    }
}

impl std::error::Error for SectionError {}

/// Fixed, ordered list of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry, validating ids.
    pub fn new(sections: Vec<Section>) -> Result<Self, SectionError> {
        for (index, section) in sections.iter().enumerate() {
            if section.id.is_empty() {
                return Err(SectionError::EmptyId(index));
            }
            if sections[..index].iter().any(|s| s.id == section.id) {
                return Err(SectionError::DuplicateId(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// The portfolio's five sections, in navigation order.
    #[must_use]
    pub fn portfolio() -> Self {
        Self {
            sections: vec![
                Section::new("home", "Home"),
                Section::new("about", "About"),
                Section::new("projects", "Projects"),
                Section::new("certifications", "Certifications"),
                Section::new("services", "Services"),
            ],
        }
    }

    /// Position of the section with the given id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Section at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Id of the section at `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(|s| s.id.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

impl<'de> Deserialize<'de> for SectionRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let sections = Vec::<Section>::deserialize(deserializer)?;
        Self::new(sections).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_order() {
        let registry = SectionRegistry::portfolio();
        let ids: Vec<&str> = registry.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            ["home", "about", "projects", "certifications", "services"]
        );
    }

    #[test]
    fn index_of_known_and_unknown() {
        let registry = SectionRegistry::portfolio();
        assert_eq!(registry.index_of("projects"), Some(2));
        assert_eq!(registry.index_of("services"), Some(4));
        assert_eq!(registry.index_of("contact"), None);
        assert_eq!(registry.index_of(""), None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = SectionRegistry::new(vec![
            Section::new("home", "Home"),
            Section::new("home", "Again"),
        ])
        .unwrap_err();
        assert_eq!(err, SectionError::DuplicateId("home".into()));
    }

    #[test]
    fn rejects_empty_id() {
        let err = SectionRegistry::new(vec![Section::new("", "Nameless")]).unwrap_err();
        assert_eq!(err, SectionError::EmptyId(0));
        assert_eq!(err.to_string(), "section at position 0 has an empty id");
    }

    #[test]
    fn id_at_out_of_range() {
        let registry = SectionRegistry::portfolio();
        assert_eq!(registry.id_at(1), Some("about"));
        assert_eq!(registry.id_at(5), None);
    }
}
