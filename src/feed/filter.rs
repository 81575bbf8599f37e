use std::fmt;

use crate::catalog::{CatalogSection, Category};

/// Label of the sentinel filter that matches every category.
pub const ALL_LABEL: &str = "All";

/// Single-select category filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Matches the category whose `name` equals this string.
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a pill label. The "All" label maps to the sentinel.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Named(name) => name,
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => *name == category.name,
        }
    }

    /// Sections of `sections` this filter displays, in catalog order.
    pub fn apply<'a>(&self, sections: &'a [CatalogSection]) -> Vec<&'a CatalogSection> {
        sections
            .iter()
            .filter(|s| self.matches(&s.category))
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
