use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural identity of a selectable entity.
///
/// Identities are rebuilt on every pass; two identities built from the same
/// `(category row, series key, measure key)` tuple compare equal, which is
/// what lets selection survive a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityIdentity {
    pub category_index: Option<usize>,
    pub series_key: Option<String>,
    pub measure_key: Option<String>,
}

impl EntityIdentity {
    /// Identity of a whole category row.
    #[must_use]
    pub fn category(category_index: usize) -> Self {
        Self {
            category_index: Some(category_index),
            series_key: None,
            measure_key: None,
        }
    }

    /// Identity of one series across all categories (legend entry).
    #[must_use]
    pub fn series(series_key: Option<&str>, measure_key: &str) -> Self {
        Self {
            category_index: None,
            series_key: series_key.map(str::to_owned),
            measure_key: Some(measure_key.to_owned()),
        }
    }

    /// Identity of one data point: a series value inside a category.
    #[must_use]
    pub fn data_point(category_index: usize, series_key: Option<&str>, measure_key: &str) -> Self {
        Self {
            category_index: Some(category_index),
            series_key: series_key.map(str::to_owned),
            measure_key: Some(measure_key.to_owned()),
        }
    }
}

impl EntityIdentity {
    /// Whether selecting `self` also selects the data point `other`: a
    /// category covers its points, a series covers its points in every
    /// category.
    #[must_use]
    pub fn covers(&self, other: &EntityIdentity) -> bool {
        let Some(other_category) = other.category_index else {
            return false;
        };
        if other.measure_key.is_none() {
            return false;
        }
        match (self.category_index, &self.measure_key) {
            (Some(category), None) => category == other_category,
            (None, Some(measure)) => {
                other.measure_key.as_ref() == Some(measure) && other.series_key == self.series_key
            }
            _ => false,
        }
    }
}

impl fmt::Display for EntityIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self
            .category_index
            .map_or_else(|| "*".to_owned(), |index| index.to_string());
        write!(
            f,
            "{category}/{}/{}",
            self.series_key.as_deref().unwrap_or("*"),
            self.measure_key.as_deref().unwrap_or("*")
        )
    }
}
