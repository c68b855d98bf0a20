//! Tabular input handed over by the host on every data update.
//!
//! The shape follows a categorical data view: one category column, value
//! columns grouped by series, with tooltip-role columns travelling inside
//! each group next to the measure they describe.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Data roles a column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRoles {
    pub category: bool,
    pub series: bool,
    pub measure: bool,
    pub tooltip: bool,
}

impl ColumnRoles {
    #[must_use]
    pub const fn category() -> Self {
        Self {
            category: true,
            series: false,
            measure: false,
            tooltip: false,
        }
    }

    #[must_use]
    pub const fn measure() -> Self {
        Self {
            category: false,
            series: false,
            measure: true,
            tooltip: false,
        }
    }

    #[must_use]
    pub const fn tooltip() -> Self {
        Self {
            category: false,
            series: false,
            measure: false,
            tooltip: true,
        }
    }
}

/// Column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub display_name: String,
    /// Stable key of the bound field; used as the measure key of identities.
    pub query_name: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub roles: ColumnRoles,
    /// Series value this column instance is bound to, if any.
    #[serde(default)]
    pub group_name: Option<String>,
}

impl ColumnMetadata {
    #[must_use]
    pub fn new(display_name: impl Into<String>, query_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            query_name: query_name.into(),
            format: None,
            roles: ColumnRoles::default(),
            group_name: None,
        }
    }

    #[must_use]
    pub fn with_roles(mut self, roles: ColumnRoles) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub source: ColumnMetadata,
    pub values: Vec<String>,
}

impl CategoryColumn {
    /// Column bound to the category role, keyed by its display name.
    #[must_use]
    pub fn new<I, S>(display_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let display_name = display_name.into();
        Self {
            source: ColumnMetadata::new(display_name.clone(), display_name)
                .with_roles(ColumnRoles::category()),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueColumn {
    pub source: ColumnMetadata,
    pub values: Vec<Option<f64>>,
    /// Cross-filter highlight values; `None` entries are not highlighted.
    #[serde(default)]
    pub highlights: Option<Vec<Option<f64>>>,
}

impl ValueColumn {
    #[must_use]
    pub fn new(source: ColumnMetadata, values: Vec<Option<f64>>) -> Self {
        Self {
            source,
            values,
            highlights: None,
        }
    }

    #[must_use]
    pub fn with_highlights(mut self, highlights: Vec<Option<f64>>) -> Self {
        self.highlights = Some(highlights);
        self
    }
}

/// Host-persisted per-series overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOverrides {
    pub fill: Option<Color>,
    pub format: Option<String>,
}

/// All value columns bound to one series value.
///
/// Without a series field the table carries a single group whose `name` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueGroup {
    pub name: Option<String>,
    pub columns: Vec<ValueColumn>,
    #[serde(default)]
    pub overrides: SeriesOverrides,
}

impl ValueGroup {
    #[must_use]
    pub fn new(name: Option<String>, columns: Vec<ValueColumn>) -> Self {
        Self {
            name,
            columns,
            overrides: SeriesOverrides::default(),
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: SeriesOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// First column bound to the measure role.
    #[must_use]
    pub fn measure_column(&self) -> Option<&ValueColumn> {
        self.columns.iter().find(|column| column.source.roles.measure)
    }

    pub fn tooltip_columns(&self) -> impl Iterator<Item = &ValueColumn> {
        self.columns
            .iter()
            .filter(|column| column.source.roles.tooltip && !column.source.roles.measure)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTable {
    /// Every column bound in the data view, in binding order.
    pub metadata: Vec<ColumnMetadata>,
    pub categories: Vec<CategoryColumn>,
    pub groups: Vec<ValueGroup>,
}

impl DataTable {
    /// Assembles a table and derives `metadata` from the columns, category
    /// column first.
    #[must_use]
    pub fn from_columns(category: CategoryColumn, groups: Vec<ValueGroup>) -> Self {
        let mut metadata = vec![category.source.clone()];
        metadata.extend(
            groups
                .iter()
                .flat_map(|group| group.columns.iter().map(|column| column.source.clone())),
        );
        Self {
            metadata,
            categories: vec![category],
            groups,
        }
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories
            .first()
            .map_or(0, |column| column.values.len())
    }

    #[must_use]
    pub fn has_series(&self) -> bool {
        self.groups.iter().any(|group| group.name.is_some())
    }
}
