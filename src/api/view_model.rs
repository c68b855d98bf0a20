use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    BandScale, Color, DisplayUnits, EntityIdentity, FontSpec, LinearScale, Margin, TextSize,
    Viewport,
};

use super::CategoryAxisOrientation;

/// One line of tooltip content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipEntry {
    pub display_name: String,
    pub value: String,
    pub color: Color,
}

pub type TooltipPayload = SmallVec<[TooltipEntry; 4]>;

/// One series value (a dumbbell endpoint), or a legend entry when it lives
/// in `ViewModel::groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub color: Color,
    pub identity: EntityIdentity,
    pub value: f64,
    pub formatted_value: String,
    pub highlighted_value: Option<f64>,
    pub highlighted: bool,
    pub selected: bool,
    pub tooltip: TooltipPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub identity: EntityIdentity,
    pub min: f64,
    pub max: f64,
    pub selected: bool,
    /// True only when every group of the category is highlighted.
    pub highlighted: bool,
    pub groups: Vec<Group>,
}

/// Anything that can carry selection and highlight state.
pub trait Selectable {
    fn identity(&self) -> &EntityIdentity;
    fn is_selected(&self) -> bool;
    fn is_highlighted(&self) -> bool;
}

impl Selectable for Group {
    fn identity(&self) -> &EntityIdentity {
        &self.identity
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

impl Selectable for Category {
    fn identity(&self) -> &EntityIdentity {
        &self.identity
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Offset applied to an axis group before drawing it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisTranslate {
    pub x: f64,
    pub y: f64,
}

/// Physical side an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSide {
    Left,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxis {
    pub side: AxisSide,
    pub scale: BandScale,
    pub translate: AxisTranslate,
    /// Gridline length; negative so lines cross the whole plot.
    pub tick_size: f64,
    pub tick_label_dimensions: TextSize,
    pub font: FontSpec,
    pub color: Color,
}

impl CategoryAxis {
    #[must_use]
    pub fn domain(&self) -> &[String] {
        self.scale.domain()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.scale.range()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
    pub coordinate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAxis {
    pub side: AxisSide,
    /// Niced scale; its domain covers `[min_value, max_value]`.
    pub scale: LinearScale,
    pub tick_count: usize,
    pub ticks: Vec<AxisTick>,
    pub translate: AxisTranslate,
    pub tick_size: f64,
    pub tick_label_dimensions: TextSize,
    pub display_units: DisplayUnits,
    pub font: FontSpec,
    pub color: Color,
}

impl ValueAxis {
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.scale.domain()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.scale.range()
    }
}

/// Output of the layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub orientation: CategoryAxisOrientation,
    pub margin: Margin,
    /// True when text measurement failed and `margin` was carried over.
    pub margin_fallback: bool,
    pub category_axis: CategoryAxis,
    pub value_axis: ValueAxis,
}

/// Lifecycle position of a view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewModelState {
    Empty,
    Invalid,
    ValidUnlaidout,
    ValidLaidout,
}

/// Renderer-ready model rebuilt wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub is_valid: bool,
    /// Why the input was rejected, for invalid models.
    pub invalid_reason: Option<String>,
    pub primary_format_string: String,
    /// Distinct series across all categories, for legend binding.
    pub groups: Vec<Group>,
    pub categories: Vec<Category>,
    pub min_value: f64,
    pub max_value: f64,
    pub has_selection: bool,
    pub has_highlights: bool,
    pub layout: Option<ChartLayout>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl ViewModel {
    /// Model held before any data arrives.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            is_valid: false,
            invalid_reason: None,
            primary_format_string: String::new(),
            groups: Vec::new(),
            categories: Vec::new(),
            min_value: 0.0,
            max_value: 0.0,
            has_selection: false,
            has_highlights: false,
            layout: None,
        }
    }

    /// Model for rejected input: no collections, nothing to draw.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            invalid_reason: Some(reason.into()),
            ..Self::empty()
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewModelState {
        match (self.is_valid, self.layout.is_some(), &self.invalid_reason) {
            (true, true, _) => ViewModelState::ValidLaidout,
            (true, false, _) => ViewModelState::ValidUnlaidout,
            (false, _, Some(_)) => ViewModelState::Invalid,
            (false, _, None) => ViewModelState::Empty,
        }
    }

    #[must_use]
    pub fn margin(&self) -> Option<Margin> {
        self.layout.as_ref().map(|layout| layout.margin)
    }

    #[must_use]
    pub fn category_axis(&self) -> Option<&CategoryAxis> {
        self.layout.as_ref().map(|layout| &layout.category_axis)
    }

    #[must_use]
    pub fn value_axis(&self) -> Option<&ValueAxis> {
        self.layout.as_ref().map(|layout| &layout.value_axis)
    }

    /// Every entity that can carry selection state: categories, their
    /// groups, then the distinct groups.
    #[must_use]
    pub fn selectable_entities(&self) -> Vec<&dyn Selectable> {
        let mut entities: Vec<&dyn Selectable> = Vec::new();
        for category in &self.categories {
            entities.push(category);
            entities.extend(category.groups.iter().map(|group| group as &dyn Selectable));
        }
        entities.extend(self.groups.iter().map(|group| group as &dyn Selectable));
        entities
    }

    #[must_use]
    pub fn should_dim<E: Selectable + ?Sized>(&self, entity: &E) -> bool {
        (self.has_selection && !entity.is_selected())
            || (self.has_highlights && !entity.is_highlighted())
    }

    #[must_use]
    pub fn should_emphasize<E: Selectable + ?Sized>(&self, entity: &E) -> bool {
        (self.has_selection && entity.is_selected())
            || (self.has_highlights && entity.is_highlighted())
    }

    /// Marks every entity whose identity is in `identities` as selected and
    /// all others as not selected, then recomputes `has_selection`.
    ///
    /// Data points of a selected category or series are selected with it.
    pub(crate) fn apply_selected_identities(&mut self, identities: &[EntityIdentity]) {
        let is_selected = |identity: &EntityIdentity| identities.contains(identity);
        for category in &mut self.categories {
            category.selected = is_selected(&category.identity);
            for group in &mut category.groups {
                group.selected = is_selected(&group.identity)
                    || identities.iter().any(|parent| parent.covers(&group.identity));
            }
        }
        for group in &mut self.groups {
            group.selected = is_selected(&group.identity);
        }
        self.has_selection = !identities.is_empty()
            && self
                .selectable_entities()
                .iter()
                .any(|entity| entity.is_selected());
    }

    /// Identities the user selected, in traversal order.
    ///
    /// Data points selected only through their category or series are left
    /// out, so the list round-trips through [`Self::apply_selected_identities`].
    #[must_use]
    pub fn selected_identities(&self) -> Vec<EntityIdentity> {
        let flagged: Vec<&EntityIdentity> = self
            .selectable_entities()
            .into_iter()
            .filter(|entity| entity.is_selected())
            .map(|entity| entity.identity())
            .collect();
        flagged
            .iter()
            .filter(|identity| !flagged.iter().any(|parent| parent.covers(identity)))
            .map(|identity| (*identity).clone())
            .collect()
    }
}
