use indexmap::IndexSet;
use tracing::trace;

use crate::core::EntityIdentity;

use super::ViewModel;

/// Selection state captured from the previous view model before a rebuild.
///
/// Freshly built entities carry no selection; `reconcile` copies it back by
/// identity equality, so the flags survive even though every entity is a new
/// allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    selected: IndexSet<EntityIdentity>,
    entity_count: usize,
}

impl SelectionSnapshot {
    /// Snapshots the selection of every selectable entity of `view_model`.
    ///
    /// Points selected through their category or series are implied by the
    /// captured parent and not stored twice.
    #[must_use]
    pub fn capture(view_model: &ViewModel) -> Self {
        Self {
            selected: view_model.selected_identities().into_iter().collect(),
            entity_count: view_model.selectable_entities().len(),
        }
    }

    /// Builds a snapshot from identities the host reports as selected.
    #[must_use]
    pub fn from_identities(identities: impl IntoIterator<Item = EntityIdentity>) -> Self {
        let selected: IndexSet<EntityIdentity> = identities.into_iter().collect();
        let entity_count = selected.len();
        Self {
            selected,
            entity_count,
        }
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// True for captured identities and for data points whose category or
    /// series was captured.
    #[must_use]
    pub fn is_selected(&self, identity: &EntityIdentity) -> bool {
        self.selected.contains(identity)
            || self.selected.iter().any(|parent| parent.covers(identity))
    }

    #[must_use]
    pub fn selected(&self) -> &IndexSet<EntityIdentity> {
        &self.selected
    }

    /// Number of selectable entities seen when the snapshot was taken.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    /// Applies the snapshot to a freshly built view model.
    ///
    /// `has_selection` comes from the snapshot, not from the matches, so
    /// dimming is already right in the pass that emits the new entities.
    /// Returns the number of entities that came out selected.
    pub fn reconcile(&self, view_model: &mut ViewModel) -> usize {
        let mut carried = 0;
        for category in &mut view_model.categories {
            category.selected = self.is_selected(&category.identity);
            carried += usize::from(category.selected);
            for group in &mut category.groups {
                group.selected = self.is_selected(&group.identity);
                carried += usize::from(group.selected);
            }
        }
        for group in &mut view_model.groups {
            group.selected = self.is_selected(&group.identity);
            carried += usize::from(group.selected);
        }
        view_model.has_selection = self.has_selection();

        trace!(
            snapshot_selected = self.selected.len(),
            carried, "reconciled selection"
        );
        carried
    }
}
