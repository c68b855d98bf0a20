use serde::{Deserialize, Serialize};

use crate::api::ViewModel;
use crate::core::EntityIdentity;

/// Selection change reported by the renderer after a click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionRequest {
    /// Plain click replaces the selection; `multi` (ctrl-click) toggles
    /// `identity` in and out of it.
    Select {
        identity: EntityIdentity,
        multi: bool,
    },
    Clear,
}

impl SelectionRequest {
    #[must_use]
    pub fn select(identity: EntityIdentity) -> Self {
        Self::Select {
            identity,
            multi: false,
        }
    }

    #[must_use]
    pub fn toggle(identity: EntityIdentity) -> Self {
        Self::Select {
            identity,
            multi: true,
        }
    }
}

/// Resolves `request` against the current selection and writes the result
/// onto `view_model` as display flags.
///
/// Clicking the only selected entity again clears the selection. Returns the
/// identities that are selected afterwards; hosts persist these and feed
/// them back as the prior selection of the next rebuild.
pub fn apply_selection_request(
    view_model: &mut ViewModel,
    request: &SelectionRequest,
) -> Vec<EntityIdentity> {
    let mut selected = view_model.selected_identities();

    let next = match request {
        SelectionRequest::Clear => Vec::new(),
        SelectionRequest::Select {
            identity,
            multi: true,
        } => {
            if let Some(position) = selected.iter().position(|entry| entry == identity) {
                selected.remove(position);
            } else {
                selected.push(identity.clone());
            }
            selected
        }
        SelectionRequest::Select {
            identity,
            multi: false,
        } => {
            if selected.len() == 1 && selected[0] == *identity {
                Vec::new()
            } else {
                vec![identity.clone()]
            }
        }
    };

    view_model.apply_selected_identities(&next);
    next
}
