use tracing::trace;

use crate::core::EntityIdentity;
use crate::interaction::{SelectionRequest, apply_selection_request};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Applies a renderer-reported selection change to the live model for
    /// immediate feedback.
    ///
    /// The next `update` captures these flags and reconciles them onto the
    /// rebuilt entities. Returns the identities selected afterwards.
    pub fn apply_selection(&mut self, request: &SelectionRequest) -> Vec<EntityIdentity> {
        let selected = apply_selection_request(&mut self.view_model, request);
        trace!(
            selected = selected.len(),
            has_selection = self.view_model.has_selection,
            "applied selection request"
        );
        selected
    }

    pub fn clear_selection(&mut self) {
        self.apply_selection(&SelectionRequest::Clear);
    }
}
