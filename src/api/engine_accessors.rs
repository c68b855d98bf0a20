use crate::core::{DataTable, Viewport};
use crate::render::Renderer;

use super::view_model::{Selectable, ViewModelState};
use super::{ChartEngine, ChartSettings, ViewModel};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    #[must_use]
    pub fn state(&self) -> ViewModelState {
        self.view_model.state()
    }

    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last data table passed to an update, valid or not.
    #[must_use]
    pub fn data(&self) -> Option<&DataTable> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn selectable_entities(&self) -> Vec<&dyn Selectable> {
        self.view_model.selectable_entities()
    }

    #[must_use]
    pub fn should_dim(&self, entity: &dyn Selectable) -> bool {
        self.view_model.should_dim(entity)
    }

    #[must_use]
    pub fn should_emphasize(&self, entity: &dyn Selectable) -> bool {
        self.view_model.should_emphasize(entity)
    }
}
