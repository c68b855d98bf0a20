use tracing::{debug, warn};

use crate::core::{DataTable, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::aggregator::aggregate;
use super::layout::compute_layout;
use super::validation::{validate_settings, validate_viewport};
use super::{ChartEngine, ChartSettings, SelectionSnapshot, ViewModel};

impl<R: Renderer> ChartEngine<R> {
    /// Full pass: aggregate `data`, carry over the live selection, lay out
    /// for `viewport`.
    ///
    /// Rejected data yields an invalid model and `Ok`; an invalid viewport is
    /// an `Err` and leaves the current model untouched.
    pub fn update(&mut self, data: DataTable, viewport: Viewport) -> ChartResult<()> {
        let snapshot = SelectionSnapshot::capture(&self.view_model);
        self.update_with_selection(data, viewport, &snapshot)
    }

    /// Same as [`Self::update`] but with a selection the host tracked itself.
    pub fn update_with_selection(
        &mut self,
        data: DataTable,
        viewport: Viewport,
        prior_selection: &SelectionSnapshot,
    ) -> ChartResult<()> {
        let viewport = validate_viewport(viewport)?;
        let previous_layout = self.view_model.layout.take();

        let mut view_model = aggregate(
            &data,
            &self.settings,
            prior_selection,
            self.colors.as_mut(),
            self.formatter.as_ref(),
        );
        self.viewport = viewport;
        self.data = Some(data);

        if view_model.is_valid {
            match compute_layout(
                &view_model,
                &self.settings,
                viewport,
                self.metrics.as_ref(),
                self.formatter.as_ref(),
                previous_layout.as_ref(),
            ) {
                Ok(layout) => view_model.layout = Some(layout),
                Err(err) => {
                    warn!(error = %err, "layout pass failed");
                    self.view_model = ViewModel::invalid(err.to_string());
                    return Err(err);
                }
            }
        }

        debug!(state = ?view_model.state(), "view model replaced");
        self.view_model = view_model;
        Ok(())
    }

    /// Reruns layout only; data and selection are untouched.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let viewport = validate_viewport(viewport)?;
        self.viewport = viewport;
        if !self.view_model.is_valid {
            return Ok(());
        }

        let layout = compute_layout(
            &self.view_model,
            &self.settings,
            viewport,
            self.metrics.as_ref(),
            self.formatter.as_ref(),
            self.view_model.layout.as_ref(),
        )?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "relaid out for resize"
        );
        self.view_model.layout = Some(layout);
        Ok(())
    }

    /// Replaces the settings and rebuilds from the last data table.
    pub fn set_settings(&mut self, settings: ChartSettings) -> ChartResult<()> {
        validate_settings(&settings)?;
        self.settings = settings;
        match self.data.take() {
            Some(data) => self.update(data, self.viewport),
            None => Ok(()),
        }
    }
}
