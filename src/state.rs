use std::collections::BTreeMap;

use crate::chart::ChartSpec;
use crate::controls::ControlPanel;
use crate::data::filter::FilterState;
use crate::data::model::LaunchDataset;
use crate::reactive::{ControlId, Dashboard, OutputId};
use crate::render::{CorrelationRenderer, ProportionRenderer};

// ---------------------------------------------------------------------------
// Application context
// ---------------------------------------------------------------------------

/// Everything the dashboard needs, built once at startup and shared
/// read-only between requests. Control values are not stored here: every
/// update carries the full current state from the page.
pub struct AppContext {
    pub dataset: LaunchDataset,
    pub controls: ControlPanel,
    pub dashboard: Dashboard,
}

impl AppContext {
    /// Configure the controls from the dataset and register both renderers.
    pub fn new(dataset: LaunchDataset) -> Self {
        let controls = ControlPanel::new(&dataset);
        let mut dashboard = Dashboard::new();
        dashboard
            .register(ProportionRenderer)
            .register(CorrelationRenderer::new(&dataset));

        Self {
            dataset,
            controls,
            dashboard,
        }
    }

    /// Render the outputs affected by a control change. With no changed
    /// control every output is rendered.
    pub fn update(
        &self,
        changed: Option<ControlId>,
        state: FilterState,
    ) -> BTreeMap<OutputId, ChartSpec> {
        let state = self.controls.constrain(state);
        let results = match changed {
            Some(control) => {
                if !self.dashboard.is_subscribed(control) {
                    log::debug!("no renderer listens to {control:?}");
                }
                self.dashboard.dispatch(control, &self.dataset, &state)
            }
            None => self.dashboard.initial(&self.dataset, &state),
        };
        for (output, chart) in &results {
            log::debug!(
                "{output:?}: '{}' with {} traces, {} points, segments {:?}",
                chart.title(),
                chart.data.len(),
                chart.point_count(),
                chart.segments()
            );
        }
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{PayloadRange, SiteSelection};
    use crate::data::model::tests::example_dataset;

    #[test]
    fn test_initial_update_uses_defaults() {
        let ctx = AppContext::new(example_dataset());
        let charts = ctx.update(None, ctx.controls.default_state());

        let pie = &charts[&OutputId::SuccessPieChart];
        assert_eq!(pie.segments(), vec![("Failed", 1), ("Success", 2)]);

        let scatter = &charts[&OutputId::SuccessPayloadScatterChart];
        assert_eq!(scatter.point_count(), 3);
    }

    #[test]
    fn test_update_constrains_slider_values() {
        let ctx = AppContext::new(example_dataset());
        let charts = ctx.update(
            Some(ControlId::PayloadSlider),
            FilterState {
                site: SiteSelection::All,
                payload: PayloadRange::new(1e9, -1e9),
            },
        );
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[&OutputId::SuccessPayloadScatterChart].point_count(), 3);
    }

    #[test]
    fn test_unknown_site_renders_empty_charts() {
        let ctx = AppContext::new(example_dataset());
        let charts = ctx.update(
            Some(ControlId::SiteDropdown),
            FilterState {
                site: "nowhere".into(),
                payload: PayloadRange::new(500.0, 2000.0),
            },
        );
        assert_eq!(
            charts[&OutputId::SuccessPieChart].segments(),
            vec![("Failed", 0), ("Success", 0)]
        );
        assert_eq!(charts[&OutputId::SuccessPayloadScatterChart].point_count(), 0);
    }
}
