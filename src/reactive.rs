//! Observer registry linking controls to the renderers that depend on them.
//!
//! Each [`Renderer`] declares which controls it reads. When a control
//! changes, [`Dashboard::dispatch`] runs exactly the subscribed renderers,
//! synchronously and in registration order, against the latest values of
//! every control.

use serde::{Deserialize, Serialize};

use crate::chart::ChartSpec;
use crate::data::filter::FilterState;
use crate::data::model::LaunchDataset;

/// Input controls on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

/// Chart slots on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

/// A pure chart function bound to one output slot.
pub trait Renderer: Send + Sync {
    fn output(&self) -> OutputId;

    /// Controls whose changes trigger this renderer.
    fn dependencies(&self) -> &[ControlId];

    fn render(&self, dataset: &LaunchDataset, state: &FilterState) -> ChartSpec;
}

/// The registered renderers. Built once at startup, read-only afterwards.
#[derive(Default)]
pub struct Dashboard {
    renderers: Vec<Box<dyn Renderer>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, renderer: impl Renderer + 'static) -> &mut Self {
        log::debug!(
            "registering {:?} on {:?}",
            renderer.output(),
            renderer.dependencies()
        );
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Whether any renderer listens to `control`.
    pub fn is_subscribed(&self, control: ControlId) -> bool {
        self.renderers
            .iter()
            .any(|r| r.dependencies().contains(&control))
    }

    /// Render every output, as on first page load.
    pub fn initial(&self, dataset: &LaunchDataset, state: &FilterState) -> Vec<(OutputId, ChartSpec)> {
        self.renderers
            .iter()
            .map(|r| (r.output(), r.render(dataset, state)))
            .collect()
    }

    /// Run the renderers subscribed to `changed`.
    pub fn dispatch(
        &self,
        changed: ControlId,
        dataset: &LaunchDataset,
        state: &FilterState,
    ) -> Vec<(OutputId, ChartSpec)> {
        log::debug!("dispatching {changed:?} with {state:?}");
        self.renderers
            .iter()
            .filter(|r| r.dependencies().contains(&changed))
            .map(|r| (r.output(), r.render(dataset, state)))
            .collect()
    }
}
