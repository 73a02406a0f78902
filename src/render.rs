//! The two chart renderers. Both are pure functions of the dataset and the
//! current control values.

use crate::chart::{Axis, ChartSpec, Layout, Legend, Marker, ScatterTrace, Title, Trace};
use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, site_indices, FilterState, SiteSelection};
use crate::data::model::{LaunchDataset, OutcomeClass, COL_BOOSTER_CATEGORY, COL_PAYLOAD_MASS};
use crate::reactive::{ControlId, OutputId, Renderer};

/// Y-axis label of the correlation chart.
const OUTCOME_AXIS_LABEL: &str = "Launch Outcome";

const CORRELATION_TITLE: &str = "Payload vs. Outcome for selected site(s)";

// ---------------------------------------------------------------------------
// Proportion renderer
// ---------------------------------------------------------------------------

/// Failure/success counts for the selected site as a pie chart.
pub fn proportion_chart(dataset: &LaunchDataset, site: &SiteSelection) -> ChartSpec {
    let title = match site {
        SiteSelection::All => "Total Success vs Failed launches for all sites".to_string(),
        SiteSelection::Site(name) => format!("Success vs Failed launches for site {name}"),
    };

    let records = dataset.records();
    let (mut failed, mut success) = (0, 0);
    for idx in site_indices(dataset, site) {
        match records[idx].class {
            OutcomeClass::Failure => failed += 1,
            OutcomeClass::Success => success += 1,
        }
    }

    ChartSpec::pie(
        title,
        vec![
            (OutcomeClass::Failure.label().to_string(), failed),
            (OutcomeClass::Success.label().to_string(), success),
        ],
    )
}

/// Subscribes to the site dropdown only.
pub struct ProportionRenderer;

impl Renderer for ProportionRenderer {
    fn output(&self) -> OutputId {
        OutputId::SuccessPieChart
    }

    fn dependencies(&self) -> &[ControlId] {
        &[ControlId::SiteDropdown]
    }

    fn render(&self, dataset: &LaunchDataset, state: &FilterState) -> ChartSpec {
        proportion_chart(dataset, &state.site)
    }
}

// ---------------------------------------------------------------------------
// Correlation renderer
// ---------------------------------------------------------------------------

/// Payload against outcome for rows passing both filters, one trace per
/// booster category in order of first appearance. No matching rows gives a
/// chart without traces.
pub fn correlation_chart(
    dataset: &LaunchDataset,
    colors: &ColorMap,
    state: &FilterState,
) -> ChartSpec {
    let records = dataset.records();
    let mut traces: Vec<ScatterTrace> = Vec::new();

    for idx in filtered_indices(dataset, state) {
        let rec = &records[idx];
        let pos = match traces.iter().position(|t| t.name == rec.booster_category) {
            Some(pos) => pos,
            None => {
                traces.push(ScatterTrace {
                    name: rec.booster_category.clone(),
                    legendgroup: rec.booster_category.clone(),
                    mode: "markers",
                    x: Vec::new(),
                    y: Vec::new(),
                    marker: Marker {
                        color: colors.color_for(&rec.booster_category).to_string(),
                    },
                });
                traces.len() - 1
            }
        };
        traces[pos].x.push(rec.payload_mass_kg);
        traces[pos].y.push(rec.class.value());
    }

    ChartSpec {
        data: traces.into_iter().map(Trace::Scatter).collect(),
        layout: Layout {
            title: Title::new(CORRELATION_TITLE),
            xaxis: Some(Axis {
                title: Title::new(COL_PAYLOAD_MASS),
            }),
            yaxis: Some(Axis {
                title: Title::new(OUTCOME_AXIS_LABEL),
            }),
            legend: Some(Legend {
                title: Title::new(COL_BOOSTER_CATEGORY),
            }),
        },
    }
}

/// Subscribes to both controls. Owns the booster colour assignment so
/// colours stay stable between renders.
pub struct CorrelationRenderer {
    colors: ColorMap,
}

impl CorrelationRenderer {
    pub fn new(dataset: &LaunchDataset) -> Self {
        CorrelationRenderer {
            colors: ColorMap::new(dataset.distinct_boosters()),
        }
    }
}

impl Renderer for CorrelationRenderer {
    fn output(&self) -> OutputId {
        OutputId::SuccessPayloadScatterChart
    }

    fn dependencies(&self) -> &[ControlId] {
        &[ControlId::SiteDropdown, ControlId::PayloadSlider]
    }

    fn render(&self, dataset: &LaunchDataset, state: &FilterState) -> ChartSpec {
        correlation_chart(dataset, &self.colors, state)
    }
}
