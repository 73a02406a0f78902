use serde::Serialize;

use crate::data::filter::{FilterState, PayloadRange, SiteSelection, ALL_SITES_VALUE};
use crate::data::model::LaunchDataset;

/// Label of the "all sites" option.
pub const ALL_SITES_LABEL: &str = "All Sites";

/// Range slider step in kilograms.
pub const PAYLOAD_STEP: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Site Selector
// ---------------------------------------------------------------------------

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Single-choice dropdown: "All Sites" followed by every known site.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSelector {
    pub options: Vec<SelectOption>,
    pub value: String,
    pub placeholder: &'static str,
    pub searchable: bool,
}

impl SiteSelector {
    pub fn new(dataset: &LaunchDataset) -> Self {
        let options = std::iter::once(SelectOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES_VALUE.to_string(),
        })
        .chain(dataset.distinct_sites().iter().map(|site| SelectOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect();

        SiteSelector {
            options,
            value: ALL_SITES_VALUE.to_string(),
            placeholder: "Select a Launch Site",
            searchable: true,
        }
    }

    pub fn default_selection(&self) -> SiteSelection {
        SiteSelection::from(self.value.as_str())
    }

    /// Whether the selection is one of the offered options.
    pub fn offers(&self, selection: &SiteSelection) -> bool {
        let wire = selection.to_string();
        self.options.iter().any(|o| o.value == wire)
    }
}

// ---------------------------------------------------------------------------
// Payload Range Selector
// ---------------------------------------------------------------------------

/// Labelled tick on the range slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

/// Dual-handle slider bounded by the dataset's payload extrema.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadRangeSelector {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: PayloadRange,
}

impl PayloadRangeSelector {
    pub fn new(dataset: &LaunchDataset) -> Self {
        let (min, max) = (dataset.min_payload(), dataset.max_payload());
        PayloadRangeSelector {
            min,
            max,
            step: PAYLOAD_STEP,
            marks: vec![
                SliderMark {
                    value: min,
                    label: min.to_string(),
                },
                SliderMark {
                    value: max,
                    label: max.to_string(),
                },
            ],
            value: PayloadRange::new(min, max),
        }
    }

    /// Bring a raw slider value inside `[min, max]` with `low <= high`.
    pub fn constrain(&self, range: PayloadRange) -> PayloadRange {
        let clamp = |v: f64, fallback: f64| {
            if v.is_nan() {
                fallback
            } else {
                v.clamp(self.min, self.max)
            }
        };
        let low = clamp(range.low, self.min);
        let high = clamp(range.high, self.max);
        if low <= high {
            PayloadRange::new(low, high)
        } else {
            PayloadRange::new(high, low)
        }
    }
}

// ---------------------------------------------------------------------------
// Control panel
// ---------------------------------------------------------------------------

/// Both controls, configured once from the Data Store.
#[derive(Debug, Clone, Serialize)]
pub struct ControlPanel {
    pub site: SiteSelector,
    pub payload: PayloadRangeSelector,
}

impl ControlPanel {
    pub fn new(dataset: &LaunchDataset) -> Self {
        ControlPanel {
            site: SiteSelector::new(dataset),
            payload: PayloadRangeSelector::new(dataset),
        }
    }

    /// Control values before any interaction.
    pub fn default_state(&self) -> FilterState {
        FilterState {
            site: self.site.default_selection(),
            payload: self.payload.value,
        }
    }

    /// Apply the slider's own constraints to an incoming state. The site is
    /// passed through untouched; unknown sites just match nothing.
    pub fn constrain(&self, state: FilterState) -> FilterState {
        if !self.site.offers(&state.site) {
            log::warn!("site '{}' is not one of the dropdown options", state.site);
        }
        FilterState {
            site: state.site,
            payload: self.payload.constrain(state.payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::example_dataset;

    #[test]
    fn test_site_options() {
        let panel = ControlPanel::new(&example_dataset());
        let values: Vec<&str> = panel.site.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["ALL", "siteA", "siteB"]);
        assert_eq!(panel.site.options[0].label, "All Sites");
        assert_eq!(panel.site.default_selection(), SiteSelection::All);
    }

    #[test]
    fn test_slider_configuration() {
        let panel = ControlPanel::new(&example_dataset());
        assert_eq!(panel.payload.min, 500.0);
        assert_eq!(panel.payload.max, 2000.0);
        assert_eq!(panel.payload.step, 1000.0);
        assert_eq!(panel.payload.marks.len(), 2);
        assert_eq!(panel.payload.marks[1].label, "2000");
        assert_eq!(panel.default_state().payload, PayloadRange::new(500.0, 2000.0));
    }

    #[test]
    fn test_constrain_clamps_and_orders() {
        let slider = PayloadRangeSelector::new(&example_dataset());
        assert_eq!(
            slider.constrain(PayloadRange::new(-10.0, 99999.0)),
            PayloadRange::new(500.0, 2000.0)
        );
        assert_eq!(
            slider.constrain(PayloadRange::new(1800.0, 900.0)),
            PayloadRange::new(900.0, 1800.0)
        );
        assert_eq!(
            slider.constrain(PayloadRange::new(f64::NAN, 1000.0)),
            PayloadRange::new(500.0, 1000.0)
        );
    }

    #[test]
    fn test_unknown_site_is_kept() {
        let panel = ControlPanel::new(&example_dataset());
        let state = panel.constrain(FilterState {
            site: "nowhere".into(),
            payload: PayloadRange::new(0.0, 5000.0),
        });
        assert!(!panel.site.offers(&state.site));
        assert_eq!(state.site, SiteSelection::Site("nowhere".to_string()));
    }
}
