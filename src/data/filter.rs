use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{LaunchDataset, LaunchRecord};

/// Wire value of the "all sites" option.
pub const ALL_SITES_VALUE: &str = "ALL";

// ---------------------------------------------------------------------------
// Filter predicate: site choice and payload window
// ---------------------------------------------------------------------------

/// Site Selector value: every site, or one concrete site identifier.
///
/// A concrete site that does not exist in the dataset is representable and
/// simply matches no rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        SiteSelection::from(value.to_string())
    }
}

impl From<SiteSelection> for String {
    fn from(sel: SiteSelection) -> Self {
        match sel {
            SiteSelection::All => ALL_SITES_VALUE.to_string(),
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES_VALUE}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

impl SiteSelection {
    /// Whether a record belongs to the selection.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

/// Inclusive payload window `[low, high]` in kilograms.
/// Serialised as a two-element array, the shape the range slider emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        PayloadRange { low, high }
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(r: PayloadRange) -> Self {
        [r.low, r.high]
    }
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload: f64) -> bool {
        payload >= self.low && payload <= self.high
    }
}

/// The current values of both controls. Rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl FilterState {
    /// "All sites" over the full payload bounds of the dataset.
    pub fn full(dataset: &LaunchDataset) -> Self {
        FilterState {
            site: SiteSelection::All,
            payload: PayloadRange::new(dataset.min_payload(), dataset.max_payload()),
        }
    }
}

/// Return indices of records at the selected site, ignoring payload.
pub fn site_indices(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of records passing both the site and payload filters.
pub fn filtered_indices(dataset: &LaunchDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            filters.site.matches(rec) && filters.payload.contains(rec.payload_mass_kg)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::example_dataset;

    #[test]
    fn test_site_selection_from_wire_value() {
        assert_eq!(SiteSelection::from("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from("siteA"),
            SiteSelection::Site("siteA".to_string())
        );
        assert_eq!(String::from(SiteSelection::All), "ALL");
    }

    #[test]
    fn test_filter_state_deserialises_from_control_values() {
        let state: FilterState =
            serde_json::from_str(r#"{"site": "ALL", "payload": [0, 1000]}"#).unwrap();
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload, PayloadRange::new(0.0, 1000.0));
    }

    #[test]
    fn test_site_indices() {
        let ds = example_dataset();
        assert_eq!(site_indices(&ds, &SiteSelection::All), vec![0, 1, 2]);
        assert_eq!(site_indices(&ds, &"siteA".into()), vec![0, 1]);
        assert!(site_indices(&ds, &"nowhere".into()).is_empty());
    }

    #[test]
    fn test_payload_bounds_are_inclusive() {
        let ds = example_dataset();
        let filters = FilterState {
            site: SiteSelection::All,
            payload: PayloadRange::new(500.0, 1500.0),
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);
    }

    #[test]
    fn test_full_range_keeps_every_row() {
        let ds = example_dataset();
        assert_eq!(filtered_indices(&ds, &FilterState::full(&ds)).len(), ds.len());
    }

    #[test]
    fn test_narrowing_never_adds_rows() {
        let ds = example_dataset();
        let mut previous = usize::MAX;
        for (low, high) in [(0.0, 3000.0), (400.0, 2500.0), (600.0, 2000.0), (1600.0, 1900.0)] {
            let filters = FilterState {
                site: SiteSelection::All,
                payload: PayloadRange::new(low, high),
            };
            let count = filtered_indices(&ds, &filters).len();
            assert!(count <= previous);
            previous = count;
        }
        assert_eq!(previous, 0);
    }
}
