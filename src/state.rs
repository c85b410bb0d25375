use crate::color::RegionPalette;
use crate::data::filter::{RegionFilter, total_students};
use crate::data::model::RankingDataset;
use crate::tween::Tween;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Duration of the total-students count-up animation, in seconds.
pub const TOTAL_ANIMATION_SECS: f64 = 1.5;

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<RankingDataset>,

    /// Selected regions; empty means "show all".
    pub filter: RegionFilter,

    /// Region → colour mapping for markers and legend swatches.
    pub palette: RegionPalette,

    /// Animated running total of students over the active subset.
    pub total: Tween,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filter: RegionFilter::new(),
            palette: RegionPalette::default(),
            total: Tween::new(TOTAL_ANIMATION_SECS),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset the filter, rebuild colours.
    pub fn set_dataset(&mut self, dataset: RankingDataset, now: f64) {
        self.palette = RegionPalette::new(&dataset.regions);
        self.filter.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.retarget_total(now);
    }

    /// Whether a legend entry (or its markers) shows at full opacity.
    pub fn is_region_active(&self, region: &str) -> bool {
        self.filter.is_empty() || self.filter.contains(region)
    }

    /// Toggle a region in the filter and restart the total animation.
    pub fn toggle_region(&mut self, region: &str, now: f64) {
        if !self.filter.remove(region) {
            self.filter.insert(region.to_string());
        }
        self.retarget_total(now);
    }

    /// Clear the filter (the "All" legend entry).  Idempotent.
    pub fn clear_filter(&mut self, now: f64) {
        self.filter.clear();
        self.retarget_total(now);
    }

    fn retarget_total(&mut self, now: f64) {
        if let Some(ds) = &self.dataset {
            self.total
                .retarget(now, total_students(ds, &self.filter) as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UniversityRecord;

    fn record(name: &str, rank: u32, students: u32, region: &str) -> UniversityRecord {
        UniversityRecord {
            name: name.to_string(),
            rank,
            students,
            region: region.to_string(),
            location: String::new(),
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(
            RankingDataset::from_records(vec![
                record("A", 1, 10_000, "Asia"),
                record("B", 2, 5_000, "Europe"),
            ]),
            0.0,
        );
        state
    }

    #[test]
    fn loading_a_dataset_targets_the_unrestricted_total() {
        let state = loaded_state();
        assert!(state.filter.is_empty());
        assert_eq!(state.total.target(), 15_000.0);
    }

    #[test]
    fn toggling_a_region_twice_restores_the_filter() {
        let mut state = loaded_state();
        let before = state.filter.clone();

        state.toggle_region("Asia", 1.0);
        assert!(state.filter.contains("Asia"));
        assert_eq!(state.total.target(), 10_000.0);

        state.toggle_region("Asia", 2.0);
        assert_eq!(state.filter, before);
        assert_eq!(state.total.target(), 15_000.0);
    }

    #[test]
    fn clear_filter_is_idempotent() {
        let mut state = loaded_state();
        state.toggle_region("Asia", 1.0);
        state.toggle_region("Europe", 2.0);

        state.clear_filter(3.0);
        assert!(state.filter.is_empty());
        state.clear_filter(4.0);
        assert!(state.filter.is_empty());
        assert_eq!(state.total.target(), 15_000.0);
    }

    #[test]
    fn empty_filter_marks_every_region_active() {
        let mut state = loaded_state();
        assert!(state.is_region_active("Asia"));
        assert!(state.is_region_active("Europe"));
        assert!(state.is_region_active("All"));

        state.toggle_region("Asia", 1.0);
        assert!(state.is_region_active("Asia"));
        assert!(!state.is_region_active("Europe"));
        assert!(!state.is_region_active("All"));
    }

    #[test]
    fn filtering_to_an_absent_region_targets_zero() {
        let mut state = loaded_state();
        state.toggle_region("North America", 1.0);
        assert_eq!(state.total.target(), 0.0);
    }
}
