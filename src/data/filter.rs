use std::collections::BTreeSet;

use super::model::{RankingDataset, UniversityRecord};

// ---------------------------------------------------------------------------
// Region filter: which region labels are selected
// ---------------------------------------------------------------------------

/// Selected region labels. An empty set means "no filter, show all" and is
/// distinct from selecting every region individually: both display the full
/// dataset, but a non-empty set dims the regions it excludes.
pub type RegionFilter = BTreeSet<String>;

/// A record is active when no filter is set or its region is selected.
pub fn is_active(record: &UniversityRecord, filter: &RegionFilter) -> bool {
    filter.is_empty() || filter.contains(&record.region)
}

/// Indices of records passing the current filter.
pub fn active_indices(dataset: &RankingDataset, filter: &RegionFilter) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| is_active(r, filter))
        .map(|(i, _)| i)
        .collect()
}

/// Sum of student counts over active records.
pub fn total_students(dataset: &RankingDataset, filter: &RegionFilter) -> u64 {
    dataset
        .records
        .iter()
        .filter(|r| is_active(r, filter))
        .map(|r| r.students as u64)
        .sum()
}

/// The `n` best-ranked active records, ascending by rank.
pub fn top_ranked<'a>(
    dataset: &'a RankingDataset,
    filter: &RegionFilter,
    n: usize,
) -> Vec<&'a UniversityRecord> {
    let mut active: Vec<&UniversityRecord> = dataset
        .records
        .iter()
        .filter(|r| is_active(r, filter))
        .collect();
    active.sort_by_key(|r| r.rank);
    active.truncate(n);
    active
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

    fn sample() -> RankingDataset {
        RankingDataset::from_records(vec![
            record("A", 1, 10_000, "Asia"),
            record("B", 2, 5_000, "Europe"),
        ])
    }

    fn regions(labels: &[&str]) -> RegionFilter {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_filter_shows_everything() {
        let ds = sample();
        let filter = RegionFilter::new();
        assert_eq!(active_indices(&ds, &filter), vec![0, 1]);
        assert_eq!(total_students(&ds, &filter), 15_000);
        let top: Vec<&str> = top_ranked(&ds, &filter, 10)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(top, vec!["A", "B"]);
    }

    #[test]
    fn single_region_filter_isolates_that_region() {
        let ds = sample();
        let filter = regions(&["Asia"]);
        assert_eq!(active_indices(&ds, &filter), vec![0]);
        assert_eq!(total_students(&ds, &filter), 10_000);
        let top = top_ranked(&ds, &filter, 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "A");
        assert_eq!(top[0].rank, 1);
    }

    #[test]
    fn region_with_no_records_yields_empty_results() {
        let ds = sample();
        let filter = regions(&["North America"]);
        assert!(active_indices(&ds, &filter).is_empty());
        assert_eq!(total_students(&ds, &filter), 0);
        assert!(top_ranked(&ds, &filter, 10).is_empty());
    }

    #[test]
    fn all_regions_selected_equals_unrestricted_total() {
        let ds = sample();
        let every = regions(&["Asia", "Europe", "North America"]);
        assert_eq!(
            total_students(&ds, &every),
            total_students(&ds, &RegionFilter::new())
        );
    }

    #[test]
    fn top_list_is_capped_and_sorted_by_rank() {
        let records: Vec<UniversityRecord> = (1..=25)
            .rev()
            .map(|i| record(&format!("U{i}"), i, 100, "Asia"))
            .collect();
        let ds = RankingDataset::from_records(records);
        let filter = RegionFilter::new();

        let top = top_ranked(&ds, &filter, 10);
        assert_eq!(top.len(), 10);
        let ranks: Vec<u32> = top.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn top_list_shorter_than_cap_is_not_padded() {
        let ds = sample();
        assert_eq!(top_ranked(&ds, &RegionFilter::new(), 10).len(), 2);
    }
}
