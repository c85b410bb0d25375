use eframe::egui::{self, RichText, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::color::RegionPalette;
use crate::data::filter::is_active;
use crate::data::model::{RankingDataset, UniversityRecord, format_grouped};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Ranking scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Fixed axis domains; the chart does not derive them from the data.
const X_MAX: f64 = 100.0;
const Y_MAX: f64 = 80_000.0;

/// Marker radius in points.
const MARKER_RADIUS: f32 = 5.0;

/// Pointer must be within this distance of a marker to hover it, as a
/// fraction of the currently visible plot bounds.
const HOVER_RADIUS: f64 = 0.02;

/// Render the rank-vs-students scatter in the central panel.
pub fn ranking_plot(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a ranking file to view universities  (File → Open…)");
            });
            return;
        }
    };

    let response = Plot::new("ranking_plot")
        .x_axis_label("University Rank")
        .y_axis_label("Number of Students")
        .include_x(0.0)
        .include_x(X_MAX)
        .include_y(0.0)
        .include_y(Y_MAX)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Every record is drawn: the filter dims, it never removes.
            // One series per region and emphasis level keeps colours stable.
            for region in &dataset.regions {
                let color = state.palette.color_for(region);

                let mut bright: Vec<[f64; 2]> = Vec::new();
                let mut dim: Vec<[f64; 2]> = Vec::new();
                for rec in dataset.records.iter().filter(|r| &r.region == region) {
                    let point = [rec.rank as f64, rec.students as f64];
                    if is_active(rec, &state.filter) {
                        bright.push(point);
                    } else {
                        dim.push(point);
                    }
                }

                if !bright.is_empty() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(bright))
                            .color(color)
                            .radius(MARKER_RADIUS)
                            .filled(true)
                            .name(region),
                    );
                }
                if !dim.is_empty() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(dim))
                            .color(RegionPalette::dimmed(color))
                            .radius(MARKER_RADIUS)
                            .filled(true),
                    );
                }
            }

            hovered_record(plot_ui, dataset)
        });

    if let Some(rec) = response.inner {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            response.response.layer_id,
            egui::Id::new("marker_tooltip"),
            |ui| {
                ui.label(RichText::new(&rec.name).strong());
                ui.label(format!("Rank: {}", rec.rank));
                ui.label(format!("Students: {}", format_grouped(rec.students as u64)));
                ui.label(format!("Location: {}", rec.location));
            },
        );
    }
}

/// Nearest marker to the pointer within [`HOVER_RADIUS`].  Dimmed markers
/// are just as hoverable as active ones.
fn hovered_record<'a>(
    plot_ui: &egui_plot::PlotUi,
    dataset: &'a RankingDataset,
) -> Option<&'a UniversityRecord> {
    let pointer = plot_ui.pointer_coordinate()?;
    // Normalize by the visible bounds, not the fixed domains, so the hover
    // area tracks the markers when zoomed in.
    let bounds = plot_ui.plot_bounds();
    nearest_record(
        dataset,
        [pointer.x, pointer.y],
        [bounds.width(), bounds.height()],
    )
}

/// Nearest record to `pointer` within [`HOVER_RADIUS`], with distances
/// measured relative to the visible span on each axis.
fn nearest_record<'a>(
    dataset: &'a RankingDataset,
    pointer: [f64; 2],
    span: [f64; 2],
) -> Option<&'a UniversityRecord> {
    let x_span = span[0].max(f64::EPSILON);
    let y_span = span[1].max(f64::EPSILON);

    let mut best: Option<(&UniversityRecord, f64)> = None;
    for rec in &dataset.records {
        let dx = (rec.rank as f64 - pointer[0]) / x_span;
        let dy = (rec.students as f64 - pointer[1]) / y_span;
        let dist_sq = dx * dx + dy * dy;
        if best.map_or(true, |(_, b)| dist_sq < b) {
            best = Some((rec, dist_sq));
        }
    }

    best.and_then(|(rec, dist_sq)| (dist_sq.sqrt() <= HOVER_RADIUS).then_some(rec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UniversityRecord;

    fn dataset() -> RankingDataset {
        RankingDataset::from_records(vec![UniversityRecord {
            name: "A".to_string(),
            rank: 50,
            students: 40_000,
            region: "Asia".to_string(),
            location: String::new(),
        }])
    }

    #[test]
    fn pointer_near_a_marker_hovers_it() {
        let ds = dataset();
        let hit = nearest_record(&ds, [51.0, 40_000.0], [X_MAX, Y_MAX]);
        assert_eq!(hit.map(|r| r.name.as_str()), Some("A"));
    }

    #[test]
    fn pointer_far_from_every_marker_hovers_nothing() {
        let ds = dataset();
        assert!(nearest_record(&ds, [10.0, 5_000.0], [X_MAX, Y_MAX]).is_none());
    }

    #[test]
    fn hover_radius_shrinks_with_the_visible_span() {
        let ds = dataset();
        // One rank away is a hit over the full domain but a miss when the
        // view is zoomed to a 5×4000 window.
        let pointer = [51.0, 40_000.0];
        assert!(nearest_record(&ds, pointer, [X_MAX, Y_MAX]).is_some());
        assert!(nearest_record(&ds, pointer, [5.0, 4_000.0]).is_none());
    }

    #[test]
    fn degenerate_span_does_not_divide_by_zero() {
        let ds = dataset();
        assert!(nearest_record(&ds, [50.0, 40_000.0], [0.0, 0.0]).is_some());
    }
}
