use std::path::Path;

use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, Sense, Ui, vec2};

use crate::color::RegionPalette;
use crate::data::filter::{active_indices, top_ranked};
use crate::data::model::format_grouped;
use crate::state::AppState;

/// Number of entries in the ranked list.
const TOP_LIST_LEN: usize = 10;

/// Swatch colour of the synthetic "All" legend entry.
const ALL_SWATCH: Color32 = Color32::BLACK;

// ---------------------------------------------------------------------------
// Left side panel – legend, animated total, top-10 list
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, now: f64) {
    ui.heading("Regions");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the legend order so we can mutate state inside the loop.
    let regions = dataset.regions.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Legend: one entry per region, plus "All" ----
            for region in &regions {
                let color = state.palette.color_for(region);
                if legend_entry(ui, region, color, state.is_region_active(region)) {
                    state.toggle_region(region, now);
                }
            }
            if legend_entry(ui, "All", ALL_SWATCH, state.is_region_active("All")) {
                state.clear_filter(now);
            }

            ui.separator();

            // ---- Animated running total ----
            ui.strong("Total students");
            let shown = state.total.value_at(now).round().max(0.0) as u64;
            ui.label(RichText::new(format_grouped(shown)).size(28.0).strong());

            ui.separator();

            // ---- Top-10 ranked list ----
            ui.strong(format!("Top {TOP_LIST_LEN}"));
            if let Some(dataset) = &state.dataset {
                for rec in top_ranked(dataset, &state.filter, TOP_LIST_LEN) {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label(&rec.name);
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                            ui.label(RichText::new(format!("WR: {}", rec.rank)).weak());
                        });
                    });
                }
            }
        });
}

/// A clickable legend row: colour swatch plus label.  Returns true on click.
/// Inactive entries dim the swatch and weaken the label, mirroring marker
/// opacity.
fn legend_entry(ui: &mut Ui, label: &str, color: Color32, active: bool) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui: &mut Ui| {
        let swatch = if active {
            color
        } else {
            RegionPalette::dimmed(color)
        };
        let (rect, swatch_resp) = ui.allocate_exact_size(vec2(16.0, 16.0), Sense::click());
        ui.painter().rect_filled(rect, 3.0, swatch);

        let mut text = RichText::new(label);
        if !active {
            text = text.weak();
        }
        let label_resp = ui.add(egui::Label::new(text).sense(Sense::click()));

        clicked = swatch_resp.clicked() || label_resp.clicked();
    });
    clicked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, now: f64) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, now);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} universities loaded, {} active",
                ds.len(),
                active_indices(ds, &state.filter).len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, now: f64) {
    let file = rfd::FileDialog::new()
        .set_title("Open ranking data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_dataset(state, &path, now);
    }
}

/// Load a dataset into the app state, reporting failures in the top bar.
pub fn load_dataset(state: &mut AppState, path: &Path, now: f64) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} universities across {} regions",
                dataset.len(),
                dataset.regions.len()
            );
            state.set_dataset(dataset, now);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
