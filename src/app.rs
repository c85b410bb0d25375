use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct UniviewApp {
    pub state: AppState,
}

impl UniviewApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for UniviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, now);
        });

        // ---- Left side panel: legend, total, top-10 ----
        egui::SidePanel::left("legend_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, now);
            });

        // ---- Central panel: scatter plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::ranking_plot(ui, &self.state);
        });

        // Keep repainting while the total is still counting up.
        if !self.state.total.finished(now) {
            ctx.request_repaint();
        }
    }
}
