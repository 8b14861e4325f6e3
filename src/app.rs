use std::sync::Arc;

use eframe::egui;

use crate::config::AppConfig;
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{panels, plot, table};
use crate::view::table::Pager;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// The dashboard for one user. Cheap to create per user: the dataset is
/// shared, the rest of the state is owned.
pub struct TweetExplorerApp {
    pub state: AppState,
}

impl TweetExplorerApp {
    pub fn new(dataset: Arc<Dataset>, config: &AppConfig) -> Self {
        let mut state = AppState::new(dataset);
        state.pager = Pager::new(config.page_size);
        Self { state }
    }
}

impl eframe::App for TweetExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: filter controls ----
        egui::TopBottomPanel::top("controls_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            panels::controls_bar(ui, &mut self.state);
            ui.add_space(6.0);
        });

        // ---- Bottom panel: selected posts ----
        egui::TopBottomPanel::bottom("posts_panel")
            .resizable(true)
            .default_height(320.0)
            .min_height(120.0)
            .show(ctx, |ui| {
                table::posts_table(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::plot_toolbar(ui, &mut self.state);
            plot::embedding_plot(ui, &mut self.state);
        });
    }
}
