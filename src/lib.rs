//! Interactive explorer for a processed social-media dataset: filter posts by
//! month and score ranges, lasso points on the 2-D embedding, and read the
//! selected posts in a paginated table.
//!
//! The binary loads the dataset and calls [`run`]. A host process can do the
//! same, or build a [`TweetExplorerApp`] per user over one shared
//! [`Dataset`](data::model::Dataset) and drive it with its own eframe setup.

pub mod app;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
pub mod view;

use std::sync::Arc;

use eframe::egui;

pub use app::TweetExplorerApp;
pub use config::AppConfig;

/// Open the dashboard window over an already loaded dataset. Blocks until
/// the window closes.
pub fn run(config: AppConfig, dataset: Arc<data::model::Dataset>) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(TweetExplorerApp::new(dataset, &config)))),
    )
}
