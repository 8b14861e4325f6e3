use eframe::egui::{self, RichText, Ui};

use crate::data::filter::{ScoreRange, SCORE_STEP, SENTIMENT_BOUNDS, SUBJECTIVITY_BOUNDS};
use crate::state::AppState;
use crate::view::scatter::SelectTool;

// ---------------------------------------------------------------------------
// Top panel – filter controls
// ---------------------------------------------------------------------------

/// Render the month selector and both score range selectors.
pub fn controls_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.strong("Month");
        let months = state.dataset.months().to_vec();
        let current = state.criteria().month.clone();
        egui::ComboBox::from_id_salt("month_select")
            .selected_text(if current.is_empty() { "—" } else { current.as_str() })
            .width(150.0)
            .show_ui(ui, |ui: &mut Ui| {
                for month in &months {
                    if ui.selectable_label(current == *month, month).clicked() {
                        state.set_month(month);
                    }
                }
            });

        ui.add_space(30.0);
        let sentiment = state.criteria().sentiment;
        if let Some(range) = range_selector(ui, "Sentiment Score", sentiment, SENTIMENT_BOUNDS) {
            state.set_sentiment_range(range);
        }

        ui.add_space(30.0);
        let subjectivity = state.criteria().subjectivity;
        if let Some(range) =
            range_selector(ui, "Subjectivity Score", subjectivity, SUBJECTIVITY_BOUNDS)
        {
            state.set_subjectivity_range(range);
        }
    });
}

/// Two linked sliders behaving like one range slider: dragging one handle
/// past the other pushes it along, so `low <= high` always holds.
fn range_selector(
    ui: &mut Ui,
    label: &str,
    current: ScoreRange,
    bounds: ScoreRange,
) -> Option<ScoreRange> {
    let mut low = current.low;
    let mut high = current.high;
    let mut low_changed = false;
    let mut high_changed = false;

    ui.vertical(|ui: &mut Ui| {
        ui.strong(label);
        ui.horizontal(|ui: &mut Ui| {
            low_changed = ui
                .add(
                    egui::Slider::new(&mut low, bounds.low..=bounds.high)
                        .step_by(SCORE_STEP)
                        .fixed_decimals(2)
                        .text("min"),
                )
                .changed();
            high_changed = ui
                .add(
                    egui::Slider::new(&mut high, bounds.low..=bounds.high)
                        .step_by(SCORE_STEP)
                        .fixed_decimals(2)
                        .text("max"),
                )
                .changed();
        });
    });

    if !(low_changed || high_changed) {
        return None;
    }
    if low > high {
        if low_changed {
            high = low;
        } else {
            low = high;
        }
    }
    Some(ScoreRange::new(low, high))
}

// ---------------------------------------------------------------------------
// Plot toolbar and status
// ---------------------------------------------------------------------------

/// Selection tool buttons, the clear button and the status line.
pub fn plot_toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tool in [SelectTool::Lasso, SelectTool::Box] {
            ui.selectable_value(&mut state.tool, tool, tool.label());
        }
        ui.separator();
        if ui
            .add_enabled(state.selection().is_some(), egui::Button::new("Clear selection"))
            .clicked()
        {
            state.clear_selection();
        }
        ui.separator();
        ui.label(RichText::new(state.status_line()).weak());
    });
}
