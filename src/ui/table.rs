use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::columns;
use crate::state::AppState;
use crate::view::table::page_texts;

const MIN_ROW_HEIGHT: f32 = 28.0;
const ROW_PADDING: f32 = 12.0;

// ---------------------------------------------------------------------------
// Selected posts table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the text of the selected posts, one page at a time.
pub fn posts_table(ui: &mut Ui, state: &mut AppState) {
    // Own the page's text so the pager can be mutated below.
    let (texts, total): (Vec<String>, usize) = {
        let rows = state.table_rows();
        let texts = page_texts(&state.pager, &rows)
            .into_iter()
            .map(str::to_owned)
            .collect();
        (texts, rows.len())
    };

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.pager.has_prev(total), egui::Button::new("◀ Prev"))
            .clicked()
        {
            state.pager.prev(total);
        }
        ui.label(state.pager.label(total));
        if ui
            .add_enabled(state.pager.has_next(total), egui::Button::new("Next ▶"))
            .clicked()
        {
            state.pager.next(total);
        }
    });
    ui.separator();

    let wrap_width = ui.available_width() - 2.0 * ui.spacing().item_spacing.x;
    let heights = row_heights(ui.ctx(), &texts, wrap_width);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(Layout::top_down(Align::Center))
        .column(Column::remainder())
        .header(24.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong(columns::RAW_TEXT);
            });
        })
        .body(|body| {
            body.heterogeneous_rows(heights.into_iter(), |mut row| {
                let text = &texts[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.add(egui::Label::new(text.as_str()).wrap());
                });
            });
        });
}

/// Height of each row once its text is wrapped to `wrap_width`.
fn row_heights(ctx: &egui::Context, texts: &[String], wrap_width: f32) -> Vec<f32> {
    let font_id = egui::TextStyle::Body.resolve(&ctx.style());
    ctx.fonts(|fonts| {
        texts
            .iter()
            .map(|text| {
                let galley = fonts.layout(
                    text.clone(),
                    font_id.clone(),
                    egui::Color32::PLACEHOLDER,
                    wrap_width,
                );
                (galley.size().y + ROW_PADDING).max(MIN_ROW_HEIGHT)
            })
            .collect()
    })
}
