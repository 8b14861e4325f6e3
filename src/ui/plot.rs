use eframe::egui::{Color32, PointerButton, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const POINT_COLOR: Color32 = Color32::from_rgba_premultiplied(41, 41, 41, 204);
const DIMMED_COLOR: Color32 = Color32::from_rgba_premultiplied(10, 10, 10, 50);
const OUTLINE_COLOR: Color32 = Color32::from_rgb(30, 110, 220);

// ---------------------------------------------------------------------------
// Embedding scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the visible posts at their embedding coordinates and turn primary
/// drags into box / lasso selections.
pub fn embedding_plot(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("The dataset has no posts");
        });
        return;
    }

    let highlighted = state.highlighted();
    let mut selected_xy: Vec<[f64; 2]> = Vec::new();
    let mut rest_xy: Vec<[f64; 2]> = Vec::with_capacity(state.scatter().len());
    for (id, xy) in state.scatter().points() {
        if highlighted.contains(&id) {
            selected_xy.push(xy);
        } else {
            rest_xy.push(xy);
        }
    }
    let rest_color = if selected_xy.is_empty() {
        POINT_COLOR
    } else {
        DIMMED_COLOR
    };
    let drag_outline = state.drag_shape().map(|shape| shape.outline());

    let response = Plot::new("embedding_plot")
        .show_axes([false, false])
        .show_grid([true, true])
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::new(rest_xy))
                    .radius(4.0)
                    .color(rest_color),
            );
            if !selected_xy.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::new(selected_xy))
                        .radius(4.0)
                        .color(POINT_COLOR),
                );
            }
            if let Some(outline) = drag_outline {
                plot_ui.line(
                    Line::new(PlotPoints::new(outline))
                        .color(OUTLINE_COLOR)
                        .width(1.5),
                );
            }
            plot_ui.pointer_coordinate()
        });

    let pointer = response.inner;
    let drag = &response.response;
    if drag.drag_started_by(PointerButton::Primary) {
        // Egui reports a drag only after the pointer has moved; start at the press.
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| drag.interact_pointer_pos());
        match origin {
            Some(pos) => {
                let p = response.transform.value_from_position(pos);
                state.begin_drag([p.x, p.y]);
            }
            None => state.drag_path.clear(),
        }
    }
    if drag.dragged_by(PointerButton::Primary) {
        if let Some(p) = pointer {
            state.drag_path.push([p.x, p.y]);
        }
    }
    if drag.drag_stopped_by(PointerButton::Primary) {
        state.finish_drag();
    }
}
