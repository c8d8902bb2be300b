//! Blocking "loading" layer drawn over the grid.

use egui::{Align, Color32, CornerRadius, Id, Layout, Order, Rect, Sense, Spinner, Ui, UiBuilder};

/// Cover `rect` with a dimming layer, a spinner and `text`.
///
/// The layer sits in front of the grid and swallows clicks and drags, while
/// the grid underneath keeps its place in the layout.
pub(crate) fn loading_overlay(ui: &Ui, id: Id, rect: Rect, color: Color32, text: &str) {
    profiling::function_scope!();

    egui::Area::new(id)
        .order(Order::Foreground)
        .fixed_pos(rect.min)
        .interactable(true)
        .show(ui.ctx(), |ui| {
            ui.set_min_size(rect.size());
            let response = ui.allocate_rect(rect, Sense::click_and_drag());
            ui.painter().rect_filled(response.rect, CornerRadius::ZERO, color);

            let content_height = 56.0_f32.min(rect.height());
            let content_rect = Rect::from_center_size(
                rect.center(),
                egui::vec2(rect.width(), content_height),
            );
            ui.scope_builder(
                UiBuilder::new()
                    .max_rect(content_rect)
                    .layout(Layout::top_down(Align::Center)),
                |ui| {
                    ui.add(Spinner::new().size(24.0).color(Color32::WHITE));
                    ui.label(egui::RichText::new(text).color(Color32::WHITE).strong());
                },
            );
        });
}
