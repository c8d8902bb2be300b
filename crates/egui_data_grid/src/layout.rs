//! Places grid rows as a strip of fixed-width cells.

use egui::{Align, Color32, CornerRadius, Layout, Pos2, Rect, Sense, Stroke, Ui, UiBuilder, Vec2};

#[derive(Clone, Copy, Debug)]
pub(crate) struct RowLayout {
    pub height: f32,
    pub padding: f32,
    pub bg: Option<Color32>,
    pub stroke: Stroke,
}

impl RowLayout {
    /// Allocate one row and fill it cell by cell.
    ///
    /// `add_cell` gets the column index and a child [`Ui`] clipped to the cell.
    /// Returns the outer rect of every cell.
    pub fn row(
        self,
        ui: &mut Ui,
        widths: &[f32],
        mut add_cell: impl FnMut(usize, &mut Ui),
    ) -> Vec<Rect> {
        let total_width: f32 = widths.iter().sum();
        let row_rect = self.allocate(ui, total_width);

        let mut cells = Vec::with_capacity(widths.len());
        let mut x = row_rect.left();
        for (index, &width) in widths.iter().enumerate() {
            let cell_rect =
                Rect::from_min_size(Pos2::new(x, row_rect.top()), Vec2::new(width, self.height));
            let mut cell_ui = self.cell_ui(ui, cell_rect, index);
            add_cell(index, &mut cell_ui);
            cells.push(cell_rect);
            x += width;
        }
        cells
    }

    /// One cell spanning `total_width`, contents centered.
    pub fn spanning_row(self, ui: &mut Ui, total_width: f32, add_contents: impl FnOnce(&mut Ui)) -> Rect {
        let row_rect = self.allocate(ui, total_width);
        let mut cell_ui = ui.new_child(
            UiBuilder::new()
                .id_salt("span")
                .max_rect(row_rect)
                .layout(Layout::centered_and_justified(egui::Direction::LeftToRight)),
        );
        add_contents(&mut cell_ui);
        row_rect
    }

    fn allocate(&self, ui: &mut Ui, total_width: f32) -> Rect {
        let (row_rect, _) = ui.allocate_exact_size(Vec2::new(total_width, self.height), Sense::hover());
        if let Some(bg) = self.bg {
            ui.painter().rect_filled(row_rect, CornerRadius::ZERO, bg);
        }
        ui.painter()
            .hline(row_rect.x_range(), row_rect.bottom(), self.stroke);
        row_rect
    }

    fn cell_ui(&self, ui: &mut Ui, cell_rect: Rect, index: usize) -> Ui {
        let content_rect = cell_rect.shrink2(Vec2::new(self.padding, 0.0));
        let mut cell_ui = ui.new_child(
            UiBuilder::new()
                .id_salt(index)
                .max_rect(content_rect)
                .layout(Layout::left_to_right(Align::Center)),
        );
        cell_ui.set_clip_rect(content_rect.intersect(ui.clip_rect()));
        cell_ui
    }
}
