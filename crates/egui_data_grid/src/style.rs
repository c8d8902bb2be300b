use egui::{Color32, Stroke, Ui};

/// Appearance and texts of a [`crate::DataGrid`].
///
/// Colors left at `None` fall back to `ui.visuals()`.
#[derive(Clone, Debug)]
pub struct GridStyle {
    /// Header background. Falls back to `ui.visuals().selection.bg_fill`.
    pub header_bg_color: Option<Color32>,

    /// Header label color. Falls back to `ui.visuals().strong_text_color()`.
    pub header_text_color: Option<Color32>,

    /// Stroke between rows and around cells.
    /// Falls back to `ui.visuals().widgets.noninteractive.bg_stroke`.
    pub grid_stroke: Option<Stroke>,

    /// Background of every other body row. `None` means no striping.
    pub striped_bg_color: Option<Color32>,

    /// Dimming layer painted over the grid while loading.
    pub overlay_color: Color32,

    pub header_height: f32,
    pub filter_height: f32,
    pub row_height: f32,

    /// Inner margin of each cell.
    pub cell_padding: f32,

    /// Placeholder text of the filter inputs.
    pub filter_hint: String,

    /// Shown in the body when there are no rows and nothing is loading.
    pub empty_text: String,

    /// Shown on the loading overlay.
    pub loading_text: String,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            header_bg_color: None,
            header_text_color: None,
            grid_stroke: None,
            striped_bg_color: None,
            overlay_color: Color32::from_black_alpha(77),
            header_height: 28.0,
            filter_height: 30.0,
            row_height: 24.0,
            cell_padding: 6.0,
            filter_hint: "Filter…".to_owned(),
            empty_text: "No data found".to_owned(),
            loading_text: "Searching…".to_owned(),
        }
    }
}

impl GridStyle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn header_bg_color(mut self, color: Color32) -> Self {
        self.header_bg_color = Some(color);
        self
    }

    #[inline]
    pub fn header_text_color(mut self, color: Color32) -> Self {
        self.header_text_color = Some(color);
        self
    }

    #[inline]
    pub fn grid_stroke(mut self, stroke: impl Into<Stroke>) -> Self {
        self.grid_stroke = Some(stroke.into());
        self
    }

    /// Stripe body rows with the given background.
    #[inline]
    pub fn striped_bg_color(mut self, color: Color32) -> Self {
        self.striped_bg_color = Some(color);
        self
    }

    #[inline]
    pub fn overlay_color(mut self, color: Color32) -> Self {
        self.overlay_color = color;
        self
    }

    #[inline]
    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    #[inline]
    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    #[inline]
    pub fn filter_hint(mut self, hint: impl Into<String>) -> Self {
        self.filter_hint = hint.into();
        self
    }

    #[inline]
    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    #[inline]
    pub fn loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    pub(crate) fn header_bg(&self, ui: &Ui) -> Color32 {
        self.header_bg_color
            .unwrap_or_else(|| ui.visuals().selection.bg_fill)
    }

    pub(crate) fn header_text(&self, ui: &Ui) -> Color32 {
        self.header_text_color
            .unwrap_or_else(|| ui.visuals().strong_text_color())
    }

    pub(crate) fn stroke(&self, ui: &Ui) -> Stroke {
        self.grid_stroke
            .unwrap_or_else(|| ui.visuals().widgets.noninteractive.bg_stroke)
    }
}
