//! Client-side pagination over the rows the host handed to the grid.

use std::ops::Range;

use egui::Ui;

pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// The rows shown for `page_index`, as an index range into the full row set.
///
/// The end is clamped to `row_count`. A page past the end is an empty range
/// starting where that page would start, never an error; use it with
/// [`slice::get`] rather than indexing.
pub fn slice_bounds(row_count: usize, page_index: usize, page_size: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(row_count).max(start);
    start..end
}

/// Current page and page size of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS.to_vec())
    }
}

impl Pagination {
    /// Start on the first page.
    ///
    /// A `page_size` missing from `page_size_options` is added to them, so the
    /// size selector can always show the current size.
    pub fn new(page_size: usize, mut page_size_options: Vec<usize>) -> Self {
        let page_size = page_size.max(1);
        page_size_options.retain(|&size| size > 0);
        if !page_size_options.contains(&page_size) {
            page_size_options.push(page_size);
        }
        page_size_options.sort_unstable();
        page_size_options.dedup();
        Self {
            page_index: 0,
            page_size,
            page_size_options,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Index range of the visible rows.
    pub fn slice(&self, row_count: usize) -> Range<usize> {
        slice_bounds(row_count, self.page_index, self.page_size)
    }

    /// Number of pages needed for `row_count` rows. Zero rows still make one (empty) page.
    pub fn page_count(&self, row_count: usize) -> usize {
        // A deserialized state may carry a zero page size.
        row_count.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Go to `page_index`. No bounds check: a page past the end shows no rows.
    #[inline]
    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Change the number of rows per page, always going back to the first page.
    ///
    /// Sizes outside the configured options are ignored. Returns `true` if the size was accepted.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.page_size_options.contains(&page_size) {
            log::debug!("Ignoring page size {page_size}, not one of {:?}", self.page_size_options);
            return false;
        }
        self.page_size = page_size;
        self.page_index = 0;
        true
    }

    /// Back to the first page.
    #[inline]
    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self, row_count: usize) -> bool {
        self.page_index.saturating_add(1) < self.page_count(row_count)
    }

    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn next(&mut self, row_count: usize) {
        if self.has_next(row_count) {
            self.page_index += 1;
        }
    }

    /// Keep the current page if it still has rows, otherwise move to the last page.
    ///
    /// Used when the row set changed without a filter change (e.g. a reload
    /// returned fewer rows).
    pub fn retain_valid_page(&mut self, row_count: usize) {
        let last = self.page_count(row_count) - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }

    /// `"11–20 of 23"`, or `"0–0 of 0"` without rows.
    pub fn range_label(&self, row_count: usize) -> String {
        let range = self.slice(row_count);
        if range.is_empty() {
            format!("0–0 of {row_count}")
        } else {
            format!("{}–{} of {row_count}", range.start + 1, range.end)
        }
    }

    /// Rows-per-page selector, range label and previous/next buttons.
    ///
    /// Returns `true` if the page or page size changed.
    pub fn ui(&mut self, ui: &mut Ui, id_salt: impl std::hash::Hash, row_count: usize) -> bool {
        let before = (self.page_index, self.page_size);

        ui.horizontal(|ui| {
            ui.label("Rows per page:");
            let mut page_size = self.page_size;
            egui::ComboBox::from_id_salt(id_salt)
                .selected_text(page_size.to_string())
                .width(60.0)
                .show_ui(ui, |ui| {
                    for &option in &self.page_size_options {
                        ui.selectable_value(&mut page_size, option, option.to_string());
                    }
                });
            if page_size != self.page_size {
                self.set_page_size(page_size);
            }

            ui.separator();
            ui.label(self.range_label(row_count));

            if ui
                .add_enabled(self.has_previous(), egui::Button::new("‹"))
                .on_hover_text("Previous page")
                .clicked()
            {
                self.previous();
            }
            if ui
                .add_enabled(self.has_next(row_count), egui::Button::new("›"))
                .on_hover_text("Next page")
                .clicked()
            {
                self.next(row_count);
            }
        });

        before != (self.page_index, self.page_size)
    }
}
