//! Column descriptors and the registry that owns their (possibly resized) widths.

use egui::Ui;

/// Narrowest a column can be dragged to, in points.
pub const MIN_COLUMN_WIDTH: f32 = 50.0;

/// Width used when a column doesn't call [`GridColumn::initial_width`].
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

type CellFn<'a, T> = Box<dyn Fn(&mut Ui, &T) + 'a>;
type ValueFn<'a, T> = Box<dyn Fn(&T) -> String + 'a>;

/// Describes one column of a [`crate::DataGrid`]: its identity, header label,
/// starting width, how to draw a cell and whether it gets a filter input.
///
/// ```
/// # struct Customer { name: String }
/// use egui_data_grid::GridColumn;
///
/// let column = GridColumn::new("name", "Name")
///     .initial_width(120.0)
///     .filterable(true)
///     .value(|c: &Customer| c.name.clone())
///     .cell(|ui, c: &Customer| {
///         ui.label(&c.name);
///     });
/// assert!(column.is_filterable());
/// ```
pub struct GridColumn<'a, T> {
    id: String,
    label: String,
    initial_width: f32,
    filterable: bool,
    render_cell: Option<CellFn<'a, T>>,
    value: Option<ValueFn<'a, T>>,
}

impl<'a, T> GridColumn<'a, T> {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            initial_width: DEFAULT_COLUMN_WIDTH,
            filterable: false,
            render_cell: None,
            value: None,
        }
    }

    /// Width before the user resizes the column.
    ///
    /// Never narrower than [`MIN_COLUMN_WIDTH`].
    #[inline]
    pub fn initial_width(mut self, width: f32) -> Self {
        self.initial_width = width.max(MIN_COLUMN_WIDTH);
        self
    }

    /// Show a text filter input for this column (default: `false`).
    #[inline]
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// How to draw the cell of this column for one row.
    ///
    /// Without it the cell shows [`Self::value`], or stays empty.
    #[inline]
    pub fn cell(mut self, render_cell: impl Fn(&mut Ui, &T) + 'a) -> Self {
        self.render_cell = Some(Box::new(render_cell));
        self
    }

    /// The raw value of this column, used when comparing a row against a filter.
    #[inline]
    pub fn value(mut self, value: impl Fn(&T) -> String + 'a) -> Self {
        self.value = Some(Box::new(value));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    pub fn default_width(&self) -> f32 {
        self.initial_width
    }

    /// The filter comparison value of `row`, if this column has a value getter.
    pub fn value_of(&self, row: &T) -> Option<String> {
        self.value.as_ref().map(|value| value(row))
    }

    pub(crate) fn show_cell(&self, ui: &mut Ui, row: &T) {
        if let Some(render_cell) = &self.render_cell {
            render_cell(ui, row);
        } else if let Some(value) = self.value_of(row) {
            ui.label(value);
        }
    }
}

impl<T> std::fmt::Debug for GridColumn<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridColumn")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("initial_width", &self.initial_width)
            .field("filterable", &self.filterable)
            .finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
struct ColumnSlot {
    width: f32,
    initial_width: f32,
    filterable: bool,
}

/// Current widths of the columns of one grid, keyed by column id.
///
/// Widths are the only column property that changes while a grid lives,
/// and only the resize controller changes them.
#[derive(Clone, Debug, Default)]
pub struct ColumnRegistry {
    order: Vec<String>,
    slots: ahash::HashMap<String, ColumnSlot>,
}

impl ColumnRegistry {
    /// Bring the registry in line with the columns of this frame.
    ///
    /// Unknown columns start at their initial width, known columns keep their
    /// width and columns that disappeared are forgotten.
    pub fn sync<T>(&mut self, columns: &[GridColumn<'_, T>]) {
        let mut slots = ahash::HashMap::default();
        for column in columns {
            let slot = match self.slots.get(column.id()) {
                Some(slot) => ColumnSlot {
                    filterable: column.is_filterable(),
                    initial_width: column.default_width(),
                    ..*slot
                },
                None => ColumnSlot {
                    width: column.default_width(),
                    initial_width: column.default_width(),
                    filterable: column.is_filterable(),
                },
            };
            slots.insert(column.id().to_owned(), slot);
        }
        self.order = columns.iter().map(|c| c.id().to_owned()).collect();
        self.slots = slots;
    }

    pub fn width(&self, column_id: &str) -> Option<f32> {
        self.slots.get(column_id).map(|slot| slot.width)
    }

    /// Widths in display order.
    pub fn widths(&self) -> Vec<f32> {
        self.order
            .iter()
            .filter_map(|id| self.width(id))
            .collect()
    }

    pub fn total_width(&self) -> f32 {
        self.widths().iter().sum()
    }

    /// Set the width of a column, never below [`MIN_COLUMN_WIDTH`].
    ///
    /// Returns the width actually stored, or `None` for an unknown column.
    pub fn set_width(&mut self, column_id: &str, width: f32) -> Option<f32> {
        let slot = self.slots.get_mut(column_id)?;
        slot.width = width.max(MIN_COLUMN_WIDTH);
        Some(slot.width)
    }

    /// Put a column back to its initial width.
    pub fn reset_width(&mut self, column_id: &str) -> Option<f32> {
        let slot = self.slots.get_mut(column_id)?;
        slot.width = slot.initial_width;
        Some(slot.width)
    }

    pub fn is_filterable(&self, column_id: &str) -> bool {
        self.slots.get(column_id).is_some_and(|slot| slot.filterable)
    }

    /// The filter row is only shown when at least one column is filterable.
    pub fn has_filterable(&self) -> bool {
        self.slots.values().any(|slot| slot.filterable)
    }
}
