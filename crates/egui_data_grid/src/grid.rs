//! The data grid: header with resize handles, optional filter row, one page of
//! body rows, pagination control and loading overlay.

use std::ops::Range;

use egui::{Context, Id, Key, Response, RichText, Stroke, StrokeKind, TextEdit, Ui, Vec2};

use crate::{
    column::{ColumnRegistry, GridColumn},
    filter::{CommitTrigger, FilterEntry, FilterSource, FilterState},
    layout::RowLayout,
    overlay::loading_overlay,
    pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, Pagination},
    resize::{self, ContextCapture, ResizeConfig, ResizeController},
    style::GridStyle,
};

// ----------------------------------------------------------------------------

/// Everything a grid remembers between frames.
///
/// Kept in egui's temporary memory under the grid's [`Id`]
/// (see [`GridOutput::state_id`]) and never persisted.
#[derive(Clone, Debug, Default)]
pub struct GridState {
    columns: ColumnRegistry,
    filters: FilterState,
    pagination: Pagination,
    resize: ResizeController,
}

impl GridState {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            ..Default::default()
        }
    }

    pub fn load(ctx: &Context, state_id: Id) -> Option<Self> {
        ctx.data_mut(|d| d.get_temp::<Self>(state_id))
    }

    pub fn store(self, ctx: &Context, state_id: Id) {
        ctx.data_mut(|d| d.insert_temp(state_id, self));
    }

    pub fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    /// Register the columns of this frame, forgetting filters of columns that
    /// are gone or no longer filterable.
    pub fn sync_columns<T>(&mut self, columns: &[GridColumn<'_, T>]) {
        self.columns.sync(columns);
        let registry = &self.columns;
        self.filters.retain_columns(|id| registry.is_filterable(id));
    }

    /// Live typing feedback; never reaches the host.
    pub fn set_draft(&mut self, column_id: &str, value: impl Into<String>) {
        self.filters.set_draft(column_id, value);
    }

    /// Promote `value` to the committed filter of `column_id`.
    ///
    /// Nothing happens while `loading`, for a column that isn't filterable, or
    /// when the value equals what is already committed. Otherwise the grid goes
    /// back to the first page and the full committed set is returned for the host.
    pub fn commit_filter(
        &mut self,
        column_id: &str,
        value: &str,
        loading: bool,
    ) -> Option<Vec<FilterEntry>> {
        if loading {
            log::debug!("Not committing filter {column_id:?} while loading");
            return None;
        }
        if !self.columns.is_filterable(column_id) {
            log::debug!("Ignoring filter commit for non-filterable column {column_id:?}");
            return None;
        }
        let committed = self.filters.commit(column_id, value)?;
        self.pagination.reset();
        Some(committed)
    }

    /// Release everything an active resize session holds.
    fn teardown(&mut self, ctx: &Context, state_id: Id) {
        if let Some(column_id) = self.resize.active_column().map(ToOwned::to_owned) {
            let capture = ContextCapture::new(ctx, resize::handle_id(state_id, &column_id));
            self.resize.teardown(&capture);
        }
    }
}

// ----------------------------------------------------------------------------

/// What the body shows for the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyContent {
    /// These rows of the full row set.
    Rows(Range<usize>),

    /// A single cell spanning all columns. The "no data" text is only shown
    /// when nothing is loading.
    Placeholder { show_message: bool },
}

impl BodyContent {
    pub fn new(row_count: usize, pagination: &Pagination, loading: bool) -> Self {
        let range = pagination.slice(row_count);
        if range.is_empty() {
            Self::Placeholder {
                show_message: !loading,
            }
        } else {
            Self::Rows(range)
        }
    }
}

/// What happened in a grid this frame.
#[derive(Debug)]
pub struct GridOutput {
    /// Where the [`GridState`] of this grid is stored.
    pub state_id: Id,

    /// Covers the whole grid, pagination control included.
    pub response: Response,

    /// The committed filters, if the user committed a changed filter value this frame.
    pub filter_change: Option<Vec<FilterEntry>>,

    pub page_index: usize,
    pub page_size: usize,
}

type KeyFn<'a, T> = Box<dyn Fn(&T) -> Id + 'a>;
type FilterChangeFn<'a> = Box<dyn FnMut(&[FilterEntry]) + 'a>;

/// A paginated table over rows owned by the host, with per-column text
/// filters and resizable columns.
///
/// The grid never fetches anything. When the user commits a changed filter
/// (focus leaves the input or Enter is pressed) the host is told through
/// [`Self::on_filter_change`] and [`GridOutput::filter_change`]; it then
/// queries its backend and shows the grid again with the new rows.
///
/// If you have multiple grids in the same [`Ui`] give them different id salts.
///
/// ### Example
/// ```
/// # egui::__run_test_ui(|ui| {
/// use egui_data_grid::{DataGrid, GridColumn};
///
/// struct Supplier { id: u32, name: String }
/// let rows = vec![Supplier { id: 1, name: "Acme".to_owned() }];
///
/// let output = DataGrid::new("suppliers")
///     .column(
///         GridColumn::new("name", "Name")
///             .filterable(true)
///             .value(|s: &Supplier| s.name.clone()),
///     )
///     .key(|s: &Supplier| s.id)
///     .on_filter_change(|filters| {
///         println!("query again with {filters:?}");
///     })
///     .show(ui, &rows);
/// assert!(output.filter_change.is_none());
/// # });
/// ```
pub struct DataGrid<'a, T> {
    id_salt: Id,
    columns: Vec<GridColumn<'a, T>>,
    key: Option<KeyFn<'a, T>>,
    default_page_size: usize,
    page_size_options: Vec<usize>,
    loading: bool,
    resize: ResizeConfig,
    style: GridStyle,
    on_filter_change: Option<FilterChangeFn<'a>>,
}

impl<'a, T> DataGrid<'a, T> {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id_salt: Id::new(id_salt),
            columns: Vec::new(),
            key: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            loading: false,
            resize: ResizeConfig::default(),
            style: GridStyle::default(),
            on_filter_change: None,
        }
    }

    #[inline]
    pub fn column(mut self, column: GridColumn<'a, T>) -> Self {
        self.columns.push(column);
        self
    }

    #[inline]
    pub fn columns(mut self, columns: impl IntoIterator<Item = GridColumn<'a, T>>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Stable identity of a row. Without it rows are identified by their index.
    #[inline]
    pub fn key<K: std::hash::Hash>(mut self, key_of: impl Fn(&T) -> K + 'a) -> Self {
        self.key = Some(Box::new(move |row| Id::new(key_of(row))));
        self
    }

    /// Rows per page when the grid is first shown (default: 10).
    #[inline]
    pub fn default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// The page sizes the user can pick from (default: 5, 10, 25, 50, 100).
    #[inline]
    pub fn page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// The host is fetching rows (default: `false`).
    ///
    /// Shows a blocking overlay, disables the pagination control and holds
    /// back filter commits. Typed filter text and the current page are kept.
    ///
    /// The filter inputs are not disabled: a focused input keeps taking text
    /// so nothing typed mid-fetch is lost. Blur or Enter during loading leaves
    /// the draft uncommitted until the user confirms it again.
    #[inline]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[inline]
    pub fn resize(mut self, resize: ResizeConfig) -> Self {
        self.resize = resize;
        self
    }

    #[inline]
    pub fn style(mut self, style: GridStyle) -> Self {
        self.style = style;
        self
    }

    /// Called with the full committed filter set every time it really changes.
    #[inline]
    pub fn on_filter_change(mut self, on_filter_change: impl FnMut(&[FilterEntry]) + 'a) -> Self {
        self.on_filter_change = Some(Box::new(on_filter_change));
        self
    }

    /// Forget the state of a grid that is no longer shown, ending any resize in progress.
    pub fn forget(ctx: &Context, state_id: Id) {
        if let Some(mut state) = GridState::load(ctx, state_id) {
            state.teardown(ctx, state_id);
        }
        ctx.data_mut(|d| d.remove::<GridState>(state_id));
    }

    pub fn show(mut self, ui: &mut Ui, rows: &[T]) -> GridOutput {
        profiling::function_scope!();

        let state_id = ui.id().with(self.id_salt);
        let mut state = GridState::load(ui.ctx(), state_id).unwrap_or_else(|| {
            GridState::new(Pagination::new(
                self.default_page_size,
                self.page_size_options.clone(),
            ))
        });
        state.sync_columns(&self.columns);

        if !self.loading {
            state.pagination.retain_valid_page(rows.len());
        }

        if self.resize.enabled {
            resize::drive_resize(
                ui.ctx(),
                &mut state.resize,
                &mut state.columns,
                &self.resize,
                state_id,
            );
        } else {
            state.teardown(ui.ctx(), state_id);
        }

        let mut pending = Vec::new();
        let response = ui
            .scope(|ui| {
                ui.spacing_mut().item_spacing = Vec2::ZERO;
                self.header_ui(ui, &mut state, state_id);
                if state.columns.has_filterable() {
                    pending = self.filter_row_ui(ui, &mut state, state_id);
                }
                self.body_ui(ui, &state, rows);

                ui.spacing_mut().item_spacing = Vec2::new(8.0, 4.0);
                ui.add_space(4.0);
                ui.add_enabled_ui(!self.loading, |ui| {
                    state
                        .pagination
                        .ui(ui, state_id.with("page_size"), rows.len())
                });
            })
            .response;

        if self.loading {
            loading_overlay(
                ui,
                state_id.with("__loading_overlay"),
                response.rect,
                self.style.overlay_color,
                &self.style.loading_text,
            );
        }

        let filter_change = self.publish(&mut state, pending);

        let output = GridOutput {
            state_id,
            response,
            filter_change,
            page_index: state.pagination.page_index(),
            page_size: state.pagination.page_size(),
        };
        state.store(ui.ctx(), state_id);
        output
    }

    /// Commit the filter values confirmed this frame, in the order they were
    /// confirmed, telling the host about each real change.
    fn publish(
        &mut self,
        state: &mut GridState,
        pending: Vec<(String, String, CommitTrigger)>,
    ) -> Option<Vec<FilterEntry>> {
        let mut last_change = None;
        for (column_id, value, trigger) in pending {
            let Some(committed) = state.commit_filter(&column_id, &value, self.loading) else {
                continue;
            };
            log::debug!("Filter {column_id:?} committed on {trigger:?}: {value:?}");
            if let Some(on_filter_change) = &mut self.on_filter_change {
                on_filter_change(&committed);
            }
            last_change = Some(committed);
        }
        last_change
    }

    fn header_ui(&self, ui: &mut Ui, state: &mut GridState, state_id: Id) {
        let widths = state.columns.widths();
        let text_color = self.style.header_text(ui);
        let layout = RowLayout {
            height: self.style.header_height,
            padding: self.style.cell_padding,
            bg: Some(self.style.header_bg(ui)),
            stroke: self.style.stroke(ui),
        };

        let cells = layout.row(ui, &widths, |index, ui| {
            if let Some(column) = self.columns.get(index) {
                ui.add(
                    egui::Label::new(RichText::new(column.label()).strong().color(text_color))
                        .selectable(false)
                        .truncate(),
                );
            }
        });

        for (column, rect) in self.columns.iter().zip(cells) {
            resize::column_resize_handle(
                ui,
                &mut state.resize,
                &mut state.columns,
                &self.resize,
                state_id,
                column.id(),
                rect,
            );
        }
    }

    fn filter_row_ui(
        &self,
        ui: &mut Ui,
        state: &mut GridState,
        state_id: Id,
    ) -> Vec<(String, String, CommitTrigger)> {
        let widths = state.columns.widths();
        let layout = RowLayout {
            height: self.style.filter_height,
            padding: self.style.cell_padding,
            bg: None,
            stroke: self.style.stroke(ui),
        };

        let mut pending = Vec::new();
        layout.row(ui, &widths, |index, ui| {
            let Some(column) = self.columns.get(index).filter(|c| c.is_filterable()) else {
                return;
            };
            let input_id = filter_input_id(state_id, column.id());
            if let Some((value, trigger)) =
                filter_input(ui, &mut state.filters, input_id, column.id(), &self.style.filter_hint)
            {
                pending.push((column.id().to_owned(), value, trigger));
            }
        });
        pending
    }

    fn body_ui(&self, ui: &mut Ui, state: &GridState, rows: &[T]) {
        let widths = state.columns.widths();
        let stroke = self.style.stroke(ui);

        match BodyContent::new(rows.len(), &state.pagination, self.loading) {
            BodyContent::Placeholder { show_message } => {
                let layout = RowLayout {
                    height: self.style.row_height * 2.0,
                    padding: self.style.cell_padding,
                    bg: None,
                    stroke,
                };
                layout.spanning_row(ui, state.columns.total_width(), |ui| {
                    if show_message {
                        ui.weak(&self.style.empty_text);
                    }
                });
            }
            BodyContent::Rows(range) => {
                let start = range.start;
                for (offset, row) in rows.get(range).unwrap_or_default().iter().enumerate() {
                    let index = start + offset;
                    let row_id = self
                        .key
                        .as_ref()
                        .map_or_else(|| Id::new(index), |key_of| key_of(row));
                    let layout = RowLayout {
                        height: self.style.row_height,
                        padding: self.style.cell_padding,
                        bg: self.style.striped_bg_color.filter(|_| index % 2 == 1),
                        stroke,
                    };
                    ui.push_id(row_id, |ui| {
                        layout.row(ui, &widths, |column_index, ui| {
                            if let Some(column) = self.columns.get(column_index) {
                                column.show_cell(ui, row);
                            }
                        });
                    });
                }
            }
        }
    }
}

fn filter_input_id(state_id: Id, column_id: &str) -> Id {
    state_id.with("filter").with(column_id)
}

/// Single-line filter input editing the draft value of `column_id`.
///
/// An input whose draft differs from the committed value gets an outline.
/// Returns the typed value when the input lost focus, which is also what
/// pressing Enter does.
fn filter_input(
    ui: &mut Ui,
    filters: &mut FilterState,
    input_id: Id,
    column_id: &str,
    hint: &str,
) -> Option<(String, CommitTrigger)> {
    let mut text = filters.value_of(column_id, FilterSource::Draft).to_owned();
    let response = ui.add(
        TextEdit::singleline(&mut text)
            .id(input_id)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        filters.set_draft(column_id, text.clone());
    }
    if filters.is_dirty(column_id) {
        let stroke = Stroke::new(1.0, ui.visuals().warn_fg_color);
        ui.painter()
            .rect_stroke(response.rect, 2.0, stroke, StrokeKind::Inside);
    }
    if response.lost_focus() {
        let trigger = if ui.input(|i| i.key_pressed(Key::Enter)) {
            CommitTrigger::Enter
        } else {
            CommitTrigger::Blur
        };
        return Some((text, trigger));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use egui::{Event, Modifiers, PointerButton, Pos2, pos2, vec2};

    use super::*;
    use crate::MIN_COLUMN_WIDTH;

    #[derive(Clone, Debug)]
    struct Customer {
        id: u32,
        name: String,
        email: String,
    }

    fn customers(count: u32) -> Vec<Customer> {
        (0..count)
            .map(|id| Customer {
                id,
                name: format!("Customer {id:02}"),
                email: format!("c{id}@example.org"),
            })
            .collect()
    }

    fn columns() -> Vec<GridColumn<'static, Customer>> {
        vec![
            GridColumn::new("name", "Name")
                .initial_width(120.0)
                .filterable(true)
                .value(|c: &Customer| c.name.clone()),
            GridColumn::new("email", "Email")
                .initial_width(200.0)
                .filterable(true)
                .value(|c: &Customer| c.email.clone()),
            GridColumn::new("id", "Id").value(|c: &Customer| c.id.to_string()),
        ]
    }

    fn state() -> GridState {
        let mut state = GridState::default();
        state.sync_columns(&columns());
        state
    }

    fn run_frame(ctx: &Context, add_contents: impl FnMut(&mut Ui)) {
        run_frame_with(ctx, Vec::new(), add_contents);
    }

    fn run_frame_with(ctx: &Context, events: Vec<Event>, mut add_contents: impl FnMut(&mut Ui)) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| add_contents(ui));
        });
    }

    fn key_press(key: Key) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn pointer_button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shows the customer grid over `rows`, recording every filter change in `calls`.
    fn show_customers(
        ctx: &Context,
        events: Vec<Event>,
        rows: &[Customer],
        loading: bool,
        calls: &Rc<RefCell<Vec<Vec<FilterEntry>>>>,
    ) -> GridOutput {
        let mut output = None;
        run_frame_with(ctx, events, |ui| {
            let seen = Rc::clone(calls);
            output = Some(
                DataGrid::new("customers")
                    .columns(columns())
                    .loading(loading)
                    .on_filter_change(move |filters| seen.borrow_mut().push(filters.to_vec()))
                    .show(ui, rows),
            );
        });
        output.expect("grid was shown")
    }

    fn focus_filter(ctx: &Context, state_id: Id, column_id: &str) {
        ctx.memory_mut(|m| m.request_focus(filter_input_id(state_id, column_id)));
    }

    #[test]
    fn committing_typed_name_publishes_once_and_resets_page() {
        let mut state = state();
        state.pagination_mut().set_page(2);
        for typed in ["A", "An", "Ann"] {
            state.set_draft("name", typed);
        }
        assert!(state.filters().committed().is_empty());

        let committed = state.commit_filter("name", "Ann", false);
        assert_eq!(committed, Some(vec![FilterEntry::new("name", "Ann")]));
        assert_eq!(state.pagination().page_index(), 0);

        assert_eq!(state.commit_filter("name", "Ann", false), None);
    }

    #[test]
    fn unchanged_commit_keeps_page() {
        let mut state = state();
        state.commit_filter("email", "org", false);
        state.pagination_mut().set_page(3);

        assert_eq!(state.commit_filter("email", "org", false), None);
        assert_eq!(state.pagination().page_index(), 3);
    }

    #[test]
    fn loading_keeps_draft_and_holds_back_commit() {
        let mut state = state();
        state.pagination_mut().set_page(1);
        state.set_draft("name", "Ann");

        assert_eq!(state.commit_filter("name", "Ann", true), None);
        assert_eq!(state.filters().value_of("name", FilterSource::Draft), "Ann");
        assert_eq!(state.filters().value_of("name", FilterSource::Committed), "");
        assert_eq!(state.pagination().page_index(), 1);
        assert!(state.filters().is_dirty("name"));
    }

    #[test]
    fn non_filterable_columns_are_never_committed() {
        let mut state = state();
        assert_eq!(state.commit_filter("id", "7", false), None);
        assert_eq!(state.commit_filter("unknown", "7", false), None);
        assert!(state.filters().committed().is_empty());
    }

    #[test]
    fn publish_calls_back_once_per_real_change() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let mut grid = DataGrid::new("customers")
            .columns(columns())
            .on_filter_change(move |filters| seen.borrow_mut().push(filters.to_vec()));
        let mut state = state();

        let change = grid.publish(
            &mut state,
            vec![
                ("name".to_owned(), "Ann".to_owned(), CommitTrigger::Enter),
                ("name".to_owned(), "Ann".to_owned(), CommitTrigger::Blur),
            ],
        );

        assert_eq!(change, Some(vec![FilterEntry::new("name", "Ann")]));
        assert_eq!(*calls.borrow(), vec![vec![FilterEntry::new("name", "Ann")]]);
    }

    #[test]
    fn publish_does_nothing_while_loading() {
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        let mut grid = DataGrid::new("customers")
            .columns(columns())
            .loading(true)
            .on_filter_change(move |_| *seen.borrow_mut() += 1);
        let mut state = state();

        let change = grid.publish(
            &mut state,
            vec![("name".to_owned(), "Ann".to_owned(), CommitTrigger::Enter)],
        );
        assert_eq!(change, None);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn empty_rows_show_a_single_placeholder() {
        let pagination = Pagination::default();
        assert_eq!(
            BodyContent::new(0, &pagination, false),
            BodyContent::Placeholder { show_message: true }
        );
        assert_eq!(
            BodyContent::new(0, &pagination, true),
            BodyContent::Placeholder { show_message: false }
        );
        assert_eq!(BodyContent::new(23, &pagination, true), BodyContent::Rows(0..10));
    }

    #[test]
    fn show_keeps_state_between_frames() {
        let ctx = Context::default();
        let rows = customers(23);
        let mut state_id = None;

        run_frame(&ctx, |ui| {
            let output = DataGrid::new("customers")
                .columns(columns())
                .key(|c: &Customer| c.id)
                .show(ui, &rows);
            assert_eq!(output.page_index, 0);
            assert_eq!(output.page_size, 10);
            assert!(output.filter_change.is_none());
            state_id = Some(output.state_id);
        });
        let state_id = state_id.unwrap();

        let mut state = GridState::load(&ctx, state_id).unwrap();
        assert_eq!(state.columns().widths(), vec![120.0, 200.0, 100.0]);
        state.pagination_mut().set_page(2);
        state.store(&ctx, state_id);

        // Loading toggled on and off again with the same rows keeps the page.
        for loading in [true, false] {
            run_frame(&ctx, |ui| {
                let output = DataGrid::new("customers")
                    .columns(columns())
                    .loading(loading)
                    .show(ui, &rows);
                assert_eq!(output.page_index, 2);
            });
        }

        // Fewer rows without a filter change: back to the last page that has rows.
        let fewer = customers(12);
        run_frame(&ctx, |ui| {
            let output = DataGrid::new("customers").columns(columns()).show(ui, &fewer);
            assert_eq!(output.page_index, 1);
        });

        DataGrid::<Customer>::forget(&ctx, state_id);
        assert!(GridState::load(&ctx, state_id).is_none());
    }

    #[test]
    fn default_page_size_is_configurable() {
        let ctx = Context::default();
        let rows = customers(3);
        run_frame(&ctx, |ui| {
            let output = DataGrid::new("small")
                .columns(columns())
                .default_page_size(25)
                .page_size_options(vec![25, 50])
                .show(ui, &rows);
            assert_eq!(output.page_size, 25);
        });
    }

    #[test]
    fn grid_without_filterable_columns_shows_without_filter_row() {
        let ctx = Context::default();
        let rows: Vec<Customer> = Vec::new();
        run_frame(&ctx, |ui| {
            let output = DataGrid::new("plain")
                .column(GridColumn::new("id", "Id").cell(|ui, c: &Customer| {
                    ui.label(c.id.to_string());
                }))
                .show(ui, &rows);
            let state = GridState::load(ui.ctx(), output.state_id).unwrap();
            assert!(!state.columns().has_filterable());
        });
    }

    #[test]
    fn typing_then_enter_commits_once_and_resets_page() {
        let ctx = Context::default();
        let rows = customers(23);
        let calls = Rc::new(RefCell::new(Vec::new()));

        let state_id = show_customers(&ctx, vec![], &rows, false, &calls).state_id;
        let mut state = GridState::load(&ctx, state_id).unwrap();
        state.pagination_mut().set_page(2);
        state.store(&ctx, state_id);

        focus_filter(&ctx, state_id, "name");
        let output = show_customers(&ctx, vec![Event::Text("Ann".to_owned())], &rows, false, &calls);
        assert!(calls.borrow().is_empty());
        assert_eq!(output.page_index, 2);
        let state = GridState::load(&ctx, state_id).unwrap();
        assert_eq!(state.filters().value_of("name", FilterSource::Draft), "Ann");
        assert!(state.filters().is_dirty("name"));

        let output = show_customers(&ctx, vec![key_press(Key::Enter)], &rows, false, &calls);
        assert_eq!(*calls.borrow(), vec![vec![FilterEntry::new("name", "Ann")]]);
        assert_eq!(output.filter_change, Some(vec![FilterEntry::new("name", "Ann")]));
        assert_eq!(output.page_index, 0);

        // Focus is gone; later frames don't commit again.
        let output = show_customers(&ctx, vec![], &rows, false, &calls);
        assert!(output.filter_change.is_none());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn typing_while_loading_keeps_draft_until_confirmed_again() {
        let ctx = Context::default();
        let rows = customers(23);
        let calls = Rc::new(RefCell::new(Vec::new()));

        let state_id = show_customers(&ctx, vec![], &rows, true, &calls).state_id;
        focus_filter(&ctx, state_id, "name");
        show_customers(&ctx, vec![Event::Text("Anne".to_owned())], &rows, true, &calls);
        let output = show_customers(&ctx, vec![key_press(Key::Enter)], &rows, true, &calls);

        assert!(output.filter_change.is_none());
        assert!(calls.borrow().is_empty());
        let state = GridState::load(&ctx, state_id).unwrap();
        assert_eq!(state.filters().value_of("name", FilterSource::Draft), "Anne");
        assert_eq!(state.filters().value_of("name", FilterSource::Committed), "");

        // Once loading is over, confirming the kept draft commits it.
        focus_filter(&ctx, state_id, "name");
        let output = show_customers(&ctx, vec![key_press(Key::Enter)], &rows, false, &calls);
        assert_eq!(output.filter_change, Some(vec![FilterEntry::new("name", "Anne")]));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn dragging_a_header_handle_resizes_until_release() {
        let ctx = Context::default();
        let rows = customers(3);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let name_width = |ctx: &Context, state_id: Id| {
            GridState::load(ctx, state_id)
                .and_then(|state| state.columns().width("name"))
        };

        let output = show_customers(&ctx, vec![], &rows, false, &calls);
        let state_id = output.state_id;
        // Right edge of the 120 wide "name" header cell.
        let handle = output.response.rect.left_top() + vec2(118.0, 14.0);

        show_customers(
            &ctx,
            vec![Event::PointerMoved(handle), pointer_button(handle, true)],
            &rows,
            false,
            &calls,
        );
        show_customers(&ctx, vec![Event::PointerMoved(handle + vec2(40.0, 0.0))], &rows, false, &calls);
        assert!(GridState::load(&ctx, state_id).unwrap().resize().is_dragging());

        show_customers(&ctx, vec![], &rows, false, &calls);
        assert_eq!(name_width(&ctx, state_id), Some(160.0));

        show_customers(&ctx, vec![Event::PointerMoved(handle + vec2(80.0, 0.0))], &rows, false, &calls);
        assert_eq!(name_width(&ctx, state_id), Some(200.0));

        let far_left = pos2(handle.x - 500.0, handle.y);
        show_customers(&ctx, vec![Event::PointerMoved(far_left)], &rows, false, &calls);
        assert_eq!(name_width(&ctx, state_id), Some(MIN_COLUMN_WIDTH));

        show_customers(&ctx, vec![pointer_button(far_left, false)], &rows, false, &calls);
        assert!(!GridState::load(&ctx, state_id).unwrap().resize().is_dragging());

        show_customers(&ctx, vec![Event::PointerMoved(handle + vec2(300.0, 0.0))], &rows, false, &calls);
        assert_eq!(name_width(&ctx, state_id), Some(MIN_COLUMN_WIDTH));
        assert!(calls.borrow().is_empty());
    }
}
