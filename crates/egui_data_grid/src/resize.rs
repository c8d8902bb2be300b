//! Column width resizing by dragging the handle at the right edge of a header cell.
//!
//! One [`ResizeController`] per grid, idle until the user presses a handle.
//! While a session is active the controller listens to the global pointer
//! stream, so the drag keeps working when the pointer leaves the handle, and
//! it gives that stream back on pointer-up or teardown.

use egui::{Context, CursorIcon, Id, Pos2, Rect, Sense, Ui, Vec2};

use crate::column::{ColumnRegistry, MIN_COLUMN_WIDTH};

/// Exclusive access to the global pointer stream during a resize session.
pub trait PointerCapture {
    fn acquire(&self);
    fn release(&self);
}

/// Captures the pointer by marking the handle widget as the one being dragged.
#[derive(Clone, Debug)]
pub struct ContextCapture {
    ctx: Context,
    id: Id,
}

impl ContextCapture {
    pub fn new(ctx: &Context, id: Id) -> Self {
        Self {
            ctx: ctx.clone(),
            id,
        }
    }
}

impl PointerCapture for ContextCapture {
    fn acquire(&self) {
        self.ctx.set_dragged_id(self.id);
    }

    fn release(&self) {
        if self.ctx.is_being_dragged(self.id) {
            self.ctx.stop_dragging();
        }
    }
}

/// Configuration for column resizing behavior.
#[derive(Clone, Copy, Debug)]
pub struct ResizeConfig {
    /// Whether column resizing is enabled.
    pub enabled: bool,

    /// No column gets narrower than this.
    pub min_width: f32,

    /// Width of the grab area at the right edge of each header cell.
    pub grab_width: f32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_width: MIN_COLUMN_WIDTH,
            grab_width: 5.0,
        }
    }
}

impl ResizeConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the minimum column width. Never below [`MIN_COLUMN_WIDTH`].
    #[inline]
    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width.max(MIN_COLUMN_WIDTH);
        self
    }

    #[inline]
    pub fn grab_width(mut self, grab_width: f32) -> Self {
        self.grab_width = grab_width;
        self
    }
}

/// Where a drag started: which column, the pointer x and the column width at that moment.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    pub column_id: String,
    pub anchor_x: f32,
    pub anchor_width: f32,
}

impl ResizeSession {
    /// Width of the column with the pointer at `pointer_x`.
    pub fn width_at(&self, pointer_x: f32, min_width: f32) -> f32 {
        (self.anchor_width + (pointer_x - self.anchor_x)).max(min_width)
    }
}

/// Idle, or dragging exactly one column.
#[derive(Clone, Debug, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_column(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.column_id.as_str())
    }

    /// The user pressed the resize handle of `column_id`.
    ///
    /// Ignored while another session is active. Returns `true` if a session started.
    pub fn press(
        &mut self,
        column_id: &str,
        pointer_x: f32,
        width: f32,
        capture: &impl PointerCapture,
    ) -> bool {
        if let Some(session) = &self.session {
            log::debug!(
                "Ignoring resize press on {column_id:?} while {:?} is being resized",
                session.column_id
            );
            return false;
        }
        capture.acquire();
        log::debug!("Resizing column {column_id:?} from width {width}");
        self.session = Some(ResizeSession {
            column_id: column_id.to_owned(),
            anchor_x: pointer_x,
            anchor_width: width,
        });
        true
    }

    /// The pointer moved to `pointer_x`. Returns the new width of the dragged column, if any.
    pub fn pointer_moved(
        &self,
        pointer_x: f32,
        registry: &mut ColumnRegistry,
        min_width: f32,
    ) -> Option<f32> {
        let session = self.session.as_ref()?;
        let width = session.width_at(pointer_x, min_width);
        registry.set_width(&session.column_id, width)
    }

    /// The pointer was released, wherever it is. Ends the session.
    pub fn release(&mut self, capture: &impl PointerCapture) {
        if let Some(session) = self.session.take() {
            log::debug!("Finished resizing column {:?}", session.column_id);
            capture.release();
        }
    }

    /// End any session without waiting for pointer-up, e.g. because the grid goes away.
    pub fn teardown(&mut self, capture: &impl PointerCapture) {
        if self.session.take().is_some() {
            capture.release();
        }
    }
}

/// Id of the resize handle of `column_id` within the grid `state_id`.
pub fn handle_id(state_id: Id, column_id: &str) -> Id {
    state_id.with("resize_column").with(column_id)
}

/// Show the resize handle on the right edge of a header cell and start a
/// session when it is pressed.
///
/// Double-clicking the handle puts the column back to its initial width.
pub fn column_resize_handle(
    ui: &Ui,
    controller: &mut ResizeController,
    registry: &mut ColumnRegistry,
    config: &ResizeConfig,
    state_id: Id,
    column_id: &str,
    header_rect: Rect,
) {
    if !config.enabled {
        return;
    }
    let Some(width) = registry.width(column_id) else {
        return;
    };

    let p0 = Pos2::new(header_rect.right() - config.grab_width, header_rect.top());
    let p1 = Pos2::new(header_rect.right(), header_rect.bottom());
    let interact_rect = Rect::from_min_max(p0, p1).expand2(Vec2::new(1.0, 0.0));

    let id = handle_id(state_id, column_id);
    let response = ui.interact(interact_rect, id, Sense::click_and_drag());

    if response.double_clicked() {
        registry.reset_width(column_id);
        return;
    }

    let press_origin = ui.input(|i| i.pointer.press_origin());
    if response.drag_started()
        && let Some(pos) = press_origin.or_else(|| response.interact_pointer_pos())
    {
        controller.press(column_id, pos.x, width, &ContextCapture::new(ui.ctx(), id));
    }

    let active = controller.active_column() == Some(column_id);
    if response.hovered() || active {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeColumn);
        let stroke = if active {
            ui.visuals().widgets.active.fg_stroke
        } else {
            ui.visuals().widgets.hovered.fg_stroke
        };
        ui.painter().vline(header_rect.right(), header_rect.y_range(), stroke);
    }
}

/// Advance an active session with this frame's pointer input, ending it
/// once the primary button is up.
pub fn drive_resize(
    ctx: &Context,
    controller: &mut ResizeController,
    registry: &mut ColumnRegistry,
    config: &ResizeConfig,
    state_id: Id,
) {
    let Some(column_id) = controller.active_column().map(ToOwned::to_owned) else {
        return;
    };
    let capture = ContextCapture::new(ctx, handle_id(state_id, &column_id));

    let (pointer_x, primary_down) =
        ctx.input(|i| (i.pointer.latest_pos().map(|p| p.x), i.pointer.primary_down()));

    if let Some(width) = pointer_x.and_then(|x| controller.pointer_moved(x, registry, config.min_width)) {
        log::trace!("Column {column_id:?} is {width} wide");
    }

    if primary_down {
        ctx.set_cursor_icon(CursorIcon::ResizeColumn);
    } else {
        controller.release(&capture);
    }
}
