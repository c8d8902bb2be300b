//! A list page: binds a [`DataGrid`] to a [`ListSource`].
//!
//! Results come back over a channel that the page drains every frame; the
//! source's callback wakes the UI with a repaint. While a request runs the
//! grid shows its loading overlay.

use std::{path::PathBuf, sync::Arc, time::Duration};

use egui::{Color32, Ui};
use egui_data_grid::{DataGrid, FilterEntry};

use crate::{
    export::{self, ExportError},
    pages::ListEntity,
    query::ListQuery,
    source::{ListError, ListSource},
};

/// How long a notice stays up unless dismissed.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(6);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A dismissible message shown below the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,

    /// `ui.input().time` when first shown.
    shown_at: Option<f64>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            shown_at: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            shown_at: None,
        }
    }
}

struct Fetched<T> {
    generation: u64,
    result: Result<Vec<T>, ListError>,
}

pub struct ListPage<E: ListEntity> {
    ctx: egui::Context,
    source: Arc<dyn ListSource<E>>,
    rows: Vec<E>,
    loading: bool,
    notice: Option<Notice>,
    export_dir: PathBuf,

    /// Incremented per request; only the latest request's result is applied.
    generation: u64,
    tx: flume::Sender<Fetched<E>>,
    rx: flume::Receiver<Fetched<E>>,
}

impl<E: ListEntity> ListPage<E> {
    /// Create the page and start loading the unfiltered list.
    pub fn new(ctx: &egui::Context, source: Arc<dyn ListSource<E>>) -> Self {
        let (tx, rx) = flume::unbounded();
        let mut page = Self {
            ctx: ctx.clone(),
            source,
            rows: Vec::new(),
            loading: false,
            notice: None,
            export_dir: PathBuf::from("."),
            generation: 0,
            tx,
            rx,
        };
        page.request(&[]);
        page
    }

    /// Where the XML export is written (default: the working directory).
    #[inline]
    pub fn export_dir(mut self, export_dir: impl Into<PathBuf>) -> Self {
        self.export_dir = export_dir.into();
        self
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Query the source again with the committed filters of the grid.
    pub fn request(&mut self, filters: &[FilterEntry]) {
        let query = ListQuery::from_filters(filters);
        self.generation += 1;
        self.loading = true;

        let generation = self.generation;
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        log::debug!("{}: fetching #{generation} with {:?}", E::TITLE, query.to_query_string());

        self.source.list(
            &query,
            Box::new(move |result| {
                // The page may be gone by now.
                tx.send(Fetched { generation, result }).ok();
                ctx.request_repaint();
            }),
        );
    }

    /// Apply finished fetches. Returns `true` if anything arrived.
    pub fn poll(&mut self) -> bool {
        let mut any = false;
        while let Ok(fetched) = self.rx.try_recv() {
            self.apply(fetched);
            any = true;
        }
        any
    }

    fn apply(&mut self, fetched: Fetched<E>) {
        if fetched.generation != self.generation {
            log::debug!(
                "{}: dropping result of fetch #{}, #{} is newer",
                E::TITLE,
                fetched.generation,
                self.generation
            );
            return;
        }
        self.loading = false;
        match fetched.result {
            Ok(rows) => {
                log::debug!("{}: loaded {} rows", E::TITLE, rows.len());
                self.rows = rows;
            }
            Err(err) => {
                // Keep showing the rows we already have.
                log::error!("{}: fetch failed: {err}", E::TITLE);
                self.notice = Some(Notice::error(format!("Failed to load {}: {err}", E::TITLE.to_lowercase())));
            }
        }
    }

    /// Serialize the loaded rows and write them to the export directory.
    pub fn export(&self) -> Result<PathBuf, ExportError> {
        let xml = E::to_xml(&self.rows)?;
        let path = self.export_dir.join(E::EXPORT_FILE);
        export::write_file(&path, &xml)?;
        Ok(path)
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        profiling::function_scope!();

        self.poll();

        ui.vertical_centered(|ui| {
            ui.heading(E::TITLE);
            if ui
                .add_enabled(!self.loading, egui::Button::new("Export XML"))
                .clicked()
            {
                self.notice = Some(match self.export() {
                    Ok(path) => Notice::info(format!("Exported to {}", path.display())),
                    Err(err) => {
                        log::warn!("{}: export failed: {err}", E::TITLE);
                        Notice::error(format!("Export failed: {err}"))
                    }
                });
            }
        });
        ui.add_space(8.0);

        let output = DataGrid::new(E::TITLE)
            .columns(E::columns())
            .key(|row: &E| row.key())
            .loading(self.loading)
            .show(ui, &self.rows);
        if let Some(filters) = output.filter_change {
            self.request(&filters);
        }

        self.notice_ui(ui);
    }

    fn notice_ui(&mut self, ui: &mut Ui) {
        let Some(notice) = &mut self.notice else {
            return;
        };
        let now = ui.input(|i| i.time);
        let shown_at = *notice.shown_at.get_or_insert(now);
        let remaining = NOTICE_TIMEOUT.as_secs_f64() - (now - shown_at);
        if remaining <= 0.0 {
            self.notice = None;
            return;
        }
        ui.ctx()
            .request_repaint_after(Duration::from_secs_f64(remaining));

        let fill = match notice.kind {
            NoticeKind::Info => ui.visuals().extreme_bg_color,
            NoticeKind::Error => Color32::from_rgb(211, 47, 47),
        };
        let mut dismissed = false;
        ui.add_space(8.0);
        egui::Frame::new()
            .fill(fill)
            .inner_margin(8.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&notice.message).color(Color32::WHITE));
                    dismissed = ui.small_button("✕").clicked();
                });
            });
        if dismissed {
            self.notice = None;
        }
    }
}
