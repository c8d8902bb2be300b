//! List pages for the customers, employees and suppliers of a back-office app.
//!
//! Each page shows a [`egui_data_grid::DataGrid`] over the rows of a
//! [`ListSource`], usually the backend's HTTP list endpoint
//! ([`ListEntity::http_source`]). Committing a filter in the grid re-queries
//! the source; the grid shows its loading overlay until the rows are back.
//!
//! ```
//! # egui::__run_test_ui(|ui| {
//! use std::sync::Arc;
//! use entity_lists::{Customer, ListPage, MemoryListSource};
//!
//! let source = MemoryListSource::new(vec![Customer {
//!     id: 1,
//!     name: "Ann Arbor Ltd".to_owned(),
//!     ..Default::default()
//! }]);
//! let mut page = ListPage::new(ui.ctx(), Arc::new(source));
//! page.ui(ui);
//! # });
//! ```

mod export;
mod model;
mod page;
mod pages;
mod query;
mod source;

pub use crate::{
    export::{
        ExportError, customers_to_xml, employees_to_xml, suppliers_to_xml, to_xml, write_file,
    },
    model::{Category, Customer, Department, Employee, Supplier},
    page::{ListPage, NOTICE_TIMEOUT, Notice, NoticeKind},
    pages::ListEntity,
    query::{ListQuery, ListRecord, contains_ignore_case},
    source::{HttpListSource, ListError, ListSource, MemoryListSource, OnListed},
};
