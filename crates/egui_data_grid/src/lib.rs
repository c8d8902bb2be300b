//! A data grid for [`egui`]: the rows are fetched and filtered by the host,
//! the grid shows them a page at a time with per-column text filters and
//! columns the user can resize.
//!
//! Filter inputs keep two values per column. What is typed is the *draft*;
//! it is *committed* when the input loses focus or Enter is pressed, and only
//! a commit that changes the value is reported to the host. That way the host
//! queries its backend once per confirmed filter, not once per keystroke.
//!
//! ## Feature flags
//! * `serde`: derive `Serialize`/`Deserialize` on [`FilterEntry`], [`FilterState`]
//!   and [`Pagination`].

#![allow(clippy::float_cmp)]

mod column;
mod filter;
mod grid;
mod layout;
mod overlay;
mod pagination;
pub mod resize;
mod style;

pub use crate::{
    column::{ColumnRegistry, DEFAULT_COLUMN_WIDTH, GridColumn, MIN_COLUMN_WIDTH},
    filter::{CommitTrigger, FilterEntry, FilterSource, FilterState},
    grid::{BodyContent, DataGrid, GridOutput, GridState},
    pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, Pagination, slice_bounds},
    resize::{ResizeConfig, ResizeController, ResizeSession},
    style::GridStyle,
};
