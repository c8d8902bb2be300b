//! Where list pages get their rows from.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::query::{ListQuery, ListRecord};

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("list source unavailable: {0}")]
    Unavailable(String),

    #[error("list endpoint returned {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("failed to decode rows: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Receives the outcome of one list request, possibly on another thread.
pub type OnListed<T> = Box<dyn FnOnce(Result<Vec<T>, ListError>) + Send>;

/// A list endpoint: rows matching the query, sorted ascending by their primary name.
pub trait ListSource<T>: Send + Sync {
    /// Start a request. `on_done` is called exactly once, right away or later.
    fn list(&self, query: &ListQuery, on_done: OnListed<T>);
}

/// Serves a fixed set of rows, filtered and sorted like the real endpoints.
#[derive(Clone, Debug, Default)]
pub struct MemoryListSource<T> {
    rows: Vec<T>,
}

impl<T> MemoryListSource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }
}

impl<T: ListRecord + Clone> MemoryListSource<T> {
    pub fn query(&self, query: &ListQuery) -> Vec<T> {
        let mut rows: Vec<T> = self
            .rows
            .iter()
            .filter(|row| query.matches(*row))
            .cloned()
            .collect();
        rows.sort_by_cached_key(|row| row.sort_name().to_lowercase());
        log::debug!("Listed {} of {} rows for {query:?}", rows.len(), self.rows.len());
        rows
    }
}

impl<T> ListSource<T> for MemoryListSource<T>
where
    T: ListRecord + Clone + Send + Sync,
{
    fn list(&self, query: &ListQuery, on_done: OnListed<T>) {
        on_done(Ok(self.query(query)));
    }
}

/// A backend list endpoint, e.g. `GET http://localhost:5000/api/customer/list?name=Ann`.
///
/// The endpoint answers with a JSON array of rows.
pub struct HttpListSource<T> {
    url: String,
    rows: PhantomData<fn() -> T>,
}

impl<T> HttpListSource<T> {
    /// `path` is appended to `base_url`, e.g. `"/api/suppliers/list"`.
    pub fn new(base_url: &str, path: &str) -> Self {
        Self {
            url: format!("{}{path}", base_url.trim_end_matches('/')),
            rows: PhantomData,
        }
    }

    /// The URL requested for `query`. Blank queries send no query string.
    pub fn request_url(&self, query: &ListQuery) -> String {
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query.to_query_string())
        }
    }
}

impl<T> std::fmt::Debug for HttpListSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpListSource").field("url", &self.url).finish()
    }
}

impl<T: DeserializeOwned + 'static> ListSource<T> for HttpListSource<T> {
    fn list(&self, query: &ListQuery, on_done: OnListed<T>) {
        let url = self.request_url(query);
        log::debug!("GET {url}");
        ehttp::fetch(ehttp::Request::get(&url), move |result| {
            let rows = result
                .map_err(ListError::Unavailable)
                .and_then(|response| decode_rows(response.status, &response.status_text, &response.bytes));
            if let Err(err) = &rows {
                log::warn!("GET {url} failed: {err}");
            }
            on_done(rows);
        });
    }
}

/// Rows from the body of a list response.
fn decode_rows<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    bytes: &[u8],
) -> Result<Vec<T>, ListError> {
    if !(200..300).contains(&status) {
        return Err(ListError::Status {
            status,
            status_text: status_text.to_owned(),
        });
    }
    Ok(serde_json::from_slice(bytes)?)
}
