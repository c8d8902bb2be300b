//! Per-column text filters kept in two parallel sets.
//!
//! The *draft* set follows every keystroke in a filter input and is never seen
//! by the host. The *committed* set only changes when the user confirms a value
//! (focus lost or Enter pressed), and every real change to it is handed to the
//! host so it can query its backend again.

use enum_map::{Enum, EnumMap};

/// One column constraint: the text typed into the filter input of `column_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FilterEntry {
    pub column_id: String,
    pub value: String,
}

impl FilterEntry {
    pub fn new(column_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            value: value.into(),
        }
    }

    /// A blank entry constrains nothing; hosts skip it when building a query.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Which of the two filter sets to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Enum)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FilterSource {
    /// What is currently typed in the input.
    Draft,

    /// What the host was last told about.
    Committed,
}

/// The UI event that promoted a draft value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitTrigger {
    Blur,
    Enter,
}

/// Draft and committed filter values of one grid.
///
/// Each set holds at most one entry per column id, in the order the columns
/// were first filtered.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FilterState {
    sets: EnumMap<FilterSource, Vec<FilterEntry>>,
}

impl FilterState {
    /// Record what is typed in the filter input of `column_id`.
    ///
    /// No validation: an empty string is a valid draft meaning "no filter".
    pub fn set_draft(&mut self, column_id: &str, value: impl Into<String>) {
        upsert(&mut self.sets[FilterSource::Draft], column_id, value.into());
    }

    /// Promote `value` to the committed set.
    ///
    /// Returns the full committed set if that changed it, and `None` if the
    /// column was already committed with exactly this value.
    pub fn commit(&mut self, column_id: &str, value: &str) -> Option<Vec<FilterEntry>> {
        if self.value_of(column_id, FilterSource::Committed) == value {
            return None;
        }
        let committed = &mut self.sets[FilterSource::Committed];
        upsert(committed, column_id, value.to_owned());
        Some(committed.clone())
    }

    /// The value of `column_id` in the given set, or `""` if it has none.
    pub fn value_of(&self, column_id: &str, source: FilterSource) -> &str {
        self.sets[source]
            .iter()
            .find(|entry| entry.column_id == column_id)
            .map_or("", |entry| entry.value.as_str())
    }

    pub fn entries(&self, source: FilterSource) -> &[FilterEntry] {
        &self.sets[source]
    }

    pub fn committed(&self) -> &[FilterEntry] {
        self.entries(FilterSource::Committed)
    }

    /// Does the draft of `column_id` differ from what is committed?
    pub fn is_dirty(&self, column_id: &str) -> bool {
        self.value_of(column_id, FilterSource::Draft)
            != self.value_of(column_id, FilterSource::Committed)
    }

    /// Drop entries of columns that are no longer filterable.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) {
        for set in self.sets.values_mut() {
            set.retain(|entry| keep(&entry.column_id));
        }
    }
}

fn upsert(set: &mut Vec<FilterEntry>, column_id: &str, value: String) {
    if let Some(entry) = set.iter_mut().find(|entry| entry.column_id == column_id) {
        entry.value = value;
    } else {
        set.push(FilterEntry {
            column_id: column_id.to_owned(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_reads_latest_value_and_leaves_committed_alone() {
        let mut filters = FilterState::default();
        for value in ["A", "An", "Ann", "Anna", "Ann"] {
            filters.set_draft("name", value);
        }
        assert_eq!(filters.value_of("name", FilterSource::Draft), "Ann");
        assert_eq!(filters.value_of("name", FilterSource::Committed), "");
        assert!(filters.committed().is_empty());
        assert_eq!(filters.entries(FilterSource::Draft).len(), 1);
        assert!(filters.is_dirty("name"));
    }

    #[test]
    fn commit_same_value_twice_changes_once() {
        let mut filters = FilterState::default();
        assert_eq!(
            filters.commit("name", "Ann"),
            Some(vec![FilterEntry::new("name", "Ann")])
        );
        assert_eq!(filters.commit("name", "Ann"), None);
    }

    #[test]
    fn commit_publishes_every_committed_column_in_order() {
        let mut filters = FilterState::default();
        filters.commit("name", "Ann");
        let published = filters.commit("email", "example.org");
        assert_eq!(
            published,
            Some(vec![
                FilterEntry::new("name", "Ann"),
                FilterEntry::new("email", "example.org"),
            ])
        );

        let published = filters.commit("name", "Bob");
        assert_eq!(
            published,
            Some(vec![
                FilterEntry::new("name", "Bob"),
                FilterEntry::new("email", "example.org"),
            ])
        );
    }

    #[test]
    fn empty_commit_clears_but_keeps_entry() {
        let mut filters = FilterState::default();
        // Committing an empty value for an unseen column is not a change.
        assert_eq!(filters.commit("name", ""), None);

        filters.commit("name", "Ann");
        let published = filters.commit("name", "").unwrap();
        assert_eq!(published, vec![FilterEntry::new("name", "")]);
        assert!(published[0].is_blank());
        assert_eq!(filters.value_of("name", FilterSource::Committed), "");
    }

    #[test]
    fn retain_columns_drops_both_sets() {
        let mut filters = FilterState::default();
        filters.set_draft("name", "x");
        filters.set_draft("phone", "1");
        filters.commit("phone", "1");
        filters.retain_columns(|id| id == "name");

        assert_eq!(filters.value_of("phone", FilterSource::Draft), "");
        assert!(filters.committed().is_empty());
        assert_eq!(filters.value_of("name", FilterSource::Draft), "x");
    }

    #[test]
    fn whitespace_entries_are_blank() {
        assert!(FilterEntry::new("name", "   ").is_blank());
        assert!(!FilterEntry::new("name", " a ").is_blank());
    }
}
