//! What a list endpoint does with the committed filters: a case-insensitive
//! substring match per field, all fields combined with AND.

use std::borrow::Cow;

use egui_data_grid::FilterEntry;

use crate::model::{Customer, Employee, Supplier};

/// Does `haystack` contain `needle`, ignoring case?
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A row a list endpoint can filter and sort.
pub trait ListRecord {
    /// The value of a filterable field, `None` if `name` isn't one.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;

    /// The primary name field; lists are sorted ascending by it.
    fn sort_name(&self) -> Cow<'_, str>;
}

/// Field constraints of one list request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    constraints: Vec<(String, String)>,
}

impl ListQuery {
    /// Build a query from the committed filters of a grid, skipping blank ones.
    pub fn from_filters(filters: &[FilterEntry]) -> Self {
        Self {
            constraints: filters
                .iter()
                .filter(|entry| !entry.is_blank())
                .map(|entry| (entry.column_id.clone(), entry.value.clone()))
                .collect(),
        }
    }

    #[inline]
    pub fn with(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.constraints.push((field.into(), needle.into()));
        self
    }

    pub fn constraints(&self) -> &[(String, String)] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Every constraint on a field the record knows must match.
    ///
    /// Constraints on fields the record doesn't have are ignored, the same way
    /// the endpoint ignores unknown query parameters.
    pub fn matches<R: ListRecord + ?Sized>(&self, record: &R) -> bool {
        self.constraints.iter().all(|(field, needle)| {
            record
                .field(field)
                .is_none_or(|value| contains_ignore_case(&value, needle))
        })
    }

    /// `name=Ann&email=example.org`, URL-encoded, as sent to a list endpoint.
    pub fn to_query_string(&self) -> String {
        self.constraints
            .iter()
            .map(|(field, needle)| {
                format!("{}={}", urlencoding::encode(field), urlencoding::encode(needle))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl ListRecord for Customer {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            _ => None,
        }
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl ListRecord for Employee {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Owned(self.full_name())),
            "code" => Some(Cow::Borrowed(&self.code)),
            "email" => Some(Cow::Borrowed(&self.email)),
            _ => None,
        }
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.last_name, self.first_name))
    }
}

impl ListRecord for Supplier {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            _ => None,
        }
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, email: &str) -> Customer {
        Customer {
            name: name.to_owned(),
            email: email.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_filters_are_dropped() {
        let query = ListQuery::from_filters(&[
            FilterEntry::new("name", "Ann"),
            FilterEntry::new("email", "  "),
            FilterEntry::new("phone", ""),
        ]);
        assert_eq!(query.constraints(), &[("name".to_owned(), "Ann".to_owned())]);
        assert!(ListQuery::from_filters(&[]).is_empty());
    }

    #[test]
    fn match_ignores_case_and_unknown_fields() {
        let ann = customer("Annabel Lee", "ANN@EXAMPLE.ORG");
        assert!(ListQuery::default().with("name", "annab").matches(&ann));
        assert!(ListQuery::default().with("email", "example.org").matches(&ann));
        assert!(ListQuery::default().with("phone", "zzz").matches(&ann));
        assert!(
            !ListQuery::default()
                .with("name", "ann")
                .with("email", "other.org")
                .matches(&ann)
        );
    }

    #[test]
    fn employees_match_on_full_name() {
        let employee = Employee {
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            code: "E042".to_owned(),
            ..Default::default()
        };
        assert!(ListQuery::default().with("name", "ce hop").matches(&employee));
        assert!(ListQuery::default().with("code", "e04").matches(&employee));
        assert_eq!(employee.sort_name(), "Hopper Grace");
    }

    #[test]
    fn query_string_is_url_encoded() {
        let query = ListQuery::default()
            .with("name", "Ann & Co")
            .with("email", "a@b.it");
        assert_eq!(query.to_query_string(), "name=Ann%20%26%20Co&email=a%40b.it");
        assert_eq!(ListQuery::default().to_query_string(), "");
    }
}
