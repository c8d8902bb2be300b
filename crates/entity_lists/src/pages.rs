//! Per-entity page setup: title, columns and export format.

use egui_data_grid::GridColumn;
use serde::de::DeserializeOwned;

use crate::{
    export::{self, ExportError},
    model::{Customer, Employee, Supplier},
    query::ListRecord,
    source::HttpListSource,
};

/// An entity that has a list page.
pub trait ListEntity: ListRecord + DeserializeOwned + Clone + Send + Sync + 'static {
    const TITLE: &'static str;

    /// File name used by the XML export.
    const EXPORT_FILE: &'static str;

    /// Path of the backend list endpoint.
    const LIST_PATH: &'static str;

    /// The list endpoint of the backend at `base_url`.
    fn http_source(base_url: &str) -> HttpListSource<Self> {
        HttpListSource::new(base_url, Self::LIST_PATH)
    }

    /// Stable row identity.
    fn key(&self) -> i32;

    fn columns() -> Vec<GridColumn<'static, Self>>;

    fn to_xml(rows: &[Self]) -> Result<String, ExportError>;
}

fn text_column<T>(
    id: &str,
    label: &str,
    width: f32,
    value: impl Fn(&T) -> String + 'static,
) -> GridColumn<'static, T> {
    GridColumn::new(id, label).initial_width(width).value(value)
}

impl ListEntity for Customer {
    const TITLE: &'static str = "Customers";
    const EXPORT_FILE: &'static str = "customers.xml";
    const LIST_PATH: &'static str = "/api/customer/list";

    fn key(&self) -> i32 {
        self.id
    }

    fn columns() -> Vec<GridColumn<'static, Self>> {
        vec![
            text_column("name", "Name", 120.0, |c: &Self| c.name.clone()).filterable(true),
            text_column("email", "Email", 200.0, |c: &Self| c.email.clone()).filterable(true),
            text_column("category", "Category", 150.0, |c: &Self| {
                c.category
                    .as_ref()
                    .map(|cat| cat.description.clone())
                    .unwrap_or_default()
            })
            .cell(|ui, c: &Self| {
                ui.label(c.category.as_ref().map_or("-", |cat| cat.description.as_str()));
            }),
            text_column("address", "Address", 200.0, |c: &Self| c.address.clone()),
            text_column("iban", "IBAN", 220.0, |c: &Self| c.iban.clone()),
            text_column("phone", "Phone", 120.0, |c: &Self| c.phone.clone()),
        ]
    }

    fn to_xml(rows: &[Self]) -> Result<String, ExportError> {
        export::customers_to_xml(rows)
    }
}

impl ListEntity for Employee {
    const TITLE: &'static str = "Employees";
    const EXPORT_FILE: &'static str = "employees.xml";
    const LIST_PATH: &'static str = "/api/employees/list";

    fn key(&self) -> i32 {
        self.id
    }

    fn columns() -> Vec<GridColumn<'static, Self>> {
        vec![
            text_column("name", "Name", 180.0, Self::full_name).filterable(true),
            text_column("code", "Code", 90.0, |e: &Self| e.code.clone()).filterable(true),
            text_column("department", "Department", 150.0, |e: &Self| {
                e.department
                    .as_ref()
                    .map(|d| d.description.clone())
                    .unwrap_or_default()
            })
            .cell(|ui, e: &Self| {
                ui.label(e.department.as_ref().map_or("-", |d| d.description.as_str()));
            }),
            text_column("address", "Address", 200.0, |e: &Self| e.address.clone()),
            text_column("email", "Email", 200.0, |e: &Self| e.email.clone()).filterable(true),
            text_column("phone", "Phone", 120.0, |e: &Self| e.phone.clone()),
        ]
    }

    fn to_xml(rows: &[Self]) -> Result<String, ExportError> {
        export::employees_to_xml(rows)
    }
}

impl ListEntity for Supplier {
    const TITLE: &'static str = "Suppliers";
    const EXPORT_FILE: &'static str = "suppliers.xml";
    const LIST_PATH: &'static str = "/api/suppliers/list";

    fn key(&self) -> i32 {
        self.id
    }

    fn columns() -> Vec<GridColumn<'static, Self>> {
        vec![
            text_column("name", "Name", 150.0, |s: &Self| s.name.clone()).filterable(true),
            text_column("address", "Address", 200.0, |s: &Self| s.address.clone()),
            text_column("email", "Email", 200.0, |s: &Self| s.email.clone()).filterable(true),
            text_column("phone", "Phone", 120.0, |s: &Self| s.phone.clone()),
        ]
    }

    fn to_xml(rows: &[Self]) -> Result<String, ExportError> {
        export::suppliers_to_xml(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ListQuery;

    /// Every filterable column must be a field the list endpoint filters on.
    fn filterable_columns_are_query_fields<E: ListEntity + Default>() {
        let row = E::default();
        for column in E::columns().iter().filter(|c| c.is_filterable()) {
            assert!(
                row.field(column.id()).is_some(),
                "{}: column {:?} is filterable but not a query field",
                E::TITLE,
                column.id()
            );
        }
    }

    #[test]
    fn filterable_columns_match_endpoints() {
        filterable_columns_are_query_fields::<Customer>();
        filterable_columns_are_query_fields::<Employee>();
        filterable_columns_are_query_fields::<Supplier>();
    }

    #[test]
    fn http_sources_point_at_the_list_endpoints() {
        let query = ListQuery::default().with("name", "Ann");
        assert_eq!(
            Customer::http_source("http://localhost:5000").request_url(&query),
            "http://localhost:5000/api/customer/list?name=Ann"
        );
        assert_eq!(
            Employee::http_source("http://localhost:5000").request_url(&ListQuery::default()),
            "http://localhost:5000/api/employees/list"
        );
        assert_eq!(
            Supplier::http_source("http://localhost:5000/").request_url(&ListQuery::default()),
            "http://localhost:5000/api/suppliers/list"
        );
    }

    #[test]
    fn column_values_match_cells() {
        let employee = Employee {
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            ..Default::default()
        };
        let columns = Employee::columns();
        assert_eq!(columns[0].value_of(&employee).as_deref(), Some("Grace Hopper"));
        assert_eq!(columns[2].value_of(&employee).as_deref(), Some(""));
    }
}
