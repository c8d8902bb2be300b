//! XML export of the rows a list page currently has loaded.

use std::path::Path;

use serde::Serialize;

use crate::model::{Customer, Employee, Supplier};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a document, two spaces per indentation level.
///
/// The root element is named after the serde name of `document`.
pub fn to_xml<D: Serialize>(document: &D) -> Result<String, ExportError> {
    let mut xml = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    document.serialize(serializer)?;
    Ok(xml)
}

/// Write `xml` to `path`, replacing any existing file.
pub fn write_file(path: &Path, xml: &str) -> Result<(), ExportError> {
    std::fs::write(path, xml)?;
    log::info!("Exported {} bytes to {}", xml.len(), path.display());
    Ok(())
}

#[derive(Serialize)]
struct CodeDescription<'a> {
    code: &'a str,
    description: &'a str,
}

impl<'a> CodeDescription<'a> {
    fn new(code: Option<&'a str>, description: Option<&'a str>) -> Self {
        Self {
            code: code.unwrap_or_default(),
            description: description.unwrap_or_default(),
        }
    }
}

// ----------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename = "customers")]
struct CustomersXml<'a> {
    customer: Vec<CustomerXml<'a>>,
}

#[derive(Serialize)]
struct CustomerXml<'a> {
    id: i32,
    iban: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    category: CodeDescription<'a>,
}

pub fn customers_to_xml(rows: &[Customer]) -> Result<String, ExportError> {
    to_xml(&CustomersXml {
        customer: rows
            .iter()
            .map(|c| CustomerXml {
                id: c.id,
                iban: &c.iban,
                name: &c.name,
                email: &c.email,
                phone: &c.phone,
                category: CodeDescription::new(
                    c.category.as_ref().map(|cat| cat.code.as_str()),
                    c.category.as_ref().map(|cat| cat.description.as_str()),
                ),
            })
            .collect(),
    })
}

#[derive(Serialize)]
#[serde(rename = "employees")]
struct EmployeesXml<'a> {
    employee: Vec<EmployeeXml<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeXml<'a> {
    id: i32,
    code: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    address: &'a str,
    email: &'a str,
    phone: &'a str,
    department: CodeDescription<'a>,
}

pub fn employees_to_xml(rows: &[Employee]) -> Result<String, ExportError> {
    to_xml(&EmployeesXml {
        employee: rows
            .iter()
            .map(|e| EmployeeXml {
                id: e.id,
                code: &e.code,
                first_name: &e.first_name,
                last_name: &e.last_name,
                address: &e.address,
                email: &e.email,
                phone: &e.phone,
                department: CodeDescription::new(
                    e.department.as_ref().map(|d| d.code.as_str()),
                    e.department.as_ref().map(|d| d.description.as_str()),
                ),
            })
            .collect(),
    })
}

#[derive(Serialize)]
#[serde(rename = "suppliers")]
struct SuppliersXml<'a> {
    supplier: &'a [Supplier],
}

pub fn suppliers_to_xml(rows: &[Supplier]) -> Result<String, ExportError> {
    to_xml(&SuppliersXml { supplier: rows })
}
