// File: ./src/model.rs
// Row records and the JSON payloads exchanged with the Sheets values API.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Date layout of the fifth column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Zero-based index of the date column.
pub const DATE_COLUMN: usize = 4;

/// Number of columns a complete row carries.
pub const RECORD_WIDTH: usize = 5;

/// One row of cells as the service returns it.
pub type Row = Vec<Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
}

impl Record {
    /// Cells in column order. The id stays numeric, the date is written as text.
    pub fn to_row(&self) -> Row {
        vec![
            Value::from(self.id),
            Value::from(self.name.clone()),
            Value::from(self.email.clone()),
            Value::from(self.phone.clone()),
            Value::from(self.date.format(DATE_FORMAT).to_string()),
        ]
    }
}

/// Text form of a cell, as the service would render it.
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    // The service omits `values` entirely for an empty range.
    #[serde(default)]
    pub values: Vec<Row>,
}

impl ValueRange {
    pub fn rows(range: &str, values: Vec<Row>) -> Self {
        Self {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: u64,
    #[serde(default)]
    pub updated_columns: u64,
    #[serde(default)]
    pub updated_cells: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClearValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub cleared_range: Option<String>,
}
