//! Data model for tabular inventory data

mod kind;
mod schema;
mod table;

pub use kind::TableKind;
pub use schema::{header_columns, Column};
pub use table::{CellValue, Record, Row, Table};
