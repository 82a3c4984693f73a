//! Core data types for time-series rows.
//!
//! A table row is a fixed-position list of typed [`Cell`]s. The first few
//! cells of every row are internal columns (host, worker and timestamp,
//! optionally the original key); the remaining cells carry one record field
//! each. A [`ColumnDescriptor`] list of the same length names and types
//! every position.

use bytes::Bytes;

/// Name of the host column.
pub const HOST_COLUMN: &str = "host";

/// Name of the worker column.
pub const WORKER_COLUMN: &str = "worker";

/// Name of the timestamp column.
pub const TIME_COLUMN: &str = "time";

/// Name of the column holding the original record key.
pub const ORIGINAL_KEY_COLUMN: &str = "original_key";

/// Worker label written by the batcher regardless of the key's worker part.
pub const WORKER_LABEL: &str = "worker";

/// A single typed value in a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// UTF-8 text, stored as raw bytes.
    Varchar(Bytes),
    SInt64(i64),
    Double(f64),
    Boolean(bool),
    /// Milliseconds since the epoch.
    Timestamp(i64),
    /// Opaque bytes.
    Blob(Bytes),
}

impl Cell {
    /// Creates a text cell.
    pub fn varchar(value: impl Into<Bytes>) -> Self {
        Cell::Varchar(value.into())
    }

    /// Returns the column type this cell belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Cell::Varchar(_) => ColumnType::Varchar,
            Cell::SInt64(_) => ColumnType::SInt64,
            Cell::Double(_) => ColumnType::Double,
            Cell::Boolean(_) => ColumnType::Boolean,
            Cell::Timestamp(_) => ColumnType::Timestamp,
            Cell::Blob(_) => ColumnType::Blob,
        }
    }

    /// Returns the cell as record field bytes.
    ///
    /// Text and blob cells are returned as-is; other cells are rendered as
    /// their decimal or `true`/`false` text.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Cell::Varchar(bytes) | Cell::Blob(bytes) => bytes.clone(),
            Cell::SInt64(v) | Cell::Timestamp(v) => Bytes::from(v.to_string()),
            Cell::Double(v) => Bytes::from(v.to_string()),
            Cell::Boolean(v) => Bytes::from(v.to_string()),
        }
    }
}

/// Column types of a time-series table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Varchar,
    SInt64,
    Double,
    Boolean,
    Timestamp,
    Blob,
}

/// Name and type of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

/// Rows returned by a table query together with their column descriptors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::varchar(Cell::varchar("abc"), "abc")]
    #[case::blob(Cell::Blob(Bytes::from_static(b"\x00\x01")), "\x00\x01")]
    #[case::sint64(Cell::SInt64(-42), "-42")]
    #[case::timestamp(Cell::Timestamp(1700000000000), "1700000000000")]
    #[case::double(Cell::Double(12.5), "12.5")]
    #[case::boolean(Cell::Boolean(true), "true")]
    fn should_render_cell_as_bytes(#[case] cell: Cell, #[case] expected: &str) {
        // when
        let bytes = cell.to_bytes();

        // then
        assert_eq!(bytes, Bytes::from(expected.to_string()));
    }

    #[test]
    fn should_report_column_type_of_cell() {
        // given
        let cells = [
            Cell::varchar("h"),
            Cell::SInt64(1),
            Cell::Double(0.5),
            Cell::Boolean(false),
            Cell::Timestamp(1),
            Cell::Blob(Bytes::new()),
        ];

        // when
        let types: Vec<ColumnType> = cells.iter().map(Cell::column_type).collect();

        // then
        assert_eq!(
            types,
            vec![
                ColumnType::Varchar,
                ColumnType::SInt64,
                ColumnType::Double,
                ColumnType::Boolean,
                ColumnType::Timestamp,
                ColumnType::Blob,
            ]
        );
    }
}
