//! Keyed row layout and conversion of query results back into records.

use common::Record;

use crate::error::Result;
use crate::key::RowKey;
use crate::model::{
    Cell, ColumnDescriptor, ColumnType, HOST_COLUMN, ORIGINAL_KEY_COLUMN, QueryResult, Row,
    TIME_COLUMN, WORKER_COLUMN,
};

/// Layout of the internal columns leading every row.
///
/// Rows always start with host, worker and timestamp. Storing the original
/// record key adds a fourth internal column; it costs an extra cell per row
/// and is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowLayout {
    pub store_original_key: bool,
}

impl RowLayout {
    pub fn new(store_original_key: bool) -> Self {
        Self { store_original_key }
    }

    /// Number of internal columns leading every row.
    pub fn internal_columns(&self) -> usize {
        if self.store_original_key { 4 } else { 3 }
    }

    /// Column descriptors for rows built from `record`: the internal
    /// columns, then one text column per field in iteration order.
    pub fn column_descriptors_for(&self, record: &Record) -> Vec<ColumnDescriptor> {
        let mut columns = Vec::with_capacity(self.internal_columns() + record.len());
        columns.push(ColumnDescriptor::new(HOST_COLUMN, ColumnType::Varchar));
        columns.push(ColumnDescriptor::new(WORKER_COLUMN, ColumnType::Varchar));
        columns.push(ColumnDescriptor::new(TIME_COLUMN, ColumnType::Timestamp));
        if self.store_original_key {
            columns.push(ColumnDescriptor::new(
                ORIGINAL_KEY_COLUMN,
                ColumnType::Varchar,
            ));
        }
        columns.extend(
            record
                .names()
                .map(|name| ColumnDescriptor::new(name, ColumnType::Varchar)),
        );
        columns
    }

    /// Builds a row from a `timestamp,original_key,host,worker` key, taking
    /// host and worker from the key.
    pub fn as_row(&self, key: &str, record: &Record) -> Result<Row> {
        let key = RowKey::parse(key)?;
        let mut cells = Vec::with_capacity(self.internal_columns() + record.len());
        cells.push(Cell::varchar(key.host.to_string()));
        cells.push(Cell::varchar(key.worker.to_string()));
        cells.push(Cell::Timestamp(key.timestamp));
        if self.store_original_key {
            cells.push(Cell::varchar(key.original_key.to_string()));
        }
        cells.extend(record.iter().map(|(_, value)| Cell::Varchar(value.clone())));
        Ok(Row::new(cells))
    }

    /// Like [`as_row`](Self::as_row), also returning the row's column
    /// descriptors.
    pub fn as_row_with_columns(
        &self,
        key: &str,
        record: &Record,
    ) -> Result<(Vec<ColumnDescriptor>, Row)> {
        let row = self.as_row(key, record)?;
        Ok((self.column_descriptors_for(record), row))
    }

    /// Converts query rows back into records, skipping the internal columns
    /// and naming each remaining cell after its column.
    pub fn rows_to_records(&self, result: &QueryResult) -> Vec<Record> {
        let skip = self.internal_columns();
        let names = result.columns.get(skip..).unwrap_or_default();
        result
            .rows
            .iter()
            .map(|row| {
                names
                    .iter()
                    .zip(row.iter().skip(skip))
                    .map(|(column, cell)| (column.name.as_str(), cell.to_bytes()))
                    .collect::<Record>()
            })
            .collect()
    }
}

/// Column descriptors for the default layout.
pub fn column_descriptors_for(record: &Record) -> Vec<ColumnDescriptor> {
    RowLayout::default().column_descriptors_for(record)
}

/// Converts query rows back into records using the default layout.
pub fn rows_to_records(result: &QueryResult) -> Vec<Record> {
    RowLayout::default().rows_to_records(result)
}
