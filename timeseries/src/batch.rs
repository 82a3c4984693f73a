//! Splitting benchmark records into time-series rows.
//!
//! Every row starts with the host, the constant [`WORKER_LABEL`] and a
//! timestamp. A batched record becomes `batch_count` rows with consecutive
//! timestamps, each carrying an equal slice of the record's fields in
//! iteration order. Fields left over by the integer division are not written.

use common::Record;

use crate::error::{Error, Result};
use crate::key::{BatchKey, key_as_timestamp};
use crate::model::{Cell, Row, WORKER_LABEL};
use crate::random::RandomSource;

/// Exclusive upper bound of the random integer cell.
const RANDOM_INT_BOUND: i64 = 1000;

/// Scale of the random float cell.
const RANDOM_DOUBLE_SCALE: f64 = 100.0;

fn internal_cells(host: &str, timestamp: i64) -> Vec<Cell> {
    vec![
        Cell::varchar(host.to_string()),
        Cell::varchar(WORKER_LABEL),
        Cell::Timestamp(timestamp),
    ]
}

/// Splits `record` into rows as described by the batch key `key`.
///
/// With the all-type schema flag set, each row gets an integer in
/// `0..1000`, the original key, a float in `0..100` and a boolean instead of
/// record fields.
pub fn as_batched_rows(
    key: &str,
    record: &Record,
    random: &mut dyn RandomSource,
) -> Result<Vec<Row>> {
    let batch = BatchKey::parse(key)?;
    let fields = record.fields();
    let len = fields.len();
    let batch_size = len / batch.batch_count;

    let mut rows = Vec::new();
    let mut timestamp = batch.timestamp;
    for i in 0..batch.batch_count {
        let batch_start = batch_size * i;
        let batch_end = len / batch.batch_count + batch_start;

        let mut cells = internal_cells(&batch.host, timestamp);
        if batch.use_all_type_schema {
            cells.push(Cell::SInt64(random.next_int(RANDOM_INT_BOUND)));
            cells.push(Cell::varchar(batch.original_key.clone()));
            cells.push(Cell::Double(random.next_double() * RANDOM_DOUBLE_SCALE));
            cells.push(Cell::Boolean(random.next_bool()));
        } else {
            cells.extend(
                fields[batch_start..batch_end]
                    .iter()
                    .map(|field| Cell::Varchar(field.value.clone())),
            );
        }
        rows.push(Row::new(cells));

        if i + 1 < batch.batch_count {
            timestamp = timestamp
                .checked_add(1)
                .ok_or_else(|| Error::invalid_key(key, "timestamp overflow"))?;
        }
    }

    tracing::trace!(
        key,
        rows = rows.len(),
        dropped = len - batch_size * batch.batch_count,
        "batched record"
    );
    Ok(rows)
}

/// Builds one row for a plain workload key such as `user1234`, using the
/// numeric part of the key as the timestamp.
pub fn as_single_row(key: &str, record: &Record, host: &str) -> Result<Row> {
    let timestamp = key_as_timestamp(key)?;
    let mut cells = internal_cells(host, timestamp);
    cells.extend(record.iter().map(|(_, value)| Cell::Varchar(value.clone())));
    Ok(Row::new(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedSource;
    use bytes::Bytes;
    use proptest::prelude::*;

    fn record_with_fields(n: usize) -> Record {
        (0..n)
            .map(|i| (format!("field{}", i), format!("value{}", i)))
            .collect()
    }

    fn no_random() -> FixedSource {
        FixedSource::new(vec![], vec![], vec![])
    }

    fn text(cell: &Cell) -> &[u8] {
        match cell {
            Cell::Varchar(bytes) => bytes.as_ref(),
            other => panic!("expected varchar, got {:?}", other),
        }
    }

    #[test]
    fn should_split_ten_fields_into_two_rows() {
        // given
        let record = record_with_fields(10);

        // when
        let rows = as_batched_rows("1000,user1,node1,w3,2", &record, &mut no_random()).unwrap();

        // then
        assert_eq!(rows.len(), 2);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 3 + 5);
            assert_eq!(row.cells[0], Cell::varchar("node1"));
            assert_eq!(row.cells[1], Cell::varchar("worker"));
            assert_eq!(row.cells[2], Cell::Timestamp(1000 + i as i64));
            for j in 0..5 {
                let expected = format!("value{}", i * 5 + j);
                assert_eq!(text(&row.cells[3 + j]), expected.as_bytes());
            }
        }
    }

    #[test]
    fn should_drop_remainder_fields() {
        // given
        let record = record_with_fields(7);

        // when
        let rows = as_batched_rows("0,k,h,w,3", &record, &mut no_random()).unwrap();

        // then
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 3 + 2));
        assert_eq!(text(&rows[2].cells[4]), b"value5");
    }

    #[test]
    fn should_write_only_internal_cells_when_batches_outnumber_fields() {
        // given
        let record = record_with_fields(2);

        // when
        let rows = as_batched_rows("10,k,h,w,4", &record, &mut no_random()).unwrap();

        // then
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 3));
        assert_eq!(rows[3].cells[2], Cell::Timestamp(13));
    }

    #[test]
    fn should_write_random_typed_cells_for_all_type_schema() {
        // given
        let record = record_with_fields(10);
        let mut random = FixedSource::new(vec![17, 999], vec![0.5, 0.25], vec![true, false]);

        // when
        let rows = as_batched_rows("5,user9,h,w,2,true", &record, &mut random).unwrap();

        // then
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].cells[3..],
            [
                Cell::SInt64(17),
                Cell::varchar("user9"),
                Cell::Double(50.0),
                Cell::Boolean(true),
            ]
        );
        assert_eq!(
            rows[1].cells[3..],
            [
                Cell::SInt64(999),
                Cell::varchar("user9"),
                Cell::Double(25.0),
                Cell::Boolean(false),
            ]
        );
        assert_eq!(rows[1].cells[2], Cell::Timestamp(6));
    }

    #[test]
    fn should_ignore_worker_part_of_key() {
        // given
        let record = record_with_fields(1);

        // when
        let rows = as_batched_rows("1,k,h,custom-worker,1", &record, &mut no_random()).unwrap();

        // then
        assert_eq!(rows[0].cells[1], Cell::varchar(WORKER_LABEL));
    }

    #[test]
    fn should_reject_zero_batch_count() {
        // when
        let result = as_batched_rows("1,k,h,w,0", &record_with_fields(3), &mut no_random());

        // then
        assert!(matches!(result, Err(Error::InvalidBatchCount(_))));
    }

    #[test]
    fn should_reject_oversized_batch_count_without_panicking() {
        // given
        let key = format!("1,k,h,w,{}", usize::MAX);

        // when
        let result = as_batched_rows(&key, &Record::from_iter([("a", "1")]), &mut no_random());

        // then
        assert!(matches!(result, Err(Error::InvalidBatchCount(_))));
    }

    #[test]
    fn should_fail_on_timestamp_overflow() {
        // given
        let key = format!("{},k,h,w,2", i64::MAX);

        // when
        let result = as_batched_rows(&key, &record_with_fields(2), &mut no_random());

        // then
        assert!(matches!(result, Err(Error::InvalidKey { .. })));
    }

    #[test]
    fn should_build_single_row_from_workload_key() {
        // given
        let record = Record::from_iter([("a", "1"), ("b", "2")]);

        // when
        let row = as_single_row("user1234", &record, "node7").unwrap();

        // then
        assert_eq!(
            row.cells,
            vec![
                Cell::varchar("node7"),
                Cell::varchar("worker"),
                Cell::Timestamp(1234),
                Cell::Varchar(Bytes::from_static(b"1")),
                Cell::Varchar(Bytes::from_static(b"2")),
            ]
        );
    }

    #[test]
    fn should_reject_single_row_for_non_numeric_key() {
        // when
        let result = as_single_row("userabc", &Record::new(), "h");

        // then
        assert!(matches!(result, Err(Error::InvalidKey { .. })));
    }

    proptest! {
        #[test]
        fn should_write_batch_count_rows_of_equal_size(fields in 0usize..40, batches in 1usize..8) {
            let record = record_with_fields(fields);
            let key = format!("100,k,h,w,{}", batches);

            let rows = as_batched_rows(&key, &record, &mut no_random()).unwrap();

            prop_assert_eq!(rows.len(), batches);
            for (i, row) in rows.iter().enumerate() {
                prop_assert_eq!(row.len(), 3 + fields / batches);
                prop_assert_eq!(&row.cells[2], &Cell::Timestamp(100 + i as i64));
            }
        }
    }
}
