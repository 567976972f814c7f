//! Parquet persistence for the cleaned-record table.
//!
//! The table is written wholesale each run, replacing any previous file.
//! Reads must return exactly what was written, column for column.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow_array::builder::{ListBuilder, StringBuilder};
use arrow_array::{
    Array, ListArray, RecordBatch, StringArray, TimestampMicrosecondArray, UInt64Array,
};
use arrow_schema::{DataType, Field, Schema, SchemaRef, TimeUnit};
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use crate::error::StoreError;
use crate::record::CleanedRecord;

fn table_schema() -> SchemaRef {
    let string_item = |name: &str| {
        Field::new(
            name,
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        )
    };
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new(
            "posted_at",
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            false,
        ),
        Field::new("author", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("text_clean", DataType::Utf8, false),
        Field::new("reply_count", DataType::UInt64, false),
        Field::new("share_count", DataType::UInt64, false),
        Field::new("like_count", DataType::UInt64, false),
        string_item("tags"),
        string_item("mentions"),
    ]))
}

/// Persist `records` to `path`, overwriting any existing table.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be created or the Parquet
/// write fails.
pub fn write_records(path: &Path, records: &[CleanedRecord]) -> Result<(), StoreError> {
    let schema = table_schema();
    let batch = build_batch(&schema, records)?;

    let file = File::create(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    tracing::info!(path = %path.display(), rows = records.len(), "table written");
    Ok(())
}

/// Load a previously written table back into records.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be opened, is not Parquet, or
/// does not carry the expected schema.
pub fn read_records(path: &Path) -> Result<Vec<CleanedRecord>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        decode_batch(&batch, &mut records)?;
    }
    Ok(records)
}

fn build_batch(schema: &SchemaRef, records: &[CleanedRecord]) -> Result<RecordBatch, StoreError> {
    let ids = StringArray::from_iter_values(records.iter().map(|r| r.id.as_str()));
    let posted_at = TimestampMicrosecondArray::from_iter_values(
        records.iter().map(|r| r.posted_at.timestamp_micros()),
    )
    .with_timezone("UTC");
    let authors = StringArray::from_iter_values(records.iter().map(|r| r.author.as_str()));
    let texts = StringArray::from_iter_values(records.iter().map(|r| r.text.as_str()));
    let texts_clean =
        StringArray::from_iter_values(records.iter().map(|r| r.text_clean.as_str()));
    let replies = UInt64Array::from_iter_values(records.iter().map(|r| r.reply_count));
    let shares = UInt64Array::from_iter_values(records.iter().map(|r| r.share_count));
    let likes = UInt64Array::from_iter_values(records.iter().map(|r| r.like_count));
    let tags = string_list_array(records.iter().map(|r| r.tags.as_slice()));
    let mentions = string_list_array(records.iter().map(|r| r.mentions.as_slice()));

    Ok(RecordBatch::try_new(
        Arc::clone(schema),
        vec![
            Arc::new(ids),
            Arc::new(posted_at),
            Arc::new(authors),
            Arc::new(texts),
            Arc::new(texts_clean),
            Arc::new(replies),
            Arc::new(shares),
            Arc::new(likes),
            Arc::new(tags),
            Arc::new(mentions),
        ],
    )?)
}

fn string_list_array<'a>(values: impl Iterator<Item = &'a [String]>) -> ListArray {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for row in values {
        for value in row {
            builder.values().append_value(value);
        }
        builder.append(true);
    }
    builder.finish()
}

fn decode_batch(batch: &RecordBatch, out: &mut Vec<CleanedRecord>) -> Result<(), StoreError> {
    let ids = string_col(batch, "id")?;
    let posted_at = timestamp_col(batch, "posted_at")?;
    let authors = string_col(batch, "author")?;
    let texts = string_col(batch, "text")?;
    let texts_clean = string_col(batch, "text_clean")?;
    let replies = u64_col(batch, "reply_count")?;
    let shares = u64_col(batch, "share_count")?;
    let likes = u64_col(batch, "like_count")?;
    let tags = list_col(batch, "tags")?;
    let mentions = list_col(batch, "mentions")?;

    for i in 0..batch.num_rows() {
        let micros = posted_at.value(i);
        let ts = DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| {
            StoreError::Schema(format!("timestamp {micros} out of representable range"))
        })?;

        out.push(CleanedRecord {
            id: ids.value(i).to_string(),
            posted_at: ts,
            author: authors.value(i).to_string(),
            text: texts.value(i).to_string(),
            text_clean: texts_clean.value(i).to_string(),
            reply_count: replies.value(i),
            share_count: shares.value(i),
            like_count: likes.value(i),
            tags: string_list_values(tags, i)?,
            mentions: string_list_values(mentions, i)?,
        });
    }
    Ok(())
}

fn string_list_values(list: &ListArray, row: usize) -> Result<Vec<String>, StoreError> {
    let values = list.value(row);
    let strings = values
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| StoreError::Schema("list column items are not strings".to_string()))?;
    Ok((0..strings.len())
        .map(|j| strings.value(j).to_string())
        .collect())
}

fn string_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray, StoreError> {
    typed_col(batch, name)
}

fn u64_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a UInt64Array, StoreError> {
    typed_col(batch, name)
}

fn timestamp_col<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a TimestampMicrosecondArray, StoreError> {
    typed_col(batch, name)
}

fn list_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ListArray, StoreError> {
    typed_col(batch, name)
}

fn typed_col<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T, StoreError> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<T>())
        .ok_or_else(|| StoreError::Schema(format!("missing or mistyped column \"{name}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, minute: u32) -> CleanedRecord {
        CleanedRecord {
            id: id.to_string(),
            posted_at: Utc.with_ymd_and_hms(2024, 5, 3, 9, minute, 0).unwrap(),
            author: format!("author_{id}"),
            text: format!("raw #text {id} 🚀"),
            text_clean: format!("raw text {id} 🚀"),
            reply_count: 12,
            share_count: 1_200,
            like_count: 3_000_000,
            tags: vec!["#nifty50".to_string(), "#sensex".to_string()],
            mentions: vec!["@trader123".to_string()],
        }
    }

    #[test]
    fn round_trip_preserves_every_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tweets.parquet");

        let mut empty_lists = record("3", 30);
        empty_lists.tags.clear();
        empty_lists.mentions.clear();
        empty_lists.text_clean = String::new();

        let records = vec![record("1", 0), record("2", 15), empty_lists];
        write_records(&path, &records).unwrap();
        let loaded = read_records(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn empty_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tweets.parquet");
        write_records(&path, &[]).unwrap();
        assert_eq!(read_records(&path).unwrap(), Vec::new());
    }

    #[test]
    fn write_overwrites_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tweets.parquet");

        write_records(&path, &[record("1", 0), record("2", 15)]).unwrap();
        write_records(&path, &[record("9", 45)]).unwrap();

        let loaded = read_records(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "9");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_records(&dir.path().join("absent.parquet")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
