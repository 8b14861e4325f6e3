use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{columns, Dataset, Record, RecordId};
use super::sanitize::clean;

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Problems with the shape of an input file, as opposed to I/O failures.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unsupported type {found}")]
    ColumnType { column: &'static str, found: String },
    #[error("expected a top-level JSON array of row objects")]
    NotRecordArray,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean the processed posts file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required columns (extra columns ignored)
/// * `.json`    – `[{ "RawTweet": "...", "Month": "...", ... }, ...]`
/// * `.parquet` – flat table with the required columns
///
/// Missing columns are an error. Rows whose numeric cells are not finite
/// numbers are skipped with a warning; ids keep their file position.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} posts across {} months from {}",
        dataset.len(),
        dataset.months().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// One row as read from the file, before validation.
struct RawRow<'a> {
    text: Option<&'a str>,
    month: String,
    sentiment: Option<f64>,
    subjectivity: Option<f64>,
    dim1: Option<f64>,
    dim2: Option<f64>,
}

impl RawRow<'_> {
    fn into_record(self, row: usize) -> Option<Record> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        let (Some(sentiment), Some(subjectivity), Some(dim1), Some(dim2)) = (
            finite(self.sentiment),
            finite(self.subjectivity),
            finite(self.dim1),
            finite(self.dim2),
        ) else {
            log::warn!("Skipping row {row}: non-numeric score or coordinate");
            return None;
        };

        Some(Record {
            id: RecordId(row),
            raw_text: clean(self.text),
            month: self.month,
            sentiment,
            subjectivity,
            dim1,
            dim2,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the required columns in a header row.
struct ColumnIndex {
    text: usize,
    month: usize,
    sentiment: usize,
    subjectivity: usize,
    dim1: usize,
    dim2: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self, DatasetError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DatasetError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            text: find(columns::RAW_TEXT)?,
            month: find(columns::MONTH)?,
            sentiment: find(columns::SENTIMENT)?,
            subjectivity: find(columns::SUBJECTIVITY)?,
            dim1: find(columns::DIM1)?,
            dim2: find(columns::DIM2)?,
        })
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let idx = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| row.get(i).unwrap_or("");
        let number = |i: usize| cell(i).trim().parse::<f64>().ok();

        let text = cell(idx.text);
        let raw = RawRow {
            text: (!text.is_empty()).then_some(text),
            month: cell(idx.month).to_string(),
            sentiment: number(idx.sentiment),
            subjectivity: number(idx.subjectivity),
            dim1: number(idx.dim1),
            dim2: number(idx.dim2),
        };
        records.extend(raw.into_record(row_no));
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "RawTweet": "b'...'",
///     "Month": "January",
///     "Sentiment": 0.12,
///     "Subjectivity": 0.4,
///     "Dimension 1": 3.1,
///     "Dimension 2": -0.7
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(DatasetError::NotRecordArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(DatasetError::NotRecordArray)?;
        for name in columns::REQUIRED {
            if !obj.contains_key(name) {
                return Err(DatasetError::MissingColumn(name))
                    .with_context(|| format!("JSON row {row_no}"));
            }
        }

        let number = |name: &str| obj.get(name).and_then(json_to_f64);
        let raw = RawRow {
            text: obj.get(columns::RAW_TEXT).and_then(|v| v.as_str()),
            month: obj.get(columns::MONTH).map(json_to_label).unwrap_or_default(),
            sentiment: number(columns::SENTIMENT),
            subjectivity: number(columns::SUBJECTIVITY),
            dim1: number(columns::DIM1),
            dim2: number(columns::DIM2),
        };
        records.extend(raw.into_record(row_no));
    }

    Ok(Dataset::from_records(records))
}

/// Numbers, or numeric strings as pandas sometimes writes them.
fn json_to_f64(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_to_label(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same flat schema as the CSV.
///
/// Text columns may be Utf8 or LargeUtf8; numeric columns Float64, Float32,
/// Int64 or Int32. Works with files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let text_col = required_column(&batch, columns::RAW_TEXT)?;
        let month_col = required_column(&batch, columns::MONTH)?;
        let sentiment_col = required_column(&batch, columns::SENTIMENT)?;
        let subjectivity_col = required_column(&batch, columns::SUBJECTIVITY)?;
        let dim1_col = required_column(&batch, columns::DIM1)?;
        let dim2_col = required_column(&batch, columns::DIM2)?;

        for row in 0..batch.num_rows() {
            let raw = RawRow {
                text: extract_str(text_col, row, columns::RAW_TEXT)?,
                month: extract_label(month_col, row, columns::MONTH)?,
                sentiment: extract_f64(sentiment_col, row, columns::SENTIMENT)?,
                subjectivity: extract_f64(subjectivity_col, row, columns::SUBJECTIVITY)?,
                dim1: extract_f64(dim1_col, row, columns::DIM1)?,
                dim2: extract_f64(dim2_col, row, columns::DIM2)?,
            };
            records.extend(raw.into_record(row_offset + row));
        }
        row_offset += batch.num_rows();
    }

    Ok(Dataset::from_records(records))
}

// -- Arrow helpers --

fn required_column<'b>(
    batch: &'b RecordBatch,
    name: &'static str,
) -> Result<&'b Arc<dyn Array>, DatasetError> {
    batch
        .schema_ref()
        .index_of(name)
        .map(|i| batch.column(i))
        .map_err(|_| DatasetError::MissingColumn(name))
}

fn type_error(column: &'static str, col: &Arc<dyn Array>) -> DatasetError {
    DatasetError::ColumnType {
        column,
        found: format!("{:?}", col.data_type()),
    }
}

fn extract_str<'a>(
    col: &'a Arc<dyn Array>,
    row: usize,
    name: &'static str,
) -> Result<Option<&'a str>, DatasetError> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(col.as_string::<i32>().value(row))),
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row))),
        _ => Err(type_error(name, col)),
    }
}

/// Month labels: text, or integers rendered as text.
fn extract_label(
    col: &Arc<dyn Array>,
    row: usize,
    name: &'static str,
) -> Result<String, DatasetError> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        return Ok(arr.value(row).to_string());
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        return Ok(arr.value(row).to_string());
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        return Ok(arr.value(row).to_string());
    }
    extract_str(col, row, name).map(|s| s.unwrap_or_default().to_string())
}

fn extract_f64(
    col: &Arc<dyn Array>,
    row: usize,
    name: &'static str,
) -> Result<Option<f64>, DatasetError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Ok(Some(arr.value(row)))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Ok(Some(arr.value(row) as f64))
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(Some(arr.value(row) as f64))
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(Some(arr.value(row) as f64))
    } else {
        Err(type_error(name, col))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    const HEADER: &str = ",RawTweet,Month,Sentiment,Subjectivity,Dimension 1,Dimension 2\n";

    #[test]
    fn csv_loads_and_cleans_text() {
        let csv = format!(
            "{HEADER}0,\"['hello &amp; bye']\",Jan,0.5,0.2,1.0,2.0\n1,\"b'caf\\xc3\\xa9'\",Feb,-0.3,0.9,3.0,4.0\n"
        );
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path()).expect("load csv");

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.months(), ["Feb", "Jan"]);
        let first = ds.get(RecordId(0)).expect("row 0");
        assert_eq!(first.raw_text, "hello & bye");
        assert_eq!(first.month, "Jan");
        assert_eq!((first.dim1, first.dim2), (1.0, 2.0));
        assert_eq!(ds.get(RecordId(1)).map(|r| r.raw_text.as_str()), Some("café"));
    }

    #[test]
    fn csv_empty_text_cell_is_empty_string() {
        let csv = format!("{HEADER}0,,Jan,0.0,0.0,0.0,0.0\n");
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path()).expect("load csv");
        assert_eq!(ds.records()[0].raw_text, "");
    }

    #[test]
    fn csv_skips_non_numeric_rows_and_keeps_ids() {
        let csv = format!(
            "{HEADER}0,a,Jan,0.1,0.1,0,0\n1,b,Jan,oops,0.1,0,0\n2,c,Jan,0.2,,0,0\n3,d,Jan,0.3,0.3,0,0\n"
        );
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path()).expect("load csv");
        let ids: Vec<usize> = ds.records().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![0, 3]);
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let file = write_temp(".csv", "RawTweet,Month,Sentiment\nx,Jan,0.1\n");
        let err = load_file(file.path()).expect_err("schema mismatch");
        let schema = err.downcast_ref::<DatasetError>();
        assert!(matches!(schema, Some(DatasetError::MissingColumn("Subjectivity"))));
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_file(Path::new("/definitely/not/here.csv")).is_err());
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".txt", "whatever");
        let err = load_file(file.path()).expect_err("unsupported");
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedExtension(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"RawTweet": "a &lt; b", "Month": "Jan", "Sentiment": 0.1,
             "Subjectivity": 0.2, "Dimension 1": 1.5, "Dimension 2": "2.5"},
            {"RawTweet": null, "Month": 3, "Sentiment": -0.1,
             "Subjectivity": 0.0, "Dimension 1": 0, "Dimension 2": 0}
        ]"#;
        let file = write_temp(".json", json);
        let ds = load_file(file.path()).expect("load json");

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].raw_text, "a < b");
        assert_eq!(ds.records()[0].dim2, 2.5);
        assert_eq!(ds.records()[1].raw_text, "");
        assert_eq!(ds.records()[1].month, "3");
    }

    #[test]
    fn json_missing_column_is_fatal() {
        let json = r#"[{"RawTweet": "a", "Month": "Jan"}]"#;
        let file = write_temp(".json", json);
        let err = load_file(file.path()).expect_err("schema mismatch");
        assert!(err.downcast_ref::<DatasetError>().is_some());
    }

    #[test]
    fn json_must_be_array() {
        let file = write_temp(".json", r#"{"RawTweet": []}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn parquet_round_trip() {
        use arrow::datatypes::{Field, Schema};
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new(columns::RAW_TEXT, DataType::Utf8, true),
            Field::new(columns::MONTH, DataType::Utf8, false),
            Field::new(columns::SENTIMENT, DataType::Float64, false),
            Field::new(columns::SUBJECTIVITY, DataType::Float64, false),
            Field::new(columns::DIM1, DataType::Float32, false),
            Field::new(columns::DIM2, DataType::Float32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("['x &gt; y']"), None])),
                Arc::new(StringArray::from(vec!["Jan", "Feb"])),
                Arc::new(Float64Array::from(vec![0.25, -0.75])),
                Arc::new(Float64Array::from(vec![0.5, 1.0])),
                Arc::new(Float32Array::from(vec![1.0f32, 2.0])),
                Arc::new(Float32Array::from(vec![-1.0f32, -2.0])),
            ],
        )
        .expect("record batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("temp file");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let ds = load_file(file.path()).expect("load parquet");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].raw_text, "x > y");
        assert_eq!(ds.records()[1].raw_text, "");
        assert_eq!(ds.records()[1].sentiment, -0.75);
        assert_eq!(ds.records()[1].dim2, -2.0);
    }
}
