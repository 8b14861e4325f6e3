use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Column names of the processed dataset
// ---------------------------------------------------------------------------

/// Header names expected in every input file.
pub mod columns {
    pub const RAW_TEXT: &str = "RawTweet";
    pub const MONTH: &str = "Month";
    pub const SENTIMENT: &str = "Sentiment";
    pub const SUBJECTIVITY: &str = "Subjectivity";
    pub const DIM1: &str = "Dimension 1";
    pub const DIM2: &str = "Dimension 2";

    /// All required columns, in the order they are reported when missing.
    pub const REQUIRED: [&str; 6] = [RAW_TEXT, MONTH, SENTIMENT, SUBJECTIVITY, DIM1, DIM2];
}

// ---------------------------------------------------------------------------
// RecordId – stable identity of a post
// ---------------------------------------------------------------------------

/// Stable identity assigned at load time: the zero-based data-row position
/// in the source file. Survives every re-filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub usize);

// ---------------------------------------------------------------------------
// Record – one row of the processed table
// ---------------------------------------------------------------------------

/// A single social-media post with its precomputed features.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    /// Text after the one-time sanitizer pass.
    pub raw_text: String,
    pub month: String,
    /// Nominally in [-1, 1].
    pub sentiment: f64,
    /// Nominally in [0, 1].
    pub subjectivity: f64,
    pub dim1: f64,
    pub dim2: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The read-only dataset. Records are kept in file order, which is also
/// ascending id order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    months: Vec<String>,
}

impl Dataset {
    /// Build the dataset and its month index.
    ///
    /// Records are sorted by id so that id lookups can binary search and
    /// dataset order always matches id order.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.id);
        records.dedup_by_key(|r| r.id);

        let months: BTreeSet<String> = records.iter().map(|r| r.month.clone()).collect();
        Dataset {
            records,
            months: months.into_iter().collect(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct month labels, sorted.
    pub fn months(&self) -> &[String] {
        &self.months
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|pos| &self.records[pos])
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(id: usize, month: &str, sentiment: f64, subjectivity: f64) -> Record {
    Record {
        id: RecordId(id),
        raw_text: format!("post {id}"),
        month: month.to_string(),
        sentiment,
        subjectivity,
        dim1: id as f64,
        dim2: -(id as f64),
    }
}
