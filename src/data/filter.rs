use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Score ranges and slider bounds
// ---------------------------------------------------------------------------

/// Full sentiment slider range.
pub const SENTIMENT_BOUNDS: ScoreRange = ScoreRange { low: -1.0, high: 1.0 };
/// Full subjectivity slider range.
pub const SUBJECTIVITY_BOUNDS: ScoreRange = ScoreRange { low: 0.0, high: 1.0 };
/// Slider granularity.
pub const SCORE_STEP: f64 = 0.01;

/// An inclusive `[low, high]` interval. `low > high` is an empty range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub low: f64,
    pub high: f64,
}

impl ScoreRange {
    pub fn new(low: f64, high: f64) -> Self {
        ScoreRange { low, high }
    }

    /// Inclusive on both ends. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The user's current month + score window.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub month: String,
    pub sentiment: ScoreRange,
    pub subjectivity: ScoreRange,
}

impl FilterCriteria {
    /// First month in sorted order and both ranges wide open. An empty
    /// dataset gets an empty month, which matches nothing.
    pub fn initial(dataset: &Dataset) -> Self {
        FilterCriteria {
            month: dataset.months().first().cloned().unwrap_or_default(),
            sentiment: SENTIMENT_BOUNDS,
            subjectivity: SUBJECTIVITY_BOUNDS,
        }
    }

    /// Whether a record is inside the criteria. All bounds inclusive.
    pub fn matches(&self, record: &Record) -> bool {
        record.month == self.month
            && self.sentiment.contains(record.sentiment)
            && self.subjectivity.contains(record.subjectivity)
    }
}

/// Records passing `criteria`, in dataset order.
pub fn filter_records<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| criteria.matches(r))
        .collect()
}
