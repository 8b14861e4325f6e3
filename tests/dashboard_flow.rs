use std::io::Write;
use std::sync::Arc;

use tweet_explorer::data::filter::{filter_records, FilterCriteria, ScoreRange, SUBJECTIVITY_BOUNDS};
use tweet_explorer::data::loader::load_file;
use tweet_explorer::data::model::{Dataset, Record, RecordId};
use tweet_explorer::data::selection::{resolve_selection, PointRef, SelectionEvent};
use tweet_explorer::state::AppState;
use tweet_explorer::view::scatter::SelectionShape;
use tweet_explorer::view::table::page_texts;

fn post(id: usize, month: &str, sentiment: f64, dims: [f64; 2]) -> Record {
    Record {
        id: RecordId(id),
        raw_text: format!("text {id}"),
        month: month.to_string(),
        sentiment,
        subjectivity: 0.5,
        dim1: dims[0],
        dim2: dims[1],
    }
}

fn three_january_posts() -> Dataset {
    Dataset::from_records(vec![
        post(0, "Jan", -0.5, [0.0, 0.0]),
        post(1, "Feb", 0.1, [5.0, 5.0]),
        post(2, "Jan", 0.2, [1.0, 0.0]),
        post(3, "Jan", 0.9, [2.0, 0.0]),
    ])
}

#[test]
fn january_sentiment_window_keeps_two_in_order() {
    let ds = three_january_posts();
    let criteria = FilterCriteria {
        month: "Jan".into(),
        sentiment: ScoreRange::new(-1.0, 0.5),
        subjectivity: SUBJECTIVITY_BOUNDS,
    };
    let out: Vec<usize> = filter_records(&ds, &criteria).iter().map(|r| r.id.0).collect();
    assert_eq!(out, vec![0, 2]);
}

#[test]
fn lasso_then_narrow_filter_then_read_table() {
    let mut state = AppState::new(Arc::new(three_january_posts()));
    state.set_month("Jan");
    assert_eq!(state.scatter().len(), 3);

    // Lasso around all three January points.
    state.select_shape(&SelectionShape::Lasso(vec![
        [-1.0, -1.0],
        [3.0, -1.0],
        [3.0, 1.0],
        [-1.0, 1.0],
    ]));
    let texts: Vec<String> = state.table_rows().iter().map(|r| r.raw_text.clone()).collect();
    assert_eq!(texts, ["text 0", "text 2", "text 3"]);

    state.set_sentiment_range(ScoreRange::new(-1.0, 0.5));
    let rows = state.table_rows();
    assert_eq!(page_texts(&state.pager, &rows), vec!["text 0", "text 2"]);
}

#[test]
fn no_selection_means_empty_table_for_any_filter() {
    let mut state = AppState::new(Arc::new(three_january_posts()));
    for month in ["Jan", "Feb", "Mar"] {
        state.set_month(month);
        assert!(state.table_rows().is_empty());
        assert_eq!(state.pager.label(state.table_rows().len()), "No data");
    }
}

#[test]
fn resolving_twice_gives_the_same_records() {
    let ds = three_january_posts();
    let criteria = FilterCriteria {
        month: "Jan".into(),
        sentiment: ScoreRange::new(0.0, 1.0),
        subjectivity: SUBJECTIVITY_BOUNDS,
    };
    let event = SelectionEvent {
        points: (0..4).map(|i| PointRef::by_id(RecordId(i))).collect(),
        ..Default::default()
    };
    let once: Vec<RecordId> = resolve_selection(&ds, Some(&event), &criteria)
        .iter()
        .map(|r| r.id)
        .collect();
    let replay = SelectionEvent {
        points: once.iter().copied().map(PointRef::by_id).collect(),
        ..Default::default()
    };
    let twice: Vec<RecordId> = resolve_selection(&ds, Some(&replay), &criteria)
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(once, vec![RecordId(2), RecordId(3)]);
    assert_eq!(once, twice);
}

#[test]
fn csv_file_to_table() {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    writeln!(file, "RawTweet,Month,Sentiment,Subjectivity,Dimension 1,Dimension 2").expect("write");
    writeln!(file, "\"['Sunny &amp; warm']\",May,0.6,0.4,0.0,0.0").expect("write");
    writeln!(file, "\"b'Caf\\xc3\\xa9\\nopen'\",May,0.1,0.2,1.0,1.0").expect("write");
    writeln!(file, "plain,June,0.0,0.0,9.0,9.0").expect("write");
    file.flush().expect("flush");

    let ds = Arc::new(load_file(file.path()).expect("load"));
    let mut state = AppState::new(Arc::clone(&ds));
    // "June" sorts before "May".
    assert_eq!(state.criteria().month, "June");
    state.set_month("May");
    state.select_shape(&SelectionShape::Rect {
        min: [-0.5, -0.5],
        max: [1.5, 1.5],
    });
    let rows = state.table_rows();
    assert_eq!(page_texts(&state.pager, &rows), vec!["Sunny & warm", "Café open"]);
}
