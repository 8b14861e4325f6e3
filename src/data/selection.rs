use std::collections::BTreeSet;
use std::sync::Arc;

use super::filter::FilterCriteria;
use super::model::{Dataset, Record, RecordId};

// ---------------------------------------------------------------------------
// Rendered sequence snapshot
// ---------------------------------------------------------------------------

/// The filtered id sequence exactly as it was drawn on the plot.
///
/// Each render gets a new generation. A selection carries the snapshot it
/// was made against, so positional references always resolve against the
/// points the user actually saw, never against a later re-filter.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSequence {
    pub generation: u64,
    ids: Arc<[RecordId]>,
}

impl Default for RenderedSequence {
    fn default() -> Self {
        RenderedSequence::new(0, Vec::new())
    }
}

impl RenderedSequence {
    pub fn new(generation: u64, ids: impl Into<Arc<[RecordId]>>) -> Self {
        RenderedSequence {
            generation,
            ids: ids.into(),
        }
    }

    /// Id of the point drawn at `position`, if in bounds.
    pub fn id_at(&self, position: usize) -> Option<RecordId> {
        self.ids.get(position).copied()
    }

    pub fn ids(&self) -> &[RecordId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Point references and selection events
// ---------------------------------------------------------------------------

/// One selected plot point. The attached id wins; the position into the
/// rendered sequence is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    pub id: Option<RecordId>,
    pub position: Option<usize>,
}

impl PointRef {
    pub fn by_id(id: RecordId) -> Self {
        PointRef {
            id: Some(id),
            position: None,
        }
    }

    pub fn by_position(position: usize) -> Self {
        PointRef {
            id: None,
            position: Some(position),
        }
    }
}

/// A box or lasso selection, paired with the sequence it was drawn on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionEvent {
    pub points: Vec<PointRef>,
    pub rendered: RenderedSequence,
}

impl SelectionEvent {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Map a selection back to records that still pass `criteria`.
///
/// Unresolvable references (no id and an out-of-bounds position, or an id
/// that is not in the dataset) are dropped silently. Duplicates collapse.
/// The result is in dataset order. No selection resolves to nothing.
pub fn resolve_selection<'a>(
    dataset: &'a Dataset,
    selection: Option<&SelectionEvent>,
    criteria: &FilterCriteria,
) -> Vec<&'a Record> {
    let Some(event) = selection else {
        return Vec::new();
    };

    let ids: BTreeSet<RecordId> = event
        .points
        .iter()
        .filter_map(|p| p.id.or_else(|| p.position.and_then(|i| event.rendered.id_at(i))))
        .collect();

    // Ids ascend with dataset position, so BTreeSet order is dataset order.
    let resolved: Vec<&Record> = ids
        .into_iter()
        .filter_map(|id| dataset.get(id))
        .filter(|r| criteria.matches(r))
        .collect();

    log::debug!(
        "Resolved {} of {} selected points (render generation {})",
        resolved.len(),
        event.points.len(),
        event.rendered.generation
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{ScoreRange, SUBJECTIVITY_BOUNDS};
    use crate::data::model::record;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record(0, "Jan", -0.5, 0.5),
            record(1, "Jan", 0.2, 0.5),
            record(2, "Feb", 0.0, 0.5),
            record(3, "Jan", 0.9, 0.5),
        ])
    }

    fn jan(low: f64, high: f64) -> FilterCriteria {
        FilterCriteria {
            month: "Jan".into(),
            sentiment: ScoreRange::new(low, high),
            subjectivity: SUBJECTIVITY_BOUNDS,
        }
    }

    fn ids(records: &[&Record]) -> Vec<usize> {
        records.iter().map(|r| r.id.0).collect()
    }

    fn rendered(ids: &[usize]) -> RenderedSequence {
        RenderedSequence::new(1, ids.iter().map(|&i| RecordId(i)).collect::<Vec<_>>())
    }

    #[test]
    fn no_selection_is_empty() {
        let ds = dataset();
        assert!(resolve_selection(&ds, None, &jan(-1.0, 1.0)).is_empty());
        let empty = SelectionEvent::default();
        assert!(resolve_selection(&ds, Some(&empty), &jan(-1.0, 1.0)).is_empty());
    }

    #[test]
    fn ids_are_deduplicated_and_in_dataset_order() {
        let ds = dataset();
        let event = SelectionEvent {
            points: vec![
                PointRef::by_id(RecordId(3)),
                PointRef::by_id(RecordId(0)),
                PointRef::by_id(RecordId(3)),
            ],
            rendered: rendered(&[0, 1, 3]),
        };
        assert_eq!(ids(&resolve_selection(&ds, Some(&event), &jan(-1.0, 1.0))), vec![0, 3]);
    }

    #[test]
    fn position_fallback_uses_the_rendered_snapshot() {
        let ds = dataset();
        let event = SelectionEvent {
            points: vec![PointRef::by_position(1), PointRef::by_position(7)],
            rendered: rendered(&[0, 3]),
        };
        assert_eq!(ids(&resolve_selection(&ds, Some(&event), &jan(-1.0, 1.0))), vec![3]);
    }

    #[test]
    fn attached_id_wins_over_position() {
        let ds = dataset();
        let event = SelectionEvent {
            points: vec![PointRef {
                id: Some(RecordId(1)),
                position: Some(0),
            }],
            rendered: rendered(&[0, 1, 3]),
        };
        assert_eq!(ids(&resolve_selection(&ds, Some(&event), &jan(-1.0, 1.0))), vec![1]);
    }

    #[test]
    fn unknown_ids_and_empty_refs_are_dropped() {
        let ds = dataset();
        let event = SelectionEvent {
            points: vec![
                PointRef::by_id(RecordId(99)),
                PointRef {
                    id: None,
                    position: None,
                },
                PointRef::by_id(RecordId(1)),
            ],
            rendered: rendered(&[]),
        };
        assert_eq!(ids(&resolve_selection(&ds, Some(&event), &jan(-1.0, 1.0))), vec![1]);
    }

    #[test]
    fn narrowing_the_filter_drops_selected_records() {
        let ds = dataset();
        let event = SelectionEvent {
            points: [0, 1, 3].iter().map(|&i| PointRef::by_id(RecordId(i))).collect(),
            rendered: rendered(&[0, 1, 3]),
        };
        assert_eq!(ids(&resolve_selection(&ds, Some(&event), &jan(-1.0, 1.0))), vec![0, 1, 3]);
        assert_eq!(ids(&resolve_selection(&ds, Some(&event), &jan(-1.0, 0.5))), vec![0, 1]);
    }

    #[test]
    fn records_from_another_month_never_leak() {
        let ds = dataset();
        let event = SelectionEvent {
            points: vec![PointRef::by_id(RecordId(2))],
            rendered: rendered(&[2]),
        };
        assert!(resolve_selection(&ds, Some(&event), &jan(-1.0, 1.0)).is_empty());
    }

    #[test]
    fn re_resolution_is_idempotent() {
        let ds = dataset();
        let criteria = jan(-0.6, 0.5);
        let event = SelectionEvent {
            points: (0..4).map(|i| PointRef::by_id(RecordId(i))).collect(),
            rendered: rendered(&[0, 1, 3]),
        };
        let first = resolve_selection(&ds, Some(&event), &criteria);
        let again = SelectionEvent {
            points: first.iter().map(|r| PointRef::by_id(r.id)).collect(),
            rendered: event.rendered.clone(),
        };
        let second = resolve_selection(&ds, Some(&again), &criteria);
        assert_eq!(ids(&first), ids(&second));
    }
}
