use crate::data::model::{Record, RecordId};
use crate::data::selection::{PointRef, RenderedSequence, SelectionEvent};

// ---------------------------------------------------------------------------
// Scatter view model
// ---------------------------------------------------------------------------

/// Embedding coordinates of the visible records, one point per record.
#[derive(Debug, Clone, Default)]
pub struct ScatterView {
    /// `[dim1, dim2]`, parallel to `rendered.ids()`.
    positions: Vec<[f64; 2]>,
    rendered: RenderedSequence,
}

impl ScatterView {
    pub fn from_records(generation: u64, records: &[&Record]) -> Self {
        let positions = records.iter().map(|r| [r.dim1, r.dim2]).collect();
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        ScatterView {
            positions,
            rendered: RenderedSequence::new(generation, ids),
        }
    }

    /// Snapshot of the drawn sequence, handed to every selection made on it.
    pub fn rendered(&self) -> &RenderedSequence {
        &self.rendered
    }

    /// `(id, [x, y])` per point, in drawing order.
    pub fn points(&self) -> impl Iterator<Item = (RecordId, [f64; 2])> + '_ {
        self.rendered.ids().iter().copied().zip(self.positions.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Points inside `shape`, as references carrying both id and position.
    pub fn select(&self, shape: &SelectionShape) -> SelectionEvent {
        let points = self
            .points()
            .enumerate()
            .filter(|(_, (_, xy))| shape.contains(*xy))
            .map(|(position, (id, _))| PointRef {
                id: Some(id),
                position: Some(position),
            })
            .collect();
        SelectionEvent {
            points,
            rendered: self.rendered.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection shapes
// ---------------------------------------------------------------------------

/// Which drag tool the plot is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectTool {
    Box,
    #[default]
    Lasso,
}

impl SelectTool {
    pub fn label(self) -> &'static str {
        match self {
            SelectTool::Box => "Box select",
            SelectTool::Lasso => "Lasso select",
        }
    }
}

/// A finished drag gesture in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionShape {
    Rect { min: [f64; 2], max: [f64; 2] },
    Lasso(Vec<[f64; 2]>),
}

impl SelectionShape {
    /// Build the shape for `tool` from the dragged path. A box only uses the
    /// first and last positions.
    pub fn from_drag(tool: SelectTool, path: &[[f64; 2]]) -> Option<Self> {
        match tool {
            SelectTool::Box => {
                let (first, last) = (path.first()?, path.last()?);
                Some(SelectionShape::Rect {
                    min: [first[0].min(last[0]), first[1].min(last[1])],
                    max: [first[0].max(last[0]), first[1].max(last[1])],
                })
            }
            SelectTool::Lasso if path.len() >= 3 => Some(SelectionShape::Lasso(path.to_vec())),
            SelectTool::Lasso => None,
        }
    }

    /// Closed outline for drawing.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        match self {
            SelectionShape::Rect { min, max } => vec![
                *min,
                [max[0], min[1]],
                *max,
                [min[0], max[1]],
                *min,
            ],
            SelectionShape::Lasso(path) => {
                let mut outline = path.clone();
                if let Some(first) = path.first() {
                    outline.push(*first);
                }
                outline
            }
        }
    }

    pub fn contains(&self, p: [f64; 2]) -> bool {
        match self {
            SelectionShape::Rect { min, max } => {
                min[0] <= p[0] && p[0] <= max[0] && min[1] <= p[1] && p[1] <= max[1]
            }
            SelectionShape::Lasso(path) => polygon_contains(path, p),
        }
    }
}

/// Even-odd ray casting; the polygon is implicitly closed.
fn polygon_contains(vertices: &[[f64; 2]], p: [f64; 2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi[1] > p[1]) != (vj[1] > p[1]) {
            let x_cross = vi[0] + (p[1] - vi[1]) * (vj[0] - vi[0]) / (vj[1] - vi[1]);
            if p[0] < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
