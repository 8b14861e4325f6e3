use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::filter::{filter_records, FilterCriteria, ScoreRange};
use crate::data::model::{Dataset, Record, RecordId};
use crate::data::selection::{resolve_selection, SelectionEvent};
use crate::view::scatter::{ScatterView, SelectTool, SelectionShape};
use crate::view::table::Pager;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One user's UI state, independent of rendering.
///
/// The dataset is shared read-only; everything else belongs to this
/// instance, so several users can each hold their own `AppState`.
pub struct AppState {
    /// Loaded dataset, never mutated.
    pub dataset: Arc<Dataset>,

    /// Current month + score window.
    criteria: FilterCriteria,

    /// Points drawn by the last render.
    scatter: ScatterView,

    /// Render counter, bumped every time `scatter` is rebuilt.
    generation: u64,

    /// Last box/lasso selection, paired with the render it was made on.
    selection: Option<SelectionEvent>,

    /// Ids of the selection after re-applying the current criteria (cached).
    resolved: Vec<RecordId>,

    /// Table pagination.
    pub pager: Pager,

    /// Active drag tool on the plot.
    pub tool: SelectTool,

    /// Plot-space path of the drag in progress.
    pub drag_path: Vec<[f64; 2]>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let criteria = FilterCriteria::initial(&dataset);
        let mut state = Self {
            dataset,
            criteria,
            scatter: ScatterView::default(),
            generation: 0,
            selection: None,
            resolved: Vec::new(),
            pager: Pager::default(),
            tool: SelectTool::default(),
            drag_path: Vec::new(),
        };
        state.refilter();
        state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn scatter(&self) -> &ScatterView {
        &self.scatter
    }

    pub fn selection(&self) -> Option<&SelectionEvent> {
        self.selection.as_ref()
    }

    // -- control changes --

    pub fn set_month(&mut self, month: &str) {
        if self.criteria.month != month {
            self.criteria.month = month.to_string();
            self.refilter();
        }
    }

    pub fn set_sentiment_range(&mut self, range: ScoreRange) {
        if self.criteria.sentiment != range {
            self.criteria.sentiment = range;
            self.refilter();
        }
    }

    pub fn set_subjectivity_range(&mut self, range: ScoreRange) {
        if self.criteria.subjectivity != range {
            self.criteria.subjectivity = range;
            self.refilter();
        }
    }

    /// Recompute the scatter from the criteria and re-resolve the table.
    ///
    /// The selection is kept: it still refers to the render it was made on,
    /// and re-resolution drops whatever the new criteria exclude.
    pub fn refilter(&mut self) {
        self.generation += 1;
        let visible = filter_records(&self.dataset, &self.criteria);
        log::debug!(
            "Filter {:?} → {} of {} posts",
            self.criteria,
            visible.len(),
            self.dataset.len()
        );
        self.scatter = ScatterView::from_records(self.generation, &visible);
        self.reresolve();
    }

    // -- plot interaction --

    /// Select points inside a finished drag shape on the current render.
    pub fn select_shape(&mut self, shape: &SelectionShape) {
        let event = self.scatter.select(shape);
        self.apply_selection(event);
    }

    /// Replace the selection. An empty event clears it.
    pub fn apply_selection(&mut self, event: SelectionEvent) {
        self.selection = (!event.is_empty()).then_some(event);
        self.reresolve();
    }

    pub fn clear_selection(&mut self) {
        self.apply_selection(SelectionEvent::default());
    }

    /// Start a new drag path at the press position.
    pub fn begin_drag(&mut self, origin: [f64; 2]) {
        self.drag_path.clear();
        self.drag_path.push(origin);
    }

    /// Finish the drag in progress, if any, and select what it encloses.
    pub fn finish_drag(&mut self) {
        let path = std::mem::take(&mut self.drag_path);
        if let Some(shape) = SelectionShape::from_drag(self.tool, &path) {
            self.select_shape(&shape);
        }
    }

    /// Shape of the drag in progress, for drawing.
    pub fn drag_shape(&self) -> Option<SelectionShape> {
        SelectionShape::from_drag(self.tool, &self.drag_path)
    }

    fn reresolve(&mut self) {
        self.resolved = resolve_selection(&self.dataset, self.selection.as_ref(), &self.criteria)
            .iter()
            .map(|r| r.id)
            .collect();
        self.pager.reset();
    }

    // -- derived views --

    /// Records shown in the table, in dataset order.
    pub fn table_rows(&self) -> Vec<&Record> {
        self.resolved
            .iter()
            .filter_map(|&id| self.dataset.get(id))
            .collect()
    }

    /// Ids to highlight on the plot.
    pub fn highlighted(&self) -> BTreeSet<RecordId> {
        self.resolved.iter().copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.resolved.len()
    }

    /// `N posts loaded, M visible, K selected`.
    pub fn status_line(&self) -> String {
        format!(
            "{} posts loaded, {} visible, {} selected",
            self.dataset.len(),
            self.scatter.len(),
            self.resolved.len()
        )
    }
}
