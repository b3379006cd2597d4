//! Per-session tracker state.
//!
//! All trackers are owned by exactly one [`RenderSession`](crate::RenderSession)
//! and discarded when its pass completes; nothing here outlives a pass.

use mp_tree::{ColumnAlign, RenderTreeElem};

/// Handle to a last-modified marker node created during a pass.
///
/// Markers are numbered in creation order and every marker element carries
/// its number in the [`LAST_MODIFIED_ATTR`](crate::LAST_MODIFIED_ATTR)
/// attribute. Creation order is not document order when a marker-producing
/// branch suspends at a collaborator, so the host resolves the handle by
/// matching the stamped attribute, then scrolls that node into view after
/// mounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerId(pub(crate) usize);

impl MarkerId {
    /// Creation-order index of the marker.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Column alignment state for the one active table.
///
/// No nesting stack is kept: a nested or sequential table overwrites the
/// current state, which is sound because every table issues its own
/// [`enter_table`](Self::enter_table) before any of its cells is processed.
#[derive(Debug, Default)]
pub(crate) struct TableAlignTracker {
    aligns: Vec<ColumnAlign>,
    cursor: usize,
    active: bool,
}

impl TableAlignTracker {
    pub(crate) fn enter_table(&mut self, aligns: Vec<ColumnAlign>) {
        self.aligns = aligns;
        self.cursor = 0;
        self.active = true;
    }

    /// Whether any table has been entered during this pass.
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn enter_row(&mut self) {
        self.cursor = 0;
    }

    /// Alignment for the current column. Out-of-range columns (including any
    /// cell seen outside a table context) get no alignment. The cursor
    /// advances unconditionally.
    pub(crate) fn next_column_align(&mut self) -> ColumnAlign {
        let align = self.aligns.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        align
    }
}

/// A footnote definition captured during the main pass.
#[derive(Clone, Debug)]
pub(crate) struct CollectedFootnote {
    pub(crate) id: u64,
    pub(crate) children: Vec<RenderTreeElem>,
}

/// Footnote definitions in encounter order, drained once after the main pass.
#[derive(Debug, Default)]
pub(crate) struct FootnoteCollector {
    defs: Vec<CollectedFootnote>,
}

impl FootnoteCollector {
    pub(crate) fn collect(&mut self, id: u64, children: Vec<RenderTreeElem>) {
        self.defs.push(CollectedFootnote { id, children });
    }

    pub(crate) fn drain(&mut self) -> Vec<CollectedFootnote> {
        std::mem::take(&mut self.defs)
    }
}

/// Mutable state shared by all branches of one pass.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) table: TableAlignTracker,
    pub(crate) footnotes: FootnoteCollector,
    pub(crate) match_count: usize,
    pub(crate) last_modified: Option<MarkerId>,
    pub(crate) markers_created: usize,
}

impl SessionState {
    /// Register a new marker, overwriting the session handle.
    pub(crate) fn new_marker(&mut self) -> MarkerId {
        let id = MarkerId(self.markers_created);
        self.markers_created += 1;
        self.last_modified = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tracker_applies_aligns_in_order() {
        let mut tracker = TableAlignTracker::default();
        tracker.enter_table(vec![ColumnAlign::Left, ColumnAlign::None, ColumnAlign::Right]);
        tracker.enter_row();
        assert_eq!(tracker.next_column_align(), ColumnAlign::Left);
        assert_eq!(tracker.next_column_align(), ColumnAlign::None);
        assert_eq!(tracker.next_column_align(), ColumnAlign::Right);
    }

    #[test]
    fn test_tracker_out_of_range_is_none() {
        let mut tracker = TableAlignTracker::default();
        tracker.enter_table(vec![ColumnAlign::Center]);
        tracker.enter_row();
        assert_eq!(tracker.next_column_align(), ColumnAlign::Center);
        assert_eq!(tracker.next_column_align(), ColumnAlign::None);
    }

    #[test]
    fn test_tracker_row_resets_cursor_but_not_aligns() {
        let mut tracker = TableAlignTracker::default();
        tracker.enter_table(vec![ColumnAlign::Right]);
        tracker.enter_row();
        assert_eq!(tracker.next_column_align(), ColumnAlign::Right);
        tracker.enter_row();
        assert_eq!(tracker.next_column_align(), ColumnAlign::Right);
    }

    #[test]
    fn test_tracker_without_table_context() {
        let mut tracker = TableAlignTracker::default();
        assert_eq!(tracker.next_column_align(), ColumnAlign::None);
    }

    #[test]
    fn test_nested_table_overwrites_state() {
        let mut tracker = TableAlignTracker::default();
        tracker.enter_table(vec![ColumnAlign::Left, ColumnAlign::Left]);
        tracker.enter_table(vec![ColumnAlign::Right]);
        tracker.enter_row();
        assert_eq!(tracker.next_column_align(), ColumnAlign::Right);
        assert_eq!(tracker.next_column_align(), ColumnAlign::None);
    }

    #[test]
    fn test_marker_handle_keeps_latest() {
        let mut state = SessionState::default();
        let first = state.new_marker();
        let second = state.new_marker();
        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(state.last_modified, Some(second));
    }

    #[test]
    fn test_footnotes_drain_in_encounter_order() {
        let mut collector = FootnoteCollector::default();
        collector.collect(2, vec![]);
        collector.collect(1, vec![]);
        let defs = collector.drain();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].id, 2);
        assert_eq!(defs[1].id, 1);
        assert!(collector.drain().is_empty());
    }
}
