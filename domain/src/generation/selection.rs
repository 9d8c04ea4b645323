//! Partition of provisional questions by the owner's selection

use crate::question::entities::{Question, QuestionId};
use std::collections::HashSet;

/// Outcome of matching provisional questions against a selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPartition {
    /// Selected: to be promoted to confirmed
    pub keep: Vec<QuestionId>,
    /// Not selected: to be erased permanently
    pub discard: Vec<QuestionId>,
}

impl SelectionPartition {
    /// Split `provisional` by membership in `selected`.
    ///
    /// Selected ids that are not among `provisional` are ignored, so a
    /// caller cannot confirm somebody else's question or an already
    /// confirmed one. Order follows `provisional`.
    pub fn from_selection(provisional: &[Question], selected: &[QuestionId]) -> Self {
        let selected: HashSet<QuestionId> = selected.iter().copied().collect();
        let (keep, discard): (Vec<_>, Vec<_>) = provisional
            .iter()
            .map(|q| q.id)
            .partition(|id| selected.contains(id));
        Self { keep, discard }
    }

    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.discard.is_empty()
    }
}
