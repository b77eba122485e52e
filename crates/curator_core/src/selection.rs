use std::collections::BTreeSet;

use crate::types::ArticleId;

/// Article identifiers the user has marked for curation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<ArticleId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: ArticleId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: ArticleId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ArticleId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<ArticleId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ArticleId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
