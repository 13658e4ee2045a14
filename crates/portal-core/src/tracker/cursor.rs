//! Quota Cursor
//!
//! Derives the next item to present from a progress snapshot. Holds no
//! counters of its own, so it cannot drift from what the server reported.

use std::rc::Rc;

use crate::domain::{ProgressSnapshot, QuotaDraft, QuotaItem};

/// Next item to fill, or the terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPosition {
    /// 0-based index of the next item
    Next(u32),
    Complete,
}

impl CursorPosition {
    pub fn index(&self) -> Option<u32> {
        match self {
            CursorPosition::Next(index) => Some(*index),
            CursorPosition::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, CursorPosition::Complete)
    }
}

/// Items presented to the user, in order
#[derive(Debug, Clone, Default)]
pub enum QuotaDataset {
    /// Every item starts empty
    #[default]
    Blank,
    /// Items are pre-populated from a fixed list
    Prefilled(Rc<[QuotaItem]>),
}

#[derive(Debug, Clone, Default)]
pub struct QuotaCursor {
    dataset: QuotaDataset,
}

impl QuotaCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(items: Vec<QuotaItem>) -> Self {
        Self {
            dataset: QuotaDataset::Prefilled(items.into()),
        }
    }

    /// `min(submitted + pending, total)`
    pub fn position(&self, snapshot: &ProgressSnapshot) -> u32 {
        snapshot.filled().min(snapshot.total())
    }

    pub fn next(&self, snapshot: &ProgressSnapshot) -> CursorPosition {
        let position = self.position(snapshot);
        if position >= snapshot.total() {
            CursorPosition::Complete
        } else {
            CursorPosition::Next(position)
        }
    }

    /// Draft to present at `position`; never reads past the dataset end
    pub fn template(&self, position: CursorPosition) -> Option<QuotaDraft> {
        let index = position.index()?;
        let draft = match &self.dataset {
            QuotaDataset::Prefilled(items) => items
                .get(index as usize)
                .cloned()
                .map(QuotaDraft::from)
                .unwrap_or_else(|| QuotaDraft::blank(index)),
            QuotaDataset::Blank => QuotaDraft::blank(index),
        };
        Some(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_draft;
    use crate::domain::QuotaField;
    use chrono::NaiveDate;

    fn snap(submitted: u32, pending: u32) -> ProgressSnapshot {
        ProgressSnapshot::new(submitted, pending, 700)
    }

    #[test]
    fn test_position_is_min_of_filled_and_total() {
        let cursor = QuotaCursor::new();
        for (s, p) in [(0, 0), (3, 2), (350, 349), (699, 1), (700, 0)] {
            assert_eq!(cursor.position(&snap(s, p)), (s + p).min(700));
        }
    }

    #[test]
    fn test_next_index() {
        let cursor = QuotaCursor::new();
        assert_eq!(cursor.next(&snap(0, 0)), CursorPosition::Next(0));
        assert_eq!(cursor.next(&snap(3, 2)), CursorPosition::Next(5));
        assert_eq!(cursor.next(&snap(699, 0)), CursorPosition::Next(699));
    }

    #[test]
    fn test_full_quota_is_terminal() {
        let cursor = QuotaCursor::new();
        assert_eq!(cursor.next(&snap(700, 0)), CursorPosition::Complete);
        assert_eq!(cursor.next(&snap(400, 300)), CursorPosition::Complete);
        assert!(cursor.template(CursorPosition::Complete).is_none());
    }

    #[test]
    fn test_blank_template_numbers_forms_from_one() {
        let draft = QuotaCursor::new().template(CursorPosition::Next(5)).unwrap();
        assert_eq!(draft.get(QuotaField::FormNumber), "6");
        assert!(draft.name.is_empty());
    }

    #[test]
    fn test_short_dataset_is_never_read_past_its_end() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let items = vec![
            sample_draft(0).validate_on(today).unwrap(),
            sample_draft(1).validate_on(today).unwrap(),
        ];
        let cursor = QuotaCursor::with_dataset(items);

        let first = cursor.template(CursorPosition::Next(1)).unwrap();
        assert_eq!(first.name, "Asha Verma");
        assert_eq!(first.form_number, "2");

        let beyond = cursor.template(CursorPosition::Next(2)).unwrap();
        assert_eq!(beyond, QuotaDraft::blank(2));
    }
}
