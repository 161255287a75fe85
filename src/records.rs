//! High score records
//!
//! The list is kept sorted descending by score. Equal scores keep their
//! insertion order, so an earlier record stays ahead of a later tie.

use serde::{Deserialize, Serialize};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Player identity
    pub user: String,
    pub score: u64,
    /// When achieved (ISO-8601)
    pub date: String,
}

impl Record {
    pub fn new(user: impl Into<String>, score: u64, date: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            score,
            date: date.into(),
        }
    }

    /// Leaderboard line
    pub fn display_line(&self) -> String {
        format!("{}: {} puntos", self.user, self.score)
    }
}

/// Ranked record list, persisted as a plain JSON array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RecordList {
    entries: Vec<Record>,
}

impl RecordList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Restore ranking after deserializing; stored order is not trusted
    pub fn normalize_order(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Insert a record after every entry with an equal or higher score
    /// Returns the rank achieved (1-indexed)
    pub fn insert(&mut self, record: Record) -> usize {
        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| record.score > e.score);
        match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        }
    }

    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(user: &str, score: u64) -> Record {
        Record::new(user, score, "2026-01-01T00:00:00.000Z")
    }

    #[test]
    fn test_insert_orders_descending() {
        let mut list = RecordList::new();
        assert_eq!(list.insert(rec("Ada", 42)), 1);
        assert_eq!(list.insert(rec("Lin", 99)), 1);

        let users: Vec<_> = list.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, ["Lin", "Ada"]);
        assert_eq!(list.top_score(), Some(99));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut list = RecordList::new();
        list.insert(rec("first", 10));
        list.insert(rec("big", 50));
        assert_eq!(list.insert(rec("second", 10)), 3);

        let users: Vec<_> = list.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, ["big", "first", "second"]);
    }

    #[test]
    fn test_json_shape() {
        let mut list = RecordList::new();
        list.insert(rec("Ada", 42));
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(
            json,
            r#"[{"user":"Ada","score":42,"date":"2026-01-01T00:00:00.000Z"}]"#
        );
    }

    #[test]
    fn test_normalize_order_is_stable() {
        let mut list: RecordList = serde_json::from_str(
            r#"[{"user":"x","score":1,"date":"d"},{"user":"y","score":3,"date":"d"},{"user":"z","score":1,"date":"d"}]"#,
        )
        .unwrap();
        list.normalize_order();
        let users: Vec<_> = list.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, ["y", "x", "z"]);
    }

    proptest! {
        #[test]
        fn prop_insert_keeps_sorted_and_stable(scores in prop::collection::vec(0u64..20, 0..40)) {
            let mut list = RecordList::new();
            for (i, score) in scores.iter().enumerate() {
                list.insert(rec(&i.to_string(), *score));

                let entries = list.entries();
                for pair in entries.windows(2) {
                    prop_assert!(pair[0].score >= pair[1].score);
                    if pair[0].score == pair[1].score {
                        let a: usize = pair[0].user.parse().unwrap();
                        let b: usize = pair[1].user.parse().unwrap();
                        prop_assert!(a < b);
                    }
                }
            }
            prop_assert_eq!(list.len(), scores.len());
        }
    }
}
