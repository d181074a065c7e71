//! Result type for multi-item operations with independent per-item outcomes.

use serde::Serialize;

/// A failed item, identified by its position in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItemError {
    pub index: usize,
    pub input: String,
    pub error: String,
}

/// Outcome of a batch where each item succeeds or fails on its own.
///
/// Both sequences keep input order. `created` holding nothing while
/// `failed` is non-empty means nothing succeeded; both non-empty means a
/// partial success.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome<T> {
    pub created: Vec<T>,
    pub failed: Vec<BatchItemError>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    pub fn is_complete_failure(&self) -> bool {
        self.created.is_empty() && !self.failed.is_empty()
    }
}

/// Split candidate items into accepted ones (with their input index) and
/// per-index failures, preserving input order on both sides.
pub fn partition<I, T, E>(
    items: &[I],
    mut check: impl FnMut(&I) -> Result<T, E>,
) -> (Vec<(usize, T)>, Vec<BatchItemError>)
where
    I: ToString,
    E: ToString,
{
    let mut accepted = Vec::new();
    let mut failed = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match check(item) {
            Ok(value) => accepted.push((index, value)),
            Err(e) => failed.push(BatchItemError {
                index,
                input: item.to_string(),
                error: e.to_string(),
            }),
        }
    }
    (accepted, failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_keeps_indexes_in_order() {
        let items = ["1", "x", "3", "y", "5"];
        let (ok, failed) = partition(&items, |s| s.parse::<i32>().map_err(|e| e.to_string()));

        assert_eq!(ok, vec![(0, 1), (2, 3), (4, 5)]);
        assert_eq!(
            failed.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(failed[0].input, "x");
    }

    #[test]
    fn outcome_classification() {
        let failure = |index| BatchItemError {
            index,
            input: "bad".into(),
            error: "invalid".into(),
        };

        assert!(!BatchOutcome::<i32>::default().is_complete_failure());

        let none_created = BatchOutcome::<i32> {
            created: vec![],
            failed: vec![failure(0)],
        };
        assert!(none_created.is_complete_failure());

        let partial = BatchOutcome {
            created: vec![1],
            failed: vec![failure(1)],
        };
        assert!(!partial.is_complete_failure());
    }
}
