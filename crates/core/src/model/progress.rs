use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::Day;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DayStatusError {
    #[error("unknown progress status: {0}")]
    Unknown(String),
}

/// Outcome recorded for one day.
///
/// `Correct`/`Incorrect` are the canonical tri-state values (unset is a
/// missing key). `Completed`/`NotCompleted` carry the older boolean form so a
/// stored map survives a load/merge/save cycle unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStatus", into = "RawStatus")]
pub enum DayStatus {
    Correct,
    Incorrect,
    Completed,
    NotCompleted,
}

impl DayStatus {
    /// Boolean projection: any recorded status except an explicit `false`.
    #[must_use]
    pub fn is_completed(self) -> bool {
        !matches!(self, DayStatus::NotCompleted)
    }

    /// `Some(true|false)` for graded answers, `None` for reveal-only marks.
    #[must_use]
    pub fn is_correct(self) -> Option<bool> {
        match self {
            DayStatus::Correct => Some(true),
            DayStatus::Incorrect => Some(false),
            DayStatus::Completed | DayStatus::NotCompleted => None,
        }
    }

    #[must_use]
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            DayStatus::Completed
        } else {
            DayStatus::NotCompleted
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DayStatus::Correct => "correct",
            DayStatus::Incorrect => "incorrect",
            DayStatus::Completed => "completed",
            DayStatus::NotCompleted => "not completed",
        };
        f.write_str(label)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Flag(bool),
    Label(String),
}

impl TryFrom<RawStatus> for DayStatus {
    type Error = DayStatusError;

    fn try_from(raw: RawStatus) -> Result<Self, Self::Error> {
        match raw {
            RawStatus::Flag(flag) => Ok(DayStatus::from_completed(flag)),
            RawStatus::Label(label) => match label.as_str() {
                "correct" => Ok(DayStatus::Correct),
                "incorrect" => Ok(DayStatus::Incorrect),
                "completed" => Ok(DayStatus::Completed),
                _ => Err(DayStatusError::Unknown(label)),
            },
        }
    }
}

impl From<DayStatus> for RawStatus {
    fn from(status: DayStatus) -> Self {
        match status {
            DayStatus::Correct => RawStatus::Label("correct".into()),
            DayStatus::Incorrect => RawStatus::Label("incorrect".into()),
            DayStatus::Completed => RawStatus::Flag(true),
            DayStatus::NotCompleted => RawStatus::Flag(false),
        }
    }
}

/// Per-user record of attempted days and their outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<Day, DayStatus>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, day: Day) -> Option<DayStatus> {
        self.0.get(&day).copied()
    }

    /// Set the status for `day`, returning the previous one.
    pub fn record(&mut self, day: Day, status: DayStatus) -> Option<DayStatus> {
        self.0.insert(day, status)
    }

    pub fn remove(&mut self, day: Day) -> Option<DayStatus> {
        self.0.remove(&day)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_completed(&self, day: Day) -> bool {
        self.get(day).is_some_and(DayStatus::is_completed)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Day, DayStatus> {
        self.0.iter()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|status| status.is_completed()).count()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.count_where(|status| status.is_correct() == Some(true))
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.count_where(|status| status.is_correct() == Some(false))
    }

    fn count_where(&self, predicate: impl Fn(DayStatus) -> bool) -> usize {
        self.0.values().copied().filter(|status| predicate(*status)).count()
    }

    /// Merge used at sign-in: remote wins on shared days, local-only days are kept.
    #[must_use]
    pub fn merge_remote_over_local(local: &ProgressMap, remote: &ProgressMap) -> ProgressMap {
        let mut merged = local.clone();
        merged.0.extend(remote.iter().map(|(day, status)| (*day, *status)));
        merged
    }
}

impl FromIterator<(Day, DayStatus)> for ProgressMap {
    fn from_iter<T: IntoIterator<Item = (Day, DayStatus)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ProgressMap {
    type Item = (&'a Day, &'a DayStatus);
    type IntoIter = btree_map::Iter<'a, Day, DayStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(u32, DayStatus)]) -> ProgressMap {
        entries
            .iter()
            .map(|(day, status)| (Day::new(*day), *status))
            .collect()
    }

    #[test]
    fn merge_prefers_remote_and_keeps_local_only_days() {
        let local = map(&[(1, DayStatus::Completed), (2, DayStatus::Completed)]);
        let remote = map(&[(2, DayStatus::NotCompleted), (3, DayStatus::Completed)]);

        let merged = ProgressMap::merge_remote_over_local(&local, &remote);

        assert_eq!(
            merged,
            map(&[
                (1, DayStatus::Completed),
                (2, DayStatus::NotCompleted),
                (3, DayStatus::Completed),
            ])
        );
    }

    #[test]
    fn merge_holds_for_every_key() {
        let local = map(&[
            (1, DayStatus::Correct),
            (4, DayStatus::Incorrect),
            (5, DayStatus::Completed),
        ]);
        let remote = map(&[(4, DayStatus::Correct), (7, DayStatus::Incorrect)]);
        let merged = ProgressMap::merge_remote_over_local(&local, &remote);

        for (day, status) in &remote {
            assert_eq!(merged.get(*day), Some(*status));
        }
        for (day, status) in &local {
            if remote.get(*day).is_none() {
                assert_eq!(merged.get(*day), Some(*status));
            }
        }
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn merge_with_empty_sides() {
        let local = map(&[(1, DayStatus::Correct)]);
        let empty = ProgressMap::new();
        assert_eq!(ProgressMap::merge_remote_over_local(&local, &empty), local);
        assert_eq!(ProgressMap::merge_remote_over_local(&empty, &local), local);
    }

    #[test]
    fn json_form_is_day_keyed_and_verbatim() {
        let mut progress = ProgressMap::new();
        progress.record(Day::new(3), DayStatus::Correct);
        assert_eq!(serde_json::to_string(&progress).unwrap(), r#"{"3":"correct"}"#);

        let legacy: ProgressMap = serde_json::from_str(r#"{"1":true,"2":false}"#).unwrap();
        assert_eq!(legacy.get(Day::new(1)), Some(DayStatus::Completed));
        assert_eq!(legacy.get(Day::new(2)), Some(DayStatus::NotCompleted));
        assert_eq!(serde_json::to_string(&legacy).unwrap(), r#"{"1":true,"2":false}"#);
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        let parsed = serde_json::from_str::<ProgressMap>(r#"{"1":"maybe"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn counts_follow_projection() {
        let progress = map(&[
            (1, DayStatus::Correct),
            (2, DayStatus::Incorrect),
            (3, DayStatus::Completed),
            (4, DayStatus::NotCompleted),
        ]);
        assert_eq!(progress.completed_count(), 3);
        assert_eq!(progress.correct_count(), 1);
        assert_eq!(progress.incorrect_count(), 1);
        assert!(!progress.is_completed(Day::new(4)));
        assert!(!progress.is_completed(Day::new(9)));
    }
}
