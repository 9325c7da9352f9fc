// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent per-subject fetch with per-subject failure isolation.

use std::future::Future;

use futures::future::join_all;
use serde::Serialize;
use tracing::warn;
use voipdesk_core::VoipdeskError;

/// One subject's value from a batch. Rebuilt wholesale every batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectRecord<V> {
    pub subject_id: String,
    pub value: V,
}

pub type AvailabilityRecord = SubjectRecord<bool>;
pub type StatusRecord = SubjectRecord<String>;

/// Runs `fetch` for every subject at once and returns one record per subject,
/// in input order. A failed fetch yields `V::default()` for that subject only.
pub async fn fan_out<V, F, Fut>(subjects: &[String], fetch: F) -> Vec<SubjectRecord<V>>
where
    V: Default,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<V, VoipdeskError>>,
{
    let results = join_all(subjects.iter().map(|id| fetch(id.clone()))).await;

    subjects
        .iter()
        .zip(results)
        .map(|(id, result)| SubjectRecord {
            subject_id: id.clone(),
            value: result.unwrap_or_else(|e| {
                warn!(subject = %id, error = %e, "fetch failed, using default");
                V::default()
            }),
        })
        .collect()
}

/// The value recorded for `subject_id`, if present.
pub fn lookup<'a, V>(records: &'a [SubjectRecord<V>], subject_id: &str) -> Option<&'a V> {
    records
        .iter()
        .find(|r| r.subject_id == subject_id)
        .map(|r| &r.value)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn middle_failure_defaults_only_that_subject() {
        let records = fan_out(&ids(&["A", "B", "C"]), |id| async move {
            if id == "B" {
                Err(VoipdeskError::Remote("User not found".into()))
            } else {
                Ok(true)
            }
        })
        .await;

        assert_eq!(
            records,
            vec![
                SubjectRecord { subject_id: "A".into(), value: true },
                SubjectRecord { subject_id: "B".into(), value: false },
                SubjectRecord { subject_id: "C".into(), value: true },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn order_follows_input_not_completion() {
        let records = fan_out(&ids(&["slow", "fast"]), |id| async move {
            let delay = if id == "slow" { 50 } else { 1 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(id.len())
        })
        .await;
        assert_eq!(records[0].subject_id, "slow");
        assert_eq!(records[0].value, 4);
        assert_eq!(records[1].subject_id, "fast");
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_run_concurrently() {
        let start = tokio::time::Instant::now();
        let subjects = ids(&["1", "2", "3", "4"]);
        let records = fan_out(&subjects, |_| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(String::from("available"))
        })
        .await;
        assert_eq!(records.len(), subjects.len());
        assert!(start.elapsed() < Duration::from_secs(20));
    }

    #[tokio::test]
    async fn empty_input_gives_empty_output() {
        let records = fan_out::<bool, _, _>(&[], |_| async { Ok(true) }).await;
        assert!(records.is_empty());
    }

    #[test]
    fn lookup_by_subject() {
        let records = vec![SubjectRecord {
            subject_id: "u1".to_string(),
            value: "online".to_string(),
        }];
        assert_eq!(lookup(&records, "u1").map(String::as_str), Some("online"));
        assert_eq!(lookup(&records, "u2"), None);
    }
}
