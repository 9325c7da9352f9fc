// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side list filters. All text matching is case-insensitive substring matching.

use crate::models::{CallRecord, User};

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Matches display name, extension, user name, timezone or country code.
pub fn user_matches(user: &User, search: &str) -> bool {
    let search = search.trim().to_lowercase();
    if search.is_empty() {
        return true;
    }
    contains(&user.display_name, &search)
        || user.extension.to_string().contains(&search)
        || contains(&user.user_name, &search)
        || user.timezone.as_deref().is_some_and(|t| contains(t, &search))
        || user
            .country_code
            .as_deref()
            .is_some_and(|c| contains(c, &search))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallFilter {
    /// Substring of either party's number or nickname.
    pub search: Option<String>,
    /// Exact call type, e.g. `inbound`.
    pub call_type: Option<String>,
    /// Exact status (or disposition when no status is set).
    pub status: Option<String>,
    pub answered: Option<bool>,
}

impl CallFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, call: &CallRecord) -> bool {
        self.matches_search(call)
            && self
                .call_type
                .as_deref()
                .is_none_or(|t| call.call_type.eq_ignore_ascii_case(t))
            && self.status.as_deref().is_none_or(|s| {
                call.effective_status()
                    .is_some_and(|status| status.eq_ignore_ascii_case(s))
            })
            && self.answered.is_none_or(|a| call.answered == a)
    }

    fn matches_search(&self, call: &CallRecord) -> bool {
        let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let search = search.to_lowercase();
        [&call.from, &call.to].into_iter().flatten().any(|party| {
            contains(&party.number, &search)
                || party
                    .nickname
                    .as_deref()
                    .is_some_and(|n| contains(n, &search))
        })
    }

    pub fn apply<'a>(&self, calls: &'a [CallRecord]) -> Vec<&'a CallRecord> {
        calls.iter().filter(|c| self.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user() -> User {
        serde_json::from_value(json!({
            "uuid": "u1",
            "extension": 204,
            "user_name": "mlopez",
            "display_name": "Maria Lopez",
            "timezone": "Europe/Madrid",
            "country_code": "ES"
        }))
        .unwrap()
    }

    fn call(value: serde_json::Value) -> CallRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn user_search_covers_each_field() {
        let u = user();
        for term in ["maria", "204", "MLOP", "madrid", "es", ""] {
            assert!(user_matches(&u, term), "{term}");
        }
        assert!(!user_matches(&u, "tokyo"));
    }

    #[test]
    fn call_filter_combines_criteria() {
        let calls = vec![
            call(json!({"uuid": "1", "call_type": "inbound", "status": "answered", "answered": true,
                "from": {"number": "+34600111222", "nickname": "Front desk"}})),
            call(json!({"uuid": "2", "call_type": "outbound", "disposition": "NO ANSWER", "answered": false,
                "to": {"number": "+34911000000"}})),
        ];

        assert_eq!(CallFilter::default().apply(&calls).len(), 2);

        let inbound = CallFilter {
            call_type: Some("INBOUND".into()),
            ..Default::default()
        };
        assert_eq!(inbound.apply(&calls)[0].uuid, "1");

        let by_disposition = CallFilter {
            status: Some("no answer".into()),
            ..Default::default()
        };
        assert_eq!(by_disposition.apply(&calls)[0].uuid, "2");

        let nickname = CallFilter {
            search: Some("front".into()),
            answered: Some(true),
            ..Default::default()
        };
        assert_eq!(nickname.apply(&calls).len(), 1);

        let unanswered_front = CallFilter {
            search: Some("front".into()),
            answered: Some(false),
            ..Default::default()
        };
        assert!(unanswered_front.apply(&calls).is_empty());
    }
}
