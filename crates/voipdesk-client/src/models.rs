// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed views of the VOIP resources the console touches.
//!
//! Only the fields the console reads or writes are modelled; everything
//! else a resource carries is kept verbatim in `extra`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reads an explicit JSON `null` as the field's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uuid: String,
    #[serde(default, deserialize_with = "nullable")]
    pub extension: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub user_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub linked_emails: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub uuid: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default, deserialize_with = "nullable")]
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntGroup {
    pub uuid: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub extension_number: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub members: Vec<String>,
}

impl HuntGroup {
    pub fn has_member(&self, user_uuid: &str) -> bool {
        self.members.iter().any(|m| m == user_uuid)
    }

    /// The member list with `user_uuid` added when absent, removed when present.
    pub fn toggled_members(&self, user_uuid: &str) -> Vec<String> {
        if self.has_member(user_uuid) {
            self.members
                .iter()
                .filter(|m| *m != user_uuid)
                .cloned()
                .collect()
        } else {
            let mut members = self.members.clone();
            members.push(user_uuid.to_string());
            members
        }
    }
}

/// The full body `PUT /voip/group/{uuid}` expects.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HuntGroupUpdate<'a> {
    pub name: &'a str,
    pub extension_number: u64,
    pub members: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallQueue {
    pub uuid: String,
    pub name: String,
    #[serde(flatten)]
    pub settings: QueueSettings,
    #[serde(default, deserialize_with = "nullable")]
    pub members: Vec<String>,
}

/// The editable timing and strategy fields of a call queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSettings {
    #[serde(default, deserialize_with = "nullable")]
    pub ring_timeout: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub ring_progressively: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub answer_wait: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub no_answer_wait: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub reject_wait: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub max_no_answer: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub strategy: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: u32,
}

/// The full body `PUT /voip/queue-group/{uuid}` expects; members are carried over unchanged.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CallQueueUpdate<'a> {
    pub name: &'a str,
    #[serde(flatten)]
    pub settings: &'a QueueSettings,
    pub members: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallParty {
    #[serde(default, deserialize_with = "nullable")]
    pub number: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub uuid: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "nullable")]
    pub call_start_time: i64,
    /// Seconds.
    #[serde(default, deserialize_with = "nullable")]
    pub call_duration: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub disposition: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub call_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub answered: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub has_recording: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub cost: f64,
    #[serde(default)]
    pub from: Option<CallParty>,
    #[serde(default)]
    pub to: Option<CallParty>,
    #[serde(default)]
    pub parent_uuid: Option<String>,
    #[serde(default)]
    pub child_uuid: Option<String>,
}

impl CallRecord {
    /// `status`, falling back to `disposition`.
    pub fn effective_status(&self) -> Option<&str> {
        self.status.as_deref().or(self.disposition.as_deref())
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.call_start_time)
    }

    /// `"{minutes}m {seconds}s"`.
    pub fn duration_label(&self) -> String {
        format!("{}m {}s", self.call_duration / 60, self.call_duration % 60)
    }

    pub fn is_outbound(&self) -> bool {
        self.call_type.eq_ignore_ascii_case("outbound")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RecordingLink {
    #[serde(default, deserialize_with = "nullable")]
    pub recording: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sound {
    pub uuid: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub file_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tag: String,
    #[serde(default, deserialize_with = "nullable")]
    pub audio_type: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub shared: bool,
}

/// Body of `POST /voip/sound`: the audio bytes travel base64-encoded in `content`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundUpload {
    pub name: String,
    pub file_name: String,
    pub tag: String,
    pub audio_type: u32,
    pub content: String,
}

impl SoundUpload {
    pub fn encode(
        name: impl Into<String>,
        file_name: impl Into<String>,
        tag: impl Into<String>,
        audio_type: u32,
        bytes: &[u8],
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            tag: tag.into(),
            audio_type,
            content: STANDARD.encode(bytes),
        }
    }
}

impl std::fmt::Debug for SoundUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundUpload")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("tag", &self.tag)
            .field("audio_type", &self.audio_type)
            .field("content_len", &self.content.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub uuid: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub random: bool,
    #[serde(default, deserialize_with = "nullable", rename = "default")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub sounds: Vec<String>,
}

/// Body of `POST /voip/playlist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlaylist {
    pub name: String,
    pub random: bool,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub sounds: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_keeps_unmodelled_fields() {
        let user: User = serde_json::from_value(json!({
            "uuid": "u1",
            "extension": 101,
            "user_name": "jdoe",
            "display_name": "Jane Doe",
            "can_barge": true
        }))
        .unwrap();
        assert_eq!(user.extension, 101);
        assert_eq!(user.extra.get("can_barge"), Some(&json!(true)));
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let user: User = serde_json::from_value(json!({
            "uuid": "u2",
            "extension": null,
            "display_name": null,
            "linked_emails": null
        }))
        .unwrap();
        assert_eq!(user.extension, 0);
        assert_eq!(user.display_name, "");
        assert!(user.linked_emails.is_empty());

        let call: CallRecord = serde_json::from_value(json!({
            "uuid": "c2",
            "call_type": null,
            "cost": null,
            "answered": null
        }))
        .unwrap();
        assert_eq!(call.call_type, "");
        assert_eq!(call.cost, 0.0);
        assert!(!call.answered);

        let sound: Sound =
            serde_json::from_value(json!({"uuid": "s1", "name": null, "file_name": null})).unwrap();
        assert_eq!(sound.name, "");
        assert_eq!(sound.file_name, "");
    }

    #[test]
    fn toggling_adds_then_removes() {
        let group = HuntGroup {
            uuid: "g".into(),
            name: "Sales".into(),
            extension_number: 600,
            members: vec!["a".into()],
        };
        assert_eq!(group.toggled_members("b"), vec!["a", "b"]);
        assert!(group.toggled_members("a").is_empty());
    }

    #[test]
    fn queue_update_body_is_flat() {
        let settings = QueueSettings {
            ring_timeout: 20,
            ring_progressively: 1,
            answer_wait: 5,
            no_answer_wait: 10,
            reject_wait: 10,
            max_no_answer: 3,
            strategy: "ring-all".into(),
            duration: 300,
        };
        let members = vec!["u1".to_string()];
        let body = serde_json::to_value(CallQueueUpdate {
            name: "Support",
            settings: &settings,
            members: &members,
        })
        .unwrap();
        assert_eq!(body["ring_timeout"], 20);
        assert_eq!(body["strategy"], "ring-all");
        assert_eq!(body["members"], json!(["u1"]));
        assert!(body.get("settings").is_none());
    }

    #[test]
    fn call_record_helpers() {
        let call: CallRecord = serde_json::from_value(json!({
            "uuid": "c1",
            "call_start_time": 1_700_000_000_000_i64,
            "call_duration": 125,
            "disposition": "ANSWERED",
            "call_type": "Outbound",
            "answered": true
        }))
        .unwrap();
        assert_eq!(call.effective_status(), Some("ANSWERED"));
        assert_eq!(call.duration_label(), "2m 5s");
        assert!(call.is_outbound());
        assert_eq!(call.started_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn upload_content_is_base64() {
        let upload = SoundUpload::encode("hold", "hold.mp3", "Hold Music", 1, b"abc");
        assert_eq!(upload.content, "YWJj");
        assert!(!format!("{upload:?}").contains("YWJj"));
    }

    #[test]
    fn playlist_default_flag_uses_wire_name() {
        let body = serde_json::to_value(NewPlaylist {
            name: "Lobby".into(),
            is_default: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"name": "Lobby", "random": false, "default": true, "sounds": []}));
    }
}
