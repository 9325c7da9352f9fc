// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hunt groups and call queues.

use std::collections::HashMap;

use clap::Args;
use voipdesk_client::{CallQueue, HuntGroup, QueueSettings, User};
use voipdesk_core::VoipdeskError;

use crate::console::Console;
use crate::render::{Output, print_json, table};

pub async fn run_hunt_groups(console: &Console, out: Output) -> Result<(), VoipdeskError> {
    let groups = console.api.list_hunt_groups().await?;
    if out.json {
        print_json(&groups);
        return Ok(());
    }
    let users = console.api.list_users().await?;
    let names: HashMap<&str, &str> = users
        .iter()
        .map(|u| (u.uuid.as_str(), u.display_name.as_str()))
        .collect();

    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            let members: Vec<&str> = g
                .members
                .iter()
                .map(|m| names.get(m.as_str()).copied().unwrap_or(m.as_str()))
                .collect();
            vec![g.extension_number.to_string(), g.name.clone(), members.join(", ")]
        })
        .collect();
    println!("{}", table(&["EXT", "GROUP", "MEMBERS"], &rows));
    Ok(())
}

/// Adds the user to the group, or removes them if already a member.
pub async fn run_hunt_group_toggle(
    console: &Console,
    out: Output,
    group: &str,
    user: &str,
) -> Result<(), VoipdeskError> {
    let groups = console.api.list_hunt_groups().await?;
    let group = find_group(&groups, group)?;
    let users = console.api.list_users().await?;
    let user = find_user(&users, user)?;

    let was_member = group.has_member(&user.uuid);
    let updated = console.api.toggle_hunt_group_member(group, &user.uuid).await?;
    if out.json {
        print_json(&updated);
    } else if was_member {
        println!("{}", out.ok(&format!("removed {} from {}", user.display_name, group.name)));
    } else {
        println!("{}", out.ok(&format!("added {} to {}", user.display_name, group.name)));
    }
    Ok(())
}

fn find_group<'a>(groups: &'a [HuntGroup], key: &str) -> Result<&'a HuntGroup, VoipdeskError> {
    groups
        .iter()
        .find(|g| g.uuid == key || g.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| VoipdeskError::InvalidInput(format!("no hunt group matches `{key}`")))
}

/// Matches a user by uuid, user name or extension.
fn find_user<'a>(users: &'a [User], key: &str) -> Result<&'a User, VoipdeskError> {
    users
        .iter()
        .find(|u| u.uuid == key || u.user_name.eq_ignore_ascii_case(key) || u.extension.to_string() == key)
        .ok_or_else(|| VoipdeskError::InvalidInput(format!("no user matches `{key}`")))
}

pub async fn run_queues(console: &Console, out: Output) -> Result<(), VoipdeskError> {
    let queues = console.api.list_call_queues().await?;
    if out.json {
        print_json(&queues);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = queues
        .iter()
        .map(|q| {
            vec![
                q.name.clone(),
                q.settings.strategy.clone(),
                format!("{}s", q.settings.ring_timeout),
                q.settings.max_no_answer.to_string(),
                q.members.len().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        table(&["QUEUE", "STRATEGY", "RING TIMEOUT", "MAX NO ANSWER", "MEMBERS"], &rows)
    );
    Ok(())
}

#[derive(Args, Debug, Default)]
pub struct QueueUpdateArgs {
    /// Queue uuid or name.
    pub queue: String,
    /// Rename the queue.
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub strategy: Option<String>,
    /// Seconds to ring each agent.
    #[arg(long)]
    pub ring_timeout: Option<u32>,
    #[arg(long)]
    pub ring_progressively: Option<u32>,
    #[arg(long)]
    pub answer_wait: Option<u32>,
    #[arg(long)]
    pub no_answer_wait: Option<u32>,
    #[arg(long)]
    pub reject_wait: Option<u32>,
    #[arg(long)]
    pub max_no_answer: Option<u32>,
    /// Maximum seconds a caller waits in the queue.
    #[arg(long)]
    pub duration: Option<u32>,
}

impl QueueUpdateArgs {
    fn apply(&self, current: &QueueSettings) -> QueueSettings {
        QueueSettings {
            ring_timeout: self.ring_timeout.unwrap_or(current.ring_timeout),
            ring_progressively: self.ring_progressively.unwrap_or(current.ring_progressively),
            answer_wait: self.answer_wait.unwrap_or(current.answer_wait),
            no_answer_wait: self.no_answer_wait.unwrap_or(current.no_answer_wait),
            reject_wait: self.reject_wait.unwrap_or(current.reject_wait),
            max_no_answer: self.max_no_answer.unwrap_or(current.max_no_answer),
            strategy: self.strategy.clone().unwrap_or_else(|| current.strategy.clone()),
            duration: self.duration.unwrap_or(current.duration),
        }
    }
}

pub async fn run_queue_update(
    console: &Console,
    out: Output,
    args: QueueUpdateArgs,
) -> Result<(), VoipdeskError> {
    let queues = console.api.list_call_queues().await?;
    let queue: &CallQueue = queues
        .iter()
        .find(|q| q.uuid == args.queue || q.name.eq_ignore_ascii_case(&args.queue))
        .ok_or_else(|| VoipdeskError::InvalidInput(format!("no call queue matches `{}`", args.queue)))?;

    let settings = args.apply(&queue.settings);
    let saved = console
        .api
        .update_call_queue(queue, args.name.as_deref(), settings)
        .await?;
    if out.json {
        print_json(&saved);
    } else {
        println!("{}", out.ok(&format!("saved queue {}", saved.name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn queue_args_override_only_given_fields() {
        let current = QueueSettings {
            ring_timeout: 20,
            ring_progressively: 0,
            answer_wait: 5,
            no_answer_wait: 10,
            reject_wait: 10,
            max_no_answer: 3,
            strategy: "ring-all".into(),
            duration: 300,
        };
        let args = QueueUpdateArgs {
            ring_timeout: Some(30),
            strategy: Some("longest-idle".into()),
            ..Default::default()
        };
        let next = args.apply(&current);
        assert_eq!(next.ring_timeout, 30);
        assert_eq!(next.strategy, "longest-idle");
        assert_eq!(next.duration, 300);
        assert_eq!(next.max_no_answer, 3);
    }

    #[test]
    fn users_match_by_uuid_name_or_extension() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"uuid": "u1", "extension": 101, "user_name": "ana", "display_name": "Ana"},
            {"uuid": "u2", "extension": 102, "user_name": "ben", "display_name": "Ben"}
        ]))
        .unwrap();
        assert_eq!(find_user(&users, "u2").unwrap().display_name, "Ben");
        assert_eq!(find_user(&users, "ANA").unwrap().uuid, "u1");
        assert_eq!(find_user(&users, "102").unwrap().uuid, "u2");
        assert_eq!(
            find_user(&users, "zed").unwrap_err().to_string(),
            "no user matches `zed`"
        );
    }

    #[test]
    fn groups_match_by_uuid_or_name() {
        let groups: Vec<HuntGroup> = serde_json::from_value(json!([
            {"uuid": "g1", "name": "Sales", "extension_number": 600, "members": []}
        ]))
        .unwrap();
        assert_eq!(find_group(&groups, "sales").unwrap().uuid, "g1");
        assert_eq!(find_group(&groups, "g1").unwrap().name, "Sales");
        assert!(find_group(&groups, "support").is_err());
    }
}
