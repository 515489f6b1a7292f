//
//  bitbucket-rest-client
//  api/server/tasks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Review tasks attached to pull request comments.
//!
//! Task listings are served from the pull request activity stream, so most
//! fields are optional: an activity entry that carries no task text still
//! parses.

use serde::{Deserialize, Serialize};

use super::User;

/// Whether a task still needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Open,
    Resolved,
}

/// A review task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,

    /// Unix timestamp in milliseconds.
    #[serde(rename = "createdDate", default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

impl Task {
    pub fn is_open(&self) -> bool {
        self.state == Some(TaskState::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activity_shaped_entry_parses() {
        let task: Task = serde_json::from_value(json!({
            "id": 101,
            "createdDate": 1359065920,
            "action": "COMMENTED"
        }))
        .unwrap();

        assert_eq!(task.id, 101);
        assert_eq!(task.text, None);
        assert!(!task.is_open());
    }

    #[test]
    fn test_full_task() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "text": "Fix the typo",
            "state": "OPEN",
            "author": {"id": 1, "name": "jcitizen", "displayName": "Jane Citizen"}
        }))
        .unwrap();

        assert!(task.is_open());
        assert_eq!(task.author.map(|a| a.name), Some("jcitizen".to_string()));
    }
}
