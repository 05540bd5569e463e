use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority, serialized lowercase on the wire and on disk.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Display rank: high sorts before medium sorts before low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Next value in the high → medium → low cycle.
    pub fn cycled(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(label)
    }
}

/// Error for priority strings outside the enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError;

impl fmt::Display for ParsePriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("priority must be one of: high, medium, low")
    }
}

impl std::error::Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ParsePriorityError),
        }
    }
}

/// Task entity. The id is assigned by the creating client (millisecond
/// timestamp), not by the store, and is unique within the collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl TaskRecord {
    pub fn new(text: String, priority: Priority, date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            text,
            priority: Some(priority),
            date,
        }
    }

    /// Sort key for display ordering; records without a priority go last.
    pub fn priority_rank(&self) -> u8 {
        self.priority.map(Priority::rank).unwrap_or(4)
    }
}

/// Diary entry. Ids live in their own space, independent from task ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiaryEntry {
    pub id: i64,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl DiaryEntry {
    pub fn new(text: String, date: DateTime<Utc>) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            text,
            date,
        }
    }
}

/// Partial update for a task: unset fields keep their prior values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut TaskRecord) {
        if let Some(text) = &self.text {
            task.text = text.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_string(&Priority::High).expect("serialize");
        assert_eq!(json, "\"high\"");
        let back: Priority = serde_json::from_str("\"low\"").expect("deserialize");
        assert_eq!(back, Priority::Low);
    }

    #[test]
    fn priority_parses_enum_members_only() {
        assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("urgent".parse::<Priority>(), Err(ParsePriorityError));
    }

    #[test]
    fn rank_orders_high_before_low_and_absent_last() {
        let with = |p| TaskRecord {
            id: 1,
            text: "x".into(),
            priority: p,
            date: None,
        };
        assert!(with(Some(Priority::High)).priority_rank() < with(Some(Priority::Medium)).priority_rank());
        assert!(with(Some(Priority::Medium)).priority_rank() < with(Some(Priority::Low)).priority_rank());
        assert!(with(Some(Priority::Low)).priority_rank() < with(None).priority_rank());
    }

    #[test]
    fn task_omits_absent_fields_on_disk() {
        let task = TaskRecord {
            id: 42,
            text: "Buy milk".into(),
            priority: None,
            date: None,
        };
        let json = serde_json::to_string(&task).expect("serialize");
        assert_eq!(json, r#"{"id":42,"text":"Buy milk"}"#);
    }

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let mut task = TaskRecord {
            id: 7,
            text: "old".into(),
            priority: Some(Priority::Low),
            date: None,
        };
        TaskPatch {
            text: Some("new".into()),
            priority: None,
        }
        .apply(&mut task);
        assert_eq!(task.text, "new");
        assert_eq!(task.priority, Some(Priority::Low));
    }
}
