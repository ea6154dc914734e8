use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority: 1 is highest, 4 is lowest (the default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    /// The ordinal shown to users (1–4)
    pub fn as_number(self) -> u8 {
        match self {
            Priority::P1 => 1,
            Priority::P2 => 2,
            Priority::P3 => 3,
            Priority::P4 => 4,
        }
    }

    /// Parse an ordinal (1–4) into a priority
    pub fn from_number(n: u8) -> Option<Priority> {
        match n {
            1 => Some(Priority::P1),
            2 => Some(Priority::P2),
            3 => Some(Priority::P3),
            4 => Some(Priority::P4),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::P4
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.as_number()
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Priority::from_number(n).ok_or_else(|| format!("priority out of range: {}", n))
    }
}

/// A single task. Tasks carry no explicit order field: display order within a
/// scope (project + optional group) is the collection order of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, stable for the task's lifetime
    pub id: String,
    /// Task title text (never empty)
    pub title: String,
    /// Completion flag
    pub completed: bool,
    /// Priority ordinal
    pub priority: Priority,
    /// Owning project (always references an existing project)
    pub project_id: String,
    /// Owning group, if any; the group always belongs to `project_id`
    pub group_id: Option<String>,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl Task {
    /// Create an ungrouped, incomplete task with the given fields
    pub fn new(id: String, title: String, priority: Priority, project_id: String) -> Self {
        Task {
            id,
            title,
            completed: false,
            priority,
            project_id,
            group_id: None,
            due_date: None,
            notes: None,
        }
    }
}
