use serde::{Deserialize, Serialize};

/// The distinguished default project. It exists from store creation, cannot
/// be deleted, and becomes the active selection when the active project is
/// deleted. Its order value still participates in project reordering.
pub const INBOX_PROJECT_ID: &str = "inbox";

/// A project: the top-level container for groups and tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque unique identifier (`"inbox"` for the default project)
    pub id: String,
    /// Project name
    pub name: String,
    /// Display-only color (hex string)
    pub color: String,
    /// Position among all projects (dense, 0-based)
    pub order: usize,
}

impl Project {
    pub fn new(id: String, name: String, color: String, order: usize) -> Self {
        Project {
            id,
            name,
            color,
            order,
        }
    }

    /// Whether this is the protected default project
    pub fn is_inbox(&self) -> bool {
        self.id == INBOX_PROJECT_ID
    }
}
