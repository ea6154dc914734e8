use serde::{Deserialize, Serialize};

/// An ordered group of tasks inside a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Opaque unique identifier
    pub id: String,
    /// Group name
    pub name: String,
    /// Owning project (always references an existing project)
    pub project_id: String,
    /// Display-only collapsed flag
    pub collapsed: bool,
    /// Position among the sibling groups of the same project (dense, 0-based)
    pub order: usize,
}

impl Group {
    /// Create an expanded group at the given position
    pub fn new(id: String, name: String, project_id: String, order: usize) -> Self {
        Group {
            id,
            name,
            project_id,
            collapsed: false,
            order,
        }
    }
}
