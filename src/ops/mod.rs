pub mod check;
pub mod group_ops;
pub mod order;
pub mod project_ops;
pub mod task_ops;

/// Error type for store commands. Every variant is a validation failure: the
/// command is rejected and the aggregate is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("name must not be empty")]
    EmptyName,
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("group {group} does not belong to project {project}")]
    GroupProjectMismatch { group: String, project: String },
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error("project {0} cannot be deleted")]
    ProtectedProject(String),
}
