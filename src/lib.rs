//! taskdeck — the ordered-collection core of a drag-and-drop task manager.
//!
//! Tasks live in projects and optionally in ordered groups; the [`Store`]
//! holds all three collections and exposes the commands that add, update,
//! reorder, and move entities while keeping every scope's ordering dense
//! and every cross-collection reference valid. Rendering, gesture capture,
//! and persistence are the host's business: it feeds commands in and renders
//! the ordered views the queries produce.

pub mod model;
pub mod ops;
pub mod store;

pub use model::{Group, IdGen, Priority, Project, SeqIds, Task, UuidIds};
pub use model::project::INBOX_PROJECT_ID;
pub use ops::StoreError;
pub use ops::check::{CheckError, CheckResult, check_state};
pub use ops::project_ops::ProjectPatch;
pub use ops::task_ops::{NewTask, TaskPatch};
pub use store::{State, Store};
