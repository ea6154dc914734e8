pub mod group;
pub mod id;
pub mod project;
pub mod task;

pub use group::*;
pub use id::*;
pub use project::*;
pub use task::*;
