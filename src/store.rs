//! The store aggregate: three entity collections plus transient selection
//! state, mutated only through the command surface. Every command validates
//! before it mutates, so a rejected command leaves the aggregate untouched
//! and every observable snapshot satisfies the ordering and referential
//! invariants.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::project::INBOX_PROJECT_ID;
use crate::model::{Group, IdGen, Project, Task, UuidIds};
use crate::ops::task_ops::{NewTask, TaskPatch};
use crate::ops::project_ops::ProjectPatch;
use crate::ops::{StoreError, group_ops, order, project_ops, task_ops};

/// The full aggregate state. Reads for rendering go through [`Store`]'s
/// query methods or this snapshot; fields are public so a host can persist
/// or inspect it, but mutation belongs to the command surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub tasks: Vec<Task>,
    pub groups: Vec<Group>,
    pub projects: Vec<Project>,
    /// The project whose contents the UI is showing
    pub active_project: String,
    pub editing_task_id: Option<String>,
    pub editing_group_id: Option<String>,
    pub editing_project_id: Option<String>,
}

impl State {
    /// The initial state: the three seed projects with the inbox active,
    /// no tasks, no groups, no editing selections.
    pub fn seed() -> Self {
        State {
            tasks: Vec::new(),
            groups: Vec::new(),
            projects: vec![
                Project::new(INBOX_PROJECT_ID.into(), "Inbox".into(), "#246fe0".into(), 0),
                Project::new("personal".into(), "Personal".into(), "#ff9a14".into(), 1),
                Project::new("work".into(), "Work".into(), "#eb4034".into(), 2),
            ],
            active_project: INBOX_PROJECT_ID.into(),
            editing_task_id: None,
            editing_group_id: None,
            editing_project_id: None,
        }
    }

    /// Look up a task by id
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Look up a group by id
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Look up a project by id
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// All projects in display order
    pub fn ordered_projects(&self) -> Vec<&Project> {
        order::project_slots(&self.projects)
            .into_iter()
            .map(|i| &self.projects[i])
            .collect()
    }

    /// One project's groups in display order
    pub fn ordered_groups(&self, project_id: &str) -> Vec<&Group> {
        order::group_slots(&self.groups, project_id)
            .into_iter()
            .map(|i| &self.groups[i])
            .collect()
    }

    /// One scope's tasks in display (collection) order. `group_id` of `None`
    /// selects the project's ungrouped tasks.
    pub fn ordered_tasks(&self, project_id: &str, group_id: Option<&str>) -> Vec<&Task> {
        order::task_slots(&self.tasks, project_id, group_id)
            .into_iter()
            .map(|i| &self.tasks[i])
            .collect()
    }
}

impl Default for State {
    fn default() -> Self {
        State::seed()
    }
}

/// The command dispatcher owning the aggregate and the id supplier.
/// Commands run synchronously to completion; each either applies fully or
/// returns an error having changed nothing.
pub struct Store {
    state: State,
    ids: Box<dyn IdGen>,
}

impl Store {
    /// A seeded store using the given id supplier
    pub fn new(ids: Box<dyn IdGen>) -> Self {
        debug!("store created with seed projects");
        Store {
            state: State::seed(),
            ids,
        }
    }

    /// Read-only snapshot of the full aggregate
    pub fn state(&self) -> &State {
        &self.state
    }

    // --- Task commands ---

    /// Add a task at the end of its (project, group) scope; returns its id.
    pub fn add_task(&mut self, new: NewTask) -> Result<String, StoreError> {
        task_ops::add_task(&mut self.state, self.ids.as_mut(), new)
    }

    /// Flip a task's completion flag.
    pub fn toggle_task(&mut self, task_id: &str) -> Result<(), StoreError> {
        task_ops::toggle_task(&mut self.state, task_id)
    }

    /// Merge the provided fields into a task.
    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> Result<(), StoreError> {
        task_ops::update_task(&mut self.state, task_id, patch)
    }

    /// Remove a task.
    pub fn delete_task(&mut self, task_id: &str) -> Result<(), StoreError> {
        task_ops::delete_task(&mut self.state, task_id)
    }

    /// Move a task within the (active project, group) scope.
    pub fn reorder_tasks(
        &mut self,
        src: usize,
        dst: usize,
        group_id: Option<&str>,
    ) -> Result<(), StoreError> {
        task_ops::reorder_tasks(&mut self.state, src, dst, group_id)
    }

    /// Move a task to another group scope within its project.
    pub fn move_task_between_groups(
        &mut self,
        task_id: &str,
        source_group: Option<&str>,
        dest_group: Option<&str>,
        dest_index: usize,
    ) -> Result<(), StoreError> {
        task_ops::move_task_between_groups(
            &mut self.state,
            task_id,
            source_group,
            dest_group,
            dest_index,
        )
    }

    /// Move a task to another project's ungrouped scope.
    pub fn move_task_to_project(
        &mut self,
        task_id: &str,
        dest_project: &str,
        index: usize,
    ) -> Result<(), StoreError> {
        task_ops::move_task_to_project(&mut self.state, task_id, dest_project, index)
    }

    // --- Group commands ---

    /// Add a group at the end of the active project's groups; returns its id.
    pub fn add_group(&mut self, name: impl Into<String>) -> Result<String, StoreError> {
        group_ops::add_group(&mut self.state, self.ids.as_mut(), name)
    }

    /// Flip a group's collapsed flag.
    pub fn toggle_group_collapse(&mut self, group_id: &str) -> Result<(), StoreError> {
        group_ops::toggle_group_collapse(&mut self.state, group_id)
    }

    /// Rename a group.
    pub fn update_group_name(
        &mut self,
        group_id: &str,
        name: impl Into<String>,
    ) -> Result<(), StoreError> {
        group_ops::update_group_name(&mut self.state, group_id, name)
    }

    /// Remove a group; its tasks become ungrouped.
    pub fn delete_group(&mut self, group_id: &str) -> Result<(), StoreError> {
        group_ops::delete_group(&mut self.state, group_id)
    }

    /// Move a group within one project's group scope.
    pub fn reorder_groups(
        &mut self,
        src: usize,
        dst: usize,
        project_id: &str,
    ) -> Result<(), StoreError> {
        group_ops::reorder_groups(&mut self.state, src, dst, project_id)
    }

    /// Move a group (and its tasks) to another project.
    pub fn move_group(&mut self, group_id: &str, dest_project: &str) -> Result<(), StoreError> {
        group_ops::move_group(&mut self.state, group_id, dest_project)
    }

    // --- Project commands ---

    /// Add a project at the end of the project list; returns its id.
    pub fn add_project(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<String, StoreError> {
        project_ops::add_project(&mut self.state, self.ids.as_mut(), name, color)
    }

    /// Rename or recolor a project.
    pub fn update_project(
        &mut self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> Result<(), StoreError> {
        project_ops::update_project(&mut self.state, project_id, patch)
    }

    /// Remove a project and everything in it.
    pub fn delete_project(&mut self, project_id: &str) -> Result<(), StoreError> {
        project_ops::delete_project(&mut self.state, project_id)
    }

    /// Move a project within the project list.
    pub fn reorder_projects(&mut self, src: usize, dst: usize) -> Result<(), StoreError> {
        project_ops::reorder_projects(&mut self.state, src, dst)
    }

    /// Switch the active project.
    pub fn set_active_project(&mut self, project_id: &str) -> Result<(), StoreError> {
        project_ops::set_active_project(&mut self.state, project_id)
    }

    // --- Editing selections ---
    //
    // Plain replacements, one slot per entity kind. `Some` targets must
    // exist; deletion of the referent clears the slot.

    pub fn set_editing_task_id(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = id {
            if self.state.task(id).is_none() {
                return Err(StoreError::TaskNotFound(id.to_string()));
            }
        }
        self.state.editing_task_id = id.map(String::from);
        Ok(())
    }

    pub fn set_editing_group_id(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = id {
            if self.state.group(id).is_none() {
                return Err(StoreError::GroupNotFound(id.to_string()));
            }
        }
        self.state.editing_group_id = id.map(String::from);
        Ok(())
    }

    pub fn set_editing_project_id(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = id {
            if self.state.project(id).is_none() {
                return Err(StoreError::ProjectNotFound(id.to_string()));
            }
        }
        self.state.editing_project_id = id.map(String::from);
        Ok(())
    }

    // --- Queries ---

    /// All projects in display order
    pub fn projects(&self) -> Vec<&Project> {
        self.state.ordered_projects()
    }

    /// One project's groups in display order
    pub fn groups(&self, project_id: &str) -> Vec<&Group> {
        self.state.ordered_groups(project_id)
    }

    /// One scope's tasks in display order
    pub fn tasks(&self, project_id: &str, group_id: Option<&str>) -> Vec<&Task> {
        self.state.ordered_tasks(project_id, group_id)
    }

    /// The active project's id
    pub fn active_project(&self) -> &str {
        &self.state.active_project
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new(Box::new(UuidIds))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &self.state).finish()
    }
}
