use chrono::NaiveDate;
use log::debug;

use crate::model::{IdGen, Priority, Task};
use crate::ops::StoreError;
use crate::ops::order::{check_reorder_bounds, insert_slot, reorder_in_slots, task_slots};
use crate::store::State;

/// Fields for a task to be created (the id is assigned by the store)
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub project_id: String,
    pub group_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewTask {
    /// An ungrouped task with default priority and no date or notes
    pub fn new(title: impl Into<String>, project_id: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            priority: Priority::default(),
            project_id: project_id.into(),
            group_id: None,
            due_date: None,
            notes: None,
        }
    }
}

/// Field updates for an existing task. `None` leaves a field untouched; the
/// inner option on clearable fields distinguishes "set" from "clear". Scope
/// fields (project, group) are deliberately absent: membership changes go
/// through the move commands so ordering stays consistent.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
}

/// Add a task at the end of its (project, group) scope.
/// Returns the assigned id.
pub fn add_task(
    state: &mut State,
    ids: &mut dyn IdGen,
    new: NewTask,
) -> Result<String, StoreError> {
    if new.title.trim().is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    if state.project(&new.project_id).is_none() {
        return Err(StoreError::ProjectNotFound(new.project_id));
    }
    if let Some(group_id) = &new.group_id {
        let group = state
            .group(group_id)
            .ok_or_else(|| StoreError::GroupNotFound(group_id.clone()))?;
        if group.project_id != new.project_id {
            return Err(StoreError::GroupProjectMismatch {
                group: group_id.clone(),
                project: new.project_id,
            });
        }
    }

    let id = ids.next_id();
    state.tasks.push(Task {
        id: id.clone(),
        title: new.title,
        completed: false,
        priority: new.priority,
        project_id: new.project_id,
        group_id: new.group_id,
        due_date: new.due_date,
        notes: new.notes,
    });
    Ok(id)
}

/// Flip a task's completion flag.
pub fn toggle_task(state: &mut State, task_id: &str) -> Result<(), StoreError> {
    let task = find_task_mut(state, task_id)?;
    task.completed = !task.completed;
    Ok(())
}

/// Replace-by-id merge of the provided fields. Never alters scope membership
/// or position.
pub fn update_task(state: &mut State, task_id: &str, patch: TaskPatch) -> Result<(), StoreError> {
    if let Some(title) = &patch.title {
        if title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }
    }
    let task = find_task_mut(state, task_id)?;
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(completed) = patch.completed {
        task.completed = completed;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    if let Some(notes) = patch.notes {
        task.notes = notes;
    }
    Ok(())
}

/// Remove a task. Tasks have no dependents, so there is no cascade beyond
/// clearing a stale editing selection.
pub fn delete_task(state: &mut State, task_id: &str) -> Result<(), StoreError> {
    let idx = find_task_index(state, task_id)?;
    state.tasks.remove(idx);
    if state.editing_task_id.as_deref() == Some(task_id) {
        state.editing_task_id = None;
    }
    Ok(())
}

/// Move a task within its scope: (active project, `group_id`). Indices are
/// positions in the scope's display order; `src == dst` is a no-op.
pub fn reorder_tasks(
    state: &mut State,
    src: usize,
    dst: usize,
    group_id: Option<&str>,
) -> Result<(), StoreError> {
    if let Some(group_id) = group_id {
        if state.group(group_id).is_none() {
            return Err(StoreError::GroupNotFound(group_id.to_string()));
        }
    }
    let project_id = state.active_project.clone();
    let slots = task_slots(&state.tasks, &project_id, group_id);
    check_reorder_bounds(src, dst, slots.len())?;
    if src == dst {
        return Ok(());
    }
    reorder_in_slots(&mut state.tasks, &slots, src, dst);
    Ok(())
}

/// Move a task from one group scope to another within its project.
/// `dest_index` is clamped to the destination scope's length.
pub fn move_task_between_groups(
    state: &mut State,
    task_id: &str,
    source_group: Option<&str>,
    dest_group: Option<&str>,
    dest_index: usize,
) -> Result<(), StoreError> {
    let idx = find_task_index(state, task_id)?;
    if state.tasks[idx].group_id.as_deref() != source_group {
        return Err(StoreError::InvalidPosition(format!(
            "task {} is not in the source group scope",
            task_id
        )));
    }
    let project_id = state.tasks[idx].project_id.clone();
    if let Some(dest_group) = dest_group {
        let group = state
            .group(dest_group)
            .ok_or_else(|| StoreError::GroupNotFound(dest_group.to_string()))?;
        if group.project_id != project_id {
            return Err(StoreError::GroupProjectMismatch {
                group: dest_group.to_string(),
                project: project_id,
            });
        }
    }

    let mut task = state.tasks.remove(idx);
    task.group_id = dest_group.map(String::from);
    let slots = task_slots(&state.tasks, &project_id, dest_group);
    let at = insert_slot(state.tasks.len(), &slots, dest_index);
    state.tasks.insert(at, task);
    debug!("moved task {} to group {:?}", task_id, dest_group);
    Ok(())
}

/// Move a task to another project's ungrouped scope. Group membership never
/// crosses a project boundary, so the task's group is always cleared.
/// `index` is clamped to the destination scope's length.
pub fn move_task_to_project(
    state: &mut State,
    task_id: &str,
    dest_project: &str,
    index: usize,
) -> Result<(), StoreError> {
    if state.project(dest_project).is_none() {
        return Err(StoreError::ProjectNotFound(dest_project.to_string()));
    }
    let idx = find_task_index(state, task_id)?;

    let mut task = state.tasks.remove(idx);
    task.project_id = dest_project.to_string();
    task.group_id = None;
    let slots = task_slots(&state.tasks, dest_project, None);
    let at = insert_slot(state.tasks.len(), &slots, index);
    state.tasks.insert(at, task);
    debug!("moved task {} to project {}", task_id, dest_project);
    Ok(())
}

fn find_task_index(state: &State, task_id: &str) -> Result<usize, StoreError> {
    state
        .tasks
        .iter()
        .position(|t| t.id == task_id)
        .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))
}

fn find_task_mut<'a>(state: &'a mut State, task_id: &str) -> Result<&'a mut Task, StoreError> {
    state
        .tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))
}
