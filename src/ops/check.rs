use std::collections::HashSet;

use serde::Serialize;

use crate::ops::order::{group_slots, project_slots};
use crate::store::State;

/// Structured result of a store consistency check.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
}

/// A broken store invariant. None of these are reachable through the command
/// surface; the checker exists so tests can prove that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// A task's project does not exist
    #[serde(rename = "dangling_task_project")]
    DanglingTaskProject { task_id: String, project_id: String },
    /// A task's group does not exist
    #[serde(rename = "dangling_task_group")]
    DanglingTaskGroup { task_id: String, group_id: String },
    /// A task's group belongs to a different project than the task
    #[serde(rename = "task_group_project_mismatch")]
    TaskGroupProjectMismatch { task_id: String, group_id: String },
    /// A group's project does not exist
    #[serde(rename = "dangling_group_project")]
    DanglingGroupProject { group_id: String, project_id: String },
    /// A scope's order values are not exactly 0..n-1
    #[serde(rename = "sparse_order")]
    SparseOrder { scope: String, orders: Vec<usize> },
    /// A duplicated entity id within one collection
    #[serde(rename = "duplicate_id")]
    DuplicateId { id: String },
    /// The active project does not exist
    #[serde(rename = "dangling_active_project")]
    DanglingActiveProject { project_id: String },
    /// An editing selection points at a missing entity
    #[serde(rename = "dangling_editing_target")]
    DanglingEditingTarget { kind: &'static str, id: String },
}

/// Validate the whole aggregate and return structured results.
///
/// This is a read-only pass. Checks performed:
/// 1. Every task's project exists; its group (if any) exists and belongs to
///    the same project
/// 2. Every group's project exists
/// 3. Order values are dense 0..n-1 in every scope (all projects, each
///    project's groups)
/// 4. No duplicate ids within a collection
/// 5. The active project and editing selections resolve
pub fn check_state(state: &State) -> CheckResult {
    let mut result = CheckResult::default();

    check_duplicates(state, &mut result);

    for task in &state.tasks {
        if state.project(&task.project_id).is_none() {
            result.errors.push(CheckError::DanglingTaskProject {
                task_id: task.id.clone(),
                project_id: task.project_id.clone(),
            });
        }
        if let Some(group_id) = &task.group_id {
            match state.group(group_id) {
                None => result.errors.push(CheckError::DanglingTaskGroup {
                    task_id: task.id.clone(),
                    group_id: group_id.clone(),
                }),
                Some(group) if group.project_id != task.project_id => {
                    result.errors.push(CheckError::TaskGroupProjectMismatch {
                        task_id: task.id.clone(),
                        group_id: group_id.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    for group in &state.groups {
        if state.project(&group.project_id).is_none() {
            result.errors.push(CheckError::DanglingGroupProject {
                group_id: group.id.clone(),
                project_id: group.project_id.clone(),
            });
        }
    }

    check_density(
        "projects",
        project_slots(&state.projects)
            .into_iter()
            .map(|i| state.projects[i].order)
            .collect(),
        &mut result,
    );
    for project in &state.projects {
        check_density(
            &format!("groups of {}", project.id),
            group_slots(&state.groups, &project.id)
                .into_iter()
                .map(|i| state.groups[i].order)
                .collect(),
            &mut result,
        );
    }

    if state.project(&state.active_project).is_none() {
        result.errors.push(CheckError::DanglingActiveProject {
            project_id: state.active_project.clone(),
        });
    }
    if let Some(id) = &state.editing_task_id {
        if state.task(id).is_none() {
            result.errors.push(CheckError::DanglingEditingTarget {
                kind: "task",
                id: id.clone(),
            });
        }
    }
    if let Some(id) = &state.editing_group_id {
        if state.group(id).is_none() {
            result.errors.push(CheckError::DanglingEditingTarget {
                kind: "group",
                id: id.clone(),
            });
        }
    }
    if let Some(id) = &state.editing_project_id {
        if state.project(id).is_none() {
            result.errors.push(CheckError::DanglingEditingTarget {
                kind: "project",
                id: id.clone(),
            });
        }
    }

    result.valid = result.errors.is_empty();
    result
}

/// Orders must read 0, 1, ..., n-1 when the scope is walked in display order.
fn check_density(scope: &str, orders: Vec<usize>, result: &mut CheckResult) {
    let dense = orders.iter().enumerate().all(|(i, &o)| i == o);
    if !dense {
        result.errors.push(CheckError::SparseOrder {
            scope: scope.to_string(),
            orders,
        });
    }
}

fn check_duplicates(state: &State, result: &mut CheckResult) {
    let mut seen = HashSet::new();
    let ids = state
        .tasks
        .iter()
        .map(|t| &t.id)
        .chain(state.groups.iter().map(|g| &g.id))
        .chain(state.projects.iter().map(|p| &p.id));
    for id in ids {
        if !seen.insert(id.clone()) {
            result
                .errors
                .push(CheckError::DuplicateId { id: id.clone() });
        }
    }
}
