use log::debug;

use crate::model::{IdGen, Project};
use crate::model::project::INBOX_PROJECT_ID;
use crate::ops::StoreError;
use crate::ops::order::{
    check_reorder_bounds, next_order, project_slots, renormalize_projects, splice,
};
use crate::store::State;

/// Field updates for an existing project
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Add a project at the end of the project list. Returns the assigned id.
pub fn add_project(
    state: &mut State,
    ids: &mut dyn IdGen,
    name: impl Into<String>,
    color: impl Into<String>,
) -> Result<String, StoreError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(StoreError::EmptyName);
    }
    let order = next_order(state.projects.iter().map(|p| p.order));
    let id = ids.next_id();
    state
        .projects
        .push(Project::new(id.clone(), name, color.into(), order));
    Ok(id)
}

/// Rename or recolor a project.
pub fn update_project(
    state: &mut State,
    project_id: &str,
    patch: ProjectPatch,
) -> Result<(), StoreError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
    }
    let project = state
        .projects
        .iter_mut()
        .find(|p| p.id == project_id)
        .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))?;
    if let Some(name) = patch.name {
        project.name = name;
    }
    if let Some(color) = patch.color {
        project.color = color;
    }
    Ok(())
}

/// Remove a project and everything in it: its tasks and groups are deleted,
/// the remaining projects are renormalized, and any selection pointing at a
/// removed entity falls back (active project to the inbox, editing targets
/// to none). The inbox itself is protected.
pub fn delete_project(state: &mut State, project_id: &str) -> Result<(), StoreError> {
    if project_id == INBOX_PROJECT_ID {
        return Err(StoreError::ProtectedProject(project_id.to_string()));
    }
    let idx = state
        .projects
        .iter()
        .position(|p| p.id == project_id)
        .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))?;

    state.projects.remove(idx);
    renormalize_projects(&mut state.projects);
    state.tasks.retain(|t| t.project_id != project_id);
    state.groups.retain(|g| g.project_id != project_id);

    if state.active_project == project_id {
        state.active_project = INBOX_PROJECT_ID.to_string();
    }
    if state.editing_project_id.as_deref() == Some(project_id) {
        state.editing_project_id = None;
    }
    if let Some(id) = &state.editing_task_id {
        if state.task(id).is_none() {
            state.editing_task_id = None;
        }
    }
    if let Some(id) = &state.editing_group_id {
        if state.group(id).is_none() {
            state.editing_group_id = None;
        }
    }
    debug!("deleted project {} with its tasks and groups", project_id);
    Ok(())
}

/// Move a project within the project list. The inbox can be repositioned
/// like any other project (the UI just never initiates a drag on it).
pub fn reorder_projects(state: &mut State, src: usize, dst: usize) -> Result<(), StoreError> {
    let mut slots = project_slots(&state.projects);
    check_reorder_bounds(src, dst, slots.len())?;
    if src == dst {
        return Ok(());
    }
    splice(&mut slots, src, dst);
    for (pos, slot) in slots.into_iter().enumerate() {
        state.projects[slot].order = pos;
    }
    Ok(())
}

/// Switch the active project selection.
pub fn set_active_project(state: &mut State, project_id: &str) -> Result<(), StoreError> {
    if state.project(project_id).is_none() {
        return Err(StoreError::ProjectNotFound(project_id.to_string()));
    }
    state.active_project = project_id.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, SeqIds};
    use crate::ops::task_ops::{NewTask, add_task};
    use pretty_assertions::assert_eq;

    /// Seeded state plus one group and one task in the personal project.
    fn sample_state() -> State {
        let mut state = State::seed();
        state.groups.push(Group::new(
            "g1".into(),
            "Chores".into(),
            "personal".into(),
            0,
        ));
        let mut ids = SeqIds::default();
        let mut task = NewTask::new("Water plants", "personal");
        task.group_id = Some("g1".into());
        add_task(&mut state, &mut ids, task).unwrap();
        state
    }

    fn ordered_names(state: &State) -> Vec<String> {
        project_slots(&state.projects)
            .into_iter()
            .map(|i| state.projects[i].name.clone())
            .collect()
    }

    #[test]
    fn test_add_project_appends() {
        let mut state = sample_state();
        let mut ids = SeqIds::default();
        let id = add_project(&mut state, &mut ids, "Side", "#123456").unwrap();
        let project = state.project(&id).unwrap();
        assert_eq!(project.order, 3);
        assert_eq!(project.color, "#123456");
    }

    #[test]
    fn test_add_project_empty_name_rejected() {
        let mut state = sample_state();
        let mut ids = SeqIds::default();
        assert_eq!(
            add_project(&mut state, &mut ids, "", "#fff"),
            Err(StoreError::EmptyName)
        );
    }

    #[test]
    fn test_update_project() {
        let mut state = sample_state();
        update_project(
            &mut state,
            "personal",
            ProjectPatch {
                name: Some("Home".into()),
                ..Default::default()
            },
        )
        .unwrap();
        let project = state.project("personal").unwrap();
        assert_eq!(project.name, "Home");
        // Color untouched
        assert_eq!(project.color, "#ff9a14");
    }

    #[test]
    fn test_delete_project_cascades() {
        let mut state = sample_state();
        state.active_project = "personal".into();
        state.editing_group_id = Some("g1".into());
        delete_project(&mut state, "personal").unwrap();

        assert!(state.project("personal").is_none());
        assert!(state.tasks.iter().all(|t| t.project_id != "personal"));
        assert!(state.groups.iter().all(|g| g.project_id != "personal"));
        // Selections referencing deleted entities fall back
        assert_eq!(state.active_project, "inbox");
        assert_eq!(state.editing_group_id, None);
        // Remaining projects renormalized: inbox 0, work 1
        assert_eq!(ordered_names(&state), vec!["Inbox", "Work"]);
        assert_eq!(state.project("work").unwrap().order, 1);
    }

    #[test]
    fn test_delete_project_keeps_unrelated_selection() {
        let mut state = sample_state();
        // Active elsewhere; deletion must not touch it
        delete_project(&mut state, "personal").unwrap();
        assert_eq!(state.active_project, "inbox");
    }

    #[test]
    fn test_delete_inbox_rejected() {
        let mut state = sample_state();
        let result = delete_project(&mut state, "inbox");
        assert_eq!(result, Err(StoreError::ProtectedProject("inbox".into())));
        assert!(state.project("inbox").is_some());
    }

    #[test]
    fn test_reorder_projects_moves_inbox_order_value() {
        let mut state = sample_state();
        // [Inbox, Personal, Work] -> drag Work to the front
        reorder_projects(&mut state, 2, 0).unwrap();
        assert_eq!(ordered_names(&state), vec!["Work", "Inbox", "Personal"]);
        assert_eq!(state.project("work").unwrap().order, 0);
        assert_eq!(state.project("inbox").unwrap().order, 1);
        assert_eq!(state.project("personal").unwrap().order, 2);
    }

    #[test]
    fn test_reorder_projects_round_trip() {
        let mut state = sample_state();
        let before = state.projects.clone();
        reorder_projects(&mut state, 0, 2).unwrap();
        reorder_projects(&mut state, 2, 0).unwrap();
        assert_eq!(state.projects, before);
    }

    #[test]
    fn test_reorder_projects_out_of_range_rejected() {
        let mut state = sample_state();
        let result = reorder_projects(&mut state, 0, 3);
        assert!(matches!(result, Err(StoreError::InvalidPosition(_))));
    }

    #[test]
    fn test_set_active_project_validates() {
        let mut state = sample_state();
        set_active_project(&mut state, "work").unwrap();
        assert_eq!(state.active_project, "work");
        assert_eq!(
            set_active_project(&mut state, "nope"),
            Err(StoreError::ProjectNotFound("nope".into()))
        );
        assert_eq!(state.active_project, "work");
    }
}
