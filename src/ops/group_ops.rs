use log::debug;

use crate::model::{Group, IdGen};
use crate::ops::StoreError;
use crate::ops::order::{check_reorder_bounds, group_slots, next_order, renormalize_groups, splice};
use crate::store::State;

/// Add a group at the end of the active project's group scope.
/// Returns the assigned id.
pub fn add_group(
    state: &mut State,
    ids: &mut dyn IdGen,
    name: impl Into<String>,
) -> Result<String, StoreError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(StoreError::EmptyName);
    }
    let project_id = state.active_project.clone();
    let order = next_order(
        state
            .groups
            .iter()
            .filter(|g| g.project_id == project_id)
            .map(|g| g.order),
    );
    let id = ids.next_id();
    state
        .groups
        .push(Group::new(id.clone(), name, project_id, order));
    Ok(id)
}

/// Flip a group's collapsed flag (display-only state).
pub fn toggle_group_collapse(state: &mut State, group_id: &str) -> Result<(), StoreError> {
    let group = find_group_mut(state, group_id)?;
    group.collapsed = !group.collapsed;
    Ok(())
}

/// Rename a group.
pub fn update_group_name(
    state: &mut State,
    group_id: &str,
    name: impl Into<String>,
) -> Result<(), StoreError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(StoreError::EmptyName);
    }
    let group = find_group_mut(state, group_id)?;
    group.name = name;
    Ok(())
}

/// Remove a group. Its tasks become ungrouped but keep their project; the
/// surviving sibling groups are renormalized immediately so their order
/// values stay dense.
pub fn delete_group(state: &mut State, group_id: &str) -> Result<(), StoreError> {
    let idx = state
        .groups
        .iter()
        .position(|g| g.id == group_id)
        .ok_or_else(|| StoreError::GroupNotFound(group_id.to_string()))?;
    let project_id = state.groups[idx].project_id.clone();
    state.groups.remove(idx);
    renormalize_groups(&mut state.groups, &project_id);
    for task in &mut state.tasks {
        if task.group_id.as_deref() == Some(group_id) {
            task.group_id = None;
        }
    }
    if state.editing_group_id.as_deref() == Some(group_id) {
        state.editing_group_id = None;
    }
    debug!("deleted group {} from project {}", group_id, project_id);
    Ok(())
}

/// Move a group within its project's group scope. Indices are positions in
/// display order; `src == dst` is a no-op.
pub fn reorder_groups(
    state: &mut State,
    src: usize,
    dst: usize,
    project_id: &str,
) -> Result<(), StoreError> {
    if state.project(project_id).is_none() {
        return Err(StoreError::ProjectNotFound(project_id.to_string()));
    }
    let mut slots = group_slots(&state.groups, project_id);
    check_reorder_bounds(src, dst, slots.len())?;
    if src == dst {
        return Ok(());
    }
    splice(&mut slots, src, dst);
    for (pos, slot) in slots.into_iter().enumerate() {
        state.groups[slot].order = pos;
    }
    Ok(())
}

/// Move a group to another project. The group is appended at the end of the
/// destination's group scope; its member tasks follow (project rewritten,
/// group kept) and the source scope is renormalized to close the hole.
pub fn move_group(state: &mut State, group_id: &str, dest_project: &str) -> Result<(), StoreError> {
    if state.project(dest_project).is_none() {
        return Err(StoreError::ProjectNotFound(dest_project.to_string()));
    }
    let idx = state
        .groups
        .iter()
        .position(|g| g.id == group_id)
        .ok_or_else(|| StoreError::GroupNotFound(group_id.to_string()))?;
    let source_project = state.groups[idx].project_id.clone();
    if source_project == dest_project {
        return Ok(());
    }

    let order = next_order(
        state
            .groups
            .iter()
            .filter(|g| g.project_id == dest_project)
            .map(|g| g.order),
    );
    let group = &mut state.groups[idx];
    group.project_id = dest_project.to_string();
    group.order = order;

    for task in &mut state.tasks {
        if task.group_id.as_deref() == Some(group_id) {
            task.project_id = dest_project.to_string();
        }
    }
    renormalize_groups(&mut state.groups, &source_project);
    debug!(
        "moved group {} from project {} to {}",
        group_id, source_project, dest_project
    );
    Ok(())
}

fn find_group_mut<'a>(state: &'a mut State, group_id: &str) -> Result<&'a mut Group, StoreError> {
    state
        .groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .ok_or_else(|| StoreError::GroupNotFound(group_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeqIds;
    use crate::ops::order::task_slots;
    use crate::ops::task_ops::{NewTask, add_task};
    use pretty_assertions::assert_eq;

    /// Seeded state with three groups in the inbox (ga, gb, gc in that
    /// order), one group in personal, and a task in gb.
    fn sample_state() -> State {
        let mut state = State::seed();
        for (id, name, project, order) in [
            ("ga", "Alpha", "inbox", 0),
            ("gb", "Beta", "inbox", 1),
            ("gc", "Gamma", "inbox", 2),
            ("gp", "Personal stuff", "personal", 0),
        ] {
            state
                .groups
                .push(Group::new(id.into(), name.into(), project.into(), order));
        }
        let mut ids = SeqIds::default();
        let mut task = NewTask::new("In beta", "inbox");
        task.group_id = Some("gb".into());
        add_task(&mut state, &mut ids, task).unwrap();
        state
    }

    fn ordered_names(state: &State, project: &str) -> Vec<String> {
        group_slots(&state.groups, project)
            .into_iter()
            .map(|i| state.groups[i].name.clone())
            .collect()
    }

    #[test]
    fn test_add_group_appends_in_active_project() {
        let mut state = sample_state();
        let mut ids = SeqIds::default();
        let id = add_group(&mut state, &mut ids, "Delta").unwrap();
        let group = state.group(&id).unwrap();
        assert_eq!(group.project_id, "inbox");
        assert_eq!(group.order, 3);
        assert!(!group.collapsed);
    }

    #[test]
    fn test_add_group_first_in_empty_scope() {
        let mut state = sample_state();
        state.active_project = "work".into();
        let mut ids = SeqIds::default();
        let id = add_group(&mut state, &mut ids, "Fresh").unwrap();
        assert_eq!(state.group(&id).unwrap().order, 0);
    }

    #[test]
    fn test_add_group_empty_name_rejected() {
        let mut state = sample_state();
        let mut ids = SeqIds::default();
        assert_eq!(
            add_group(&mut state, &mut ids, "  "),
            Err(StoreError::EmptyName)
        );
    }

    #[test]
    fn test_toggle_group_collapse() {
        let mut state = sample_state();
        toggle_group_collapse(&mut state, "ga").unwrap();
        assert!(state.group("ga").unwrap().collapsed);
        toggle_group_collapse(&mut state, "ga").unwrap();
        assert!(!state.group("ga").unwrap().collapsed);
    }

    #[test]
    fn test_update_group_name() {
        let mut state = sample_state();
        update_group_name(&mut state, "ga", "Renamed").unwrap();
        assert_eq!(state.group("ga").unwrap().name, "Renamed");
        assert_eq!(
            update_group_name(&mut state, "ga", ""),
            Err(StoreError::EmptyName)
        );
    }

    #[test]
    fn test_delete_group_ungroups_tasks_and_closes_gap() {
        let mut state = sample_state();
        delete_group(&mut state, "gb").unwrap();
        assert!(state.group("gb").is_none());
        // The member task survives, ungrouped, in the same project
        let task = state.task("t1").unwrap();
        assert_eq!(task.group_id, None);
        assert_eq!(task.project_id, "inbox");
        // Sibling orders are dense again
        assert_eq!(ordered_names(&state, "inbox"), vec!["Alpha", "Gamma"]);
        assert_eq!(state.group("ga").unwrap().order, 0);
        assert_eq!(state.group("gc").unwrap().order, 1);
    }

    #[test]
    fn test_delete_group_clears_editing_selection() {
        let mut state = sample_state();
        state.editing_group_id = Some("ga".into());
        delete_group(&mut state, "ga").unwrap();
        assert_eq!(state.editing_group_id, None);
    }

    #[test]
    fn test_reorder_groups() {
        let mut state = sample_state();
        reorder_groups(&mut state, 2, 0, "inbox").unwrap();
        assert_eq!(
            ordered_names(&state, "inbox"),
            vec!["Gamma", "Alpha", "Beta"]
        );
        // Other project untouched
        assert_eq!(state.group("gp").unwrap().order, 0);
    }

    #[test]
    fn test_reorder_groups_round_trip() {
        let mut state = sample_state();
        let before = state.groups.clone();
        reorder_groups(&mut state, 0, 2, "inbox").unwrap();
        reorder_groups(&mut state, 2, 0, "inbox").unwrap();
        assert_eq!(state.groups, before);
    }

    #[test]
    fn test_reorder_groups_out_of_range_rejected() {
        let mut state = sample_state();
        let before = state.groups.clone();
        let result = reorder_groups(&mut state, 0, 3, "inbox");
        assert!(matches!(result, Err(StoreError::InvalidPosition(_))));
        assert_eq!(state.groups, before);
    }

    #[test]
    fn test_move_group_takes_tasks_along() {
        let mut state = sample_state();
        move_group(&mut state, "gb", "personal").unwrap();
        let group = state.group("gb").unwrap();
        assert_eq!(group.project_id, "personal");
        // Appended after the existing personal group
        assert_eq!(group.order, 1);
        // Member task followed, keeping its group
        let task = state.task("t1").unwrap();
        assert_eq!(task.project_id, "personal");
        assert_eq!(task.group_id.as_deref(), Some("gb"));
        // Source scope closed its gap
        assert_eq!(ordered_names(&state, "inbox"), vec!["Alpha", "Gamma"]);
        assert_eq!(state.group("gc").unwrap().order, 1);
        // Task is visible in the destination scope
        assert_eq!(task_slots(&state.tasks, "personal", Some("gb")).len(), 1);
    }

    #[test]
    fn test_move_group_same_project_is_noop() {
        let mut state = sample_state();
        let before = state.groups.clone();
        move_group(&mut state, "gb", "inbox").unwrap();
        assert_eq!(state.groups, before);
    }

    #[test]
    fn test_move_group_unknown_destination_rejected() {
        let mut state = sample_state();
        let before = state.groups.clone();
        let result = move_group(&mut state, "gb", "nope");
        assert_eq!(result, Err(StoreError::ProjectNotFound("nope".into())));
        assert_eq!(state.groups, before);
    }
}
