//! Dense order maintenance for scoped sequences.
//!
//! A scope is the set of siblings whose positions are mutually comparable:
//! all projects, the groups of one project, or the tasks of one
//! (project, group) pair. Groups and projects carry an explicit `order`
//! field; tasks are ordered by their position in the backing list. After any
//! structural change the affected scope must be renormalized so order values
//! form the dense sequence 0..n-1.

use crate::model::{Group, Project, Task};
use crate::ops::StoreError;

/// Remove the element at `src` and reinsert it at `dst`
/// (single-element splice; indices must be in range).
pub(crate) fn splice<T>(seq: &mut Vec<T>, src: usize, dst: usize) {
    let item = seq.remove(src);
    seq.insert(dst, item);
}

/// Order value for appending to a scope: max existing order + 1, or 0 when
/// the scope is empty.
pub(crate) fn next_order(orders: impl Iterator<Item = usize>) -> usize {
    orders.max().map_or(0, |m| m + 1)
}

/// Indices into `groups` of one project's groups, in display order.
pub(crate) fn group_slots(groups: &[Group], project_id: &str) -> Vec<usize> {
    let mut slots: Vec<usize> = groups
        .iter()
        .enumerate()
        .filter(|(_, g)| g.project_id == project_id)
        .map(|(i, _)| i)
        .collect();
    slots.sort_by_key(|&i| groups[i].order);
    slots
}

/// Indices into `projects` in display order.
pub(crate) fn project_slots(projects: &[Project]) -> Vec<usize> {
    let mut slots: Vec<usize> = (0..projects.len()).collect();
    slots.sort_by_key(|&i| projects[i].order);
    slots
}

/// Indices into `tasks` of one scope's tasks, in display (collection) order.
pub(crate) fn task_slots(tasks: &[Task], project_id: &str, group_id: Option<&str>) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.project_id == project_id && t.group_id.as_deref() == group_id)
        .map(|(i, _)| i)
        .collect()
}

/// Reassign dense order values to one project's groups, keeping their
/// current relative order. Idempotent on an already-dense scope.
pub(crate) fn renormalize_groups(groups: &mut [Group], project_id: &str) {
    for (pos, slot) in group_slots(groups, project_id).into_iter().enumerate() {
        groups[slot].order = pos;
    }
}

/// Reassign dense order values to all projects, keeping their current
/// relative order.
pub(crate) fn renormalize_projects(projects: &mut [Project]) {
    for (pos, slot) in project_slots(projects).into_iter().enumerate() {
        projects[slot].order = pos;
    }
}

/// Move the scope member at scope position `src` to scope position `dst`,
/// where `slots` holds the scope members' indices into `items` in display
/// order. Entries outside the scope keep their slots.
pub(crate) fn reorder_in_slots<T: Clone>(items: &mut [T], slots: &[usize], src: usize, dst: usize) {
    let mut scoped: Vec<T> = slots.iter().map(|&i| items[i].clone()).collect();
    splice(&mut scoped, src, dst);
    for (&slot, item) in slots.iter().zip(scoped) {
        items[slot] = item;
    }
}

/// Reorder indices must address existing scope positions; cross-scope insert
/// positions are clamped instead (see [`insert_slot`]).
pub(crate) fn check_reorder_bounds(src: usize, dst: usize, len: usize) -> Result<(), StoreError> {
    if src >= len || dst >= len {
        return Err(StoreError::InvalidPosition(format!(
            "{} -> {} in a scope of {}",
            src, dst, len
        )));
    }
    Ok(())
}

/// Index in the backing list at which to insert a new element so it lands at
/// `scope_pos` within the scope described by `slots` (ascending indices of
/// the scope's current members). Positions past the end of the scope append
/// after its last member, or at the end of the list for an empty scope.
pub(crate) fn insert_slot(len: usize, slots: &[usize], scope_pos: usize) -> usize {
    if scope_pos < slots.len() {
        slots[scope_pos]
    } else {
        slots.last().map_or(len, |&last| last + 1)
    }
}
