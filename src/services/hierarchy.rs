// src/services/hierarchy.rs

use std::collections::HashMap;

use crate::models::{
    facility::{Facility, FacilityWrapper, SubareaWrapper},
    subarea::{Subarea, NO_PARENT},
};

/// Deepest nesting level kept in a wrapper; top-level subareas are level 1.
pub const MAX_TREE_DEPTH: usize = 256;

/// Result of nesting a facility's flat subarea rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityTree {
    pub wrapper: FacilityWrapper,
    /// Rows that could not be placed: a dangling parent reference, a
    /// descendant of such a row, a parent cycle, or nesting below
    /// `MAX_TREE_DEPTH`.
    pub dropped: usize,
}

/// Nests `subareas` under `facility`.
///
/// Sibling lists keep the order of the input, which the store already sorts
/// by (parent, position). Rows whose parent is not in the input are left out
/// of the tree and only counted. No recursion: a chain of any length is
/// walked with an explicit queue and cut at `MAX_TREE_DEPTH`.
pub fn assemble(facility: Facility, subareas: &[Subarea]) -> FacilityTree {
    let index: HashMap<i64, usize> = subareas
        .iter()
        .enumerate()
        .map(|(i, s)| (s.subarea_id, i))
        .collect();

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); subareas.len()];
    for (i, subarea) in subareas.iter().enumerate() {
        if subarea.parent_subarea_id == NO_PARENT {
            roots.push(i);
        } else if let Some(&parent) = index.get(&subarea.parent_subarea_id) {
            children[parent].push(i);
        }
    }

    // Breadth-first from the roots; `order` lists every placed row with
    // parents ahead of their children.
    let mut order = Vec::with_capacity(subareas.len());
    let mut level: Vec<usize> = roots.clone();
    let mut depth = 1;
    while !level.is_empty() && depth <= MAX_TREE_DEPTH {
        let mut next = Vec::new();
        for &i in &level {
            order.push(i);
            next.extend(children[i].iter().copied());
        }
        level = next;
        depth += 1;
    }

    // Children first, so each node can take its finished children. Rows cut
    // by the depth limit were never built and are skipped here.
    let mut built: Vec<Option<SubareaWrapper>> = vec![None; subareas.len()];
    for &i in order.iter().rev() {
        let mut node = SubareaWrapper::from(&subareas[i]);
        node.child_subareas = children[i]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        built[i] = Some(node);
    }

    let mut wrapper = FacilityWrapper::from(facility);
    wrapper.child_subareas = roots.iter().filter_map(|&i| built[i].take()).collect();

    FacilityTree {
        wrapper,
        dropped: subareas.len() - order.len(),
    }
}
