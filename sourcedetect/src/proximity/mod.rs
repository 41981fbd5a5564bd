//! Per-frame proximity groups and the unique-detection selector.
//!
//! Two detections are close when both axis distances are at most the
//! proximity radius. Close detections are closed over chains of neighbours
//! according to [`ClosureMode`].


use crate::config::ClosureMode;
use crate::detection::Position;
use crate::grouping::UnionFind;

/// Close groups of one frame's sorted detections.
///
/// Each group is sorted ascending without repeats; groups are listed in order
/// of their first member in `positions`. Isolated detections belong to no
/// group.
pub fn close_groups(positions: &[Position], radius: usize, mode: ClosureMode) -> Vec<Vec<Position>> {
    match mode {
        ClosureMode::SinglePass => single_pass_groups(positions, radius),
        ClosureMode::Full => connected_groups(positions, radius),
    }
}

fn neighbours(positions: &[Position], radius: usize) -> Vec<Vec<Position>> {
    positions
        .iter()
        .enumerate()
        .map(|(i, a)| {
            positions
                .iter()
                .enumerate()
                .filter(|&(j, b)| i != j && a.is_within(b, radius))
                .map(|(_, b)| *b)
                .collect()
        })
        .collect()
}

/// One in-place merge pass: whenever list `j` contains detection `i`, list
/// `i` is appended to list `j`. Later merges see earlier ones.
fn single_pass_groups(positions: &[Position], radius: usize) -> Vec<Vec<Position>> {
    let mut lists = neighbours(positions, radius);

    for (i, position) in positions.iter().enumerate() {
        for j in 0..lists.len() {
            if i == j || !lists[j].contains(position) {
                continue;
            }
            for k in 0..lists[i].len() {
                let member = lists[i][k];
                if !lists[j].contains(&member) {
                    lists[j].push(member);
                }
            }
        }
    }

    let mut groups: Vec<Vec<Position>> = Vec::new();
    for mut list in lists {
        if list.is_empty() {
            continue;
        }
        list.sort_unstable();
        list.dedup();
        if !groups.contains(&list) {
            groups.push(list);
        }
    }
    groups
}

fn connected_groups(positions: &[Position], radius: usize) -> Vec<Vec<Position>> {
    let mut uf = UnionFind::with_len(positions.len());
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            if positions[i].is_within(&positions[j], radius) {
                uf.union(i, j);
            }
        }
    }

    let mut root_slot: Vec<Option<usize>> = vec![None; positions.len()];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for i in 0..positions.len() {
        let root = uf.find(i);
        let slot = *root_slot[root].get_or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(i);
    }

    let mut groups: Vec<Vec<Position>> = Vec::new();
    for component in components.into_iter().filter(|c| c.len() >= 2) {
        let mut group: Vec<Position> = component.into_iter().map(|i| positions[i]).collect();
        group.sort_unstable();
        group.dedup();
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}

/// Detections minus every non-first member of every close group.
///
/// Detections outside all groups pass through; repeats are kept. With no
/// close groups the input is returned unchanged.
pub fn unique_detections(positions: &[Position], groups: &[Vec<Position>]) -> Vec<Position> {
    positions
        .iter()
        .filter(|&position| {
            !groups
                .iter()
                .any(|group| group.get(1..).is_some_and(|tail| tail.contains(position)))
        })
        .copied()
        .collect()
}
