//! Cross-frame grouping of per-frame close groups.
//!
//! Every coordinate of every close group becomes a node; consecutive members
//! of a group are unioned. Connected components are the global groups, in
//! order of the first close group that reaches them.

#[cfg(test)]
mod tests;
mod union_find;

pub(crate) use union_find::UnionFind;

use hashbrown::HashMap;

use crate::detection::Position;

/// Global groups and the group membership of every detected coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossFrameGroups {
    /// Member coordinates per group, sorted ascending; index is the group ID.
    pub groups: Vec<Vec<Position>>,
    /// Group ID of every detected coordinate; `None` if never in a close group.
    pub group_ids: HashMap<Position, Option<usize>>,
}

impl CrossFrameGroups {
    /// Build from close groups of all frames (flattened, frame order kept) and
    /// the flat list of every detection.
    pub fn build(close_groups: &[Vec<Position>], positions: &[Position]) -> Self {
        let mut uf = UnionFind::new();
        let mut nodes: HashMap<Position, usize> = HashMap::new();

        for group in close_groups {
            for &position in group {
                nodes.entry(position).or_insert_with(|| uf.make_set());
            }
            for pair in group.windows(2) {
                uf.union(nodes[&pair[0]], nodes[&pair[1]]);
            }
        }

        let mut roots: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<Position>> = Vec::new();
        for group in close_groups {
            let Some(first) = group.first() else {
                continue;
            };
            let root = uf.find(nodes[first]);
            let id = *roots.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[id].extend_from_slice(group);
        }
        for members in &mut groups {
            members.sort_unstable();
            members.dedup();
        }

        let mut member_ids: HashMap<Position, usize> = HashMap::new();
        for (id, members) in groups.iter().enumerate() {
            for &position in members {
                member_ids.insert(position, id);
            }
        }
        let group_ids = positions
            .iter()
            .map(|position| (*position, member_ids.get(position).copied()))
            .collect();

        tracing::debug!(
            "Merged {} close groups into {} cross-frame groups",
            close_groups.len(),
            groups.len()
        );

        Self { groups, group_ids }
    }

    pub fn group_id(&self, position: &Position) -> Option<usize> {
        self.group_ids.get(position).copied().flatten()
    }

    /// Group ID as reported in tables: `-1` for ungrouped coordinates.
    pub fn group_label(&self, position: &Position) -> i64 {
        self.group_id(position).map_or(-1, |id| id as i64)
    }

    pub fn members(&self, id: usize) -> Option<&[Position]> {
        self.groups.get(id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
