use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

#[test]
fn test_same_pair_in_two_frames_forms_one_group() {
    let close = vec![vec![p(10, 10), p(11, 11)], vec![p(10, 10), p(11, 11)]];
    let positions = [p(10, 10), p(11, 11), p(10, 10), p(11, 11)];

    let groups = CrossFrameGroups::build(&close, &positions);

    assert_eq!(groups.groups, vec![vec![p(10, 10), p(11, 11)]]);
    assert_eq!(groups.group_label(&p(10, 10)), 0);
    assert_eq!(groups.group_label(&p(11, 11)), 0);
}

#[test]
fn test_overlapping_groups_chain_across_frames() {
    let close = vec![
        vec![p(1, 1), p(2, 2)],
        vec![p(2, 2), p(5, 5)],
        vec![p(20, 20), p(21, 24)],
    ];
    let positions = [p(1, 1), p(2, 2), p(2, 2), p(5, 5), p(20, 20), p(21, 24)];

    let groups = CrossFrameGroups::build(&close, &positions);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups.members(0), Some(&[p(1, 1), p(2, 2), p(5, 5)][..]));
    assert_eq!(groups.members(1), Some(&[p(20, 20), p(21, 24)][..]));
    assert_eq!(groups.group_id(&p(5, 5)), Some(0));
    assert_eq!(groups.group_id(&p(21, 24)), Some(1));
}

#[test]
fn test_late_bridge_merges_earlier_groups() {
    let close = vec![
        vec![p(0, 0), p(0, 3)],
        vec![p(9, 0), p(9, 3)],
        vec![p(0, 3), p(4, 3), p(9, 0)],
    ];
    let positions = [p(0, 0), p(0, 3), p(9, 0), p(9, 3), p(4, 3)];

    let groups = CrossFrameGroups::build(&close, &positions);

    assert_eq!(
        groups.groups,
        vec![vec![p(0, 0), p(0, 3), p(4, 3), p(9, 0), p(9, 3)]]
    );
    assert!(positions.iter().all(|pos| groups.group_id(pos) == Some(0)));
}

#[test]
fn test_group_order_follows_first_appearance() {
    let close = vec![vec![p(30, 30), p(31, 31)], vec![p(2, 2), p(3, 3)]];
    let positions = [p(30, 30), p(31, 31), p(2, 2), p(3, 3)];

    let groups = CrossFrameGroups::build(&close, &positions);

    assert_eq!(groups.group_id(&p(31, 31)), Some(0));
    assert_eq!(groups.group_id(&p(2, 2)), Some(1));
}

#[test]
fn test_ungrouped_positions_are_labelled_minus_one() {
    let close = vec![vec![p(4, 4), p(6, 6)]];
    let positions = [p(4, 4), p(6, 6), p(40, 40)];

    let groups = CrossFrameGroups::build(&close, &positions);

    assert_eq!(groups.group_ids.len(), 3);
    assert_eq!(groups.group_ids[&p(40, 40)], None);
    assert_eq!(groups.group_label(&p(40, 40)), -1);
    assert_eq!(groups.group_label(&p(99, 99)), -1);
}

#[test]
fn test_empty_input_builds_empty_groups() {
    let groups = CrossFrameGroups::build(&[], &[]);
    assert!(groups.is_empty());
    assert!(groups.group_ids.is_empty());
    assert_eq!(groups.members(0), None);
}

#[test]
fn test_closure_law_on_random_groups() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..50 {
        let close: Vec<Vec<Position>> = (0..rng.random_range(0..12))
            .map(|_| {
                let mut group: Vec<Position> = (0..rng.random_range(2..5))
                    .map(|_| p(rng.random_range(0..8), rng.random_range(0..8)))
                    .collect();
                group.sort();
                group.dedup();
                group
            })
            .collect();
        let positions: Vec<Position> = close.iter().flatten().copied().collect();

        let groups = CrossFrameGroups::build(&close, &positions);

        for group in &close {
            let id = groups.group_id(&group[0]);
            assert!(id.is_some());
            assert!(group.iter().all(|pos| groups.group_id(pos) == id));
        }
        for (id, members) in groups.groups.iter().enumerate() {
            assert!(members.windows(2).all(|w| w[0] < w[1]));
            assert!(members.iter().all(|pos| groups.group_id(pos) == Some(id)));
        }
        let total: usize = groups.groups.iter().map(Vec::len).sum();
        let distinct: hashbrown::HashSet<Position> = positions.iter().copied().collect();
        assert_eq!(total, distinct.len());
    }
}
