use super::*;

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

#[test]
fn test_ids_are_dense_in_first_seen_order() {
    let mut registry = SourceRegistry::new();
    assert_eq!(registry.record(p(9, 9), true), 0);
    assert_eq!(registry.record(p(2, 3), true), 1);
    assert_eq!(registry.record(p(9, 9), false), 0);
    assert_eq!(registry.record(p(5, 5), true), 2);

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.positions(), &[p(9, 9), p(2, 3), p(5, 5)]);
    assert_eq!(registry.source_id(&p(2, 3)), Some(1));
    assert_eq!(registry.source_id(&p(0, 0)), None);
}

#[test]
fn test_counts_follow_occurrences() {
    let mut registry = SourceRegistry::new();
    for _ in 0..3 {
        registry.record(p(4, 4), true);
    }
    registry.record(p(7, 1), false);

    let identities = registry.finalize();
    assert_eq!(identities.detection_count(&p(4, 4)), 3);
    assert_eq!(identities.detection_count(&p(7, 1)), 1);
    assert_eq!(identities.detection_count(&p(0, 0)), 0);
    assert_eq!(identities.detection_counts.values().sum::<usize>(), 4);
}

#[test]
fn test_single_occurrence_is_not_variable() {
    let mut registry = SourceRegistry::new();
    registry.record(p(1, 1), true);
    registry.record(p(2, 2), false);
    assert_eq!(registry.signal(&p(1, 1)), Some(VariabilitySignal::Class(true)));

    let identities = registry.finalize();
    assert!(!identities.is_variable(&p(1, 1)));
    assert!(!identities.is_variable(&p(2, 2)));
}

#[test]
fn test_consistent_class_is_not_variable() {
    let mut registry = SourceRegistry::new();
    for _ in 0..4 {
        registry.record(p(3, 3), false);
    }
    assert!(!registry.finalize().is_variable(&p(3, 3)));
}

#[test]
fn test_disagreement_is_sticky() {
    let mut registry = SourceRegistry::new();
    registry.record(p(6, 6), true);
    registry.record(p(6, 6), false);
    assert_eq!(registry.signal(&p(6, 6)), Some(VariabilitySignal::Disagreement));
    registry.record(p(6, 6), true);
    registry.record(p(6, 6), true);

    let identities = registry.finalize();
    assert!(identities.is_variable(&p(6, 6)));
}

#[test]
fn test_finalized_maps_cover_every_position() {
    let mut registry = SourceRegistry::new();
    let positions = [p(0, 5), p(1, 1), p(0, 5), p(8, 2), p(1, 1)];
    for (i, &position) in positions.iter().enumerate() {
        registry.record(position, i % 2 == 0);
    }

    let identities = registry.finalize();
    let mut ids: Vec<usize> = identities.source_ids.values().copied().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2]);
    for position in positions {
        assert!(identities.source_ids.contains_key(&position));
        assert!(identities.detection_counts.contains_key(&position));
        assert!(identities.variability.contains_key(&position));
    }
    assert_eq!(identities.positions(), &[p(0, 5), p(1, 1), p(8, 2)]);
}

#[test]
fn test_empty_registry_finalizes_to_empty_maps() {
    let identities = SourceRegistry::new().finalize();
    assert!(identities.is_empty());
    assert!(identities.source_ids.is_empty());
    assert!(identities.variability.is_empty());
}
