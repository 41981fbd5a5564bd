//! Per-coordinate identity and metadata.
//!
//! [`SourceRegistry`] is the store threaded by `&mut` through decoding. It
//! assigns dense source IDs in first-seen order, counts detections per
//! coordinate and accumulates the bright-vs-dim variability signal. Calling
//! [`SourceRegistry::finalize`] collapses the accumulators into strict
//! booleans.

#[cfg(test)]
mod tests;

use hashbrown::HashMap;

use crate::detection::Position;

/// Running bright-vs-dim signal for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariabilitySignal {
    /// Every occurrence so far agreed on this class comparison.
    Class(bool),
    /// Two occurrences disagreed.
    Disagreement,
}

impl VariabilitySignal {
    fn update(self, bright: bool) -> Self {
        match self {
            VariabilitySignal::Class(seen) if seen == bright => self,
            _ => VariabilitySignal::Disagreement,
        }
    }

    /// Only a disagreement counts as variable; a uniform class is not.
    pub fn is_variable(self) -> bool {
        matches!(self, VariabilitySignal::Disagreement)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SourceRegistry {
    order: Vec<Position>,
    ids: HashMap<Position, usize>,
    counts: HashMap<Position, usize>,
    signals: HashMap<Position, VariabilitySignal>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one detection at `position`, returning its source ID.
    pub fn record(&mut self, position: Position, bright: bool) -> usize {
        let next_id = self.order.len();
        let id = *self.ids.entry(position).or_insert_with(|| next_id);
        if id == next_id {
            self.order.push(position);
        }

        *self.counts.entry(position).or_insert(0) += 1;

        self.signals
            .entry(position)
            .and_modify(|signal| *signal = signal.update(bright))
            .or_insert(VariabilitySignal::Class(bright));

        id
    }

    pub fn source_id(&self, position: &Position) -> Option<usize> {
        self.ids.get(position).copied()
    }

    pub fn signal(&self, position: &Position) -> Option<VariabilitySignal> {
        self.signals.get(position).copied()
    }

    /// Number of distinct coordinates seen.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct coordinates in first-seen order (index = source ID).
    pub fn positions(&self) -> &[Position] {
        &self.order
    }

    pub fn finalize(self) -> SourceIdentities {
        let variability = self
            .signals
            .into_iter()
            .map(|(position, signal)| (position, signal.is_variable()))
            .collect();

        SourceIdentities {
            order: self.order,
            source_ids: self.ids,
            detection_counts: self.counts,
            variability,
        }
    }
}

/// Finalized identity maps, total over every detected coordinate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceIdentities {
    order: Vec<Position>,
    pub source_ids: HashMap<Position, usize>,
    pub detection_counts: HashMap<Position, usize>,
    pub variability: HashMap<Position, bool>,
}

impl SourceIdentities {
    pub fn source_id(&self, position: &Position) -> Option<usize> {
        self.source_ids.get(position).copied()
    }

    pub fn detection_count(&self, position: &Position) -> usize {
        self.detection_counts.get(position).copied().unwrap_or(0)
    }

    pub fn is_variable(&self, position: &Position) -> bool {
        self.variability.get(position).copied().unwrap_or(false)
    }

    /// Distinct coordinates in source ID order.
    pub fn positions(&self) -> &[Position] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
