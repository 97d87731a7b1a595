// Dataset selection - Two comparison slots with generation tokens against stale fetches
use super::comparison::{DatasetSnapshot, Side};
use super::error::AnalyticsError;
use serde::Serialize;
use std::sync::Arc;

impl Side {
    pub fn from_slot(slot: u8) -> Result<Side, AnalyticsError> {
        match slot {
            1 => Ok(Side::First),
            2 => Ok(Side::Second),
            other => Err(AnalyticsError::InvalidSlot(other)),
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SlotState {
    Empty,
    Loading { dataset_id: i64 },
    Ready { dataset_id: i64, snapshot: Arc<DatasetSnapshot> },
    Failed { dataset_id: i64, error: String },
}

impl SlotState {
    pub fn dataset_id(&self) -> Option<i64> {
        match self {
            SlotState::Empty => None,
            SlotState::Loading { dataset_id }
            | SlotState::Ready { dataset_id, .. }
            | SlotState::Failed { dataset_id, .. } => Some(*dataset_id),
        }
    }

    pub fn snapshot(&self) -> Option<&Arc<DatasetSnapshot>> {
        match self {
            SlotState::Ready { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Empty,
    OneReady,
    BothReady,
}

/// Identifies one fetch issued for a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken {
    pub side: Side,
    pub dataset_id: i64,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    state: SlotState,
}

/// Each slot moves `Empty -> Loading -> Ready | Failed`. Selecting or clearing
/// bumps the slot's generation, and a completion is applied only while its
/// token still matches.
#[derive(Debug, Clone)]
pub struct Selection {
    slots: [Slot; 2],
}

impl Default for Selection {
    fn default() -> Self {
        let empty = Slot {
            generation: 0,
            state: SlotState::Empty,
        };
        Self {
            slots: [empty.clone(), empty],
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, side: Side) -> &SlotState {
        &self.slots[side.index()].state
    }

    /// Start loading `dataset_id` into `side`, superseding any pending fetch
    pub fn begin(&mut self, side: Side, dataset_id: i64) -> Result<SelectionToken, AnalyticsError> {
        if self.slot(side.other()).dataset_id() == Some(dataset_id) {
            return Err(AnalyticsError::SameDataset(dataset_id));
        }

        let slot = &mut self.slots[side.index()];
        slot.generation += 1;
        slot.state = SlotState::Loading { dataset_id };

        Ok(SelectionToken {
            side,
            dataset_id,
            generation: slot.generation,
        })
    }

    /// Apply a finished fetch. Returns `false` when the token is stale.
    pub fn complete(&mut self, token: SelectionToken, result: Result<DatasetSnapshot, String>) -> bool {
        let slot = &mut self.slots[token.side.index()];
        if slot.generation != token.generation {
            return false;
        }

        slot.state = match result {
            Ok(snapshot) => SlotState::Ready {
                dataset_id: token.dataset_id,
                snapshot: Arc::new(snapshot),
            },
            Err(error) => SlotState::Failed {
                dataset_id: token.dataset_id,
                error,
            },
        };
        true
    }

    pub fn clear(&mut self, side: Side) {
        let slot = &mut self.slots[side.index()];
        slot.generation += 1;
        slot.state = SlotState::Empty;
    }

    pub fn phase(&self) -> Phase {
        match (self.slots[0].state.snapshot(), self.slots[1].state.snapshot()) {
            (Some(_), Some(_)) => Phase::BothReady,
            (None, None) => Phase::Empty,
            _ => Phase::OneReady,
        }
    }

    /// Both snapshots, only once both slots are ready
    pub fn ready_pair(&self) -> Option<(Arc<DatasetSnapshot>, Arc<DatasetSnapshot>)> {
        let first = self.slots[0].state.snapshot()?;
        let second = self.slots[1].state.snapshot()?;
        Some((first.clone(), second.clone()))
    }
}
