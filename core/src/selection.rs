use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GestureStart {
    /// This was the first gesture of a fresh round, the caller has to start one.
    pub starts_round: bool,
}

/// Tracks one drag gesture at a time and the word it spells.
///
/// Selection flags live in the [`Grid`], the tracker keeps the order in which cells were picked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionTracker {
    state: SelectionState,
    first_selection_pending: bool,
    path: Vec<Coord2>,
    word: String,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            first_selection_pending: true,
            path: Vec::new(),
            word: String::new(),
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting)
    }

    pub fn first_selection_pending(&self) -> bool {
        self.first_selection_pending
    }

    /// Letters picked so far in the current gesture.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn path(&self) -> &[Coord2] {
        &self.path
    }

    /// Begins a gesture. `target` is `None` when the pointer went down outside of any cell.
    pub fn pointer_down(&mut self, grid: &mut Grid, target: Option<Coord2>) -> GestureStart {
        let down = self.begin_gesture();
        if let Some(coords) = target {
            self.extend(grid, coords);
        }
        down
    }

    /// Enters `Selecting` without picking a cell, so a new round can be set up before the first letter is taken.
    pub fn begin_gesture(&mut self) -> GestureStart {
        let starts_round = core::mem::take(&mut self.first_selection_pending);
        self.state = SelectionState::Selecting;
        GestureStart { starts_round }
    }

    /// Pointer moved into a cell. Only extends the word while a gesture is active.
    pub fn pointer_enter(&mut self, grid: &mut Grid, coords: Coord2) -> bool {
        if !self.is_selecting() {
            return false;
        }
        self.extend(grid, coords)
    }

    /// Ends the gesture, handing back the finished word and clearing the selection.
    pub fn pointer_up(&mut self, grid: &mut Grid) -> Option<String> {
        if !self.is_selecting() {
            return None;
        }

        self.state = SelectionState::Idle;
        let word = core::mem::take(&mut self.word);
        self.clear(grid);
        Some(word)
    }

    /// Adds a cell to the current word unless it is already part of it.
    pub fn extend(&mut self, grid: &mut Grid, coords: Coord2) -> bool {
        match grid.select(coords) {
            Ok(Some(letter)) => {
                self.path.push(coords);
                self.word.push(letter);
                true
            }
            Ok(None) => false,
            Err(err) => {
                log::warn!("ignoring selection at {:?}: {}", coords, err);
                false
            }
        }
    }

    /// Drops the in-progress word without submitting it, the gesture itself stays as it was.
    pub fn clear(&mut self, grid: &mut Grid) {
        grid.clear_selection();
        self.path.clear();
        self.word.clear();
    }

    /// Abandons any gesture and waits for the next pointer-down to start a new round.
    pub fn await_first_selection(&mut self, grid: &mut Grid) {
        self.clear(grid);
        self.state = SelectionState::Idle;
        self.first_selection_pending = true;
    }
}
