use std::collections::HashSet;

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info};

use crate::{
    lab::{Guard, Laboratory, Position, Tile},
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolEnd {
    Exited,
    Looped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patrol {
    visited_n: usize,
    end: PatrolEnd,
}

impl Patrol {
    pub fn visited_n(&self) -> usize {
        self.visited_n
    }

    pub fn end(&self) -> PatrolEnd {
        self.end
    }

    pub fn is_loop(&self) -> bool {
        self.end == PatrolEnd::Looped
    }
}

impl Laboratory {
    /// Walks the guard until it leaves the laboratory or repeats a state,
    /// marking every tile it stands on as visited.
    pub fn patrol(&mut self, guard: &Guard) -> Patrol {
        let mut cur_guard = guard.clone();
        let mut states = HashSet::new();
        let end = loop {
            self.mark_visited(cur_guard.pos());
            if !states.insert(cur_guard.clone()) {
                break PatrolEnd::Looped;
            }

            if !self.step(&mut cur_guard) {
                break PatrolEnd::Exited;
            }
        };

        let visited_n = self.position_iter(Tile::Visited).count();
        debug!(start = %guard, visited_n, ?end, "Guard finished patrol.");
        Patrol { visited_n, end }
    }

    /// Whether an obstruction at `pos` traps the guard in a loop. The trial
    /// runs on a copy, this laboratory is left untouched.
    pub fn is_loop_with_obstruction(&self, guard: &Guard, pos: &Position) -> Result<bool, Error> {
        if !self.can_obstruct(guard, pos) {
            return Err(Error::InvalidObstruction(pos.clone()));
        }

        Ok(self.trial(guard, pos))
    }

    /// Every position where a single obstruction makes the guard loop, in row-major order.
    pub fn loop_obstructions(&self, guard: &Guard) -> Vec<Position> {
        let candidates = self
            .tile_iter()
            .map(|(pos, _)| pos)
            .filter(|pos| self.can_obstruct(guard, pos))
            .collect::<Vec<_>>();
        let candidate_n = candidates.len();
        let loop_positions = candidates
            .into_par_iter()
            .filter(|pos| self.trial(guard, pos))
            .collect::<Vec<_>>();

        info!(
            candidate_n,
            loop_n = loop_positions.len(),
            "Finished obstruction search."
        );
        loop_positions
    }

    fn trial(&self, guard: &Guard, pos: &Position) -> bool {
        let mut trial_lab = self.clone();
        if let Some(tile) = trial_lab.tile_mut(pos) {
            *tile = Tile::Obstruction;
        }

        let is_loop = trial_lab.patrol(guard).is_loop();
        debug!(obstruction = %pos, is_loop, "Finished obstruction trial.");
        is_loop
    }

    fn can_obstruct(&self, guard: &Guard, pos: &Position) -> bool {
        pos != guard.pos() && self.tile(pos).is_some_and(|tile| !tile.is_blocked())
    }

    /// Turns right in place when blocked, otherwise steps ahead.
    /// Returns false once the tile ahead is outside.
    fn step(&self, guard: &mut Guard) -> bool {
        let Some(ahead_pos) = guard.ahead_pos() else {
            return false;
        };

        match self.tile(&ahead_pos) {
            Some(tile) if tile.is_blocked() => guard.turn_right(),
            Some(_) => guard.move_to(ahead_pos),
            None => return false,
        }

        true
    }

    fn mark_visited(&mut self, pos: &Position) {
        if let Some(tile) = self.tile_mut(pos) {
            if *tile == Tile::Floor {
                *tile = Tile::Visited;
            }
        }
    }
}
