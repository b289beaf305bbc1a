//! Hunt/target shooting strategy for the computer opponent.
//!
//! The AI only ever sees the attacked board's [`ShotMap`]. While no hit is
//! pending it sweeps the checkerboard at random. A hit switches it to hunting:
//! first the four neighbours of the hit are probed, and once two hits line up
//! only the cells just past either end of the run are tried.

use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::board::ShotMap;
use crate::common::Coord;
use crate::config::{Layer, GRID_SIZE};

/// Axis of the ship currently being hunted, as far as the hits tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShipDirection {
    #[default]
    Unknown,
    Horizontal,
    Vertical,
}

/// Cells queued for the next shots. A set, so duplicates cannot occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateSet {
    cells: Layer,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `c` was already queued or is off the grid.
    pub fn insert(&mut self, c: Coord) -> bool {
        if !c.in_bounds() || self.cells.contains(c) {
            return false;
        }
        self.cells.set(c).is_ok()
    }

    /// Returns `true` if `c` was queued.
    pub fn remove(&mut self, c: Coord) -> bool {
        self.cells.contains(c) && self.cells.clear(c).is_ok()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(c)
    }

    pub fn len(&self) -> usize {
        self.cells.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear_all();
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> {
        self.cells.iter()
    }

    /// Drop every queued cell that has been resolved since it was queued.
    pub fn retain_unshot(&mut self, shots: &ShotMap) {
        self.cells &= shots.unshot();
    }

    /// Take one queued cell, chosen uniformly.
    pub fn pop_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        let c = pick_uniform(&self.cells, rng)?;
        self.remove(c);
        Some(c)
    }
}

fn pick_uniform<R: Rng + ?Sized>(cells: &Layer, rng: &mut R) -> Option<Coord> {
    let n = cells.count_ones();
    if n == 0 {
        return None;
    }
    cells.nth(rng.random_range(0..n))
}

/// Axis shared by every hit, or `Unknown` when they do not line up.
fn line_of(hits: &[Coord]) -> ShipDirection {
    let Some(first) = hits.first() else {
        return ShipDirection::Unknown;
    };
    if hits.iter().all(|h| h.y == first.y) {
        ShipDirection::Horizontal
    } else if hits.iter().all(|h| h.x == first.x) {
        ShipDirection::Vertical
    } else {
        ShipDirection::Unknown
    }
}

/// Search state for one attacked board.
#[derive(Debug, Clone, Default)]
pub struct TargetingAi {
    last_hit: Option<Coord>,
    hit_cells: Vec<Coord>,
    candidates: CandidateSet,
    hunt_mode: bool,
    direction: ShipDirection,
}

impl TargetingAi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_hit(&self) -> Option<Coord> {
        self.last_hit
    }

    /// Hits on the ship being hunted, in the order they landed.
    pub fn hit_cells(&self) -> &[Coord] {
        &self.hit_cells
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// `true` while an unresolved hit exists.
    pub fn is_hunting(&self) -> bool {
        self.hunt_mode
    }

    pub fn direction(&self) -> ShipDirection {
        self.direction
    }

    /// Choose the next cell to fire at.
    ///
    /// Returns `None` only when every cell of `shots` is resolved.
    pub fn next_shot<R: Rng + ?Sized>(&mut self, shots: &ShotMap, rng: &mut R) -> Option<Coord> {
        self.candidates.retain_unshot(shots);
        if let Some(c) = self.candidates.pop_random(rng) {
            return Some(c);
        }

        if !self.hit_cells.is_empty() {
            self.queue_from_hits(shots);
            if let Some(c) = self.candidates.pop_random(rng) {
                debug!("hunting around {:?}: firing at {:?}", self.hit_cells, c);
                return Some(c);
            }
        }

        sweep(shots, rng)
    }

    fn queue_from_hits(&mut self, shots: &ShotMap) {
        if self.hit_cells.len() == 1 {
            self.queue_neighbours(shots);
            return;
        }
        match line_of(&self.hit_cells) {
            ShipDirection::Horizontal => {
                self.direction = ShipDirection::Horizontal;
                let y = self.hit_cells[0].y;
                let min_x = self.hit_cells.iter().map(|h| h.x).min().unwrap_or(0);
                let max_x = self.hit_cells.iter().map(|h| h.x).max().unwrap_or(0);
                if min_x > 0 {
                    self.queue_if_unshot(shots, Coord::new(min_x - 1, y));
                }
                if max_x + 1 < GRID_SIZE {
                    self.queue_if_unshot(shots, Coord::new(max_x + 1, y));
                }
            }
            ShipDirection::Vertical => {
                self.direction = ShipDirection::Vertical;
                let x = self.hit_cells[0].x;
                let min_y = self.hit_cells.iter().map(|h| h.y).min().unwrap_or(0);
                let max_y = self.hit_cells.iter().map(|h| h.y).max().unwrap_or(0);
                if min_y > 0 {
                    self.queue_if_unshot(shots, Coord::new(x, min_y - 1));
                }
                if max_y + 1 < GRID_SIZE {
                    self.queue_if_unshot(shots, Coord::new(x, max_y + 1));
                }
            }
            // hits from more than one ship
            ShipDirection::Unknown => self.queue_neighbours(shots),
        }
    }

    fn queue_neighbours(&mut self, shots: &ShotMap) {
        for i in 0..self.hit_cells.len() {
            for n in self.hit_cells[i].orthogonal_neighbours() {
                self.queue_if_unshot(shots, n);
            }
        }
    }

    fn queue_if_unshot(&mut self, shots: &ShotMap, c: Coord) {
        if shots.is_unshot(c) {
            self.candidates.insert(c);
        }
    }

    /// Record a hit that did not sink anything yet.
    pub fn register_hit(&mut self, c: Coord) {
        self.last_hit = Some(c);
        self.hit_cells.push(c);
        self.hunt_mode = true;

        if self.hit_cells.len() >= 2 && self.direction == ShipDirection::Unknown {
            let direction = line_of(&self.hit_cells);
            if direction != ShipDirection::Unknown {
                debug!("ship axis is {:?}", direction);
                self.direction = direction;
                // neighbour guesses off the new axis are stale
                self.candidates.clear();
            }
        }
    }

    pub fn register_miss(&mut self, c: Coord) {
        self.candidates.remove(c);
    }

    /// The hunted ship went down; start over.
    pub fn register_sunk(&mut self) {
        *self = Self::new();
    }
}

/// Random pick among unshot cells with even `x + y`, falling back to any
/// unshot cell once the even ones run out.
fn sweep<R: Rng + ?Sized>(shots: &ShotMap, rng: &mut R) -> Option<Coord> {
    let open = shots.unshot();
    let even = open & Layer::checkerboard();
    if even.is_empty() {
        pick_uniform(&open, rng)
    } else {
        pick_uniform(&even, rng)
    }
}
