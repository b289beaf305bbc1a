use alloc::vec::Vec;

use log::{debug, info, warn};
use rand::Rng;

use crate::{
    ai::TargetingAi,
    board::Board,
    common::{BoardError, Coord, ShotOutcome},
    config::{FLEET, GRID_SIZE},
    ship::Orientation,
};

/// Index of a player: `0` or `1`.
pub type PlayerId = usize;

/// Seat taken by the computer in [`GameMode::VsComputer`].
pub const COMPUTER: PlayerId = 1;

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    VsComputer,
    VsPlayer,
}

impl GameMode {
    /// Key the best-time record for this mode is stored under.
    pub fn record_key(&self) -> &'static str {
        match self {
            GameMode::VsComputer => "vs_computer",
            GameMode::VsPlayer => "vs_player",
        }
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Fleets are being placed.
    Placing,
    InProgress,
    GameOver { winner: PlayerId },
}

/// Errors returned by the turn controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    /// Player index is not 0 or 1.
    InvalidPlayer(PlayerId),
    /// Operation only allowed while placing fleets.
    NotPlacing,
    /// Operation only allowed while the game runs.
    NotInProgress,
    /// Every ship of this player's fleet is already on the board.
    NoShipsLeft(PlayerId),
    /// This player's fleet is not fully placed.
    FleetIncomplete(PlayerId),
    /// The computer is to move; see [`GameEngine::computer_turn`].
    ComputerToMove,
    /// The game has no computer player.
    NoComputer,
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "{}", e),
            GameError::InvalidPlayer(p) => write!(f, "No player {}", p),
            GameError::NotPlacing => write!(f, "Ships can only be moved before the game starts"),
            GameError::NotInProgress => write!(f, "Game is not in progress"),
            GameError::NoShipsLeft(p) => write!(f, "Player {} has no ships left to place", p),
            GameError::FleetIncomplete(p) => write!(f, "Player {} has not placed every ship", p),
            GameError::ComputerToMove => write!(f, "It is the computer's turn"),
            GameError::NoComputer => write!(f, "This game has no computer player"),
        }
    }
}

/// Turn controller: both boards, the ships still to be placed, the
/// computer's search state and whose turn it is.
pub struct GameEngine {
    mode: GameMode,
    boards: [Board; 2],
    pending: [Vec<usize>; 2],
    computer: TargetingAi,
    current: PlayerId,
    status: GameStatus,
    shots_fired: [usize; 2],
}

impl GameEngine {
    /// New game in the placement phase with both fleets still to place.
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            boards: [Board::new(), Board::new()],
            pending: [FLEET.to_vec(), FLEET.to_vec()],
            computer: TargetingAi::new(),
            current: 0,
            status: GameStatus::Placing,
            shots_fired: [0; 2],
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Player to shoot next.
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::VsComputer
            && self.status == GameStatus::InProgress
            && self.current == COMPUTER
    }

    /// A player's own board.
    pub fn board(&self, player: PlayerId) -> Option<&Board> {
        self.boards.get(player)
    }

    /// Search state of the computer opponent.
    pub fn computer(&self) -> &TargetingAi {
        &self.computer
    }

    /// Valid shots taken by `player` so far.
    pub fn shots_fired(&self, player: PlayerId) -> usize {
        self.shots_fired.get(player).copied().unwrap_or(0)
    }

    /// Ship lengths `player` still has to place, longest first.
    pub fn pending_ships(&self, player: PlayerId) -> &[usize] {
        self.pending.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn next_ship_length(&self, player: PlayerId) -> Option<usize> {
        self.pending_ships(player).first().copied()
    }

    fn check_player(player: PlayerId) -> Result<(), GameError> {
        if player < 2 {
            Ok(())
        } else {
            Err(GameError::InvalidPlayer(player))
        }
    }

    fn check_placing(&self, player: PlayerId) -> Result<(), GameError> {
        Self::check_player(player)?;
        if self.status != GameStatus::Placing {
            return Err(GameError::NotPlacing);
        }
        Ok(())
    }

    /// Place the next ship from `player`'s pool, returning its length.
    pub fn place_next_ship(
        &mut self,
        player: PlayerId,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<usize, GameError> {
        self.check_placing(player)?;
        let length = self
            .next_ship_length(player)
            .ok_or(GameError::NoShipsLeft(player))?;
        self.boards[player].place(length, x, y, orientation)?;
        self.pending[player].remove(0);
        Ok(length)
    }

    /// Pick a placed ship back up; its length returns to the pool.
    pub fn remove_ship_at(
        &mut self,
        player: PlayerId,
        x: usize,
        y: usize,
    ) -> Result<Option<usize>, GameError> {
        self.check_placing(player)?;
        let removed = self.boards[player].remove_ship_at(x, y);
        if let Some(length) = removed {
            let pool = &mut self.pending[player];
            let at = pool.iter().position(|&l| l < length).unwrap_or(pool.len());
            pool.insert(at, length);
        }
        Ok(removed)
    }

    /// Replace `player`'s fleet with a random layout.
    pub fn auto_place<R: Rng + ?Sized>(
        &mut self,
        player: PlayerId,
        rng: &mut R,
    ) -> Result<(), GameError> {
        self.check_placing(player)?;
        self.pending[player] = FLEET.to_vec();
        self.boards[player].place_randomly(rng, &FLEET)?;
        self.pending[player].clear();
        Ok(())
    }

    /// Leave the placement phase. The computer's fleet is laid out here when
    /// it has not been placed yet. Player 0 shoots first.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.check_placing(0)?;
        if self.mode == GameMode::VsComputer && !self.boards[COMPUTER].is_fleet_complete() {
            self.auto_place(COMPUTER, rng)?;
        }
        for player in 0..2 {
            if !self.boards[player].is_fleet_complete() {
                return Err(GameError::FleetIncomplete(player));
            }
        }
        self.status = GameStatus::InProgress;
        self.current = 0;
        info!("game started ({:?})", self.mode);
        Ok(())
    }

    /// Fire at the opponent's `(x, y)` as the current player.
    ///
    /// Rejected shots leave the turn unchanged. A miss passes the turn; a
    /// hit or a sink lets the same player go again.
    pub fn fire(&mut self, x: usize, y: usize) -> Result<ShotOutcome, GameError> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::NotInProgress);
        }
        if self.is_computer_turn() {
            return Err(GameError::ComputerToMove);
        }
        self.resolve_shot(Coord::new(x, y))
    }

    fn resolve_shot(&mut self, target: Coord) -> Result<ShotOutcome, GameError> {
        let shooter = self.current;
        let defender = 1 - shooter;
        let outcome = self.boards[defender].shoot(target.x, target.y)?;
        self.shots_fired[shooter] += 1;
        debug!("player {} fired at {:?}: {:?}", shooter, target, outcome);

        if self.boards[defender].all_sunk() {
            info!(
                "player {} wins after {} shots",
                shooter, self.shots_fired[shooter]
            );
            self.status = GameStatus::GameOver { winner: shooter };
        } else if !outcome.is_hit() {
            self.current = defender;
        }
        Ok(outcome)
    }

    /// Let the computer shoot until it misses or the game ends.
    ///
    /// Returns every shot it took, in order. Does nothing when it is not the
    /// computer's turn.
    pub fn computer_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<(Coord, ShotOutcome)>, GameError> {
        if self.mode != GameMode::VsComputer {
            return Err(GameError::NoComputer);
        }
        if self.status != GameStatus::InProgress {
            return Err(GameError::NotInProgress);
        }

        let mut fired = Vec::new();
        // at most one shot per cell
        for _ in 0..GRID_SIZE * GRID_SIZE {
            if !self.is_computer_turn() {
                break;
            }
            let shots = self.boards[1 - COMPUTER].shot_map();
            let Some(target) = self.computer.next_shot(&shots, rng) else {
                warn!("computer found no cell left to shoot");
                break;
            };
            let outcome = self.resolve_shot(target)?;
            match outcome {
                ShotOutcome::Miss => self.computer.register_miss(target),
                ShotOutcome::Hit => self.computer.register_hit(target),
                ShotOutcome::Sunk { .. } => {
                    self.computer.register_hit(target);
                    self.computer.register_sunk();
                }
            }
            fired.push((target, outcome));
        }
        Ok(fired)
    }
}
