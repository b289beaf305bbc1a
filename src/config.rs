use crate::bitboard::BitBoard;

/// Side length of the square grid.
pub const GRID_SIZE: usize = 10;

/// One 4-decker, two 3-deckers, three 2-deckers, four 1-deckers.
pub const FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Total number of ship cells in a fully placed fleet.
pub const FLEET_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Random placement tries per ship before the ship is given up on.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Full-board restarts `place_randomly` makes before reporting failure.
pub const FLEET_PLACEMENT_RESETS: usize = 32;

/// One cell layer of the grid.
pub type Layer = BitBoard<u128, GRID_SIZE>;

const _: () = assert!(GRID_SIZE * GRID_SIZE <= u128::BITS as usize);
