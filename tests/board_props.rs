use seabattle::{
    Board, BoardError, CellState, Coord, Orientation, Ship, ShotOutcome, FLEET, GRID_SIZE,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.place_randomly(&mut rng, &FLEET).unwrap();
    let shots = rng.random_range(0..GRID_SIZE * 3);
    for _ in 0..shots {
        let x = rng.random_range(0..GRID_SIZE);
        let y = rng.random_range(0..GRID_SIZE);
        let _ = board.shoot(x, y);
    }
    board
}

fn orientation() -> impl Strategy<Value = Orientation> {
    any::<bool>().prop_map(Orientation::from_horizontal)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placed_ship_blocks_touching_footprints(
        len in 1..=4usize, x in 0..GRID_SIZE, y in 0..GRID_SIZE, o in orientation(),
        len2 in 1..=4usize, x2 in 0..GRID_SIZE, y2 in 0..GRID_SIZE, o2 in orientation(),
    ) {
        let mut board = Board::new();
        prop_assume!(board.place(len, x, y, o).is_ok());
        let first = Ship::new(len, Coord::new(x, y), o).unwrap();

        // nothing fits anywhere on or around the first ship
        for c in first.halo().iter() {
            prop_assert!(!board.can_place(1, c.x, c.y, Orientation::Horizontal));
        }

        if let Ok(second) = Ship::new(len2, Coord::new(x2, y2), o2) {
            let touches = !(second.halo() & first.mask()).is_empty();
            prop_assert_eq!(board.can_place(len2, x2, y2, o2), !touches);
        }
    }

    #[test]
    fn second_shot_at_same_cell_is_rejected(
        seed in any::<u64>(), x in 0..GRID_SIZE, y in 0..GRID_SIZE,
    ) {
        let mut board = random_board(seed);
        prop_assume!(board.cell_state(x, y) == CellState::Unshot);

        board.shoot(x, y).unwrap();
        let after = board.shot_map();
        prop_assert_eq!(board.shoot(x, y).unwrap_err(), BoardError::AlreadyShot { x, y });
        prop_assert_eq!(board.shot_map(), after);
        prop_assert_eq!(board.cell_state(x, y), CellState::Shot);
    }

    #[test]
    fn sinking_excludes_border_and_keeps_shots(seed in any::<u64>(), pick in 0..FLEET.len()) {
        let mut board = random_board(seed);
        let ship = board.ships()[pick];
        prop_assume!(!ship.is_sunk(&board.shot_map().shots()));

        let shot_before = board.shot_map().shots();
        let mut last = None;
        for c in ship.cells() {
            if board.cell_state(c.x, c.y) == CellState::Unshot {
                last = Some(board.shoot(c.x, c.y).unwrap());
            }
        }
        prop_assert_eq!(last, Some(ShotOutcome::Sunk { length: ship.length() }));

        for c in ship.halo().iter() {
            if ship.contains(c) || shot_before.contains(c) {
                prop_assert_eq!(board.cell_state(c.x, c.y), CellState::Shot);
            } else {
                prop_assert_eq!(board.cell_state(c.x, c.y), CellState::Excluded);
            }
        }
    }
}
