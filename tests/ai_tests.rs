use std::collections::HashSet;

use seabattle::{
    Board, CandidateSet, CellState, Coord, Layer, Orientation, ShipDirection, ShotMap,
    ShotOutcome, TargetingAi, FLEET, GRID_SIZE,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Feed an outcome back the way the turn controller does.
fn feed(ai: &mut TargetingAi, target: Coord, outcome: ShotOutcome) {
    match outcome {
        ShotOutcome::Miss => ai.register_miss(target),
        ShotOutcome::Hit => ai.register_hit(target),
        ShotOutcome::Sunk { .. } => {
            ai.register_hit(target);
            ai.register_sunk();
        }
    }
}

#[test]
fn test_single_hit_probes_four_neighbours() {
    let mut board = Board::new();
    board.place(2, 5, 5, Orientation::Horizontal).unwrap();
    assert_eq!(board.shoot(5, 5).unwrap(), ShotOutcome::Hit);

    let mut ai = TargetingAi::new();
    ai.register_hit(Coord::new(5, 5));
    assert!(ai.is_hunting());
    assert_eq!(ai.direction(), ShipDirection::Unknown);

    let mut rng = SmallRng::seed_from_u64(3);
    let shot = ai.next_shot(&board.shot_map(), &mut rng).unwrap();

    let allowed: HashSet<Coord> = [(4, 5), (6, 5), (5, 4), (5, 6)]
        .into_iter()
        .map(Coord::from)
        .collect();
    assert!(allowed.contains(&shot));
    let mut queued: HashSet<Coord> = ai.candidates().iter().collect();
    assert!(queued.is_subset(&allowed));
    assert!(!queued.contains(&shot));
    queued.insert(shot);
    assert_eq!(queued, allowed);
}

#[test]
fn test_single_hit_skips_resolved_and_off_grid_neighbours() {
    let mut board = Board::new();
    board.place(2, 0, 0, Orientation::Vertical).unwrap();
    board.shoot(1, 0).unwrap();
    assert_eq!(board.shoot(0, 0).unwrap(), ShotOutcome::Hit);

    let mut ai = TargetingAi::new();
    ai.register_hit(Coord::new(0, 0));
    let mut rng = SmallRng::seed_from_u64(11);
    let shot = ai.next_shot(&board.shot_map(), &mut rng).unwrap();

    // (1, 0) already missed, left and up are off the grid
    assert_eq!(shot, Coord::new(0, 1));
    assert!(ai.candidates().is_empty());
}

#[test]
fn test_two_hits_in_a_row_target_only_the_ends() {
    let mut board = Board::new();
    board.place(3, 2, 2, Orientation::Horizontal).unwrap();
    board.shoot(2, 2).unwrap();
    board.shoot(4, 2).unwrap();

    let mut ai = TargetingAi::new();
    ai.register_hit(Coord::new(2, 2));
    ai.register_hit(Coord::new(4, 2));
    assert_eq!(ai.direction(), ShipDirection::Horizontal);
    assert!(ai.candidates().is_empty());

    let mut rng = SmallRng::seed_from_u64(5);
    let shot = ai.next_shot(&board.shot_map(), &mut rng).unwrap();
    let mut targeted: HashSet<Coord> = ai.candidates().iter().collect();
    targeted.insert(shot);

    let expected: HashSet<Coord> = [Coord::new(1, 2), Coord::new(5, 2)].into_iter().collect();
    assert_eq!(targeted, expected);
}

#[test]
fn test_vertical_hits_set_vertical_axis() {
    let mut ai = TargetingAi::new();
    ai.register_hit(Coord::new(7, 3));
    ai.register_hit(Coord::new(7, 4));
    assert_eq!(ai.direction(), ShipDirection::Vertical);
    assert_eq!(ai.last_hit(), Some(Coord::new(7, 4)));

    let shots = ShotMap::new(
        Layer::from_coords([Coord::new(7, 3), Coord::new(7, 4)]).unwrap(),
        Layer::new(),
    );
    let mut rng = SmallRng::seed_from_u64(0);
    let shot = ai.next_shot(&shots, &mut rng).unwrap();
    assert!(shot == Coord::new(7, 2) || shot == Coord::new(7, 5));
}

#[test]
fn test_axis_discards_earlier_neighbour_guesses() {
    let mut board = Board::new();
    board.place(3, 4, 4, Orientation::Horizontal).unwrap();
    board.shoot(5, 4).unwrap();

    let mut ai = TargetingAi::new();
    let mut rng = SmallRng::seed_from_u64(9);
    ai.register_hit(Coord::new(5, 4));
    ai.next_shot(&board.shot_map(), &mut rng).unwrap();
    assert!(!ai.candidates().is_empty());

    board.shoot(6, 4).unwrap();
    ai.register_hit(Coord::new(6, 4));
    assert_eq!(ai.direction(), ShipDirection::Horizontal);
    assert!(ai.candidates().is_empty());
}

#[test]
fn test_scattered_hits_probe_every_neighbour() {
    let mut ai = TargetingAi::new();
    ai.register_hit(Coord::new(2, 2));
    ai.register_hit(Coord::new(6, 7));
    assert_eq!(ai.direction(), ShipDirection::Unknown);

    let hits = Layer::from_coords([Coord::new(2, 2), Coord::new(6, 7)]).unwrap();
    let shots = ShotMap::new(hits, Layer::new());
    let mut rng = SmallRng::seed_from_u64(21);
    let shot = ai.next_shot(&shots, &mut rng).unwrap();

    let mut targeted: HashSet<Coord> = ai.candidates().iter().collect();
    targeted.insert(shot);
    let expected: HashSet<Coord> = [
        (1, 2), (3, 2), (2, 1), (2, 3),
        (5, 7), (7, 7), (6, 6), (6, 8),
    ]
    .into_iter()
    .map(Coord::from)
    .collect();
    assert_eq!(targeted, expected);
}

#[test]
fn test_miss_drops_candidate_and_sunk_resets() {
    let mut ai = TargetingAi::new();
    ai.register_hit(Coord::new(5, 5));
    let hit = Layer::from_coords([Coord::new(5, 5)]).unwrap();
    let mut rng = SmallRng::seed_from_u64(2);
    ai.next_shot(&ShotMap::new(hit, Layer::new()), &mut rng).unwrap();

    let queued: Vec<Coord> = ai.candidates().iter().collect();
    ai.register_miss(queued[0]);
    assert!(!ai.candidates().contains(queued[0]));
    assert_eq!(ai.candidates().len(), queued.len() - 1);

    ai.register_sunk();
    assert!(!ai.is_hunting());
    assert!(ai.hit_cells().is_empty());
    assert!(ai.candidates().is_empty());
    assert_eq!(ai.direction(), ShipDirection::Unknown);
    assert_eq!(ai.last_hit(), None);
}

#[test]
fn test_sweep_prefers_even_cells() {
    let mut ai = TargetingAi::new();
    let mut rng = SmallRng::seed_from_u64(99);
    let shots = ShotMap::default();
    for _ in 0..200 {
        let c = ai.next_shot(&shots, &mut rng).unwrap();
        assert_eq!((c.x + c.y) % 2, 0);
    }
}

#[test]
fn test_sweep_falls_back_to_odd_cells_then_none() {
    let mut ai = TargetingAi::new();
    let mut rng = SmallRng::seed_from_u64(4);

    let shots = ShotMap::new(Layer::checkerboard(), Layer::new());
    let c = ai.next_shot(&shots, &mut rng).unwrap();
    assert_eq!((c.x + c.y) % 2, 1);

    let only = Coord::new(3, 8);
    let mut all_but_one = Layer::full();
    all_but_one.clear(only).unwrap();
    let shots = ShotMap::new(all_but_one, Layer::new());
    assert_eq!(ai.next_shot(&shots, &mut rng), Some(only));

    let shots = ShotMap::new(Layer::new(), Layer::full());
    assert_eq!(ai.next_shot(&shots, &mut rng), None);
}

#[test]
fn test_candidate_set_has_no_duplicates() {
    let mut set = CandidateSet::new();
    assert!(set.insert(Coord::new(1, 1)));
    assert!(!set.insert(Coord::new(1, 1)));
    assert!(!set.insert(Coord::new(GRID_SIZE, 0)));
    assert_eq!(set.len(), 1);

    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(set.pop_random(&mut rng), Some(Coord::new(1, 1)));
    assert_eq!(set.pop_random(&mut rng), None);
    assert!(!set.remove(Coord::new(1, 1)));
}

#[test]
fn test_seeded_ai_is_reproducible() {
    let run = |seed: u64| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.place_randomly(&mut rng, &FLEET).unwrap();
        let mut ai = TargetingAi::new();
        let mut shots = Vec::new();
        while !board.all_sunk() {
            let target = ai.next_shot(&board.shot_map(), &mut rng).unwrap();
            let outcome = board.shoot(target.x, target.y).unwrap();
            feed(&mut ai, target, outcome);
            shots.push(target);
        }
        shots
    };
    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_full_game_never_repeats_a_cell() {
    for seed in 0..40u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.place_randomly(&mut rng, &FLEET).unwrap();
        let mut ai = TargetingAi::new();
        let mut seen = HashSet::new();

        while !board.all_sunk() {
            let target = ai
                .next_shot(&board.shot_map(), &mut rng)
                .expect("ships afloat but no target");
            assert!(seen.insert(target), "seed {}: {:?} fired twice", seed, target);
            assert_eq!(board.cell_state(target.x, target.y), CellState::Unshot);
            let outcome = board.shoot(target.x, target.y).unwrap();
            feed(&mut ai, target, outcome);
        }
        assert!(seen.len() <= GRID_SIZE * GRID_SIZE);
    }
}

#[test]
fn test_hunt_sinks_lone_ship_quickly() {
    for length in 2..=4usize {
        for seed in 0..200u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = Board::new();
            board.place_randomly(&mut rng, &[length]).unwrap();
            let ship = board.ships()[0];
            let first = ship.cells().nth(rng.random_range(0..length)).unwrap();
            assert_eq!(board.shoot(first.x, first.y).unwrap(), ShotOutcome::Hit);

            let mut ai = TargetingAi::new();
            ai.register_hit(first);
            let mut shots = 0;
            loop {
                let target = ai.next_shot(&board.shot_map(), &mut rng).unwrap();
                let outcome = board.shoot(target.x, target.y).unwrap();
                shots += 1;
                feed(&mut ai, target, outcome);
                if matches!(outcome, ShotOutcome::Sunk { .. }) {
                    break;
                }
                assert!(
                    shots <= length + 2,
                    "length {} seed {}: still hunting after {} shots",
                    length,
                    seed,
                    shots
                );
            }
            // the other L-1 cells plus at most three misses
            assert!(shots <= length + 2);
            if length >= 3 {
                assert!(shots <= 2 * length - 1);
            }
        }
    }
}
