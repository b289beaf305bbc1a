use rand::{rngs::SmallRng, SeedableRng};
use seabattle::prelude::*;
use serde_json::json;

/// Let the targeting AI clear one randomly laid out fleet and return the
/// number of shots it needed.
fn clear_fleet(rng: &mut SmallRng) -> anyhow::Result<usize> {
    let mut board = Board::new();
    board
        .place_randomly(rng, &FLEET)
        .map_err(|e| anyhow::anyhow!(e))?;
    let mut ai = TargetingAi::new();
    let mut shots = 0;
    while !board.all_sunk() {
        let Some(target) = ai.next_shot(&board.shot_map(), rng) else {
            anyhow::bail!("AI ran out of targets with ships afloat");
        };
        let outcome = board
            .shoot(target.x, target.y)
            .map_err(|e| anyhow::anyhow!(e))?;
        shots += 1;
        match outcome {
            ShotOutcome::Miss => ai.register_miss(target),
            ShotOutcome::Hit => ai.register_hit(target),
            ShotOutcome::Sunk { .. } => {
                ai.register_hit(target);
                ai.register_sunk();
            }
        }
        if shots > GRID_SIZE * GRID_SIZE {
            anyhow::bail!("AI fired more shots than there are cells");
        }
    }
    Ok(shots)
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: usize = match args.get(2) {
        Some(n) => n.parse()?,
        None => 100,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::with_capacity(games);
    for _ in 0..games {
        results.push(clear_fleet(&mut rng)?);
    }

    let total: usize = results.iter().sum();
    let result = json!({
        "seed": seed,
        "games": games,
        "min_shots": results.iter().min(),
        "max_shots": results.iter().max(),
        "mean_shots": if games == 0 { 0.0 } else { total as f64 / games as f64 },
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
