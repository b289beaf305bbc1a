use std::io::{self, BufRead};
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    coord_to_string, describe_outcome, init_logging, parse_command, print_board, prompt_line,
    records, Command, GameEngine, GameMode, GameStatus, Orientation, PlayerId, RecordBook,
    COMPUTER,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Computer,
    Player,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Computer => GameMode::VsComputer,
            ModeArg::Player => GameMode::VsPlayer,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal.
    Play {
        #[arg(long, value_enum, default_value_t = ModeArg::Computer)]
        mode: ModeArg,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = "Player 1")]
        name: String,
        #[arg(long, default_value = "Player 2", help = "Second player's name in player mode")]
        name2: String,
        #[arg(long, default_value = seabattle::records::DEFAULT_RECORDS_FILE)]
        records: String,
        #[arg(long, default_value_t = 500, help = "Pause between computer shots, in ms")]
        delay_ms: u64,
    },
    /// Show the best times.
    Records {
        #[arg(long, default_value = seabattle::records::DEFAULT_RECORDS_FILE)]
        records: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            mode,
            seed,
            name,
            name2,
            records,
            delay_ms,
        } => {
            let mut rng = if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let mut book = RecordBook::load(&records);
            let names = [name, name2];
            play(
                mode.into(),
                &names,
                &mut book,
                &mut rng,
                Duration::from_millis(delay_ms),
            )?;
        }
        Commands::Records { records } => {
            let book = RecordBook::load(&records);
            for mode in [GameMode::VsComputer, GameMode::VsPlayer] {
                match book.record_text(mode) {
                    Some(text) => println!("{}", text),
                    None => println!("No record yet for {}", mode.record_key()),
                }
            }
        }
    }
    Ok(())
}

fn play(
    mode: GameMode,
    names: &[String; 2],
    book: &mut RecordBook,
    rng: &mut SmallRng,
    delay: Duration,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut engine = GameEngine::new(mode);

    let humans: &[PlayerId] = match mode {
        GameMode::VsComputer => &[0],
        GameMode::VsPlayer => &[0, 1],
    };
    for &player in humans {
        if !place_fleet(&mut engine, player, &names[player], &mut input, rng)? {
            return Ok(());
        }
    }
    engine.start(rng).map_err(|e| anyhow::anyhow!(e))?;
    if let Some(text) = book.record_text(mode) {
        println!("{}", text);
    }

    let started = Instant::now();
    while engine.status() == GameStatus::InProgress {
        if engine.is_computer_turn() {
            println!("\nComputer is shooting...");
            for (target, outcome) in engine
                .computer_turn(rng)
                .map_err(|e| anyhow::anyhow!(e))?
            {
                thread::sleep(delay);
                println!("  {}: {}", coord_to_string(target), describe_outcome(outcome));
            }
            continue;
        }

        let shooter = engine.current_player();
        let target = 1 - shooter;
        if let (Some(own), Some(enemy)) = (engine.board(shooter), engine.board(target)) {
            if mode == GameMode::VsPlayer {
                println!("\n=== {}'s turn ===", names[shooter]);
            }
            print_board("Your fleet", own, true);
            print_board("Enemy waters", enemy, false);
        }
        let Some(line) = prompt_line(&mut input, "Target (e.g. B7, q to quit): ")? else {
            return Ok(());
        };
        match parse_command(&line) {
            Ok(Command::Cell(c)) => match engine.fire(c.x, c.y) {
                Ok(outcome) => println!("{}: {}", coord_to_string(c), describe_outcome(outcome)),
                Err(e) => println!("{}", e),
            },
            Ok(Command::Quit) => return Ok(()),
            Ok(_) => println!("Enter a cell to fire at."),
            Err(e) => println!("{}", e),
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    let Some(winner) = engine.winner() else {
        return Ok(());
    };
    if let Some(board) = engine.board(1 - winner) {
        print_board("Defeated fleet", board, true);
    }
    if mode == GameMode::VsComputer && winner == COMPUTER {
        println!("\nDefeat. The computer sank your fleet.");
        return Ok(());
    }
    println!(
        "\n{} wins in {} ({} shots)!",
        names[winner],
        records::format_duration(elapsed),
        engine.shots_fired(winner)
    );
    if book.check_and_update(mode, elapsed, &names[winner], &records::today())? {
        println!("New record!");
    }
    Ok(())
}

/// Interactive placement for one player. Returns `false` if the player quit.
fn place_fleet(
    engine: &mut GameEngine,
    player: PlayerId,
    name: &str,
    input: &mut impl BufRead,
    rng: &mut SmallRng,
) -> anyhow::Result<bool> {
    let mut orientation = Orientation::Horizontal;
    println!("\n{}: place your fleet. Cell = bow, r = rotate, auto = random, remove B7, q = quit", name);
    while let Some(length) = engine.next_ship_length(player) {
        if let Some(board) = engine.board(player) {
            print_board("Your fleet", board, true);
        }
        let prompt = format!("Ship of length {} ({:?}): ", length, orientation);
        let Some(line) = prompt_line(input, &prompt)? else {
            return Ok(false);
        };
        let result = match parse_command(&line) {
            Ok(Command::Cell(c)) => engine
                .place_next_ship(player, c.x, c.y, orientation)
                .map(|_| ()),
            Ok(Command::Rotate) => {
                orientation = orientation.rotated();
                Ok(())
            }
            Ok(Command::Auto) => engine.auto_place(player, rng),
            Ok(Command::Remove(c)) => engine.remove_ship_at(player, c.x, c.y).map(|removed| {
                if removed.is_none() {
                    println!("No ship at {}", coord_to_string(c));
                }
            }),
            Ok(Command::Quit) => return Ok(false),
            Err(e) => {
                println!("{}", e);
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("{}", e);
        }
    }
    if let Some(board) = engine.board(player) {
        print_board("Your fleet", board, true);
    }
    Ok(true)
}
