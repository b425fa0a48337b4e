//! Netwalk in the terminal.
//!
//! Prints the scrambled grid and reads commands from standard input until the
//! network is wired up or the player quits.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netwalk::{EngineError, PuzzleBuilder, PuzzleEngine, Vector2};

/// Rotate pieces until every cell is wired to the server.
#[derive(Parser)]
#[command(name = "netwalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rows in the first puzzle.
    #[arg(short, long, default_value_t = 3)]
    rows: usize,
    /// Columns in the first puzzle.
    #[arg(short, long, default_value_t = 5)]
    columns: usize,
    /// Seed for a reproducible puzzle.
    #[arg(short, long)]
    seed: Option<u64>,
}

enum Command {
    Rotate { row: i32, column: i32 },
    // one more row and column
    Grow,
    Shrink,
    Quit,
}

fn parse(line: &str) -> Option<Command> {
    match line {
        "+" => Some(Command::Grow),
        "-" => Some(Command::Shrink),
        "q" | "quit" => Some(Command::Quit),
        _ => {
            let mut parts = line.split_whitespace().map(str::parse::<i32>);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Ok(row)), Some(Ok(column)), None) => Some(Command::Rotate { row, column }),
                _ => None,
            }
        }
    }
}

fn show(engine: &PuzzleEngine) {
    let grid = engine.grid();
    print!("{grid}");
    println!("{}/{} powered", grid.powered_count(), grid.len());
}

fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut builder = PuzzleBuilder::with_dims(cli.rows, cli.columns);
    if let Some(seed) = cli.seed {
        builder.seed(seed);
    }
    let mut engine = builder.build()?;

    println!("Enter `row column` to rotate a piece, `+`/`-` to resize, `q` to quit.");
    show(&engine);

    let mut moves = 0;
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };

        let (rows, columns) = (engine.grid().rows(), engine.grid().columns());
        match parse(line.trim()) {
            Some(Command::Rotate { row, column }) => {
                if let Err(e) = engine.rotate_at(Vector2::new(column, row)) {
                    eprintln!("{e}");
                    continue;
                }
                moves += 1;
            }
            Some(Command::Grow) => {
                engine.new_puzzle(rows + 1, columns + 1)?;
                moves = 0;
            }
            Some(Command::Shrink) if rows > 2 && columns > 2 => {
                engine.new_puzzle(rows - 1, columns - 1)?;
                moves = 0;
            }
            Some(Command::Shrink) => {
                eprintln!("already at the smallest size");
                continue;
            }
            Some(Command::Quit) => break,
            None => {
                eprintln!("expected `row column`, `+`, `-` or `q`");
                continue;
            }
        }

        show(&engine);
        if engine.is_solved() {
            println!("Solved in {moves} moves! `+` for a bigger network, `q` to quit.");
        }
        io::stdout().flush().ok();
    }

    Ok(())
}
