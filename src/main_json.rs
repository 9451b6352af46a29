// Copyright (C) 2020-2026 Andy Kurnia.

use clap::Parser;
use std::io::Read;
use std::sync::Arc;
use wordrobot::{config, display, error, gaddag, kibitzer, move_picker, movegen, preempt};

// rack: array of numbers. 0 for blank, 1 for A.
// board: 2D array of numbers. 0 for empty, 1 for A, -1 for blank-as-A.
// opponent_rack, scores, bag: optional. the bag defaults to all unseen tiles.

/// Answers a JSON question with the move the robot would make.
#[derive(Parser)]
#[command(name = "json", long_about = None)]
struct Cli {
    /// Word list, one word per line.
    #[arg(long)]
    dict: std::path::PathBuf,
    /// Search configuration as JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Question file. Reads stdin when omitted.
    question: Option<std::path::PathBuf>,
    /// Also print the board.
    #[arg(long)]
    show: bool,
}

fn main() -> error::Returns<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::SearchConfig::load(path)?,
        None => config::SearchConfig::default(),
    };
    let data = match &cli.question {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    let question = kibitzer::Question::from_json(&data)?;
    let game_state = question.to_game_state()?;
    if cli.show {
        display::print_game_state(&game_state);
    }

    let gaddag = gaddag::Gaddag::load(std::io::BufReader::new(std::fs::File::open(&cli.dict)?))?;
    let picker = move_picker::MovePicker::from_config(Arc::new(movegen::GaddagMoveGenerator::new(gaddag)), &config);
    let m = picker.pick_a_move(&game_state, &preempt::PreemptionContext::new())?;
    println!("{}", serde_json::to_string(&kibitzer::JsonPlay::from(&m))?);
    Ok(())
}
