// Copyright (C) 2020-2026 Andy Kurnia.

use clap::Parser;
use rand::prelude::*;
use std::sync::Arc;
use wordrobot::{config, display, error, gaddag, game_state, move_picker, movegen, preempt};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum PickerKind {
    Top,
    Fixed,
    Iterative,
}

/// Lets two robots play each other.
#[derive(Parser)]
#[command(name = "auto", long_about = None)]
struct Cli {
    /// Word list, one word per line.
    #[arg(long)]
    dict: std::path::PathBuf,
    /// Search configuration as JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1)]
    games: usize,
    #[arg(long, value_enum, default_value = "iterative")]
    p1: PickerKind,
    #[arg(long, value_enum, default_value = "top")]
    p2: PickerKind,
}

fn make_picker(
    kind: PickerKind,
    generator: &Arc<movegen::GaddagMoveGenerator>,
    config: &config::SearchConfig,
) -> move_picker::MovePicker<movegen::GaddagMoveGenerator> {
    match kind {
        PickerKind::Top => move_picker::MovePicker::top_scoring(Arc::clone(generator), config),
        PickerKind::Fixed => move_picker::MovePicker::fixed_depth(Arc::clone(generator), config),
        PickerKind::Iterative => move_picker::MovePicker::from_config(Arc::clone(generator), config),
    }
}

fn main() -> error::Returns<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::SearchConfig::load(path)?,
        None => config::SearchConfig::default(),
    };
    let gaddag = gaddag::Gaddag::load(std::io::BufReader::new(std::fs::File::open(&cli.dict)?))?;
    let generator = Arc::new(movegen::GaddagMoveGenerator::new(gaddag));
    let pickers = [
        make_picker(cli.p1, &generator, &config),
        make_picker(cli.p2, &generator, &config),
    ];
    let mut rng = match cli.seed {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed),
        None => rand_chacha::ChaCha20Rng::from_os_rng(),
    };

    let mut wins = [0usize; 2];
    for game_num in 1..=cli.games {
        let mut game_state = game_state::GameState::wwf();
        game_state.reset_and_draw_tiles(&mut rng);
        game_state.turn = rng.random_range(0..2);
        println!("\ngame {}", game_num);
        loop {
            display::print_game_state(&game_state);
            let picker = &pickers[game_state.turn as usize];
            let t0 = std::time::Instant::now();
            let m = picker.pick_a_move(&game_state, &preempt::PreemptionContext::new())?;
            println!(
                "player {} plays {} for {} in {:?}",
                game_state.turn + 1,
                m.play.fmt(game_state.game_config.alphabet()),
                m.score(),
                t0.elapsed()
            );
            game_state.play(&mut rng, &m)?;
            if game_state.is_over() {
                break;
            }
            game_state.next_turn();
        }
        game_state.finish();
        display::print_game_state(&game_state);
        let spread = game_state.spread(0);
        println!("final spread for player 1: {}", spread);
        if spread > 0 {
            wins[0] += 1;
        } else if spread < 0 {
            wins[1] += 1;
        }
    }
    println!("wins: player 1 {}, player 2 {}", wins[0], wins[1]);
    Ok(())
}
