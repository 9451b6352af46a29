// Copyright (C) 2020-2026 Andy Kurnia.

use clap::Parser;
use wordrobot::{error, gaddag};

/// Checks words against a word list.
#[derive(Parser)]
#[command(name = "lex", long_about = None)]
struct Cli {
    /// Word list, one word per line.
    #[arg(long)]
    dict: std::path::PathBuf,
    /// Words to look up.
    words: Vec<String>,
}

fn main() -> error::Returns<()> {
    env_logger::init();
    let cli = Cli::parse();
    let t0 = std::time::Instant::now();
    let gaddag = gaddag::Gaddag::load(std::io::BufReader::new(std::fs::File::open(&cli.dict)?))?;
    println!(
        "{} words, {} states, {} arcs, loaded in {:?}",
        gaddag.num_words(),
        gaddag.num_states(),
        gaddag.num_arcs(),
        t0.elapsed()
    );
    for word in &cli.words {
        let valid = !word.is_empty() && gaddag.is_word(word);
        println!("{} {}", word, if valid { "yes" } else { "no" });
    }
    Ok(())
}
