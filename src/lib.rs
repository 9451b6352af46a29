// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod config;
pub mod display;
pub mod evaluator;
pub mod gaddag;
pub mod game_config;
pub mod game_state;
pub mod iterative;
pub mod kibitzer;
pub mod matrix;
pub mod move_picker;
pub mod movegen;
pub mod play_scorer;
pub mod preempt;
pub mod rack;
pub mod search;
pub mod swap;
pub mod task;
