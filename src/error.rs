// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("word {word:?} has unsupported byte 0x{byte:02x}")]
    BadWord { word: String, byte: u8 },

    #[error("cannot insert {0:?} into a compacted gaddag")]
    Compacted(String),

    #[error("conflicting arc while inserting {0:?}")]
    ConflictingArc(String),

    #[error("rack has {0} blanks, at most 2 are supported")]
    TooManyBlanks(usize),

    #[error("tile {0} is not on the rack")]
    TileNotOnRack(u8),

    #[error("illegal play: {0}")]
    IllegalPlay(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("search worker lost: {0}")]
    WorkerLost(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

pub fn new(s: String) -> Error {
    Error::Message(s)
}

pub type Returns<T> = Result<T, Error>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}
