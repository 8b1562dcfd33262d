use crate::request::{MAX_LETTERS_LENGTH, MAX_WORD_COUNT};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PasswordError>;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Unknown algorithm method for {0:?} (see --list-algorithms)")]
    UnsupportedAlgorithm(String),

    #[error("OS entropy source failed: {0}")]
    EntropySource(String),

    #[error("Invalid limit {0}: use a positive length or -1 for no limit")]
    InvalidLimit(i64),

    #[error("Invalid iteration count {0}: at least one pass is required")]
    InvalidIterations(u64),

    #[error(
        "Invalid limit {0} for random letters: at most {max} characters",
        max = MAX_LETTERS_LENGTH
    )]
    LettersTooLong(i64),

    #[error("Invalid word count {0}: use 1 to {max} words", max = MAX_WORD_COUNT)]
    InvalidWordCount(usize),

    #[error("Failed to read dictionary {}: {source}", .path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dictionary {} contains no words", .0.display())]
    EmptyDictionary(PathBuf),
}
