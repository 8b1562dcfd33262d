pub mod cli;
pub mod compose;
pub mod digest;
pub mod entropy;
pub mod error;
pub mod filter;
pub mod generator;
pub mod pipeline;
pub mod request;
pub mod ui;
pub mod wordlist;

pub use cli::Cli;
pub use digest::{Algorithm, Encoding};
pub use entropy::{EntropySource, FixedEntropy, OsEntropy};
pub use error::PasswordError;
pub use pipeline::{Outcome, run};
pub use request::{Request, Salt, Strategy, resolve};
