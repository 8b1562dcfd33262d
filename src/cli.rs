use crate::digest::Encoding;
use crate::request::{DEFAULT_ALGORITHM, DEFAULT_ITERATIONS, DEFAULT_WORD_COUNT, UNLIMITED};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "password",
    version,
    about = "A silly widget to produce hash values"
)]
pub struct Cli {
    /// Message input values to hash, joined with spaces
    pub msg: Vec<String>,

    /// Input key value; salt is appended unless --no-salt is used
    #[arg(short, long, default_value = "")]
    pub key: String,

    /// Read the key from the terminal without echo, replacing --key
    #[arg(short = 'P', long)]
    pub prompt_key: bool,

    /// Salt appended to the key (default: fresh random bytes)
    #[arg(short, long)]
    pub salt: Option<String>,

    /// Disable salting; wins over --salt
    #[arg(short = 'S', long)]
    pub no_salt: bool,

    /// Date appended to the message (default: today, YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Disable the date suffix; wins over --date
    #[arg(short = 'D', long)]
    pub no_date: bool,

    /// One-way hash algorithm (hashlib-style name)
    #[arg(short = 'A', long, value_name = "DIGESTMOD", default_value = DEFAULT_ALGORITHM)]
    pub algo: String,

    /// Text encoding of each digest pass
    #[arg(short, long, value_enum, default_value = "hex")]
    pub encoding: Encoding,

    /// Use random letters instead of a hash algorithm
    #[arg(short = 'L', long, overrides_with = "words")]
    pub letters: bool,

    /// Use random words instead of a hash algorithm
    #[arg(short = 'W', long, overrides_with = "letters")]
    pub words: bool,

    /// Number of words produced by --words
    #[arg(short = 'w', long, default_value_t = DEFAULT_WORD_COUNT)]
    pub word_count: usize,

    /// Word list used by --words, one word per line (default: built-in list)
    #[arg(long, env = "PASSWORD_DICTIONARY", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Remove characters that are unsafe in URLs
    #[arg(short = 'U', long)]
    pub urlsafe: bool,

    /// Remove every character outside [A-Za-z0-9]
    #[arg(short = 'C', long)]
    pub no_special_characters: bool,

    /// Max character length of the result (-1 for no limit)
    #[arg(
        short = 'l',
        long,
        visible_alias = "length",
        default_value_t = UNLIMITED,
        allow_negative_numbers = true
    )]
    pub limit: i64,

    /// Feed the output back as input for N passes
    #[arg(short = 'N', long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,

    /// Trim and NFC-normalize the message and key before hashing
    #[arg(short, long)]
    pub normalize: bool,

    /// Print only the generated value
    #[arg(short, long)]
    pub quiet: bool,

    /// Show every input value used to produce the result
    #[arg(long)]
    pub debug: bool,

    /// Print the supported algorithm names and exit
    #[arg(long)]
    pub list_algorithms: bool,
}
