use crate::entropy::EntropySource;
use crate::error::Result;
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub const SEED_LEN: usize = 32;

/// ChaCha20 keystream read in buffered chunks.
struct Keystream {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl Keystream {
    fn new(seed: &[u8; SEED_LEN]) -> Self {
        let mut cipher = ChaCha20::new(seed.into(), &[0u8; 12].into());
        let mut buffer = Zeroizing::new(vec![0u8; 1024]);
        cipher.apply_keystream(&mut buffer);
        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }

    fn refill(&mut self) {
        self.buffer.iter_mut().for_each(|b| *b = 0);
        self.cipher.apply_keystream(&mut self.buffer);
        self.pos = 0;
    }

    fn next_u8(&mut self) -> u8 {
        if self.pos >= self.buffer.len() {
            self.refill();
        }
        let byte = self.buffer[self.pos];
        self.pos += 1;
        byte
    }

    fn next_u32(&mut self) -> u32 {
        u32::from_le_bytes([
            self.next_u8(),
            self.next_u8(),
            self.next_u8(),
            self.next_u8(),
        ])
    }
}

fn draw_seed(entropy: &mut dyn EntropySource) -> Result<Zeroizing<[u8; SEED_LEN]>> {
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    entropy.fill_bytes(&mut seed[..])?;
    Ok(seed)
}

/// Random ASCII letters. Results of two or more letters always mix upper
/// and lower case.
pub fn generate_letters(
    entropy: &mut dyn EntropySource,
    length: usize,
) -> Result<Zeroizing<String>> {
    let seed = draw_seed(entropy)?;
    Ok(letters_from_seed(&seed, length))
}

pub fn letters_from_seed(seed: &[u8; SEED_LEN], length: usize) -> Zeroizing<String> {
    let mut stream = Keystream::new(seed);

    let alphabet_size = ALPHABET.len();
    let rejection_threshold = 256 - (256 % alphabet_size);

    loop {
        let mut letters = Zeroizing::new(Vec::new());

        while letters.len() < length {
            let random_byte = stream.next_u8() as usize;
            if random_byte < rejection_threshold {
                letters.push(ALPHABET[random_byte % alphabet_size]);
            }
        }

        let mixed_case = letters.iter().any(u8::is_ascii_uppercase)
            && letters.iter().any(u8::is_ascii_lowercase);

        if length < 2 || mixed_case {
            return Zeroizing::new(letters.iter().map(|&b| b as char).collect());
        }
    }
}

/// Random words joined with `-`.
pub fn generate_words<S: AsRef<str>>(
    entropy: &mut dyn EntropySource,
    wordlist: &[S],
    word_count: usize,
) -> Result<Zeroizing<String>> {
    let seed = draw_seed(entropy)?;
    Ok(words_from_seed(&seed, wordlist, word_count))
}

pub fn words_from_seed<S: AsRef<str>>(
    seed: &[u8; SEED_LEN],
    wordlist: &[S],
    word_count: usize,
) -> Zeroizing<String> {
    if wordlist.is_empty() {
        return Zeroizing::new(String::new());
    }

    let mut stream = Keystream::new(seed);
    let wordlist_len = wordlist.len() as u64;

    let space = 1u64 << 32;
    let rejection_threshold = space - (space % wordlist_len);

    let mut words = Vec::new();
    while words.len() < word_count {
        let random_u32 = stream.next_u32() as u64;
        if random_u32 < rejection_threshold {
            let index = (random_u32 % wordlist_len) as usize;
            words.push(wordlist[index].as_ref());
        }
    }

    Zeroizing::new(words.join("-"))
}
