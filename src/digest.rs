use crate::error::{PasswordError, Result};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use blake2::{Blake2b512, Blake2s256};
use clap::ValueEnum;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::digest::{ExtendableOutput, Update};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512, Shake128, Shake256};
use std::fmt;
use std::str::FromStr;
use tracing::trace;
use zeroize::Zeroizing;

/// Output length for the SHAKE functions, in bytes.
pub const XOF_OUTPUT_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b,
    Blake2s,
    Shake128,
    Shake256,
}

impl Algorithm {
    pub const ALL: [Algorithm; 16] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha512_224,
        Algorithm::Sha512_256,
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
        Algorithm::Blake2b,
        Algorithm::Blake2s,
        Algorithm::Shake128,
        Algorithm::Shake256,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha512_224 => "sha512_224",
            Algorithm::Sha512_256 => "sha512_256",
            Algorithm::Sha3_224 => "sha3_224",
            Algorithm::Sha3_256 => "sha3_256",
            Algorithm::Sha3_384 => "sha3_384",
            Algorithm::Sha3_512 => "sha3_512",
            Algorithm::Blake2b => "blake2b",
            Algorithm::Blake2s => "blake2s",
            Algorithm::Shake128 => "shake_128",
            Algorithm::Shake256 => "shake_256",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha224 | Algorithm::Sha512_224 | Algorithm::Sha3_224 => 28,
            Algorithm::Sha256
            | Algorithm::Sha512_256
            | Algorithm::Sha3_256
            | Algorithm::Blake2s => 32,
            Algorithm::Sha384 | Algorithm::Sha3_384 => 48,
            Algorithm::Sha512 | Algorithm::Sha3_512 | Algorithm::Blake2b => 64,
            Algorithm::Shake128 | Algorithm::Shake256 => XOF_OUTPUT_LEN,
        }
    }

    pub fn digest(&self, data: &[u8]) -> Zeroizing<Vec<u8>> {
        let bytes = match self {
            Algorithm::Md5 => fixed::<Md5>(data),
            Algorithm::Sha1 => fixed::<Sha1>(data),
            Algorithm::Sha224 => fixed::<Sha224>(data),
            Algorithm::Sha256 => fixed::<Sha256>(data),
            Algorithm::Sha384 => fixed::<Sha384>(data),
            Algorithm::Sha512 => fixed::<Sha512>(data),
            Algorithm::Sha512_224 => fixed::<Sha512_224>(data),
            Algorithm::Sha512_256 => fixed::<Sha512_256>(data),
            Algorithm::Sha3_224 => fixed::<Sha3_224>(data),
            Algorithm::Sha3_256 => fixed::<Sha3_256>(data),
            Algorithm::Sha3_384 => fixed::<Sha3_384>(data),
            Algorithm::Sha3_512 => fixed::<Sha3_512>(data),
            Algorithm::Blake2b => fixed::<Blake2b512>(data),
            Algorithm::Blake2s => fixed::<Blake2s256>(data),
            Algorithm::Shake128 => extendable::<Shake128>(data),
            Algorithm::Shake256 => extendable::<Shake256>(data),
        };
        Zeroizing::new(bytes)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algo| algo.name() == wanted || algo.name().replace('_', "") == wanted)
            .ok_or_else(|| PasswordError::UnsupportedAlgorithm(s.to_string()))
    }
}

fn fixed<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

fn extendable<X: Default + Update + ExtendableOutput>(data: &[u8]) -> Vec<u8> {
    let mut hasher = X::default();
    Update::update(&mut hasher, data);
    let mut out = vec![0u8; XOF_OUTPUT_LEN];
    hasher.finalize_xof_into(&mut out);
    out
}

/// Textual form of a digest. This text is both the printed result and the
/// input of the next pass when iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Hex,
    Base64,
    Base64url,
    /// Ascii85, base85, base64 and hex interleaved one character at a time.
    Mixed,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Base64url => "base64url",
            Encoding::Mixed => "mixed",
        }
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(bytes),
            Encoding::Base64 => STANDARD.encode(bytes),
            Encoding::Base64url => URL_SAFE_NO_PAD.encode(bytes),
            Encoding::Mixed => interleave(&mixed_components(bytes)),
        }
    }
}

const Z85_ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

/// RFC 1924 character set.
const BASE85_ALPHABET: &[u8; 85] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

/// `!` through `u`.
const ASCII85_ALPHABET: [u8; 85] = {
    let mut table = [0u8; 85];
    let mut i = 0;
    while i < table.len() {
        table[i] = b'!' + i as u8;
        i += 1;
    }
    table
};

/// The four encodings behind [`Encoding::Mixed`], labeled for display.
pub fn mixed_components(bytes: &[u8]) -> [(&'static str, Zeroizing<String>); 4] {
    [
        ("Ascii85", Zeroizing::new(radix85(bytes, &ASCII85_ALPHABET, true))),
        ("Base85", Zeroizing::new(radix85(bytes, BASE85_ALPHABET, false))),
        ("Base64", Zeroizing::new(STANDARD.encode(bytes))),
        ("Hex", Zeroizing::new(hex::encode(bytes))),
    ]
}

/// One character from each component in turn, stopping at the end of the
/// shortest one.
fn interleave(components: &[(&'static str, Zeroizing<String>); 4]) -> String {
    let [a85, b85, b64, b16] = components;
    a85.1
        .chars()
        .zip(b85.1.chars())
        .zip(b64.1.chars())
        .zip(b16.1.chars())
        .flat_map(|(((w, x), y), z)| [w, x, y, z])
        .collect()
}

/// Big-endian base-85 over 4-byte groups without framing. A short final
/// group is zero padded and loses one output character per padding byte.
/// `fold_zero_groups` writes a full all-zero group as `z`.
fn radix85(bytes: &[u8], alphabet: &[u8; 85], fold_zero_groups: bool) -> String {
    let padding = (4 - bytes.len() % 4) % 4;
    let mut padded = Zeroizing::new(bytes.to_vec());
    padded.resize(bytes.len() + padding, 0);

    let encoded = Zeroizing::new(z85::encode(&padded[..]));
    let groups = padded.len() / 4;

    let mut out = String::new();
    for (i, (group, chunk)) in padded
        .chunks(4)
        .zip(encoded.as_bytes().chunks(5))
        .enumerate()
    {
        let is_tail = padding > 0 && i + 1 == groups;
        if fold_zero_groups && !is_tail && group.iter().all(|&b| b == 0) {
            out.push('z');
            continue;
        }
        for &c in chunk {
            let digit = Z85_ALPHABET.iter().position(|&z| z == c).unwrap_or(0);
            out.push(alphabet[digit] as char);
        }
    }
    out.truncate(out.len() - padding);
    out
}

/// Last pass of [`iterate`]: the digest bytes and their encoded text.
pub struct Digested {
    pub bytes: Zeroizing<Vec<u8>>,
    pub text: Zeroizing<String>,
}

/// Hashes `input`, then rehashes the encoded text of each pass until
/// `iterations` passes have run. `on_pass` receives the number of completed
/// passes.
pub fn iterate<F>(
    algorithm: Algorithm,
    encoding: Encoding,
    input: &[u8],
    iterations: u64,
    mut on_pass: F,
) -> Digested
where
    F: FnMut(u64),
{
    let mut bytes = algorithm.digest(input);
    let mut text = Zeroizing::new(encoding.encode(&bytes));
    on_pass(1);

    for pass in 2..=iterations {
        bytes = algorithm.digest(text.as_bytes());
        text = Zeroizing::new(encoding.encode(&bytes));
        on_pass(pass);
    }

    trace!(algorithm = %algorithm, iterations, len = text.len(), "digest complete");
    Digested { bytes, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(algorithm: Algorithm, data: &[u8]) -> String {
        Encoding::Hex.encode(&algorithm.digest(data))
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hex(Algorithm::Sha3_384, b"hello"),
            "720aea11019ef06440fbf05d87aa24680a2153df3907b23631e7177ce620fa1330ff07c0fddee54699a4c3ee0ee9d887"
        );
        assert_eq!(
            hex(Algorithm::Sha256, b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            hex(Algorithm::Md5, b"hello"),
            "5d41402abc4b2a76b9719d911017c592"
        );
        assert_eq!(
            hex(Algorithm::Blake2s, b"hello"),
            "19213bacc58dee6dbde3ceb9a47cbb330b3d86f8cca8997eb00be456f140ca25"
        );
        assert_eq!(
            hex(Algorithm::Sha512_256, b"hello"),
            "e30d87cfa2a75db545eac4d61baf970366a8357c7f72fa95b52d0accb698f13a"
        );
        assert_eq!(
            hex(Algorithm::Sha3_384, b""),
            "0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2ac3713831264adb47fb6bd1e058d5f004"
        );
    }

    #[test]
    fn test_shake_output_length() {
        let out = hex(Algorithm::Shake128, b"hello");
        assert_eq!(out.len(), XOF_OUTPUT_LEN * 2);
        assert!(out.starts_with("8eb4b6a932f280335ee1a279f8c208a3"));
    }

    #[test]
    fn test_output_len_matches_digest() {
        for algo in Algorithm::ALL {
            assert_eq!(
                algo.digest(b"test").len(),
                algo.output_len(),
                "Digest length mismatch for {}",
                algo
            );
        }
    }

    #[test]
    fn test_parse_names() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
        }
        assert_eq!("SHA3-384".parse::<Algorithm>().unwrap(), Algorithm::Sha3_384);
        assert_eq!("shake128".parse::<Algorithm>().unwrap(), Algorithm::Shake128);
        assert_eq!(" sha256 ".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "notarealalgo".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, PasswordError::UnsupportedAlgorithm(ref name) if name == "notarealalgo"));
    }

    #[test]
    fn test_base64_encodings() {
        let digest = Algorithm::Sha256.digest(b"hello");
        assert_eq!(
            Encoding::Base64.encode(&digest),
            "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ="
        );
        assert_eq!(
            Encoding::Base64url.encode(&digest),
            "LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ"
        );
    }

    #[test]
    fn test_hex_encoding() {
        assert_eq!(Encoding::Hex.encode(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
        assert_eq!(Encoding::Hex.encode(&[]), "");
    }

    #[test]
    fn test_radix85_alphabets() {
        assert_eq!(radix85(b"hello", &ASCII85_ALPHABET, true), "BOu!rDZ");
        assert_eq!(radix85(b"hello", BASE85_ALPHABET, false), "Xk~0{Zv");
    }

    #[test]
    fn test_ascii85_zero_groups() {
        assert_eq!(radix85(b"\0\0\0\0ab", &ASCII85_ALPHABET, true), "z@:B");
        assert_eq!(radix85(b"\0\0\0\0\0", &ASCII85_ALPHABET, true), "z!!");
        assert_eq!(radix85(b"\0\0\0\0ab", BASE85_ALPHABET, false), "00000VPX");
    }

    #[test]
    fn test_mixed_components() {
        let digest = Algorithm::Sha256.digest(b"hello");
        let components = mixed_components(&digest);
        let names: Vec<&str> = components.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["Ascii85", "Base85", "Base64", "Hex"]);
        assert_eq!(*components[0].1, "/FlNH?a-:8-KmN@`OY!\")\\sK\"+/_G3Es+:.PDbeR");
        assert_eq!(*components[1].1, "Eb>jdU$CPNCg?jV#ku018x|g1AE!cIa|APDlZ%)n");
        assert_eq!(*components[3].1, hex(Algorithm::Sha256, b"hello"));
    }

    #[test]
    fn test_mixed_interleaves_to_shortest() {
        let digest = Algorithm::Md5.digest(b"hello");
        assert_eq!(
            Encoding::Mixed.encode(&digest),
            ">TX5s|UdUqF4_!A1*9K4]yr0Lhx2s|La_!Kbt}nc\\xa4Tp5b+Ac21GZa&527&5R6/EEbWsB9<Rf7KgF1"
        );

        let digest = Algorithm::Sha256.digest(b"hello");
        let mixed = Encoding::Mixed.encode(&digest);
        assert_eq!(mixed.len(), 4 * 40);
        assert!(mixed.starts_with("/EL2FbPcl>JfNjN2"));
    }

    #[test]
    fn test_mixed_shake_tail() {
        let digest = Algorithm::Shake128.digest(b"hello");
        let components = mixed_components(&digest);
        assert_eq!(components[0].1.len(), 319);
        assert_eq!(components[1].1.len(), 319);
        assert!(components[0].1.ends_with("'q63<Y"));
        assert!(components[1].1.ends_with("6`LIRu"));
        assert_eq!(Encoding::Mixed.encode(&digest).len(), 4 * 319);
    }

    #[test]
    fn test_single_iteration_is_plain_digest() {
        let out = iterate(Algorithm::Sha256, Encoding::Hex, b"hello", 1, |_| {});
        assert_eq!(*out.text, hex(Algorithm::Sha256, b"hello"));
        assert_eq!(*out.bytes, *Algorithm::Sha256.digest(b"hello"));
    }

    #[test]
    fn test_iterations_chain_text() {
        let out = iterate(Algorithm::Sha256, Encoding::Hex, b"hello", 3, |_| {});
        assert_eq!(
            *out.text,
            "ecd26292b7f02970ca6909abb23e1aedd0dd57d0ee9ff40bf3f30c325e3e453a"
        );
        assert_eq!(*out.text, Encoding::Hex.encode(&out.bytes));

        let again = iterate(Algorithm::Sha256, Encoding::Hex, b"hello", 3, |_| {});
        assert_eq!(*out.text, *again.text);
    }

    #[test]
    fn test_mixed_iteration_rehashes_mixed_text() {
        let out = iterate(Algorithm::Md5, Encoding::Mixed, b"hello", 2, |_| {});
        let first = Encoding::Mixed.encode(&Algorithm::Md5.digest(b"hello"));
        assert_eq!(*out.bytes, *Algorithm::Md5.digest(first.as_bytes()));
        assert_eq!(*out.text, Encoding::Mixed.encode(&out.bytes));
    }

    #[test]
    fn test_iterate_reports_every_pass() {
        let mut seen = Vec::new();
        iterate(Algorithm::Md5, Encoding::Hex, b"x", 4, |n| seen.push(n));
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }
}
