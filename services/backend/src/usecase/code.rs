use rand::RngExt;
use sha2::{Digest, Sha256};

use crate::domain::repository::CodeGenerator;

/// Production code source: a uniformly random integer in `[0, 1_000_000)`
/// rendered as a fixed-width 6-digit decimal string. `rand::rng()` is a
/// CSPRNG, which one-time login codes require.
#[derive(Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn six_digit_code(&self) -> String {
        let mut rng = rand::rng();
        format!("{:06}", rng.random_range(0..1_000_000u32))
    }
}

/// SHA-256 of the plaintext code, lowercase hex. This is what gets stored;
/// the plaintext only ever travels to the email gateway.
pub fn digest_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}
