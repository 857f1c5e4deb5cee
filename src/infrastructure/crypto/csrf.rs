//! Anti-forgery token generation and comparison

use rand::RngCore;

/// Random bytes per token; hex encoding doubles the length.
const TOKEN_BYTES: usize = 32;

/// Generate a fresh anti-forgery token (64 lowercase hex characters).
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Compare a submitted token with the issued one in constant time.
pub fn tokens_match(submitted: &str, issued: &str) -> bool {
    let (a, b) = (submitted.as_bytes(), issued.as_bytes());
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Whether `value` has the shape of a token produced by [`generate_token`].
pub fn is_well_formed(value: &str) -> bool {
    value.len() == TOKEN_BYTES * 2 && hex::decode(value).is_ok()
}
