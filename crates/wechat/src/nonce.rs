//! Random string helpers

use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::OsRng;
use rand::Rng;

const NONCE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Longest nonce `create_nonce_str` will produce
pub const MAX_NONCE_LEN: usize = 32;

/// Random alphanumeric string of `length` characters, capped at 32
pub fn create_nonce_str(length: usize) -> String {
    let length = length.min(MAX_NONCE_LEN);
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| NONCE_CHARS[rng.gen_range(0..NONCE_CHARS.len())] as char)
        .collect()
}

/// Alphanumeric token of exactly `length` characters from the OS random source
pub fn generate_token(length: usize) -> String {
    Alphanumeric.sample_string(&mut OsRng, length)
}
