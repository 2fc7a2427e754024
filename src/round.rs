//! Word rounds: picking the next word and matching typed input against it.

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("no words available to draw from")]
pub struct EmptyPoolError;

/// Advance the LCG in `seed` and return the high bits.
pub fn next_rand(seed: &mut u64) -> u32 {
    *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    (*seed >> 32) as u32
}

pub fn draw_word(pool: &[String], seed: &mut u64) -> Result<String, EmptyPoolError> {
    if pool.is_empty() {
        return Err(EmptyPoolError);
    }
    let index = next_rand(seed) as usize % pool.len();
    Ok(pool[index].clone())
}

/// The string a player has to type for `word`.
///
/// Only the first space is dropped: "ice beam" becomes "icebeam" but
/// "will o wisp" becomes "willo wisp".
pub fn comparison_target(word: &str) -> String {
    word.to_lowercase().replacen(' ', "", 1)
}

pub fn check_input(buffer: &str, target: &str) -> bool {
    buffer.to_lowercase() == comparison_target(target)
}
