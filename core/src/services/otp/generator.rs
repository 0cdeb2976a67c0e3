//! Numeric code generation

use rand::Rng;

/// Generate a code of `length` digits using the thread-local RNG
///
/// Each digit is drawn independently and uniformly from 0-9; leading zeros
/// are kept.
pub fn generate_code(length: usize) -> String {
    generate_code_with(&mut rand::thread_rng(), length)
}

/// Generate a code from a caller-supplied RNG (seedable in tests)
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
