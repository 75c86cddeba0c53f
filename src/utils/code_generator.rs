//! Short code generation.

/// Length of a generated short code in characters.
pub const CODE_LENGTH: usize = 6;

/// Random bytes per code; hex-encoding doubles the length.
const CODE_LENGTH_BYTES: usize = CODE_LENGTH / 2;

/// Generates a random 6-character lowercase hex short code.
///
/// Codes are random, not content-derived: shortening the same URL twice
/// yields different codes. Collisions are possible and are handled by the
/// caller (single attempt, conflict on collision).
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    hex::encode(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_hex_alphabet() {
        let code = generate_code();
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(code, code.to_lowercase());
    }

    #[test]
    fn test_generate_code_is_random() {
        // 100 draws from a 16.7M space; a collision here is a code bug,
        // not bad luck.
        let mut codes = HashSet::new();

        for _ in 0..100 {
            codes.insert(generate_code());
        }

        assert_eq!(codes.len(), 100);
    }
}
