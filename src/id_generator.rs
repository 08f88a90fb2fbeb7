// Page ID generator - short URL-safe tokens
//
// 12 characters over a 64-symbol alphabet gives 72 bits of randomness,
// enough that collisions are not a practical concern at note-taking volume.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const TOKEN_LEN: usize = 12;

/// Mints page IDs. Stateless per call (thread-local RNG), so it is safe to
/// share one generator across every session without coordination. If the
/// operating system cannot supply entropy the RNG aborts the process; there
/// is no page to return without an ID, so that is the intended outcome.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh URL-safe token.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..TOKEN_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Lowercase variant, used for suggested slugs so page URLs read well.
    pub fn generate_slug(&self) -> String {
        self.generate().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let generator = IdGenerator::new();
        let id = generator.generate();

        assert_eq!(id.len(), TOKEN_LEN);
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_no_collisions_at_volume() {
        let generator = IdGenerator::new();
        let mut seen = HashSet::with_capacity(100_000);

        for _ in 0..100_000 {
            assert!(seen.insert(generator.generate()), "duplicate token");
        }
    }

    #[test]
    fn test_slug_variant_is_lowercase_and_url_safe() {
        let generator = IdGenerator::new();
        let slug = generator.generate_slug();

        assert_eq!(slug, slug.to_lowercase());
        assert!(slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_'));
    }
}
