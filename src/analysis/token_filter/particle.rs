//! Particle filter implementation.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::TokenFilter;
//! use wakachi::analysis::token_filter::particle::ParticleFilter;
//!
//! let tokens = vec![
//!     Token::new("私", 0).with_part_of_speech("代名詞"),
//!     Token::new("は", 1).with_part_of_speech("助詞"),
//!     Token::new("学生", 2).with_part_of_speech("名詞"),
//! ];
//!
//! let result = ParticleFilter::new().filter(tokens);
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].surface, "学生");
//! ```

use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;

/// Coarse part-of-speech tag of particles.
pub const PARTICLE_POS: &str = "助詞";

/// A filter that removes particles (`は`, `が`, `を`, ...).
///
/// Tokens are matched on their coarse part of speech, so a particle is removed
/// whatever its surface.
#[derive(Clone, Debug, Default)]
pub struct ParticleFilter;

impl ParticleFilter {
    pub fn new() -> Self {
        ParticleFilter
    }
}

impl TokenFilter for ParticleFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| token.part_of_speech != PARTICLE_POS)
            .collect()
    }

    fn name(&self) -> &'static str {
        "particle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_filter() {
        let tokens = vec![
            Token::new("猫", 0).with_part_of_speech("名詞"),
            Token::new("が", 1).with_part_of_speech("助詞"),
            Token::new("鳴い", 2).with_part_of_speech("動詞"),
            Token::new("た", 4).with_part_of_speech("助動詞"),
        ];

        let result = ParticleFilter::new().filter(tokens);
        let surfaces: Vec<&str> = result.iter().map(|t| t.surface.as_str()).collect();

        assert_eq!(surfaces, vec!["猫", "鳴い", "た"]);
    }

    #[test]
    fn test_particle_filter_keeps_positions() {
        let tokens = vec![
            Token::new("を", 3).with_part_of_speech("助詞"),
            Token::new("本", 4).with_part_of_speech("名詞"),
        ];

        let result = ParticleFilter::new().filter(tokens);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].position, 4);
    }

    #[test]
    fn test_particle_filter_name() {
        assert_eq!(ParticleFilter::new().name(), "particle");
    }
}
