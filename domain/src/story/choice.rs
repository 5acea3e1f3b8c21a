//! Player choices and the option set a character offers.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One of the three labelled replies the player can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerChoice {
    A,
    B,
    C,
}

impl PlayerChoice {
    pub const ALL: [PlayerChoice; 3] = [PlayerChoice::A, PlayerChoice::B, PlayerChoice::C];

    pub fn letter(&self) -> char {
        match self {
            PlayerChoice::A => 'A',
            PlayerChoice::B => 'B',
            PlayerChoice::C => 'C',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(PlayerChoice::A),
            'B' => Some(PlayerChoice::B),
            'C' => Some(PlayerChoice::C),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl std::str::FromStr for PlayerChoice {
    type Err = DomainError;

    /// Accepts exactly `A`, `B` or `C`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        }
        .ok_or_else(|| DomainError::InvalidChoice(s.to_string()))
    }
}

/// The three replies extracted from a dialogue response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOptions {
    pub a: String,
    pub b: String,
    pub c: String,
}

impl DialogueOptions {
    pub fn get(&self, choice: PlayerChoice) -> &str {
        match choice {
            PlayerChoice::A => &self.a,
            PlayerChoice::B => &self.b,
            PlayerChoice::C => &self.c,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerChoice, &str)> {
        PlayerChoice::ALL
            .into_iter()
            .map(move |choice| (choice, self.get(choice)))
    }

    pub fn len(&self) -> usize {
        PlayerChoice::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_choices() {
        assert_eq!("A".parse::<PlayerChoice>().unwrap(), PlayerChoice::A);
        assert_eq!("B".parse::<PlayerChoice>().unwrap(), PlayerChoice::B);
        assert_eq!("C".parse::<PlayerChoice>().unwrap(), PlayerChoice::C);
    }

    #[test]
    fn test_parse_rejects_anything_else() {
        for input in ["D", "a", "", "AB", " A"] {
            let err = input.parse::<PlayerChoice>().unwrap_err();
            assert_eq!(err, DomainError::InvalidChoice(input.to_string()));
        }
    }

    #[test]
    fn test_options_iterate_in_letter_order() {
        let options = DialogueOptions {
            a: "go left".to_string(),
            b: "go right".to_string(),
            c: "stay".to_string(),
        };
        let letters: Vec<char> = options.iter().map(|(c, _)| c.letter()).collect();
        assert_eq!(letters, vec!['A', 'B', 'C']);
        assert_eq!(options.get(PlayerChoice::C), "stay");
        assert_eq!(options.len(), 3);
    }
}
