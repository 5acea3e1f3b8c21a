//! Response validation domain.
//!
//! Free-form text from a completion provider only moves the story forward
//! once it passes the structural validator for its [`ResponseKind`].

pub mod kind;
pub mod parsing;
pub mod validation;

pub use kind::ResponseKind;
pub use parsing::{
    extract_character_names, validate_character_background, validate_character_dialogue,
    validate_story_continuation, validate_world_init,
};
pub use validation::{Extracted, ValidationResult};
