//! Structural validators for agent responses.
//!
//! Each function decides, by pattern alone, whether a free-form response
//! satisfies the format contract of one pipeline stage. They are pure:
//! no I/O, no session state, and they never fail; every outcome is a
//! [`ValidationResult`].
//!
//! | Function | Contract | Extracts |
//! |----------|----------|----------|
//! | [`validate_world_init`] | narrative + numbered character list | [`Cast`] |
//! | [`validate_character_background`] | `Background` and `Personality` present | nothing |
//! | [`validate_character_dialogue`] | options A, B, C, each exactly once | [`DialogueOptions`] |
//! | [`validate_story_continuation`] | paragraphs, quoted dialogue, speech verbs, character list | nothing |
//!
//! Lengths are measured in characters after trimming surrounding whitespace.

use super::validation::{Extracted, ValidationResult};
use crate::story::{Cast, DialogueOptions, PlayerChoice};
use regex::Regex;
use std::sync::LazyLock;

const WORLD_INIT_MIN_LEN: usize = 100;
const BACKGROUND_MIN_LEN: usize = 100;
const DIALOGUE_MIN_LEN: usize = 50;
const CONTINUATION_MIN_LEN: usize = 200;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("valid paragraph regex"));

/// Marker followed somewhere later by a numbered entry.
static CHARACTER_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*{0,2}character list:\*{0,2}[\s\S]*?\d+\.\s*\S")
        .expect("valid character list regex")
});

/// Marker and the block it heads, up to the next blank line or end of text.
static CHARACTER_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\*{0,2}character list:\*{0,2}(.*?)(?:\n[ \t]*\r?\n|\z)")
        .expect("valid character section regex")
});

static CHARACTER_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s*([^\n]+)").expect("valid character entry regex"));

static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*([A-C])\.\s+").expect("valid option regex"));

static QUOTED_DIALOGUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*""#).expect("valid quote regex"));

static SPEECH_ATTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][a-z]+\s+(?:said|replied|asked|shouted|whispered)")
        .expect("valid attribution regex")
});

fn trimmed_len(response: &str) -> usize {
    response.trim().chars().count()
}

/// Number of non-empty blocks separated by blank lines.
fn paragraph_count(response: &str) -> usize {
    PARAGRAPH_BREAK
        .split(response)
        .filter(|block| !block.trim().is_empty())
        .count()
}

/// Names listed under the first `Character List:` marker.
///
/// Each name is cut at its first `(` and trimmed; blank names are skipped.
pub fn extract_character_names(response: &str) -> Vec<String> {
    let Some(section) = CHARACTER_SECTION
        .captures(response)
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };

    CHARACTER_ENTRY
        .captures_iter(section.as_str())
        .filter_map(|caps| {
            let raw = caps.get(1)?.as_str();
            let name = raw.split('(').next().unwrap_or(raw).trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Validate a story opening from the world manager.
pub fn validate_world_init(response: &str) -> ValidationResult {
    if trimmed_len(response) < WORLD_INIT_MIN_LEN {
        return ValidationResult::invalid("Response is too short or empty");
    }

    if paragraph_count(response) < 2 {
        return ValidationResult::invalid("Response does not contain a proper narrative");
    }

    if !CHARACTER_LIST.is_match(response) {
        return ValidationResult::invalid("Response does not contain a Character List");
    }

    let mut names = extract_character_names(response).into_iter();
    match (names.next(), names.next()) {
        (Some(protagonist), Some(counterpart)) => {
            ValidationResult::Valid(Extracted::Cast(Cast::new(protagonist, counterpart)))
        }
        _ => ValidationResult::invalid("Response does not contain at least two character names"),
    }
}

/// Validate a character backstory from the character maker.
pub fn validate_character_background(response: &str) -> ValidationResult {
    if trimmed_len(response) < BACKGROUND_MIN_LEN {
        return ValidationResult::invalid("Character background is too short or empty");
    }

    if !response.contains("Background") {
        return ValidationResult::invalid("Response does not contain a Background section");
    }

    if !response.contains("Personality") {
        return ValidationResult::invalid("Response does not contain a Personality section");
    }

    ValidationResult::valid()
}

/// Validate a character's dialogue turn and extract its three options.
///
/// Options are lines starting with `A.`, `B.` or `C.`; the text before the
/// first marker is narration, not an option. Each letter must appear
/// exactly once.
pub fn validate_character_dialogue(response: &str) -> ValidationResult {
    if trimmed_len(response) < DIALOGUE_MIN_LEN {
        return ValidationResult::invalid("Dialogue response is too short or empty");
    }

    let markers: Vec<(char, usize, usize)> = OPTION_MARKER
        .captures_iter(response)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = caps.get(1)?.as_str().chars().next()?;
            Some((letter, whole.start(), whole.end()))
        })
        .collect();

    let found: Vec<char> = markers.iter().map(|(letter, _, _)| *letter).collect();
    let found_display = format!(
        "{{{}}}",
        found
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut options: [Option<String>; 3] = [None, None, None];
    for (i, (letter, _, text_start)) in markers.iter().enumerate() {
        let text_end = markers
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(response.len());
        let text = response[*text_start..text_end].trim().to_string();

        let Some(choice) = PlayerChoice::from_letter(*letter) else {
            continue;
        };
        let slot = &mut options[choice as usize];
        if slot.is_some() {
            return ValidationResult::invalid(format!(
                "Response contains duplicate options (found {})",
                found_display
            ));
        }
        *slot = Some(text);
    }

    match options {
        [Some(a), Some(b), Some(c)] => {
            ValidationResult::Valid(Extracted::Options(DialogueOptions { a, b, c }))
        }
        _ => ValidationResult::invalid(format!(
            "Response does not contain all required options (found {})",
            found_display
        )),
    }
}

/// Validate a story continuation from the world manager.
pub fn validate_story_continuation(response: &str) -> ValidationResult {
    if trimmed_len(response) < CONTINUATION_MIN_LEN {
        return ValidationResult::invalid("Story continuation is too short or empty");
    }

    if paragraph_count(response) < 3 {
        return ValidationResult::invalid("Story continuation does not have enough paragraphs");
    }

    if !QUOTED_DIALOGUE.is_match(response) {
        return ValidationResult::invalid("Story continuation does not contain any dialogue");
    }

    if !SPEECH_ATTRIBUTION.is_match(response) {
        return ValidationResult::invalid(
            "Story continuation does not show character interactions",
        );
    }

    if !CHARACTER_LIST.is_match(response) {
        return ValidationResult::invalid(
            "Story continuation does not contain an updated Character List",
        );
    }

    ValidationResult::valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = "Once upon a time, in a fog-bound river town, a young archivist named Ami found a letter that should not exist.\n\n\
She followed its directions to the old ferry landing, where a pale figure waited in the lantern light.\n\n\
Character List:\n1. Ami\n2. Qinghe (the ghost)";

    const BACKGROUND: &str = "Background: Qinghe drowned at the ferry landing forty years ago while carrying a letter.\n\n\
Personality: patient, wry, and quietly desperate to finish the errand she started.";

    const DIALOGUE: &str = "Qinghe lifts the lantern and studies you for a long moment.\n\
\"You read my letter,\" she says. \"Then you know what comes next.\"\n\n\
A. **\"I want to help you deliver it.\"**\n\
B. **\"Who was the letter meant for?\"**\n\
C. **\"I should not be here.\"**";

    const CONTINUATION: &str = "The fog thickened as Ami stepped onto the ferry, the boards groaning beneath her boots.\n\n\
\"Hold the rail,\" Qinghe whispered. \"The river remembers everyone who crosses it.\"\n\n\
Ami asked where they were going, but the ghost only pointed toward a light on the far bank.\n\n\
Character List:\n1. Ami\n2. Qinghe\n3. The Ferryman";

    // ==================== World-Init ====================

    #[test]
    fn test_world_init_extracts_two_names() {
        let result = validate_world_init(WORLD);
        let cast = result.into_result().unwrap().into_cast().unwrap();
        assert_eq!(cast.protagonist, "Ami");
        assert_eq!(cast.counterpart, "Qinghe");
    }

    #[test]
    fn test_world_init_is_idempotent() {
        assert_eq!(validate_world_init(WORLD), validate_world_init(WORLD));
    }

    #[test]
    fn test_world_init_keeps_only_first_two_names() {
        let response = WORLD.replace("2. Qinghe (the ghost)", "2. Qinghe\n3. The Ferryman");
        let cast = validate_world_init(&response)
            .into_result()
            .unwrap()
            .into_cast()
            .unwrap();
        assert_eq!(cast.names(), ["Ami", "Qinghe"]);
    }

    #[test]
    fn test_world_init_too_short() {
        let result = validate_world_init("Character List:\n1. Ami\n2. Qinghe");
        assert_eq!(result.reason(), Some("Response is too short or empty"));
    }

    #[test]
    fn test_world_init_whitespace_does_not_count_toward_length() {
        let padded = format!("{}\n\n{}", " ".repeat(200), "Character List:\n1. A\n2. B");
        assert!(!validate_world_init(&padded).is_valid());
    }

    #[test]
    fn test_world_init_requires_paragraphs() {
        let response = "A single unbroken paragraph that goes on and on about a town, a river and a letter. Character List: 1. Ami 2. Qinghe";
        let result = validate_world_init(response);
        assert_eq!(
            result.reason(),
            Some("Response does not contain a proper narrative")
        );
    }

    #[test]
    fn test_world_init_requires_character_list() {
        let response = WORLD.replace("Character List:", "Dramatis personae:");
        let result = validate_world_init(&response);
        assert_eq!(
            result.reason(),
            Some("Response does not contain a Character List")
        );
    }

    #[test]
    fn test_world_init_single_name() {
        let response = WORLD.replace("\n2. Qinghe (the ghost)", "");
        let result = validate_world_init(&response);
        assert!(
            result
                .reason()
                .unwrap()
                .contains("at least two character names")
        );
    }

    #[test]
    fn test_world_init_accepts_emphasis_and_case() {
        let response = WORLD.replace("Character List:", "**CHARACTER LIST:**");
        let cast = validate_world_init(&response)
            .into_result()
            .unwrap()
            .into_cast()
            .unwrap();
        assert_eq!(cast.names(), ["Ami", "Qinghe"]);
    }

    #[test]
    fn test_world_init_list_stops_at_blank_line() {
        let response = WORLD.replace(
            "2. Qinghe (the ghost)",
            "\n\nAn afterword mentions 2. Nobody",
        );
        let result = validate_world_init(&response);
        assert!(!result.is_valid());
    }

    // ==================== Character-Background ====================

    #[test]
    fn test_background_valid() {
        assert_eq!(
            validate_character_background(BACKGROUND),
            ValidationResult::valid()
        );
    }

    #[test]
    fn test_background_too_short() {
        let result = validate_character_background("Background: none. Personality: none.");
        assert_eq!(
            result.reason(),
            Some("Character background is too short or empty")
        );
    }

    #[test]
    fn test_background_missing_sections() {
        let no_background = BACKGROUND.replace("Background", "History");
        assert_eq!(
            validate_character_background(&no_background).reason(),
            Some("Response does not contain a Background section")
        );

        let no_personality = BACKGROUND.replace("Personality", "Temperament");
        assert_eq!(
            validate_character_background(&no_personality).reason(),
            Some("Response does not contain a Personality section")
        );
    }

    // ==================== Character-Dialogue ====================

    #[test]
    fn test_dialogue_extracts_options() {
        let options = validate_character_dialogue(DIALOGUE)
            .into_result()
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(options.a, "**\"I want to help you deliver it.\"**");
        assert_eq!(options.b, "**\"Who was the letter meant for?\"**");
        assert_eq!(options.c, "**\"I should not be here.\"**");
    }

    #[test]
    fn test_dialogue_accepts_any_order() {
        let response = "Qinghe waits by the water, lantern swaying in the wind.\n\
C. Stay silent.\nA. Take the letter.\nB. Ask about the river.";
        let options = validate_character_dialogue(response)
            .into_result()
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options.a, "Take the letter.");
        assert_eq!(options.b, "Ask about the river.");
        assert_eq!(options.c, "Stay silent.");
    }

    #[test]
    fn test_dialogue_missing_option_names_found_keys() {
        let response =
            "Qinghe tilts her head and waits for your answer.\n\nA. \"go left\" \n B. \"go right\"";
        let result = validate_character_dialogue(response);
        let reason = result.reason().unwrap();
        assert!(reason.contains("{A, B}"), "{reason}");
    }

    #[test]
    fn test_dialogue_duplicate_option_is_invalid() {
        let response = "Qinghe tilts her head and waits for your answer.\n\
A. Go left.\nB. Go right.\nA. Go back.\nC. Stay.";
        let result = validate_character_dialogue(response);
        let reason = result.reason().unwrap();
        assert!(reason.contains("duplicate"), "{reason}");
        assert!(reason.contains("{A, B, A, C}"), "{reason}");
    }

    #[test]
    fn test_dialogue_inline_letters_are_not_markers() {
        let response = "Qinghe says you may pick A. or B. or C. but she does not list anything useful here.";
        let result = validate_character_dialogue(response);
        assert!(result.reason().unwrap().contains("found {}"));
    }

    #[test]
    fn test_dialogue_too_short() {
        assert_eq!(
            validate_character_dialogue("A. yes\nB. no\nC. maybe").reason(),
            Some("Dialogue response is too short or empty")
        );
    }

    // ==================== Story-Continuation ====================

    #[test]
    fn test_continuation_valid() {
        assert!(validate_story_continuation(CONTINUATION).is_valid());
    }

    #[test]
    fn test_continuation_too_short() {
        assert_eq!(
            validate_story_continuation("\"Hi,\" Ami said.").reason(),
            Some("Story continuation is too short or empty")
        );
    }

    #[test]
    fn test_continuation_needs_three_paragraphs() {
        let response = CONTINUATION.replacen("\n\n", " ", 2);
        assert_eq!(
            validate_story_continuation(&response).reason(),
            Some("Story continuation does not have enough paragraphs")
        );
    }

    #[test]
    fn test_continuation_needs_dialogue() {
        let response = CONTINUATION.replace('"', "'");
        assert_eq!(
            validate_story_continuation(&response).reason(),
            Some("Story continuation does not contain any dialogue")
        );
    }

    #[test]
    fn test_continuation_needs_interaction() {
        let response = CONTINUATION
            .replace("Qinghe whispered", "came the whisper")
            .replace("Ami asked", "Someone wondered");
        assert_eq!(
            validate_story_continuation(&response).reason(),
            Some("Story continuation does not show character interactions")
        );
    }

    #[test]
    fn test_continuation_needs_character_list() {
        let response = CONTINUATION.replace("Character List:", "Those present:");
        assert_eq!(
            validate_story_continuation(&response).reason(),
            Some("Story continuation does not contain an updated Character List")
        );
    }

    // ==================== Length thresholds ====================

    #[test]
    fn test_every_validator_rejects_below_minimum() {
        let cases: [(fn(&str) -> ValidationResult, usize); 4] = [
            (validate_world_init, WORLD_INIT_MIN_LEN),
            (validate_character_background, BACKGROUND_MIN_LEN),
            (validate_character_dialogue, DIALOGUE_MIN_LEN),
            (validate_story_continuation, CONTINUATION_MIN_LEN),
        ];
        for (validate, min_len) in cases {
            for len in [0, 1, min_len / 2, min_len - 1] {
                let response = format!("  {}  ", "x".repeat(len));
                assert!(!validate(&response).is_valid(), "len {len} of {min_len}");
            }
        }
    }
}
