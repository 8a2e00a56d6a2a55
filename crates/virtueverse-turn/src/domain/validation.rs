//! Language-discipline and tier-escalation rules.
//!
//! Rules run in a fixed order and stop at the first failure. They never touch
//! session state; a rejected turn leaves nothing to roll back.

use virtueverse_core::error::Rejection;

/// Hiragana and katakana.
const KANA: std::ops::RangeInclusive<char> = '\u{3040}'..='\u{30ff}';
/// CJK unified ideographs used for Japanese.
const IDEOGRAPHS: std::ops::RangeInclusive<char> = '\u{4e00}'..='\u{9faf}';

/// True for characters of the dialogue script.
#[must_use]
pub fn is_dialogue_script(c: char) -> bool {
    KANA.contains(&c) || IDEOGRAPHS.contains(&c)
}

/// True for characters of the narration script.
#[must_use]
pub fn is_narration_script(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Narration must not contain any dialogue-script character.
///
/// # Errors
///
/// Returns `Rejection::NarrationScriptLeak` on the first offending character.
pub fn check_narration(narration: &str) -> Result<(), Rejection> {
    if narration.chars().any(is_dialogue_script) {
        return Err(Rejection::NarrationScriptLeak);
    }
    Ok(())
}

/// Dialogue lines must not contain any Latin letter.
///
/// # Errors
///
/// Returns `Rejection::DialogueScriptLeak` on the first offending line.
pub fn check_dialogue<S: AsRef<str>>(lines: &[S]) -> Result<(), Rejection> {
    if lines
        .iter()
        .any(|line| line.as_ref().chars().any(is_narration_script))
    {
        return Err(Rejection::DialogueScriptLeak);
    }
    Ok(())
}

/// The suggested tier must not exceed the stored ceiling.
///
/// # Errors
///
/// Returns `Rejection::TierExceeded` when `suggested > ceiling`.
pub fn check_tier(suggested: i64, ceiling: u32) -> Result<(), Rejection> {
    if suggested > i64::from(ceiling) {
        return Err(Rejection::TierExceeded { suggested, ceiling });
    }
    Ok(())
}

/// Runs every rule in order: narration, dialogue, tier.
///
/// # Errors
///
/// Returns the first `Rejection` encountered.
pub fn validate<S: AsRef<str>>(
    narration: &str,
    dialogue: &[S],
    suggested_tier: i64,
    ceiling: u32,
) -> Result<(), Rejection> {
    check_narration(narration)?;
    check_dialogue(dialogue)?;
    check_tier(suggested_tier, ceiling)
}
