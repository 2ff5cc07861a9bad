//! Display-name sanitization and generation.
//!
//! Nicknames come straight from players, so everything outside a small
//! displayable charset is stripped. A name with nothing left after cleaning
//! gets a generated one, so the persisted nickname is never empty.

use std::time::{SystemTime, UNIX_EPOCH};

use shared::api::MAX_NICKNAME_LEN;

const ADJECTIVES: &[&str] = &[
    "Quantum", "Turbo", "Neon", "Cosmic", "Pixel", "Retro", "Atomic", "Hyper", "Mega", "Shadow",
    "Solar", "Crimson", "Electric", "Frozen", "Golden", "Lucky",
];

const NOUNS: &[&str] = &[
    "Pilot", "Falcon", "Wizard", "Racer", "Knight", "Comet", "Viper", "Phoenix", "Ranger",
    "Rocket", "Panther", "Samurai", "Griffin", "Nomad", "Captain", "Maverick",
];

/// Normalize a raw nickname for display.
///
/// Removes every character outside `[A-Za-z0-9 _-]`, collapses whitespace
/// runs to a single space, trims, and truncates to 18 characters. An input
/// with nothing left after cleaning gets a freshly generated name instead.
pub fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    let truncated: String = collapsed.chars().take(MAX_NICKNAME_LEN).collect();
    // Truncation can land on a word boundary and leave a trailing space.
    let result = truncated.trim_end();

    if result.is_empty() {
        generate_nickname(None)
    } else {
        result.to_string()
    }
}

/// Generate an adjective+noun display name.
///
/// A seeded call walks a linear congruential sequence, so the same seed
/// always produces the same name; without a seed the current time picks
/// one. The result is truncated to 18 characters.
pub fn generate_nickname(seed: Option<u64>) -> String {
    let mut state = seed.unwrap_or_else(now_millis) as u32;

    let adjective = ADJECTIVES[lcg_next(&mut state) as usize % ADJECTIVES.len()];
    let noun = NOUNS[lcg_next(&mut state) as usize % NOUNS.len()];

    format!("{adjective}{noun}")
        .chars()
        .take(MAX_NICKNAME_LEN)
        .collect()
}

/// Numerical Recipes LCG step, modulus 2^32.
fn lcg_next(state: &mut u32) -> u32 {
    *state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    *state
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
