//! Playback timestamp parsing.
//!
//! Converts display strings like `1:02:03`, `02:03` or `5` (components
//! optional from the left) into a second count.

/// Parses a colon-delimited timestamp into whole seconds.
///
/// Components are read right-to-left as seconds, minutes, hours; anything
/// left of hours is ignored. Each component is parsed by leading-digit
/// truncation (`"12abc"` -> 12); a component with no leading digits counts
/// as zero rather than failing the whole parse. Empty input yields 0.
pub fn to_seconds(text: &str) -> u64 {
    const MULTIPLIERS: [u64; 3] = [1, 60, 3600];

    text.split(':')
        .rev()
        .take(MULTIPLIERS.len())
        .zip(MULTIPLIERS)
        .map(|(part, mult)| leading_int(part) * mult)
        .sum()
}

/// Base-10 value of the leading digit run, 0 when there is none.
fn leading_int(part: &str) -> u64 {
    let digits: &str = {
        let trimmed = part.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    digits.parse().unwrap_or(0)
}
