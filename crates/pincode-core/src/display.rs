//! Derivation of the visible entry text

/// Character shown in place of each entered character when masking is on
pub const MASK_CHAR: char = '*';

/// Text to show for `entry`
///
/// Masked output has exactly one mask character per entry character.
pub fn render_entry(entry: &str, masked: bool) -> String {
    if masked {
        entry.chars().map(|_| MASK_CHAR).collect()
    } else {
        entry.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        assert_eq!(render_entry("1234", false), "1234");
        assert_eq!(render_entry("", false), "");
    }

    #[test]
    fn test_masked_length_matches() {
        assert_eq!(render_entry("1234", true), "****");
        assert_eq!(render_entry("", true), "");
        // multi-byte characters still produce one mask each
        assert_eq!(render_entry("é9", true), "**");
    }
}
