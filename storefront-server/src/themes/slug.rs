//! Theme slug helpers

/// Lower-case and collapse every whitespace run into one `_`
pub fn normalize_slug_input(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_space = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
        } else {
            in_space = false;
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Derive a slug from a display name
///
/// Non-ASCII letters are dropped rather than transliterated, so an all
/// non-Latin name yields an empty slug.
pub fn generate_slug(name: &str) -> String {
    normalize_slug_input(name)
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Dark Premium!"), "dark_premium");
        assert_eq!(generate_slug("  Summer   2024 "), "_summer_2024_");
        assert_eq!(generate_slug("already_snake"), "already_snake");
        assert_eq!(generate_slug(""), "");
    }

    #[test]
    fn test_generate_slug_drops_non_ascii() {
        let slug = generate_slug("Tết Nguyên Đán");
        assert_eq!(slug, "tt_nguyn_n");
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        );
        assert_eq!(generate_slug("秋天"), "");
    }

    #[test]
    fn test_normalize_slug_input_keeps_punctuation() {
        assert_eq!(normalize_slug_input("My Theme-2"), "my_theme-2");
        assert_eq!(normalize_slug_input("A\tB\n C"), "a_b_c");
    }
}
