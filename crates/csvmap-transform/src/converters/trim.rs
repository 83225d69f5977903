use csvmap_model::{TrimOptions, TrimType};

/// Whitespace plus the byte order mark.
fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub fn trim(value: &str, options: &TrimOptions) -> String {
    match options.trim_type() {
        TrimType::Both => value.trim_matches(is_trimmed),
        TrimType::Start => value.trim_start_matches(is_trimmed),
        TrimType::End => value.trim_end_matches(is_trimmed),
    }
    .to_string()
}
