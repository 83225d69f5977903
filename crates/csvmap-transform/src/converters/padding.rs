use csvmap_model::{PadType, PaddingOptions};

/// Pad to a character length with repeated fill text. Never truncates.
pub fn padding(value: &str, options: &PaddingOptions) -> String {
    let current = value.chars().count();
    let Some(target) = options
        .pad_length()
        .and_then(|length| usize::try_from(length).ok())
        .filter(|&target| target > current)
    else {
        return value.to_string();
    };

    let fill: String = options
        .pad_char()
        .chars()
        .cycle()
        .take(target - current)
        .collect();
    match options.pad_type() {
        PadType::Start => fill + value,
        PadType::End => format!("{value}{fill}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pad_type: PadType, pad_char: &str, pad_length: i64) -> PaddingOptions {
        PaddingOptions {
            pad_type: Some(pad_type),
            pad_char: Some(pad_char.to_string()),
            pad_length: Some(pad_length),
        }
    }

    #[test]
    fn pads_start_and_end() {
        assert_eq!(padding("42", &options(PadType::Start, "0", 5)), "00042");
        assert_eq!(padding("42", &options(PadType::End, "*", 4)), "42**");
    }

    #[test]
    fn never_truncates() {
        assert_eq!(padding("12345", &options(PadType::Start, "0", 3)), "12345");
        assert_eq!(padding("12345", &options(PadType::Start, "0", -1)), "12345");
        assert_eq!(padding("12345", &PaddingOptions::default()), "12345");
    }

    #[test]
    fn multi_character_fill_repeats() {
        assert_eq!(padding("7", &options(PadType::Start, "ab", 4)), "aba7");
    }
}
