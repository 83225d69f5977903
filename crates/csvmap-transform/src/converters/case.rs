use csvmap_model::{CaseOptions, CaseType};

pub fn case(value: &str, options: &CaseOptions) -> String {
    match options.case_type() {
        CaseType::Upper => value.to_uppercase(),
        CaseType::Lower => value.to_lowercase(),
        CaseType::Capitalize => capitalize(value),
    }
}

/// Title-case each whitespace-separated word and rejoin with single spaces.
///
/// Leading or trailing whitespace leaves an empty word, so it collapses to
/// one space rather than disappearing.
fn capitalize(value: &str) -> String {
    whitespace_words(value)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut word: String = first.to_uppercase().collect();
                    word.push_str(&chars.as_str().to_lowercase());
                    word
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn whitespace_words(value: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = Some(0);
    for (position, ch) in value.char_indices() {
        if ch.is_whitespace() {
            if let Some(word_start) = start.take() {
                words.push(&value[word_start..position]);
            }
        } else if start.is_none() {
            start = Some(position);
        }
    }
    words.push(start.map_or("", |word_start| &value[word_start..]));
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(case_type: CaseType) -> CaseOptions {
        CaseOptions {
            case_type: Some(case_type),
        }
    }

    #[test]
    fn defaults_to_upper() {
        assert_eq!(case("Hello", &CaseOptions::default()), "HELLO");
        assert_eq!(case("Hello", &options(CaseType::Lower)), "hello");
    }

    #[test]
    fn capitalize_normalizes_words() {
        assert_eq!(
            case("hELLO   wORLD", &options(CaseType::Capitalize)),
            "Hello World"
        );
        assert_eq!(case(" hi", &options(CaseType::Capitalize)), " Hi");
        assert_eq!(case("", &options(CaseType::Capitalize)), "");
    }

    #[test]
    fn words_split_on_whitespace_runs() {
        assert_eq!(whitespace_words("a  b"), vec!["a", "b"]);
        assert_eq!(whitespace_words(" a "), vec!["", "a", ""]);
        assert_eq!(whitespace_words(""), vec![""]);
    }
}
