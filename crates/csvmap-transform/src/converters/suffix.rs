use csvmap_model::SuffixOptions;

pub fn suffix(value: &str, options: &SuffixOptions) -> String {
    format!("{value}{}", options.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_verbatim() {
        let options = SuffixOptions {
            suffix: Some("様".to_string()),
        };
        assert_eq!(suffix("山田", &options), "山田様");
        assert_eq!(suffix("山田", &SuffixOptions::default()), "山田");
    }
}
