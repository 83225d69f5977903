use csvmap_model::ReplaceOptions;

/// Replace every literal occurrence of the search text.
pub fn replace(value: &str, options: &ReplaceOptions) -> String {
    let search = options.search_value();
    if search.is_empty() {
        return value.to_string();
    }
    value.replace(search, options.replace_value())
}
