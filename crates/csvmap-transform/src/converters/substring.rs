use csvmap_model::SubstringOptions;

/// Character range `[start, end)`.
///
/// Bounds are clamped into `0..=len`, and a start past the end swaps the two.
pub fn substring(value: &str, options: &SubstringOptions) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len() as i64;
    let clamp = |bound: i64| bound.clamp(0, len) as usize;

    let start = clamp(options.start());
    let end = options.end().map_or(chars.len(), clamp);
    let (from, to) = if start > end { (end, start) } else { (start, end) };
    chars[from..to].iter().collect()
}
