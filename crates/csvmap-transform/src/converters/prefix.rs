use chrono::{Datelike, NaiveDateTime, Timelike};
use csvmap_model::{PrefixOptions, PrefixType};

use crate::context::RunContext;

/// Prepend a fixed, random or clock-derived prefix.
///
/// Random prefixes are cached per row index for the lifetime of `context`.
pub fn prefix(
    value: &str,
    options: &PrefixOptions,
    context: &mut RunContext,
    row: Option<usize>,
) -> String {
    let prefix = match options.prefix_type() {
        PrefixType::Fixed => options.fixed_prefix().to_string(),
        PrefixType::Random => context.random_prefix(row, options.random_length()),
        PrefixType::Date => render_clock(options.date_format(), context.now()),
    };
    prefix + value
}

/// Substitute the first `YYYY`, `MM`, `DD`, `HH`, `mm` and `ss` in the template.
pub fn render_clock(template: &str, now: NaiveDateTime) -> String {
    let fields = [
        ("YYYY", now.year().to_string()),
        ("MM", format!("{:02}", now.month())),
        ("DD", format!("{:02}", now.day())),
        ("HH", format!("{:02}", now.hour())),
        ("mm", format!("{:02}", now.minute())),
        ("ss", format!("{:02}", now.second())),
    ];
    fields
        .iter()
        .fold(template.to_string(), |text, (token, field)| {
            text.replacen(token, field, 1)
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_opt(9, 5, 1))
            .expect("valid timestamp")
    }

    #[test]
    fn fixed_prefix_is_prepended() {
        let mut context = RunContext::new();
        let options = PrefixOptions {
            fixed_prefix: Some("ID-".to_string()),
            ..PrefixOptions::default()
        };
        assert_eq!(prefix("001", &options, &mut context, None), "ID-001");
    }

    #[test]
    fn date_prefix_renders_run_clock() {
        let mut context = RunContext::new().with_clock(clock());
        let options = PrefixOptions {
            prefix_type: Some(PrefixType::Date),
            ..PrefixOptions::default()
        };
        assert_eq!(prefix("_x", &options, &mut context, Some(0)), "20240307_x");
        assert_eq!(render_clock("YYYY-MM-DD HH:mm:ss", clock()), "2024-03-07 09:05:01");
    }

    #[test]
    fn random_prefix_uses_default_length() {
        let mut context = RunContext::new().with_seed(1);
        let options = PrefixOptions {
            prefix_type: Some(PrefixType::Random),
            ..PrefixOptions::default()
        };
        let first = prefix("v", &options, &mut context, Some(4));
        assert_eq!(first.chars().count(), 9);
        assert!(first.ends_with('v'));
        assert_eq!(prefix("v", &options, &mut context, Some(4)), first);
    }
}
