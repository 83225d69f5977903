//! Template-driven date reformatting.
//!
//! Templates mix the tokens `YYYY`, `MM`, `DD`, `hh`, `mm` and `ss` with
//! literal text. Only the first occurrence of each token is significant.
//! An input template compiles once into an anchored regex plus the order in
//! which its tokens appear; parsing fills a [`DateFields`] record that the
//! output template is rendered from.

use chrono::{Datelike, Months, NaiveDate};
use csvmap_model::DateFormatOptions;
use regex::Regex;

use crate::context::RunContext;
use crate::error::{ConvertError, Result};

/// Replaces a trailing `Z` in the output when the input carries no time.
pub const NO_TIME_ZONE_OFFSET: &str = "+09:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateToken {
    pub const ALL: [DateToken; 6] = [
        DateToken::Year,
        DateToken::Month,
        DateToken::Day,
        DateToken::Hour,
        DateToken::Minute,
        DateToken::Second,
    ];

    pub fn text(self) -> &'static str {
        match self {
            Self::Year => "YYYY",
            Self::Month => "MM",
            Self::Day => "DD",
            Self::Hour => "hh",
            Self::Minute => "mm",
            Self::Second => "ss",
        }
    }

    fn capture(self) -> &'static str {
        match self {
            Self::Year => "([0-9]{1,4})",
            _ => "([0-9]{1,2})",
        }
    }

    fn width(self) -> usize {
        match self {
            Self::Year => 4,
            _ => 2,
        }
    }

    fn is_time(self) -> bool {
        matches!(self, Self::Hour | Self::Minute | Self::Second)
    }
}

/// Parsed date and time fields, zero-padded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFields {
    values: [String; 6],
}

impl Default for DateFields {
    fn default() -> Self {
        Self {
            values: DateToken::ALL.map(|token| "0".repeat(token.width())),
        }
    }
}

impl DateFields {
    pub fn get(&self, token: DateToken) -> &str {
        &self.values[token as usize]
    }

    fn set(&mut self, token: DateToken, raw: &str) {
        self.values[token as usize] = format!("{raw:0>width$}", width = token.width());
    }

    fn number(&self, token: DateToken) -> i64 {
        self.get(token).parse().unwrap_or(0)
    }

    /// Move the date by whole months, clamping the day into the target month.
    pub fn shift_months(&mut self, offset: i32) -> Result<()> {
        let month = self.number(DateToken::Month) + i64::from(offset);
        let year = self.number(DateToken::Year) + (month - 1).div_euclid(12);
        let month = (month - 1).rem_euclid(12) + 1;
        let last_day = last_day_of_month(year, month)
            .ok_or(ConvertError::DateOutOfRange { year, month })?;
        let day = self.number(DateToken::Day).min(last_day);

        self.set(DateToken::Year, &year.to_string());
        self.set(DateToken::Month, &month.to_string());
        self.set(DateToken::Day, &day.to_string());
        Ok(())
    }
}

fn last_day_of_month(year: i64, month: i64) -> Option<i64> {
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        1,
    )?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(i64::from(last.day()))
}

/// A compiled input template.
#[derive(Debug, Clone)]
pub struct DateTemplate {
    source: String,
    regex: Regex,
    order: Vec<DateToken>,
}

impl DateTemplate {
    pub fn compile(source: &str) -> Result<Self> {
        let mut found: Vec<(usize, DateToken)> = DateToken::ALL
            .into_iter()
            .filter_map(|token| source.find(token.text()).map(|position| (position, token)))
            .collect();
        found.sort_by_key(|(position, _)| *position);

        let mut pattern = String::from("^");
        let mut order = Vec::with_capacity(found.len());
        let mut cursor = 0;
        for (position, token) in found {
            if position < cursor {
                continue;
            }
            pattern.push_str(&regex::escape(&source[cursor..position]));
            pattern.push_str(token.capture());
            order.push(token);
            cursor = position + token.text().len();
        }
        pattern.push_str(&regex::escape(&source[cursor..]));
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|error| ConvertError::InvalidPattern {
            pattern: source.to_string(),
            message: error.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
            order,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokens in the order they appear in the template.
    pub fn tokens(&self) -> &[DateToken] {
        &self.order
    }

    pub fn has_time(&self) -> bool {
        self.order.iter().any(|token| token.is_time())
    }

    /// Parse a value; fields the template does not mention stay zero.
    pub fn parse(&self, value: &str) -> Option<DateFields> {
        let captures = self.regex.captures(value)?;
        let mut fields = DateFields::default();
        for (group, token) in self.order.iter().enumerate() {
            if let Some(raw) = captures.get(group + 1) {
                fields.set(*token, raw.as_str());
            }
        }
        Some(fields)
    }

    /// Render fields through an output template.
    pub fn render(&self, output: &str, fields: &DateFields) -> String {
        let mut text = output.to_string();
        if !self.has_time()
            && let Some(stripped) = text.strip_suffix('Z')
        {
            text = format!("{stripped}{NO_TIME_ZONE_OFFSET}");
        }
        DateToken::ALL.iter().fold(text, |text, token| {
            text.replacen(token.text(), fields.get(*token), 1)
        })
    }
}

pub fn try_date_format(
    value: &str,
    options: &DateFormatOptions,
    context: &mut RunContext,
) -> Result<String> {
    if value.is_empty() {
        return Ok(String::new());
    }
    let input = options
        .input_format()
        .ok_or(ConvertError::MissingTemplate { which: "input" })?;
    let output = options
        .output_format()
        .ok_or(ConvertError::MissingTemplate { which: "output" })?;

    let template = context.date_template(input)?;
    let mut fields = template
        .parse(value)
        .ok_or_else(|| ConvertError::TemplateMismatch {
            template: input.to_string(),
        })?;
    let offset = options.offset_months();
    if offset != 0 {
        fields.shift_months(offset)?;
    }
    Ok(template.render(output, &fields))
}

pub fn date_format(value: &str, options: &DateFormatOptions, context: &mut RunContext) -> String {
    try_date_format(value, options, context).unwrap_or_else(|error| error.fallback(value))
}
