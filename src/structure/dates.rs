//! Date normalization for finance filings.
//!
//! Filings spell dates with traditional numerals (`一一二年第三季`). The normalizer rewrites
//! year, month, day and quarter expressions to Arabic digits and prefixes years with the era
//! marker, so passages and queries written either way share tokens.
//!
//! # Known limitation
//!
//! Numerals are converted digit by digit after dropping every `十`. `十二月` becomes `2月`
//! and `十月` becomes `月`.

use regex::{Captures, Regex};

use super::error::StructureError;
use crate::constants::YEAR_ERA_PREFIX;

const TEN: char = '十';

const YEAR_PATTERN: &str = "([一二三四五六七八九○]+)年";
const MONTH_PATTERN: &str = "([一二三四五六七八九十]+)月";
const DAY_PATTERN: &str = "([一二三四五六七八九十]+)日";
const QUARTER_PATTERN: &str = "([一二三四]+)季";

/// Maps one traditional numeral to its Arabic digit.
fn numeral_digit(c: char) -> Option<char> {
    match c {
        '○' => Some('0'),
        '一' => Some('1'),
        '二' => Some('2'),
        '三' => Some('3'),
        '四' => Some('4'),
        '五' => Some('5'),
        '六' => Some('6'),
        '七' => Some('7'),
        '八' => Some('8'),
        '九' => Some('9'),
        _ => None,
    }
}

/// Drops `十` and substitutes each remaining numeral independently.
pub fn numerals_to_digits(numerals: &str) -> String {
    numerals
        .chars()
        .filter(|c| *c != TEN)
        .map(|c| numeral_digit(c).unwrap_or(c))
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum DateUnit {
    Year,
    Month,
    Day,
    Quarter,
}

impl DateUnit {
    fn suffix(self) -> &'static str {
        match self {
            DateUnit::Year => "年",
            DateUnit::Month => "月",
            DateUnit::Day => "日",
            DateUnit::Quarter => "季",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            DateUnit::Year => YEAR_ERA_PREFIX,
            DateUnit::Month | DateUnit::Day | DateUnit::Quarter => "",
        }
    }
}

/// Compiled date substitution passes, applied year, month, day, quarter.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    passes: Vec<(DateUnit, Regex)>,
}

impl DateNormalizer {
    pub fn new() -> Result<Self, StructureError> {
        let specs = [
            (DateUnit::Year, "year", YEAR_PATTERN),
            (DateUnit::Month, "month", MONTH_PATTERN),
            (DateUnit::Day, "day", DAY_PATTERN),
            (DateUnit::Quarter, "quarter", QUARTER_PATTERN),
        ];

        let passes = specs
            .into_iter()
            .map(|(unit, name, pattern)| {
                Regex::new(pattern)
                    .map(|re| (unit, re))
                    .map_err(|source| StructureError::InvalidPattern { name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { passes })
    }

    /// Rewrites every recognized date expression; other text is left as-is.
    pub fn normalize_dates(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (unit, pattern) in &self.passes {
            let unit = *unit;
            out = pattern
                .replace_all(&out, |caps: &Captures<'_>| {
                    format!(
                        "{}{}{}",
                        unit.prefix(),
                        numerals_to_digits(&caps[1]),
                        unit.suffix()
                    )
                })
                .into_owned();
        }
        out
    }
}
