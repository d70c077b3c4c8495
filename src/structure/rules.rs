//! Header promotion rules.
//!
//! Extracted policy text has no markup. Each [`HeaderRule`] recognizes one structural pattern
//! and wraps every match in a markdown header line of its level, leaving the matched text in
//! place. Rules run in list order over the output of the previous rule, so a later rule may
//! re-wrap text an earlier one produced; the last rule to touch a span decides its innermost
//! marker.

use regex::{Match, Regex};

use super::error::StructureError;
use super::types::HeaderLevel;

const NUMERALS: &str = "一二三四五六七八九十百零";

/// Minimum run of uppercase Latin letters that disqualifies a bracketed title
/// (product codes printed inside `【】`).
const CODE_RUN_LEN: usize = 5;

/// Extra check run on a candidate match; returning `true` drops the match.
pub type RejectFn = fn(haystack: &str, m: &Match<'_>) -> bool;

/// One `(pattern, level)` promotion rule.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    name: &'static str,
    level: HeaderLevel,
    pattern: Regex,
    reject: Option<RejectFn>,
}

/// A span promoted to a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub level: HeaderLevel,
    /// Matched text with line breaks removed and surrounding whitespace trimmed.
    pub title: String,
}

/// Marked-up text plus the promotions that produced it, in rule then position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotedText {
    pub text: String,
    pub promotions: Vec<Promotion>,
}

impl PromotedText {
    pub fn is_degenerate(&self) -> bool {
        self.promotions.is_empty()
    }
}

impl HeaderRule {
    pub fn new(
        name: &'static str,
        level: HeaderLevel,
        pattern: &str,
    ) -> Result<Self, StructureError> {
        let pattern =
            Regex::new(pattern).map_err(|source| StructureError::InvalidPattern { name, source })?;
        Ok(Self {
            name,
            level,
            pattern,
            reject: None,
        })
    }

    pub fn with_reject(mut self, reject: RejectFn) -> Self {
        self.reject = Some(reject);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn level(&self) -> HeaderLevel {
        self.level
    }

    /// Runs this rule over `text`, appending one [`Promotion`] per accepted match.
    pub fn apply(&self, text: &str, promotions: &mut Vec<Promotion>) -> String {
        let mut out = String::with_capacity(text.len() + 16);
        let mut last = 0;

        for m in self.pattern.find_iter(text) {
            if self.reject.is_some_and(|reject| reject(text, &m)) {
                continue;
            }

            let title = m.as_str().replace('\n', "");
            out.push_str(&text[last..m.start()]);
            out.push('\n');
            out.push_str(self.level.marker());
            out.push(' ');
            out.push_str(&title);
            out.push('\n');

            promotions.push(Promotion {
                level: self.level,
                title: title.trim().to_string(),
            });
            last = m.end();
        }

        out.push_str(&text[last..]);
        out
    }
}

/// Ordered rule list applied left to right.
#[derive(Debug, Clone)]
pub struct HeaderPromoter {
    rules: Vec<HeaderRule>,
}

impl HeaderPromoter {
    pub fn new(rules: Vec<HeaderRule>) -> Self {
        Self { rules }
    }

    /// The four insurance rules, levels 1 through 4:
    ///
    /// 1. `【title】` at the very start of the document,
    /// 2. `第 <n> 條` articles,
    /// 3. `<n>、` enumerations,
    /// 4. `(<n>)` sub-items.
    pub fn insurance() -> Result<Self, StructureError> {
        let bracket_title = HeaderRule::new("bracket title", HeaderLevel::H1, r"^\n?【.*?】\n?")?
            .with_reject(contains_code_run);

        let numeral_run = format!("[{NUMERALS}]+(?:\\s?[{NUMERALS}]+)*");
        let article = HeaderRule::new(
            "article",
            HeaderLevel::H2,
            &format!(r"\n第\s?{numeral_run}\s?條\s|第\s?{numeral_run}\s?條【.*?】"),
        )?;

        let enumeration = HeaderRule::new(
            "enumeration",
            HeaderLevel::H3,
            &format!(r"[{NUMERALS}]+\s?、\s*"),
        )?;

        let sub_item = HeaderRule::new("sub-item", HeaderLevel::H4, &format!(r"\([{NUMERALS}]+\)\s*"))?;

        Ok(Self::new(vec![bracket_title, article, enumeration, sub_item]))
    }

    pub fn rules(&self) -> &[HeaderRule] {
        &self.rules
    }

    pub fn promote(&self, text: &str) -> PromotedText {
        let mut promotions = Vec::new();
        let mut current = text.to_string();
        for rule in &self.rules {
            current = rule.apply(&current, &mut promotions);
        }
        PromotedText {
            text: current,
            promotions,
        }
    }
}

/// Rejects a bracketed title when the rest of its line (from the opening bracket on)
/// holds a run of [`CODE_RUN_LEN`] or more uppercase ASCII letters.
fn contains_code_run(haystack: &str, m: &Match<'_>) -> bool {
    let Some(open) = m.as_str().find('【') else {
        return false;
    };
    let after_open = m.start() + open + '【'.len_utf8();
    let line = haystack[after_open..].split('\n').next().unwrap_or("");
    has_uppercase_run(line, CODE_RUN_LEN)
}

pub(crate) fn has_uppercase_run(text: &str, min_len: usize) -> bool {
    let mut run = 0;
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            run += 1;
            if run >= min_len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
