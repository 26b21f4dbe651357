//! Natural ("human") ordering of tag strings
//!
//! A string is scanned into alternating runs of non-digits and ASCII digits. Text runs
//! compare case-insensitively, digit runs compare by numeric value with no width limit,
//! so `v2` < `v10` < `v10.1`.

use std::cmp::Ordering;

/// One run of a scanned string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Non-digit run, lower-cased
    Text(String),
    /// Digit run with leading zeros removed ("0" for an all-zero run)
    Number(String),
}

impl Token {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Token::Number("0".to_string())
        } else {
            Token::Number(trimmed.to_string())
        }
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Token::Text(a), Token::Text(b)) => a.cmp(b),
            (Token::Number(a), Token::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            // The scanner always alternates starting with text, so positions never mix kinds.
            (Token::Number(_), Token::Text(_)) => Ordering::Less,
            (Token::Text(_), Token::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key of a string under natural ordering.
///
/// The token sequence always starts and ends with a (possibly empty) text run, with
/// text and number runs alternating in between.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalSortKey {
    tokens: Vec<Token>,
}

impl NaturalSortKey {
    pub fn new(value: &str) -> Self {
        let mut tokens = Vec::new();
        let mut run = String::new();
        let mut in_digits = false;

        for c in value.chars() {
            if c.is_ascii_digit() != in_digits {
                tokens.push(Self::finish_run(&run, in_digits));
                run.clear();
                in_digits = !in_digits;
            }
            run.push(c);
        }

        tokens.push(Self::finish_run(&run, in_digits));
        if in_digits {
            tokens.push(Token::Text(String::new()));
        }

        NaturalSortKey { tokens }
    }

    fn finish_run(run: &str, digits: bool) -> Token {
        if digits {
            Token::number(run)
        } else {
            Token::Text(run.to_lowercase())
        }
    }

}

/// Compare two strings under natural ordering
pub fn compare(a: &str, b: &str) -> Ordering {
    NaturalSortKey::new(a).cmp(&NaturalSortKey::new(b))
}

/// Sort ascending under natural ordering; equal keys keep their input order
pub fn natural_sort(values: &mut [String]) {
    values.sort_by(|a, b| compare(a, b));
}
