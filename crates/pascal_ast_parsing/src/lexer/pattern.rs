//! Character class patterns used on automaton transitions

use std::str::FromStr;

const ALL_EXCEPT: &str = "ALL_EXCEPT ";

/// A compiled transition pattern. Matching is a pure function of one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Exactly one character
    Literal(char),
    /// Any of the listed characters or inclusive ranges
    Alternation(Vec<CharClass>),
    /// Any character not in the list
    AllExcept(Vec<char>),
}

/// One arm of an alternation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharClass {
    Char(char),
    Range(char, char),
}

impl Pattern {
    /// Checks whether the character matches this pattern
    pub fn matches(&self, c: char) -> bool {
        match self {
            Pattern::Literal(l) => *l == c,
            Pattern::Alternation(classes) => classes.iter().any(|class| match class {
                CharClass::Char(l) => *l == c,
                CharClass::Range(lo, hi) => (*lo..=*hi).contains(&c),
            }),
            Pattern::AllExcept(excluded) => !excluded.contains(&c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pattern {pattern:?}: {reason}")]
pub struct InvalidPattern {
    pub pattern: String,
    pub reason: &'static str,
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl FromStr for Pattern {
    type Err = InvalidPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidPattern {
            pattern: s.to_string(),
            reason,
        };

        if let Some(excluded) = s.strip_prefix(ALL_EXCEPT) {
            if excluded.is_empty() {
                return Err(invalid("nothing to exclude"));
            }
            // a lone excluded character may itself be a comma or space
            if let Some(c) = single_char(excluded) {
                return Ok(Pattern::AllExcept(vec![c]));
            }
            return excluded
                .split(", ")
                .map(|part| single_char(part).ok_or_else(|| invalid("excluded items must be single characters")))
                .collect::<Result<Vec<_>, _>>()
                .map(Pattern::AllExcept);
        }

        if let Some(c) = single_char(s) {
            return Ok(Pattern::Literal(c));
        }

        let mut classes = vec![];
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid("empty alternative"));
            }
            match part.split_once("..") {
                Some((lo, hi)) if !lo.is_empty() && !hi.is_empty() => {
                    let (lo, hi) = single_char(lo)
                        .zip(single_char(hi))
                        .ok_or_else(|| invalid("range ends must be single characters"))?;
                    classes.push(CharClass::Range(lo, hi));
                }
                _ => {
                    let c = single_char(part).ok_or_else(|| invalid("alternatives must be single characters"))?;
                    classes.push(CharClass::Char(c));
                }
            }
        }
        Ok(Pattern::Alternation(classes))
    }
}
