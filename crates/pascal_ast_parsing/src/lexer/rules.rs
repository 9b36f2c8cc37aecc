//! The automaton a [Lexer](super::Lexer) runs, loaded from a JSON rule file

use crate::lexer::pattern::{InvalidPattern, Pattern};
use indexmap::IndexMap;
use log::{debug, warn};
use pascal_ast::token::TokenKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const BUILTIN_RULES: &str = include_str!("../../rules/dfa_rules.json");

/// The rule file as written on disk
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(rename = "Start_state")]
    start_state: String,
    #[serde(rename = "Final_states")]
    final_states: Vec<String>,
    #[serde(rename = "Transitions")]
    transitions: Vec<(String, String, String)>,
    #[serde(rename = "Token_mapping")]
    token_mapping: IndexMap<String, String>,
    #[serde(rename = "Error_states", default)]
    error_states: IndexMap<String, String>,
}

/// An automaton state
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StateId(usize);

#[derive(Debug)]
struct State {
    name: String,
    accepts: Option<TokenKind>,
    error: Option<String>,
    transitions: Vec<(Pattern, StateId)>,
}

/// A loaded, validated and immutable automaton description.
///
/// Transitions out of a state keep their file order, the first one whose pattern matches wins.
#[derive(Debug)]
pub struct RuleSet {
    states: Vec<State>,
    start: StateId,
}

impl RuleSet {
    /// The rule set shipped with this crate
    pub fn builtin() -> Result<Self, RuleSetError> {
        Self::from_json(BUILTIN_RULES)
    }

    /// Loads a rule set from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loading rule set from {path:?}");
        Self::from_json(&text)
    }

    /// Loads a rule set from JSON text
    pub fn from_json(json: &str) -> Result<Self, RuleSetError> {
        let file: RuleFile = serde_json::from_str(json)?;
        Self::from_rule_file(file)
    }

    fn from_rule_file(file: RuleFile) -> Result<Self, RuleSetError> {
        let mut builder = Builder::default();
        let start = builder.intern(&file.start_state);

        for (source, pattern, destination) in &file.transitions {
            let pattern = Pattern::from_str(pattern)?;
            let source = builder.intern(source);
            let destination = builder.intern(destination);
            builder.states[source.0].transitions.push((pattern, destination));
        }

        for final_state in &file.final_states {
            let kind = file
                .token_mapping
                .get(final_state)
                .ok_or_else(|| RuleSetError::MissingTokenMapping(final_state.clone()))?;
            let kind = TokenKind::from_str(kind).map_err(|_| RuleSetError::UnknownTokenKind {
                state: final_state.clone(),
                kind: kind.clone(),
            })?;
            let id = builder.intern(final_state);
            builder.states[id.0].accepts = Some(kind);
        }
        for state in file.token_mapping.keys() {
            if !file.final_states.contains(state) {
                warn!("token mapping for {state:?} is unused, it is not a final state");
            }
        }

        for (state, message) in file.error_states {
            let id = builder.intern(&state);
            builder.states[id.0].error = Some(message);
        }

        debug!(
            "rule set has {} states and {} transitions",
            builder.states.len(),
            file.transitions.len()
        );
        Ok(Self {
            states: builder.states,
            start,
        })
    }

    /// The state every token starts in
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The state reached from `state` on `c`, if any transition applies
    pub fn transition(&self, state: StateId, c: char) -> Option<StateId> {
        self.states[state.0]
            .transitions
            .iter()
            .find(|(pattern, _)| pattern.matches(c))
            .map(|(_, destination)| *destination)
    }

    /// The token kind a final state accepts, or `None` if the state isn't final
    pub fn accepts(&self, state: StateId) -> Option<TokenKind> {
        self.states[state.0].accepts
    }

    /// The diagnostic for stopping in this state, if it's an error state
    pub fn error_message(&self, state: StateId) -> Option<&str> {
        self.states[state.0].error.as_deref()
    }

    pub fn state_name(&self, state: StateId) -> &str {
        &self.states[state.0].name
    }

    /// Finds a state by its name in the rule file
    pub fn state(&self, name: &str) -> Option<StateId> {
        self.states.iter().position(|s| s.name == name).map(StateId)
    }
}

#[derive(Default)]
struct Builder {
    states: Vec<State>,
    ids: HashMap<String, StateId>,
}

impl Builder {
    fn intern(&mut self, name: &str) -> StateId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = StateId(self.states.len());
        self.states.push(State {
            name: name.to_string(),
            accepts: None,
            error: None,
            transitions: vec![],
        });
        self.ids.insert(name.to_string(), id);
        id
    }
}

/// An error loading a rule set
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("could not read rule file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed rule file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Pattern(#[from] InvalidPattern),
    #[error("final state {0:?} has no token mapping")]
    MissingTokenMapping(String),
    #[error("state {state:?} maps to unknown token kind {kind:?}")]
    UnknownTokenKind { state: String, kind: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "Start_state": "START",
                "Final_states": ["SEMI"],
                "Transitions": [["START", ";", "SEMI"]],
                "Token_mapping": {{"SEMI": "SEMICOLON"}}
            }}"#
        )
        .unwrap();
        let rules = RuleSet::from_path(file.path()).unwrap();
        let semi = rules.transition(rules.start(), ';').unwrap();
        assert_eq!(rules.accepts(semi), Some(TokenKind::Semicolon));

        let missing = RuleSet::from_path(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(missing, RuleSetError::Io { .. }));
    }

    #[test]
    fn builtin_rules_load() {
        let rules = RuleSet::builtin().expect("builtin rules should be valid");
        let start = rules.start();
        let ident = rules.transition(start, 'x').unwrap();
        assert_eq!(rules.state_name(ident), "IDENTIFIER");
        assert_eq!(rules.accepts(ident), Some(TokenKind::Identifier));
        assert!(rules.transition(start, '@').is_none());
        let apostrophe = rules.state("APOSTROPHE").unwrap();
        assert_eq!(rules.error_message(apostrophe), Some("String not closed"));
    }

    #[test]
    fn first_transition_wins() {
        let rules = RuleSet::from_json(
            r#"{
                "Start_state": "S",
                "Final_states": ["A", "B"],
                "Transitions": [["S", "a..z", "A"], ["S", "x", "B"]],
                "Token_mapping": {"A": "IDENTIFIER", "B": "NUMBER"}
            }"#,
        )
        .unwrap();
        let next = rules.transition(rules.start(), 'x').unwrap();
        assert_eq!(rules.state_name(next), "A");
    }

    #[test]
    fn final_state_needs_mapping() {
        let result = RuleSet::from_json(
            r#"{
                "Start_state": "S",
                "Final_states": ["A"],
                "Transitions": [["S", "a", "A"]],
                "Token_mapping": {}
            }"#,
        );
        assert!(matches!(result, Err(RuleSetError::MissingTokenMapping(s)) if s == "A"));
    }

    #[test]
    fn mapping_must_be_a_token_kind() {
        let result = RuleSet::from_json(
            r#"{
                "Start_state": "S",
                "Final_states": ["A"],
                "Transitions": [["S", "a", "A"]],
                "Token_mapping": {"A": "WIDGET"}
            }"#,
        );
        assert!(matches!(result, Err(RuleSetError::UnknownTokenKind { kind, .. }) if kind == "WIDGET"));
    }

    #[test]
    fn missing_file() {
        let result = RuleSet::from_path("/definitely/not/here.json");
        assert!(matches!(result, Err(RuleSetError::Io { .. })));
    }
}
