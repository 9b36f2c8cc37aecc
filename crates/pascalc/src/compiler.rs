//! Responsible with compiling Pascal-S units into decorated abstract syntax trees

use pascal_ast::token::Token;
use pascal_ast_parsing::lexer::{
    tokenize_with, CommentMode, LexerOptions, OnLexError, RuleSet, RuleSetError,
};
use pascal_ast_parsing::parser::transforms::to_ast;
use pascal_ast_parsing::parser::{parse, syntax_tree};
use pascal_ast_parsing::token_file::{is_token_file, read_tokens};
use passes::semantic_analysis::{analyze, Analysis};
use prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error_span, info, instrument};

pub mod error;
pub mod passes;
pub mod source;

/// Prelude that can be used in inner modules.
mod prelude {
    use super::*;
    pub use error::{PascalCError, PascalCErrorKind, PascalCResult};
}

/// What a compilation starts from
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum UnitInput {
    /// Source text, which gets lexed
    Source(String),
    /// An already lexed token stream
    Tokens(Vec<Token>),
}

/// Everything produced while compiling one unit
#[derive(Debug)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub parse_tree: syntax_tree::Program,
    pub analysis: Analysis,
}

impl Compilation {
    /// Fails with every semantic error that analysis found
    pub fn check(&self) -> PascalCResult<()> {
        if self.analysis.errors.is_empty() {
            return Ok(());
        }
        Err(PascalCErrorKind::from(
            self.analysis
                .errors
                .iter()
                .cloned()
                .map(PascalCError::from)
                .collect::<Vec<_>>(),
        )
        .into())
    }
}

/// Responsible with compiling Pascal-S units.
///
/// Must be configured using a [PascalCBuilder].
#[derive(Debug)]
pub struct PascalC {
    rules: RuleSet,
    options: LexerOptions,
}

impl PascalC {
    /// Creates the default PascalCBuilder
    #[inline]
    pub fn builder() -> PascalCBuilder {
        PascalCBuilder::new()
    }

    /// Compile a file at a given path.
    ///
    /// Token files are read as they are, anything else is decoded and lexed.
    #[instrument(skip(self))]
    pub fn compile(&self, path: &Path) -> PascalCResult<Compilation> {
        let text = source::read_source(path)?;
        let input = if is_token_file(path) {
            let tokens = error_span!("read_tokens")
                .in_scope(|| read_tokens(&text))
                .map_err(|e| PascalCError::new(e, Some(path.to_path_buf())))?;
            UnitInput::Tokens(tokens)
        } else {
            UnitInput::Source(text)
        };
        self.compile_unit(input).map_err(|e| e.with_path(path))
    }

    /// Compile source text
    #[inline]
    pub fn compile_source(&self, source: &str) -> PascalCResult<Compilation> {
        self.compile_unit(source.to_string())
    }

    /// Runs every stage after lexing, stopping at the first lexical or syntax error
    pub fn compile_unit(&self, input: impl Into<UnitInput>) -> PascalCResult<Compilation> {
        let tokens = match input.into() {
            UnitInput::Source(text) => self.lex(&text)?,
            UnitInput::Tokens(tokens) => tokens,
        };
        let parse_tree = error_span!("parse").in_scope(|| parse(&tokens))?;
        debug!("parsed {} tokens into a parse tree", tokens.len());
        let program = error_span!("build_ast").in_scope(|| to_ast(&parse_tree))?;
        let analysis = analyze(program);
        info!(
            tokens = tokens.len(),
            errors = analysis.errors.len(),
            "compiled {}",
            analysis.program.name
        );
        Ok(Compilation {
            tokens,
            parse_tree,
            analysis,
        })
    }

    /// Lexes text with this compiler's rule set and options
    pub fn lex(&self, text: &str) -> PascalCResult<Vec<Token>> {
        Ok(error_span!("lex").in_scope(|| tokenize_with(text, &self.rules, self.options))?)
    }
}

/// Builder for creating a [PascalC] instance.
#[derive(Debug, Default)]
pub struct PascalCBuilder {
    /// A rule set file to lex with instead of the builtin rules
    pub rule_set: Option<PathBuf>,
    pub comment_mode: CommentMode,
    pub on_lex_error: OnLexError,
}

impl PascalCBuilder {
    /// Creates a PascalCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the JSON rule set file used for lexing
    pub fn rule_set<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.rule_set = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn comment_mode(mut self, mode: CommentMode) -> Self {
        self.comment_mode = mode;
        self
    }

    /// Sets what lexing does after the first lexical error
    pub fn lexical_error_policy(mut self, policy: OnLexError) -> Self {
        self.on_lex_error = policy;
        self
    }

    /// Builds a [PascalC] instance from this builder
    pub fn build(self) -> Result<PascalC, BuildPascalCError> {
        let rules = match self.rule_set {
            Some(path) => {
                let meta = std::fs::metadata(&path)
                    .map_err(|e| BuildPascalCError::RuleSetDoesNotExist(path.clone(), e))?;
                if !meta.is_file() {
                    return Err(BuildPascalCError::RuleSetIsNotAFile(path));
                }
                RuleSet::from_path(&path)?
            }
            None => RuleSet::builtin()?,
        };
        Ok(PascalC {
            rules,
            options: LexerOptions {
                comment_mode: self.comment_mode,
                on_error: self.on_lex_error,
            },
        })
    }
}

/// An error occurred while building a [PascalC] instance
#[derive(Debug, Error)]
pub enum BuildPascalCError {
    #[error("{0:?} does not exist: {1}")]
    RuleSetDoesNotExist(PathBuf, io::Error),
    #[error("{0:?} is not a file")]
    RuleSetIsNotAFile(PathBuf),
    #[error(transparent)]
    RuleSet(#[from] RuleSetError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pascal_ast::token::TokenKind;
    use test_log::test;

    #[test]
    fn builder_defaults_to_builtin_rules() {
        let compiler = PascalC::builder().build().expect("builtin rules load");
        assert_eq!(compiler.options, LexerOptions::default());
    }

    #[test]
    fn missing_rule_set() {
        let dir = tempfile::tempdir().unwrap();
        let error = PascalC::builder()
            .rule_set(dir.path().join("rules.json"))
            .build()
            .unwrap_err();
        assert!(matches!(error, BuildPascalCError::RuleSetDoesNotExist(..)));
        let error = PascalC::builder().rule_set(dir.path()).build().unwrap_err();
        assert!(matches!(error, BuildPascalCError::RuleSetIsNotAFile(..)));
    }

    #[test]
    fn skipped_comments_never_reach_the_parser() {
        let compiler = PascalC::builder()
            .comment_mode(CommentMode::Skip)
            .build()
            .unwrap();
        let compilation = compiler
            .compile_source("program p; { kosong } mulai selesai.")
            .unwrap();
        assert!(compilation.tokens.iter().all(|t| !t.kind().is_trivia()));
        assert_eq!(compilation.tokens[3].kind(), TokenKind::Keyword);
    }

    #[test]
    fn tokens_skip_lexing() {
        let compiler = PascalC::builder().build().unwrap();
        let tokens = compiler.lex("program p; mulai selesai.").unwrap();
        let compilation = compiler.compile_unit(tokens.clone()).unwrap();
        assert_eq!(compilation.tokens, tokens);
        compilation.check().unwrap();
    }

    #[test]
    fn check_collects_semantic_errors() {
        let compiler = PascalC::builder().build().unwrap();
        let compilation = compiler
            .compile_source("program p; mulai x := 1; y := 2 selesai.")
            .unwrap();
        let error = compilation.check().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Undeclared variable 'x'\nUndeclared variable 'y'"
        );
    }
}
