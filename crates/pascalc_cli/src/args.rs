//! the args for running pascalc

use crate::logging::LoggingArgs;
use clap::ValueEnum;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Checks a Pascal-S program and prints its front end stages")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The source file to compile. Files ending in `.txt` are read as token files.
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,
    /// A JSON rule set to lex with instead of the builtin one
    #[clap(long, env = "PASCALC_RULES", value_hint = clap::ValueHint::FilePath)]
    pub rules: Option<PathBuf>,
    /// Which stages to print. Can be given more than once.
    #[clap(long, value_enum, default_values_t = [Emit::Ast, Emit::Symbols])]
    emit: Vec<Emit>,
    /// Drop comments while lexing instead of emitting comment tokens
    #[clap(long)]
    pub skip_comments: bool,
    /// Also write everything printed to this file
    #[clap(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// A stage that can be printed
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, ValueEnum)]
pub enum Emit {
    Tokens,
    ParseTree,
    Ast,
    Symbols,
    /// Every stage
    All,
}

impl Args {
    /// The stages to print, in pipeline order and without repeats
    pub fn stages(&self) -> Vec<Emit> {
        [Emit::Tokens, Emit::ParseTree, Emit::Ast, Emit::Symbols]
            .into_iter()
            .filter(|stage| self.emit.contains(stage) || self.emit.contains(&Emit::All))
            .collect()
    }

    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "pascalc program.pas";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.file, Path::new("program.pas"));
        assert_eq!(args.stages(), [Emit::Ast, Emit::Symbols]);
        assert!(!args.skip_comments);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_emit_parsing() {
        let test = "pascalc program.pas --emit symbols --emit tokens --emit symbols";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.stages(), [Emit::Tokens, Emit::Symbols]);

        let test = "pascalc program.pas --emit all";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.stages().len(), 4);

        let test = "pascalc program.pas --emit parse-tree";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.stages(), [Emit::ParseTree]);
    }

    #[test]
    fn test_options() {
        let test = "pascalc tokens.txt --rules dfa.json --skip-comments -o out.txt";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.rules.as_deref(), Some(Path::new("dfa.json")));
        assert!(args.skip_comments);
        assert_eq!(args.output.as_deref(), Some(Path::new("out.txt")));
    }

    #[test]
    fn test_bad_emit() {
        let test = "pascalc program.pas --emit bytecode";
        assert!(Args::try_parse_from(test.split(" ")).is_err());
    }

    #[test]
    fn test_verbosity_conflicts() {
        let test = "pascalc program.pas -v -q";
        assert!(Args::try_parse_from(test.split(" ")).is_err());
    }
}
