use crate::args::{Args, Emit};
use clap::Parser;
use eyre::WrapErr;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use pascal_ast_parsing::lexer::{CommentMode, OnLexError};
use pascal_ast_parsing::token_file::write_tokens;
use pascalc::{Compilation, PascalC};
use std::process::ExitCode;
use tracing::{debug, info, trace};

mod args;
mod logging;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::init_logging(args.logging().log_level_filter())?;
    trace!("starting pascalc with args: {args:?}");
    debug!("pascalc version: {}", env!("CARGO_PKG_VERSION"));

    let mut builder = PascalC::builder().lexical_error_policy(OnLexError::Abort);
    if let Some(rules) = &args.rules {
        builder = builder.rule_set(rules);
    }
    if args.skip_comments {
        builder = builder.comment_mode(CommentMode::Skip);
    }
    let pascal_c = builder.build()?;

    let compilation = pascal_c.compile(&args.file)?;
    let rendered = render(&compilation, &args.stages());
    print!("{rendered}");
    if let Some(output) = &args.output {
        std::fs::write(output, &rendered)
            .wrap_err_with(|| format!("could not write output to {output:?}"))?;
        info!("wrote output to {output:?}");
    }

    let analysis = &compilation.analysis;
    for warning in &analysis.warnings {
        eprintln!(
            "{} {warning}",
            "warning:".if_supports_color(Stderr, |text| text.bright_yellow())
        );
    }
    for error in &analysis.errors {
        eprintln!(
            "{} {error}",
            "error:".if_supports_color(Stderr, |text| text.bright_red())
        );
    }
    if analysis.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{} found {} semantic error(s) in {:?}",
            "error:".if_supports_color(Stderr, |text| text.bright_red()),
            analysis.errors.len(),
            args.file
        );
        Ok(ExitCode::FAILURE)
    }
}

/// Renders each requested stage under its own heading
fn render(compilation: &Compilation, stages: &[Emit]) -> String {
    let mut out = String::new();
    for stage in stages {
        let (title, body) = match stage {
            Emit::Tokens => ("TOKENS", write_tokens(&compilation.tokens)),
            Emit::ParseTree => (
                "PARSE TREE",
                compilation.parse_tree.parse_tree().to_string(),
            ),
            Emit::Ast => (
                "DECORATED AST",
                compilation.analysis.program.to_string(),
            ),
            Emit::Symbols => (
                "SYMBOL TABLE",
                compilation.analysis.symbol_table.to_string(),
            ),
            Emit::All => continue,
        };
        out.push_str(&format!("===== {title} =====\n"));
        out.push_str(&body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
