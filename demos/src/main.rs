//! talusc-dump - lexes and parses a source file, then writes its AST as a
//! DOT graph. Thin orchestration only: all the real work happens in
//! `talus-lex`/`talus-par`.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use talus_par::dumper::dump_dot;
use talus_par::Parser;
use talus_util::Handler;

#[derive(ClapParser)]
#[command(name = "talusc-dump", about = "Lex and parse a source file, emitting its AST as a DOT graph")]
struct Cli {
    /// Source file to lex and parse.
    input: PathBuf,

    /// Where to write the DOT graph. Defaults to the input path with a
    /// `.dot` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            tracing::error!(%err, "fatal error");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let source = fs::read_to_string(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;

    let handler = Handler::new();
    let tokens = talus_par::lex_all(&source, &handler);
    let parser = Parser::new(tokens, &source, &handler);
    let ast = parser.parse_unit();

    for diagnostic in handler.diagnostics() {
        for snippet in &diagnostic.snippets {
            eprintln!("{}: {}\n{}", diagnostic.level, diagnostic.message, snippet.format());
        }
        tracing::warn!(?diagnostic, "diagnostic");
    }

    let output_path = cli.output.clone().unwrap_or_else(|| cli.input.with_extension("dot"));
    fs::write(&output_path, dump_dot(&ast)).with_context(|| format!("writing {}", output_path.display()))?;

    tracing::info!(errors = handler.error_count(), warnings = handler.warning_count(), output = %output_path.display(), "wrote AST dump");
    Ok(handler.has_errors())
}
