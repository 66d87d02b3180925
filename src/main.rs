use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tpp_sema::{
    errors::errors::{Error, ErrorImpl},
    format_error, parse_source,
    pruner::prune,
    semantic::{analyze_with, AnalysisOptions},
    Position,
};
use tracing_subscriber::EnvFilter;

/// Semantic analyzer and tree pruner for T++ programs
#[derive(Parser, Debug)]
#[command(name = "tpp-sema", version)]
struct Cli {
    /// T++ source file
    file: Option<PathBuf>,

    /// Stop the analysis after a missing `principal`
    #[arg(long)]
    halt_on_missing_main: bool,

    /// Print the symbol table
    #[arg(long)]
    print_table: bool,

    /// Print the tree after pruning, or the parse tree with --no-prune
    #[arg(long)]
    print_tree: bool,

    /// Skip the pruning pass
    #[arg(long)]
    no_prune: bool,
}

fn main() -> ExitCode {
    if let Ok(filter) = EnvFilter::try_from_env("TPP_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

/// Checks the source argument, returning the file to analyze.
fn source_path(cli: &Cli) -> Result<PathBuf, Error> {
    let Some(path) = cli.file.clone() else {
        return Err(Error::new(ErrorImpl::MissingSourceArgument, Position::null()));
    };
    let display = path.to_string_lossy().to_string();

    if path.extension().and_then(|extension| extension.to_str()) != Some("tpp") {
        return Err(Error::new(ErrorImpl::NotTppFile { path: display }, Position::null()));
    }
    if !path.exists() {
        return Err(Error::new(ErrorImpl::FileNotFound { path: display }, Position::null()));
    }

    Ok(path)
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let path = match source_path(cli) {
        Ok(path) => path,
        Err(error) => {
            eprint!("{}", format_error(&error, ""));
            return Ok(ExitCode::FAILURE);
        }
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let content = read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut tree = match parse_source(&content, &file_name) {
        Ok(tree) => tree,
        Err(error) => {
            eprint!("{}", format_error(&error, &content));
            return Ok(ExitCode::FAILURE);
        }
    };

    let options = AnalysisOptions {
        halt_on_missing_main: cli.halt_on_missing_main,
    };
    let analysis = analyze_with(&tree, options);

    for diagnostic in analysis.diagnostics.iter() {
        println!("{}", diagnostic);
    }
    if cli.print_table {
        print!("{}", analysis.table.render());
    }

    if !cli.no_prune {
        prune(&mut tree).context("pruning failed")?;
    }
    if cli.print_tree {
        print!("{}", tree.render());
    }

    if analysis.has_fatal() || analysis.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
