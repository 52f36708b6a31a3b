//! `cdsn`: CLI driver for the CDSN grammar notation library.
//!
//! File loading and diagnostics printing live here; all actual processing
//! is in cdsn-core.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use cdsn_core::{
    format_syntax, format_token, parse_source, scan_raw, validate, Defect, Severity, SyntaxError,
    TokenKind,
};

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// CDSN grammar notation toolchain.
#[derive(Parser)]
#[command(name = "cdsn", version, about = "CDSN grammar notation toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a .cdsn file, listing every defect
    Check {
        /// Path to the .cdsn source file
        file: PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Reprint a .cdsn file in canonical form
    Fmt {
        /// Path to the .cdsn source file
        file: PathBuf,
        /// Rewrite the file in place instead of printing to stdout
        #[arg(long)]
        write: bool,
    },

    /// Dump the token sequence of a .cdsn file for diagnostics
    Tokens {
        /// Path to the .cdsn source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, strict } => cmd_check(&file, strict, cli.output, cli.quiet),
        Commands::Fmt { file, write } => cmd_fmt(&file, write, cli.output),
        Commands::Tokens { file } => cmd_tokens(&file, cli.output),
    }
}

fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn report_syntax_error(path: &Path, err: &SyntaxError, output: OutputFormat) -> ! {
    match output {
        OutputFormat::Text => {
            eprintln!("{}:{}", path.display(), err);
            if !err.expected.is_empty() {
                eprintln!("  expected: {}", err.expected.join(", "));
            }
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({ "syntax_error": err });
            eprintln!("{}", payload);
        }
    }
    process::exit(1);
}

fn cmd_check(path: &Path, strict: bool, output: OutputFormat, quiet: bool) {
    let source = read_source(path);
    let syntax = match parse_source(&source) {
        Ok(syntax) => syntax,
        Err(e) => report_syntax_error(path, &e, output),
    };

    let defects = validate(&syntax);
    let fatal = defects.iter().any(|d| {
        d.severity == Severity::Error || (strict && d.severity == Severity::Warning)
    });

    match output {
        OutputFormat::Text => {
            for d in &defects {
                println!("{}", render_defect(path, d));
            }
            if defects.is_empty() && !quiet {
                println!(
                    "{}: ok ({} definitions)",
                    path.display(),
                    syntax.definitions.len()
                );
            }
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({ "defects": defects });
            println!("{}", payload);
        }
    }

    if fatal {
        process::exit(1);
    }
}

fn render_defect(path: &Path, d: &Defect) -> String {
    let severity = match d.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match d.line {
        Some(line) => format!("{}:{}: {}: {}", path.display(), line, severity, d),
        None => format!("{}: {}: {}", path.display(), severity, d),
    }
}

fn cmd_fmt(path: &Path, write: bool, output: OutputFormat) {
    let source = read_source(path);
    let syntax = match parse_source(&source) {
        Ok(syntax) => syntax,
        Err(e) => report_syntax_error(path, &e, output),
    };
    let canonical = format_syntax(&syntax);
    if write {
        if let Err(e) = fs::write(path, &canonical) {
            eprintln!("error: cannot write {}: {}", path.display(), e);
            process::exit(1);
        }
    } else {
        print!("{}", canonical);
    }
}

fn cmd_tokens(path: &Path, output: OutputFormat) {
    let source = read_source(path);
    let tokens = scan_raw(&source);
    match output {
        OutputFormat::Text => {
            for token in &tokens {
                println!("{}", format_token(token));
            }
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({ "tokens": tokens });
            println!("{}", payload);
        }
    }
    if tokens.last().map(|t| t.kind) == Some(TokenKind::Error) {
        process::exit(1);
    }
}
