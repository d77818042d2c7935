use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tessera::lexer::{decode_string, parse_number, Comment, ProductionScanner, Token, TokenType};
use tessera::LexError;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "The Tessera language front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// The source file to scan (`-` for stdin)
        input: PathBuf,

        /// Emit JSON instead of one token per line
        #[arg(long)]
        json: bool,

        /// Also print the comments found in the file
        #[arg(long)]
        comments: bool,

        /// Print how often each token type occurs
        #[arg(long)]
        summary: bool,
    },

    /// Check a source file for lexical errors
    Check {
        /// The source file to check (`-` for stdin)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Tokens {
            input,
            json,
            comments,
            summary,
        } => tokens(input, json, comments, summary),
        Commands::Check { input } => check(input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// A loaded source file and its diagnostic file database.
struct SourceState {
    source: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
}

impl SourceState {
    fn new(input: &Path) -> Result<Self> {
        let source = if input == Path::new("-") {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read source from stdin")?;
            source
        } else {
            fs::read_to_string(input)
                .with_context(|| format!("Failed to read source file: {:?}", input))?
        };

        let mut files = SimpleFiles::new();
        let file_id = files.add(input.display().to_string(), source.clone());

        Ok(Self {
            source,
            files,
            file_id,
        })
    }

    fn report_error(&self, diagnostic: &Diagnostic<usize>) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct TokenDump<'a> {
    tokens: Vec<Token<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<Vec<Comment<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<IndexMap<TokenType, usize>>,
}

fn tokens(input: PathBuf, json: bool, with_comments: bool, with_summary: bool) -> Result<()> {
    log::info!("Scanning {:?}", input);
    let state = SourceState::new(&input)?;

    let mut scanner = ProductionScanner::new(&state.source);
    let tokens: Vec<_> = scanner.by_ref().collect();
    let comments = with_comments.then(|| scanner.comments().to_vec());
    let summary = with_summary.then(|| count_by_type(&tokens));
    log::debug!("{} tokens, {} comments", tokens.len(), scanner.comments().len());

    if json {
        let dump = TokenDump {
            tokens,
            comments,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!("{}", "=== Tokens ===".blue().bold());
    for token in &tokens {
        let mut line = format!(
            "{:>4}:{:<4} {:<20} {:?}",
            token.span.first.line,
            token.span.first.column,
            format!("{:?}", token.kind),
            token.text
        );
        if let Some(value) = literal_value(token) {
            line.push_str(&format!(" = {}", value));
        }
        if token.kind == TokenType::Invalid {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }

    if let Some(comments) = comments {
        println!("{}", "=== Comments ===".blue().bold());
        for comment in comments {
            println!("{:>4}:{:<4} {:?}", comment.position.line, comment.position.column, comment.text);
        }
    }

    if let Some(summary) = summary {
        println!("{}", "=== Summary ===".blue().bold());
        for (kind, count) in summary {
            println!("{:<20} {}", format!("{:?}", kind), count);
        }
    }

    Ok(())
}

fn count_by_type(tokens: &[Token<'_>]) -> IndexMap<TokenType, usize> {
    let mut counts = IndexMap::new();
    for token in tokens {
        *counts.entry(token.kind).or_insert(0) += 1;
    }
    counts
}

/// Decoded value of a string or number literal, for display.
fn literal_value(token: &Token<'_>) -> Option<String> {
    match token.kind {
        TokenType::StringLiteral => match decode_string(token.text) {
            Ok(value) => Some(format!("{:?}", value)),
            Err(e) => Some(format!("<{}>", e)),
        },
        TokenType::Number => match parse_number(token.text) {
            Ok(value) => Some(format!("{:?}", value)),
            Err(e) => Some(format!("<{}>", e)),
        },
        _ => None,
    }
}

fn check(input: PathBuf) -> Result<()> {
    log::info!("Checking {:?}", input);

    let state = SourceState::new(&input)?;

    log::debug!("Starting lexical analysis");
    let errors = LexError::collect(&state.source);
    for error in &errors {
        let diagnostic = error.to_diagnostic(&state.files, state.file_id);
        state.report_error(&diagnostic)?;
    }

    if !errors.is_empty() {
        anyhow::bail!("Lexical analysis failed with {} error(s)", errors.len());
    }

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}
