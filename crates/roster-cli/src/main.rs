//! `roster` CLI — run assignment pre-checks against exported schedule data.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a request (stdin → stdout)
//! cat check.json | roster validate
//!
//! # Validate from file to file
//! roster validate -i check.json -o verdict.json
//!
//! # Exit status only (0 accept, 1 reject, 2 malformed input)
//! roster validate -i check.json --quiet
//!
//! # Emit the commit payload for an accepted request
//! roster payload -i check.json
//! ```
//!
//! The input document is `{"context": ..., "request": ...}` in the same
//! vocabulary the library uses; see `tests/fixtures/` for examples.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_engine::dto::CommitRequestDto;
use roster_engine::validator::{validate, AssignmentRequest, ValidationContext};
use serde::Deserialize;
use std::io::Read;
use std::process;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Assignment validation and conflict detection pre-checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an assignment request against a context snapshot
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Suppress the verdict; communicate through the exit status only
        #[arg(long)]
        quiet: bool,
    },
    /// Print the backend commit payload for a request that validates clean
    Payload {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// The CLI input document: a context snapshot plus the request to check.
#[derive(Deserialize)]
struct CheckDocument {
    context: ValidationContext,
    request: AssignmentRequest,
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };
    process::exit(code);
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Validate { input, output, quiet } => {
            let doc = read_document(input.as_deref())?;
            let verdict = validate(&doc.request, &doc.context);

            if !quiet {
                let rendered = serde_json::to_string_pretty(&verdict)
                    .context("serializing verdict")?;
                write_output(output.as_deref(), &rendered)?;
            }
            Ok(if verdict.accepted { 0 } else { 1 })
        }
        Commands::Payload { input, output } => {
            let doc = read_document(input.as_deref())?;
            let verdict = validate(&doc.request, &doc.context);

            if !verdict.accepted {
                eprintln!("request does not validate clean; no payload emitted");
                for rejection in &verdict.rejections {
                    eprintln!("  {rejection:?}");
                }
                return Ok(1);
            }

            let payload = CommitRequestDto::from_request(&doc.request);
            let rendered =
                serde_json::to_string_pretty(&payload).context("serializing payload")?;
            write_output(output.as_deref(), &rendered)?;
            Ok(0)
        }
    }
}

fn read_document(input: Option<&str>) -> Result<CheckDocument> {
    let raw = match input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parsing check document")
}

fn write_output(output: Option<&str>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("writing {path}")),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
