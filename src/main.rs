use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Error};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use roster_reader::roster::{parse_members, render_list, write_output, OutputFormat, ParseMode};

/// Extract member names and genders from a roster PDF or text export
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the roster (.pdf, or any UTF-8 text file)
    file_path: Option<PathBuf>,

    /// Parse line by line instead of using the whole-document patterns
    #[arg(long)]
    line_by_line: bool,

    /// List entries as "Name, GENDER" instead of names only
    #[arg(long)]
    with_gender: bool,

    /// Where to save the parsed list
    #[arg(short, long, default_value = "parsed_members.txt")]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // $ roster-reader ./members.pdf --line-by-line
    let Some(path) = cli.file_path.as_deref() else {
        println!("{}", Cli::command().render_help());
        return ExitCode::from(1);
    };

    match run(path, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(path: &Path, cli: &Cli) -> Result<(), Error> {
    let mode = if cli.line_by_line {
        ParseMode::LineByLine
    } else {
        ParseMode::Bulk
    };
    let format = if cli.with_gender {
        OutputFormat::NameGender
    } else {
        OutputFormat::Names
    };

    let members = parse_members(path, mode)?;

    println!("Found {} members:\n", members.len());
    println!("{}", render_list(&members, format));

    write_output(&cli.output, &members, format)
        .with_context(|| format!("Unable to save the member list to {}", cli.output.display()))?;
    println!("\n✓ Saved to {}", cli.output.display());

    Ok(())
}
