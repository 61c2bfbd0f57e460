//! defergen CLI
//!
//! Usage:
//!   defergen [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>   Output location (defaults to generated<FILE>, stdout for stdin input)
//!   -s, --dialect <FILE>  Dialect file replacing markers and the result prefix (TOML format)
//!       --debug           Debug output and source-context diagnostics
//!   -h, --help            Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use defergen::{generate_with_config, Dialect, GenerateConfig};

#[derive(Parser)]
#[command(name = "defergen")]
#[command(about = "Deferred-loader generation for Pascal API units")]
struct Cli {
    /// Input unit (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output location (defaults to generated<FILE> next to the input; stdout for stdin input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dialect file replacing markers and the result prefix (TOML format)
    #[arg(short = 's', long)]
    dialect: Option<PathBuf>,

    /// Debug mode: dump the loader template and render diagnostics with source context
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load dialect
    let dialect = match &cli.dialect {
        Some(path) => match Dialect::from_file(path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error loading dialect '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Dialect::default(),
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = GenerateConfig::new()
        .with_dialect(dialect)
        .with_debug(cli.debug);
    let generation = generate_with_config(&source, config);

    // Missing regions skip expansion but never suppress the output below.
    let input_name = match &cli.input {
        Some(path) => path.display().to_string(),
        None => "<stdin>".to_string(),
    };
    for diagnostic in &generation.diagnostics {
        if cli.debug {
            eprint!("{}", diagnostic.format(&source, &input_name));
        } else {
            eprintln!("Error: {}", diagnostic);
        }
    }

    match output_target(&cli) {
        Some(path) => {
            if let Err(e) = fs::write(&path, &generation.text) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", generation.text),
    }
}

/// Resolve where the rewritten unit goes: an explicit `--output` wins, file
/// input derives a sibling file, stdin input goes to stdout.
fn output_target(cli: &Cli) -> Option<PathBuf> {
    if let Some(output) = &cli.output {
        return Some(output.clone());
    }
    cli.input.as_deref().map(derived_output_path)
}

/// `SerialApi.pas` becomes `generatedSerialApi.pas`, next to the input
fn derived_output_path(input: &Path) -> PathBuf {
    let file_name = match input.file_name() {
        Some(name) => name.to_string_lossy(),
        None => "".into(),
    };
    input.with_file_name(format!("generated{}", file_name))
}

fn print_intro() {
    println!(
        r#"defergen - Deferred-loader generation for Pascal API units

USAGE:
    defergen [OPTIONS] [FILE]
    cat SerialApi.pas | defergen > generatedSerialApi.pas

OPTIONS:
    -o, --output <FILE>    Output location (defaults to generated<FILE>)
    -s, --dialect <FILE>   Custom markers and result prefix (TOML file)
        --debug            Debug output and source-context diagnostics
    -h, --help             Print help

The input unit must carry three marker-delimited regions:

    {{$region function headers}} ... {{$endRegion function headers}}
    {{$region function loader template}} ... {{$endRegion function loader template}}
    {{$region deferred functions}} ... {{$endRegion deferred functions}}

The deferred functions region is rebuilt with one expanded template instance
per routine header. Template placeholders: $routineKind$, $routineName$,
$routineTail$, $resultAssignmentPrefixIfFunction$, $routineArguments$.

A unit with missing regions passes through unchanged, with one diagnostic
per missing region on stderr."#
    );
}
