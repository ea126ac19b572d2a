use std::path::PathBuf;

use argmap_core::{Manifest, ParsedArgs, parse, syntax};
use argmap_loader::{LoadError, ManifestLoader, load_manifest};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Exit status for manifest, load and I/O failures.
const EXIT_DEVELOPER: i32 = 1;
/// Exit status for bad tokens.
const EXIT_USER: i32 = 2;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argmap")]
#[command(about = "Parse command-line tokens against a declarative manifest")]
struct Cli {
    /// Log parsing steps to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens given after `--` and print the result.
    Parse(ParseArgs),
    /// Print the one-line usage string for a manifest.
    Syntax(SyntaxArgs),
    /// Validate one or more manifest files.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Manifest file (.json, .yaml or .yml). Repeat to give fallbacks; the
    /// first file that exists is used. Without one, tokens are parsed freely.
    #[arg(long = "manifest")]
    manifests: Vec<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Also print the ordered positional list under `_`.
    #[arg(long)]
    positionals: bool,
    /// Tokens to parse.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct SyntaxArgs {
    /// Manifest file. Repeat to give fallbacks.
    #[arg(long = "manifest", required = true)]
    manifests: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Manifest files to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

/// A failed run: what to print and how to exit.
#[derive(Debug)]
struct Failure {
    exit_code: i32,
    message: String,
}

impl From<LoadError> for Failure {
    fn from(err: LoadError) -> Self {
        Self {
            exit_code: EXIT_DEVELOPER,
            message: format!("error: {err}"),
        }
    }
}

impl From<argmap_core::Error> for Failure {
    fn from(err: argmap_core::Error) -> Self {
        match err.code() {
            Some(code) => Self {
                exit_code: EXIT_USER,
                message: format!("error[{code}]: {err}"),
            },
            None => Self {
                exit_code: EXIT_DEVELOPER,
                message: format!("error: invalid manifest: {err}"),
            },
        }
    }
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    values: &'a ParsedArgs,
    #[serde(rename = "_")]
    positionals: &'a [String],
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Syntax(args) => run_syntax(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(failure) = result {
        eprintln!("{}", failure.message);
        std::process::exit(failure.exit_code);
    }
}

fn run_parse(args: ParseArgs) -> Result<(), Failure> {
    let manifest = load_chain(&args.manifests)?;
    debug!(tokens = args.tokens.len(), "parsing command-line tokens");
    let parsed = parse(manifest.as_ref(), args.tokens)?;

    let raw = if args.positionals {
        let output = ParseOutput {
            values: &parsed,
            positionals: parsed.positionals(),
        };
        render(&output, args.format)?
    } else {
        render(&parsed, args.format)?
    };
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_syntax(args: SyntaxArgs) -> Result<(), Failure> {
    let manifest = load_chain(&args.manifests)?;
    println!("{}", syntax(manifest.as_ref()));
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), Failure> {
    let mut failures = Vec::new();
    for path in &args.inputs {
        match load_manifest(path) {
            Ok(manifest) => debug!(path = %path.display(), entries = manifest.len(), "manifest ok"),
            Err(err) => failures.push(format!("{}: {err}", path.display())),
        }
    }

    if !failures.is_empty() {
        return Err(Failure {
            exit_code: EXIT_DEVELOPER,
            message: format!(
                "{} of {} manifest file(s) failed validation:\n  {}",
                failures.len(),
                args.inputs.len(),
                failures.join("\n  ")
            ),
        });
    }

    println!("Validated {} manifest file(s).", args.inputs.len());
    Ok(())
}

fn load_chain(paths: &[PathBuf]) -> Result<Option<Manifest>, Failure> {
    if paths.is_empty() {
        return Ok(None);
    }
    let loader = paths
        .iter()
        .fold(ManifestLoader::new(), |loader, path| loader.from_file(path));
    let (manifest, source) = loader.load_with_source()?;
    debug!(?source, entries = manifest.len(), "using manifest");
    Ok(Some(manifest))
}

fn render<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<String, Failure> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value).map_err(|err| err.to_string()),
        CliOutputFormat::Yaml => serde_yaml::to_string(value).map_err(|err| err.to_string()),
    };
    rendered.map_err(|err| Failure {
        exit_code: EXIT_DEVELOPER,
        message: format!("error: failed to serialize result: {err}"),
    })
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
