mod expectation;
mod test_runner;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::expectation::Expectation;
use crate::test_runner::RunOptions;

const SUBCOMMANDS: &[&str] = &["parse", "test", "help"];

#[derive(Parser)]
#[command(name = "blockscan", version, about = "Block-level Markdown scanner")]
struct Cli {
    /// Disable colored output (also honours NO_COLOR)
    #[arg(long, global = true)]
    no_color: bool,

    /// Log scanner decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a file and print its blocks
    Parse(ParseArgs),

    /// Run fixture files against their expectations
    Test(TestArgs),
}

#[derive(clap::Args)]
struct ParseArgs {
    /// Markdown file to scan
    file: String,

    /// Print nodes in the fixture expectation format (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a fixture `.md` file or a directory containing fixtures
    path: String,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,

    /// Stop at the first failing fixture
    #[arg(long)]
    fail_fast: bool,
}

fn main() {
    // `blockscan file.md` is shorthand for `blockscan parse file.md`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().skip(1).position(|a| !a.starts_with('-')) {
        if !SUBCOMMANDS.contains(&args[pos + 1].as_str()) {
            args.insert(pos + 1, "parse".to_string());
        }
    }

    let cli = Cli::parse_from(&args);
    init_logging(&cli);
    let no_color = cli.no_color || std::env::var_os("NO_COLOR").is_some();

    match cli.command {
        Command::Parse(parse_args) => do_parse(parse_args, no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let options = RunOptions {
                no_color,
                categories: test_args.category,
                fail_fast: test_args.fail_fast,
            };
            process::exit(test_runner::run_tests(path, &options));
        }
    }
}

/// `--verbose` shows every closed block, `--quiet` only errors.
fn log_level(verbose: bool, quiet: bool) -> Level {
    if verbose {
        Level::TRACE
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}

fn init_logging(cli: &Cli) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose, cli.quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: cannot install logger: {}", e);
    }
}

fn do_parse(args: ParseArgs, no_color: bool) {
    let input = match std::fs::read(&args.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let doc = match blockscan::parse(&input) {
        Ok(doc) => doc,
        Err(error) => {
            let color_choice = if no_color {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            };
            let mut files = SimpleFiles::new();
            let file_id = files.add(
                args.file.clone(),
                String::from_utf8_lossy(&input).into_owned(),
            );
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            let _ = term::emit_to_write_style(
                &mut writer.lock(),
                &config,
                &files,
                &error.to_diagnostic(file_id),
            );
            process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&Expectation::from_document(&doc)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize document: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", doc);
    }
}
