use abnfkit_config::Config;
use abnfkit_syntax::{
    LogTrace, NoTrace, ParseError, ParseOptions, ParseResult, TRACE_TARGET, TraceSink, parse_with,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use log::LevelFilter;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "abnfkit", version)]
#[command(about = "Parse text with a rule from the grammar catalogue and print the tree")]
struct Args {
    /// Text to parse; read from stdin when omitted
    input: Option<String>,

    /// Rule to start from [default: taken from the config file, else "filter"]
    #[arg(short, long)]
    rule: Option<String>,

    /// Config file to use instead of ~/.config/abnfkit/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Succeed even if the match leaves input unconsumed
    #[arg(long)]
    partial: bool,

    /// Log rule entry, exit and choice decisions at trace level
    #[arg(long)]
    trace: bool,

    /// Cache rule results per input position
    #[arg(long)]
    memoize: bool,

    /// Fail when rules nest deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the catalogue's rule names and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_logging(&config, args.trace)?;

    if args.list {
        for name in abnfkit_odata::rule_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let rule_name = args.rule.as_deref().unwrap_or(&config.rule);
    let Some(parser) = abnfkit_odata::lookup(rule_name) else {
        bail!("Unknown rule {rule_name:?}, run with --list to see the catalogue");
    };

    let input = match &args.input {
        Some(input) => input.clone(),
        None => read_stdin()?,
    };

    let options = parse_options(&args, &config);
    log::info!(
        "Parsing {} bytes with rule {rule_name} ({options:?})",
        input.len()
    );
    let trace: &dyn TraceSink = if args.trace { &LogTrace } else { &NoTrace };
    let result = parse_with(&parser, &input, &options, trace);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(node) = result.node() {
        println!("{node}");
    }

    let (accepted, message) = verdict(&result, &input, args.partial);
    if let Some(message) = message {
        eprintln!("{message}");
    }
    if !accepted {
        process::exit(1);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

fn init_logging(config: &Config, trace: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(config.log_level()?);
    if trace {
        builder.filter(Some(TRACE_TARGET), LevelFilter::Trace);
    }
    if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read input from stdin")?;
    Ok(trim_line_ending(input))
}

/// Drops the single line ending a shell pipe usually appends.
fn trim_line_ending(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}

/// Config file settings, overridden by whichever flags were given.
fn parse_options(args: &Args, config: &Config) -> ParseOptions {
    let mut options = config.parse_options();
    if args.memoize {
        options.memoize = true;
    }
    if args.max_depth.is_some() {
        options.max_depth = args.max_depth;
    }
    options
}

/// Whether the run counts as a success, plus anything to report on stderr.
fn verdict(result: &ParseResult<'_>, input: &str, partial: bool) -> (bool, Option<String>) {
    match result.clone().into_complete(input) {
        Ok(_) => (true, None),
        Err(err @ ParseError::Incomplete { .. }) if partial => (true, Some(format!("Note: {err}"))),
        Err(err) => (false, Some(format!("Error: {err}"))),
    }
}
