use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vardump::{DumpConfig, Dumper, Inspect, UnsupportedPolicy};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the dump
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = Command::new("vardump")
        .about("Dump a JSON document as an indented, type-annotated tree")
        .arg(
            Arg::new("input")
                .help("Input JSON file, or - for stdin")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (defaults to <config dir>/vardump/config.json when present)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Fail when nesting goes deeper than this")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("indent-spaces")
                .long("indent-spaces")
                .help("Indent with this many spaces instead of tabs")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on values that cannot be rendered instead of omitting them")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // Config file first, flags override it
    let mut config = load_config(matches.get_one::<PathBuf>("config"))?;
    if let Some(max_depth) = matches.get_one::<usize>("max-depth") {
        config = config.with_max_depth(Some(*max_depth));
    }
    if let Some(spaces) = matches.get_one::<usize>("indent-spaces") {
        config = config.with_indent(" ".repeat(*spaces));
    }
    if matches.get_flag("strict") {
        config = config.with_unsupported(UnsupportedPolicy::Fail);
    }

    let json_content = read_input(matches.get_one::<String>("input").map(String::as_str))?;
    let document: serde_json::Value =
        serde_json::from_str(&json_content).context("Input is not valid JSON")?;

    let dumper = Dumper::new(config);
    let output = dumper.sdump(&[&document as &dyn Inspect])?;
    print!("{}", output);

    Ok(())
}

fn load_config(explicit: Option<&PathBuf>) -> Result<DumpConfig> {
    if let Some(path) = explicit {
        return DumpConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match DumpConfig::default_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading default config");
            DumpConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        _ => Ok(DumpConfig::default()),
    }
}

fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        None | Some("-") => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
    }
}
