use anyhow::{Context, Result};
use clap::Parser;
use markup_code_config::{Config, OutputFormat};
use std::{
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
    process,
};

mod report;

use report::ReportOptions;

/// Print the clean output text, the $$ cursor offset and every [| |] / {|name: |}
/// span of a markup fixture.
///
/// Flags left unset fall back to ~/.config/markup-code/config.toml.
#[derive(Debug, Parser)]
#[command(name = "markup-code", version)]
struct Args {
    /// Print the result as JSON
    #[arg(long, conflicts_with = "text")]
    json: bool,

    /// Print a human-readable report
    #[arg(long)]
    text: bool,

    /// Highlight spans even when stdout is not a terminal
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Never highlight spans
    #[arg(long)]
    no_color: bool,

    /// Echo the raw markup above the report
    #[arg(long, conflicts_with = "no_show_input")]
    show_input: bool,

    /// Do not echo the raw markup
    #[arg(long)]
    no_show_input: bool,

    /// Save the given flags as the new defaults instead of reading markup
    #[arg(long)]
    write_config: bool,

    /// Markup file; stdin when missing or `-`
    file: Option<PathBuf>,
}

impl Args {
    /// `None` means "use the config file".
    fn format(&self) -> Option<OutputFormat> {
        switch(self.json, self.text).map(|json| {
            if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            }
        })
    }

    fn color_override(&self) -> Option<bool> {
        switch(self.color, self.no_color)
    }

    fn show_input_override(&self) -> Option<bool> {
        switch(self.show_input, self.no_show_input)
    }

    fn markup_path(&self) -> Option<&Path> {
        self.file.as_deref().filter(|path| *path != Path::new("-"))
    }
}

/// Folds an `--x` / `--no-x` pair into an optional setting.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Overrides config fields with whatever the flags set explicitly.
fn apply_flags(config: Config, args: &Args) -> Config {
    Config {
        format: args.format().unwrap_or(config.format),
        color: args.color_override().unwrap_or(config.color),
        show_input: args.show_input_override().unwrap_or(config.show_input),
    }
}

fn read_markup(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markup from '{}'", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read markup from stdin")?;
            Ok(content)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if args.write_config {
        let updated = apply_flags(config, &args);
        updated.save()?;
        println!("Wrote {}", Config::config_path().display());
        return Ok(());
    }

    let markup = read_markup(args.markup_path())?;

    let result = match markup_code::parse(&markup) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: Malformed markup: {e}");
            process::exit(1);
        }
    };

    let config = apply_flags(config, &args);
    match config.format {
        OutputFormat::Json => println!("{}", report::render_json(&result)?),
        OutputFormat::Text => {
            let options = ReportOptions {
                // A configured default only applies on a terminal; an explicit flag always does
                color: args.color_override().unwrap_or(config.color && io::stdout().is_terminal()),
                show_input: config.show_input,
            };
            print!("{}", report::render_text(&result, options));
        }
    }

    Ok(())
}
