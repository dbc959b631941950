//! Print `.splice` drum patterns.
//!
//! ```text
//! splice_parser [--json] [--strict] <file>...
//! ```

use std::env;

use anyhow::{bail, Context, Result};
use splice_parser::{ParserConfig, Pattern};

#[derive(Debug, Default)]
struct Options {
    json: bool,
    strict: bool,
    paths: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--json" => options.json = true,
            "--strict" => options.strict = true,
            flag if flag.starts_with("--") => bail!("unknown option {}", flag),
            path => options.paths.push(path.to_string()),
        }
    }
    if options.paths.is_empty() {
        bail!("usage: splice_parser [--json] [--strict] <file>...");
    }
    Ok(options)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args)?;
    let config = if options.strict {
        ParserConfig::strict()
    } else {
        ParserConfig::default()
    };

    for path in &options.paths {
        let pattern = Pattern::from_path_with_config(path, &config)
            .with_context(|| format!("failed to decode {}", path))?;
        tracing::info!(path = %path, tracks = pattern.tracks().len(), "decoded");

        if options.json {
            println!("{}", serde_json::to_string_pretty(&pattern)?);
        } else {
            print!(
                "{}",
                pattern
                    .render()
                    .with_context(|| format!("failed to render {}", path))?
            );
        }
    }

    Ok(())
}
