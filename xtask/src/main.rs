use camino::Utf8PathBuf;
use cushion_diagram::{CushionSpec, Diagram, EngineConfig, Viewport, layout};
use miette::{Context, IntoDiagnostic};
use rayon::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};

/// Viewport used when no config file is given: the diagram box of the
/// order-confirmation page, in inches
const DEFAULT_VIEWPORT: (f64, f64) = (3.5, 4.25);

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "batch" => batch(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            usage();
            std::process::exit(1);
        }
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command>");
    eprintln!("Commands:");
    eprintln!("  batch <specs.json> [--config <config.json>]");
    eprintln!("      Lay out every cushion in a JSON array and print the diagrams");
}

struct BatchArgs {
    specs: Utf8PathBuf,
    config: Option<Utf8PathBuf>,
}

fn parse_args(args: &[String]) -> miette::Result<BatchArgs> {
    let mut specs = None;
    let mut config = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or_else(|| miette::miette!("--config needs a path"))?;
                config = Some(Utf8PathBuf::from(path));
            }
            other if specs.is_none() => specs = Some(Utf8PathBuf::from(other)),
            other => miette::bail!("unexpected argument {other:?}"),
        }
    }
    let specs = specs.ok_or_else(|| miette::miette!("missing <specs.json>"))?;
    Ok(BatchArgs { specs, config })
}

fn load_config(path: Option<&Utf8PathBuf>) -> miette::Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading {path}"))?;
            serde_json::from_str(&text)
                .into_diagnostic()
                .wrap_err_with(|| format!("parsing {path}"))?
        }
        None => EngineConfig::new(Viewport::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1)),
    };
    config.validate()?;
    Ok(config)
}

/// Outcome for one cushion, kept in input order
enum Outcome {
    Laid(Box<Diagram>),
    Failed(miette::Report),
}

fn batch(args: &[String]) -> miette::Result<()> {
    let args = parse_args(args)?;
    let config = load_config(args.config.as_ref())?;

    let text = fs::read_to_string(&args.specs)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.specs))?;
    let specs: Vec<Value> = serde_json::from_str(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("{} must hold a JSON array of cushion objects", args.specs))?;

    // layout is pure, so cushions run independently; only the output is serial
    let outcomes: Vec<Outcome> = specs
        .into_par_iter()
        .map(|value| {
            let result = CushionSpec::from_value(value).and_then(|spec| layout(&spec, &config));
            match result {
                Ok(diagram) => Outcome::Laid(Box::new(diagram)),
                Err(err) => Outcome::Failed(err.into()),
            }
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0;
    for (index, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Outcome::Laid(diagram) => {
                let json = serde_json::to_string(diagram).into_diagnostic()?;
                writeln!(out, "{json}").into_diagnostic()?;
            }
            Outcome::Failed(report) => {
                failed += 1;
                eprintln!("cushion #{index}: {report:?}");
            }
        }
    }
    eprintln!("{} laid out, {failed} skipped", outcomes.len() - failed);
    Ok(())
}
