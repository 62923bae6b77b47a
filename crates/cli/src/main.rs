mod render;

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridcipher_core::{
    CellToken, ColumnOrder, Decoded, DecoderConfig, Document, DocumentSource, FileSource,
    ReaderSource, tokenize_tables,
};
use gridcipher_diagnostics as diag;

use crate::render::{Format, print_summary, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "gridcipher",
    version,
    about = "Decode the hidden message in a published coordinate table"
)]
struct Cli {
    /// Output mode: "pretty" for human-readable output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Decode an HTML document (file path, or `-` for stdin) and print the
    /// grid and the hidden message.
    Decode {
        file: String,
        /// Path to a JSON decoder configuration.
        #[arg(long)]
        config: Option<String>,
        /// Column order of each table row (overrides --config).
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
        /// Fill character for empty grid cells (overrides --config).
        #[arg(long)]
        blank: Option<char>,
        /// Show notes about dropped rows and overwritten cells.
        #[arg(long)]
        diagnostics: bool,
        /// Also list the first N parsed positions before the grid.
        #[arg(long, value_name = "N")]
        positions: Option<usize>,
    },

    /// Print the table cells and row boundaries found in a document.
    Cells {
        file: String,
        /// Only print the first N tokens.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Explain a diagnostic ID (e.g. GRD1001).
    Explain { id: String },
}

/// Column order for the `decode` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    /// x-coordinate, character, y-coordinate.
    #[value(name = "x-char-y")]
    XCharY,
    /// character, x-coordinate, y-coordinate.
    #[value(name = "char-x-y")]
    CharXY,
}

impl From<OrderArg> for ColumnOrder {
    fn from(o: OrderArg) -> Self {
        match o {
            OrderArg::XCharY => ColumnOrder::XCharY,
            OrderArg::CharXY => ColumnOrder::CharXY,
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Decode {
            file,
            config,
            order,
            blank,
            diagnostics,
            positions,
        } => {
            let config = resolve_config(config.as_deref(), order, blank)?;
            cmd_decode(&file, &config, diagnostics, positions, format)?
        }
        Cmd::Cells { file, limit } => cmd_cells(&file, limit, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_decode(
    file: &str,
    config: &DecoderConfig,
    show_diags: bool,
    positions: Option<usize>,
    format: Format,
) -> Result<()> {
    let doc = read_document(file)?;
    let out = doc.decode(config);

    match format {
        Format::Json => {
            let mut json = serde_json::json!({
                "grid": &out.grid,
                "width": out.grid.width(),
                "height": out.grid.height(),
                "message": &out.message,
                "records": out.records.len(),
                "diagnostics": &out.diagnostics,
            });
            if let Some(n) = positions {
                let shown = &out.records[..n.min(out.records.len())];
                json["positions"] = serde_json::to_value(shown)?;
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Pretty => {
            if let Some(n) = positions {
                print_positions(&out, n);
            }
            print_decoded(&out);
            if show_diags {
                render_diagnostics_pretty(&doc.text, &doc.name, &out.diagnostics);
            }
            print_summary(out.records.len(), &out.diagnostics);
        }
    }
    Ok(())
}

fn print_positions(out: &Decoded, limit: usize) {
    println!("Positions found: {}", out.records.len());
    let shown = &out.records[..limit.min(out.records.len())];
    if !shown.is_empty() {
        println!("First {} positions:", shown.len());
        for rec in shown {
            println!("  {:?} at ({}, {})", rec.glyph, rec.x, rec.y);
        }
    }
    println!();
}

fn print_decoded(out: &Decoded) {
    println!("Grid:");
    if !out.grid.is_empty() {
        println!("{}", out.grid);
    }
    println!();
    if out.message.is_empty() {
        println!("No uppercase letters found in grid");
    } else {
        println!("Secret message (uppercase letters): {}", out.message);
        println!("Total uppercase letters: {}", out.message.chars().count());
    }
}

fn cmd_cells(file: &str, limit: Option<usize>, format: Format) -> Result<()> {
    let doc = read_document(file)?;
    let tokens = tokenize_tables(&doc.text);
    let shown = &tokens[..limit.unwrap_or(tokens.len()).min(tokens.len())];

    match format {
        Format::Json => {
            let json = serde_json::json!({
                "total": tokens.len(),
                "tokens": shown,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Pretty => {
            println!("Total cells extracted: {}", tokens.len());
            for (i, tok) in shown.iter().enumerate() {
                match tok {
                    CellToken::Text { text, .. } => println!("  {i}: {text:?}"),
                    CellToken::RowEnd => println!("  {i}: <row end>"),
                }
            }
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{}: (no explanation available)", id);
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read the document named on the command line; `-` means stdin.
fn read_document(file: &str) -> Result<Document> {
    let mut source: Box<dyn DocumentSource> = if file == "-" {
        Box::new(ReaderSource::stdin())
    } else {
        Box::new(FileSource::new(file))
    };
    let doc = source
        .read_document()
        .with_context(|| format!("cannot read document {}", source.name()))?;
    Ok(doc)
}

/// Build the decoder configuration from (in priority order):
///   1. `--order` / `--blank` flags
///   2. the `--config` JSON file
///   3. built-in defaults
fn resolve_config(
    path: Option<&str>,
    order: Option<OrderArg>,
    blank: Option<char>,
) -> Result<DecoderConfig> {
    let mut config = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("failed to read config file '{p}'"))?;
            serde_json::from_str::<DecoderConfig>(&text)
                .with_context(|| format!("failed to parse config file '{p}'"))?
        }
        None => DecoderConfig::default(),
    };
    if let Some(order) = order {
        config = config.with_column_order(order.into());
    }
    if let Some(blank) = blank {
        config = config.with_blank(blank);
    }
    log::debug!("decoder config: {config:?}");
    Ok(config)
}
