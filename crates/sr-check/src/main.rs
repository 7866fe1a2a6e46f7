//! `sr-check`: lint a layered SVG and simulate a scroll-through.
//!
//! Runs the same session pipeline as the browser, against an in-memory page,
//! so broken exports are caught before they are deployed.

mod simulate;

use anyhow::Context as _;
use clap::Parser;
use serde::Serialize;
use simulate::{SimulationRow, simulate};
use sr_core::layer::LAYER_COUNT;
use sr_core::lint::has_errors;
use sr_core::{LintDiagnostic, LintSeverity, RevealConfig, lint_markup};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sr-check", version, about = "Check a layered SVG for Scroll Reveal")]
struct Cli {
    /// Layered SVG exported from Inkscape.
    svg: PathBuf,

    /// JSON config overrides (same keys as the page config).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulate scrolling top to bottom in this many steps.
    #[arg(long, value_name = "STEPS")]
    simulate: Option<u32>,

    /// Viewport height in px used by the simulation.
    #[arg(long, default_value_t = 800.0)]
    viewport: f64,

    /// Print a JSON report instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    file: String,
    ok: bool,
    layers_found: usize,
    diagnostics: Vec<LintDiagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    simulation: Option<Vec<SimulationRow>>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let markup = fs::read_to_string(&cli.svg)
        .with_context(|| format!("failed to read {}", cli.svg.display()))?;
    let config = match &cli.config {
        Some(path) => {
            log::info!("reading config from {}", path.display());
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RevealConfig::from_json(&text)?
        }
        None => RevealConfig::default(),
    };

    let diagnostics = lint_markup(&markup);
    log::debug!("{} diagnostics for {}", diagnostics.len(), cli.svg.display());
    let ok = !has_errors(&diagnostics);
    let layers_found = if ok {
        LAYER_COUNT - diagnostics.iter().filter(|d| d.rule == "missing-layer").count()
    } else {
        0
    };

    // A file that fails lint would fail initialization too.
    let simulation = match cli.simulate {
        Some(_) if !ok => {
            log::warn!("skipping simulation: {} does not initialize", cli.svg.display());
            None
        }
        Some(steps) => Some(simulate(&markup, config, cli.viewport, steps)?),
        _ => None,
    };

    let report = Report {
        file: cli.svg.display().to_string(),
        ok,
        layers_found,
        diagnostics,
        simulation,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    if !report.ok {
        std::process::exit(1);
    }
    Ok(())
}

fn print_text(report: &Report) {
    let status = if report.ok { "ok" } else { "FAILED" };
    println!(
        "{}: {status} ({}/{LAYER_COUNT} layers)",
        report.file, report.layers_found
    );

    for d in &report.diagnostics {
        let severity = match d.severity {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        };
        println!("  {severity}[{}] {}", d.rule, d.message);
    }

    if let Some(rows) = &report.simulation {
        println!();
        println!("  {:>10}  {:>7}  {:>4}  visible", "scroll", "percent", "page");
        for row in rows {
            println!(
                "  {:>10.0}  {:>6.2}%  {:>4}  {}",
                row.scroll_top,
                row.percent,
                row.page,
                row.visible.join(" ")
            );
        }
    }
}
