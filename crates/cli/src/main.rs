mod input;
mod provenance;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geoprofile::column::Nen8990;
use geoprofile::section::{
    duplicate_warnings, MapOverview, ProfileLayout, Section, SectionConfig, Sequence, SortingMode,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "geoprofile")]
#[command(about = "Build geological cross-section layouts from borehole and CPT columns")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Select, order and lay out columns along a path; write layout JSON
    Section(SectionArgs),
    /// Validate a column file and report duplicates
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(clap::Args, Debug, Clone)]
struct SectionArgs {
    /// JSON array of column records
    #[arg(long)]
    input: PathBuf,
    /// Path vertices as "x,y;x,y;..."
    #[arg(long, allow_hyphen_values = true)]
    path: String,
    /// Corridor half-width around the path [m]
    #[arg(long, default_value_t = 10.0)]
    buffer: f64,
    /// exact_optimal (tsp), nearest_neighbor, or identity (custom)
    #[arg(long, default_value_t = SortingMode::NearestNeighbor)]
    sorting: SortingMode,
    /// Order and lay out by raw coordinates instead of path projections
    #[arg(long)]
    no_reproject: bool,
    /// Horizontal offset of the first slot
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    x0: f64,
    #[arg(long)]
    out: PathBuf,
}

impl SectionArgs {
    fn config(&self) -> SectionConfig {
        SectionConfig {
            buffer_width: self.buffer,
            sorting_mode: self.sorting,
            reproject: !self.no_reproject,
        }
    }
}

/// Everything a renderer needs, in one document.
#[derive(Serialize)]
struct SectionOutput<'a> {
    config: SectionConfig,
    included: Vec<&'a str>,
    sequence: &'a Sequence,
    layout: ProfileLayout,
    groundwater_trace: Vec<(f64, f64)>,
    surface_trace: Vec<(f64, f64)>,
    overview: MapOverview,
    warnings: Vec<String>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Section(args) => section(&args).map(|_| ()),
        Action::Validate { input } => validate(&input),
        Action::Report => report(),
    }
}

fn section(args: &SectionArgs) -> Result<PathBuf> {
    let cfg = args.config();
    tracing::info!(input = %args.input.display(), ?cfg, "section");
    let columns = input::read_columns(&args.input, &Nen8990)?;
    let path = input::parse_path(&args.path)?;
    let section = Section::new(columns, path, cfg)?;

    let layout = section.layout(args.x0)?;
    let doc = SectionOutput {
        config: cfg,
        included: section.included()?.iter().map(|c| c.name()).collect(),
        sequence: section.sequence()?,
        groundwater_trace: layout.groundwater_trace(),
        surface_trace: layout.surface_trace(),
        overview: section.map_overview()?,
        warnings: section.warnings().iter().map(ToString::to_string).collect(),
        layout,
    };
    tracing::info!(
        included = doc.included.len(),
        total_length = doc.sequence.total_length,
        width = doc.layout.width,
        "layout ready"
    );

    write_json(&args.out, &doc)?;
    let params = serde_json::json!({
        "input": args.input,
        "path": args.path,
        "buffer_width": cfg.buffer_width,
        "sorting_mode": cfg.sorting_mode,
        "reproject": cfg.reproject,
        "x0": args.x0,
    });
    let prov = provenance::Provenance::new(params).with_warnings(&doc.warnings);
    let prov_path = provenance::write_sidecar(&args.out, prov)?;
    tracing::info!(out = %args.out.display(), provenance = %prov_path.display(), "wrote");
    Ok(prov_path)
}

fn validate(input: &Path) -> Result<()> {
    let columns = input::read_columns(input, &Nen8990)?;
    let warnings = duplicate_warnings(&columns);
    for w in &warnings {
        tracing::warn!("{w}");
    }
    tracing::info!(
        columns = columns.len(),
        warnings = warnings.len(),
        "all columns valid"
    );
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::Provenance::new(serde_json::json!({}));
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn write_json<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}
