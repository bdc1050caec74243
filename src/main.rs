//! Shadeclip CLI - copy shading networks out of scene snapshots.
//!
//! Stands in for the host-side copy action: a scene snapshot is loaded,
//! one copy runs, and the interchange document goes to a file or stdout.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use shadeclip::engine::translate::assign_ids;
use shadeclip::prelude::*;

/// Shadeclip - shading network copy tool
#[derive(Parser)]
#[command(name = "shadeclip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every translated node
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the networks upstream of one or more roots into a document
    Copy {
        /// Scene snapshot (JSON)
        #[arg(short, long, env = "SHADECLIP_SCENE")]
        scene: PathBuf,

        /// Root nodes, usually shading groups
        #[arg(required = true)]
        roots: Vec<String>,

        /// Target renderer
        #[arg(short, long, env = "SHADECLIP_RENDERER", default_value = "arnold")]
        renderer: Renderer,

        /// Output XML file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the diagnostics report as JSON on stderr
        #[arg(long)]
        json: bool,

        /// Do not assign editor positions
        #[arg(long)]
        no_layout: bool,

        /// Do not write comments for unsupported nodes
        #[arg(long)]
        no_placeholders: bool,
    },

    /// Copy every network root of every scene under a directory
    Batch {
        /// Directory searched for scene snapshots (*.json)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Target renderer
        #[arg(short, long, env = "SHADECLIP_RENDERER", default_value = "arnold")]
        renderer: Renderer,

        /// Filter pattern for root names (glob-style)
        #[arg(short, long)]
        filter: Option<String>,

        /// Do not assign editor positions
        #[arg(long)]
        no_layout: bool,
    },

    /// List the source node types a renderer table supports
    Tables {
        /// Target renderer
        #[arg(short, long, env = "SHADECLIP_RENDERER", default_value = "arnold")]
        renderer: Renderer,
    },

    /// Parse a document and check that every connection resolves
    Inspect {
        /// Input XML document
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Copy {
            scene,
            roots,
            renderer,
            output,
            json,
            no_layout,
            no_placeholders,
        } => {
            let options = CopyOptions {
                renderer,
                layout: !no_layout,
                placeholders: !no_placeholders,
            };
            cmd_copy(&scene, &roots, &options, output.as_deref(), json)?;
        }
        Commands::Batch {
            input,
            output,
            renderer,
            filter,
            no_layout,
        } => {
            let options = CopyOptions {
                layout: !no_layout,
                ..CopyOptions::for_renderer(renderer)
            };
            cmd_batch(&input, &output, &options, filter.as_deref())?;
        }
        Commands::Tables { renderer } => {
            cmd_tables(renderer);
        }
        Commands::Inspect { input } => {
            cmd_inspect(&input)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::new("shadeclip=debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("shadeclip=info"))?
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn cmd_copy(scene_path: &Path, roots: &[String], options: &CopyOptions, output: Option<&Path>, json: bool) -> Result<()> {
    let start = Instant::now();
    let scene = MemoryScene::open(scene_path).context("Failed to load scene snapshot")?;
    info!(scene = %scene_path.display(), nodes = scene.len(), "loaded scene");

    let copied = copy_network(&scene, roots, options).context("Failed to copy shading network")?;
    let xml = copied.to_xml().context("Failed to serialize document")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &xml).context("Failed to write output file")?;
        }
        None => std::io::stdout()
            .write_all(xml.as_bytes())
            .context("Failed to write document to stdout")?,
    }

    if json {
        eprintln!("{}", serde_json::to_string_pretty(&report(&copied))?);
    } else {
        for diagnostic in &copied.diagnostics {
            eprintln!("{}[{}]: {}", diagnostic.severity(), diagnostic.code(), diagnostic);
        }
    }

    info!(elapsed = ?start.elapsed(), "copy finished");

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, options: &CopyOptions, filter: Option<&str>) -> Result<()> {
    let pattern = filter
        .map(Pattern::new)
        .transpose()
        .context("Invalid root filter pattern")?;

    let mut scenes = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.context("Failed to walk input directory")?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        match MemoryScene::open(path) {
            Ok(scene) => scenes.push((path.to_path_buf(), scene)),
            Err(e) => warn!(scene = %path.display(), error = %e, "skipping scene"),
        }
    }

    // One job, and one document, per root. File names are made unique per
    // scene the same way node ids are.
    let mut jobs = Vec::new();
    let mut targets = Vec::new();
    for (path, scene) in &scenes {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("scene");
        let roots: Vec<&str> = scene
            .roots()
            .into_iter()
            .filter(|root| !pattern.as_ref().is_some_and(|p| !p.matches(root)))
            .collect();
        let names = assign_ids(roots.iter().copied());
        for (root, name) in roots.into_iter().zip(names) {
            jobs.push(CopyJob::new(scene, vec![root.to_string()]));
            targets.push(output.join(stem).join(format!("{}.xml", name)));
        }
    }

    println!("Copying {} networks from {} scenes...", jobs.len(), scenes.len());

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let results = copy_batch(&jobs, options, |done, _| pb.set_position(done as u64));
    pb.finish_with_message("Done");

    let mut written = 0;
    let mut warnings = 0;
    let mut errors = 0;
    for ((job, target), result) in jobs.iter().zip(&targets).zip(results) {
        let xml = result.and_then(|copied| {
            warnings += copied.warnings();
            copied.to_xml()
        });

        match xml {
            Ok(xml) => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(target, xml)?;
                written += 1;
            }
            Err(e) => {
                eprintln!("Error copying {}: {}", job.roots.join(", "), e);
                errors += 1;
            }
        }
    }

    println!(
        "Wrote {} documents in {:?} ({} warnings, {} errors)",
        written,
        start.elapsed(),
        warnings,
        errors
    );

    Ok(())
}

fn cmd_tables(renderer: Renderer) {
    let table = renderer.table();
    println!("{} (table version {})", table.name(), table.version());

    for entry in table.entries() {
        println!("{:<28} {:<28} {}", entry.source_type, entry.dest_type, entry.class);
    }

    println!("\nTotal: {} node types", table.entries().len());
}

fn cmd_inspect(input: &Path) -> Result<()> {
    let xml = fs::read_to_string(input).context("Failed to read input file")?;
    let document = parse_document(&xml).context("Failed to parse document")?;

    println!("Group: {}", document.group);
    println!("Renderer: {} (table version {})", document.renderer, document.table_version);
    println!("Nodes: {}", document.nodes.len());
    println!("Connections: {}", document.connections.len());

    for node in &document.nodes {
        println!(
            "  {:<32} {:<24} {} parameters, {} inputs",
            node.id,
            node.node_type,
            node.parameters.len(),
            document.connections_into(&node.id).count()
        );
    }

    if !document.placeholders.is_empty() {
        println!("Unsupported: {}", document.placeholders.len());
        for placeholder in &document.placeholders {
            println!("  {} ({})", placeholder.name, placeholder.node_type);
        }
    }

    document.validate().context("Document is not closed")?;
    println!("All connections resolve");

    Ok(())
}

/// Machine-readable summary of one copy.
fn report(copied: &CopyOutput) -> serde_json::Value {
    let document = &copied.document;
    json!({
        "group": document.group,
        "renderer": document.renderer,
        "tableVersion": document.table_version,
        "nodes": document.nodes.len(),
        "connections": document.connections.len(),
        "placeholders": document.placeholders.len(),
        "warnings": copied.warnings(),
        "diagnostics": copied
            .diagnostics
            .iter()
            .map(|d| json!({
                "severity": d.severity().to_string(),
                "code": d.code(),
                "message": d.to_string(),
            }))
            .collect::<Vec<_>>(),
    })
}
