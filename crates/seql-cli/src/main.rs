//! seql CLI: run, explain, and validate plan documents.

use clap::{Parser, Subcommand};
use seql_core::config::ExecConfig;
use seql_core::prelude::{Relation, Row};
use seql_exec::Engine;
use seql_operators::{
    explain, BoxedNode, ConstantSelect, Cross, Distinct, EqualsSelect, Inspect, Intersect, Node,
    Order, Project, Scan, Union, Zip,
};
use seql_plan::{parse_json_plan, parse_yaml_plan, Catalog, PlanConfig, PlanDocument};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seql")]
#[command(
    about = "seql: pull-based relational operators over in-memory relations",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a plan document (YAML, or JSON with a .json extension)
    Run {
        /// Path to the plan document
        #[arg(short, long)]
        plan: PathBuf,

        /// JSON file of named relations available to `scan`
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Stop after this many rows (overrides config)
        #[arg(long)]
        row_limit: Option<usize>,

        /// Skip the output digest
        #[arg(long)]
        no_digest: bool,

        /// Print the run manifest as JSON after the rows
        #[arg(long)]
        manifest: bool,
    },
    /// Check that a plan document parses and composes
    Validate {
        #[arg(short, long)]
        plan: PathBuf,

        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Print the operator tree of a plan document
    Explain {
        #[arg(short, long)]
        plan: PathBuf,

        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Run the built-in example queries
    Demo,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SEQL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            plan,
            catalog,
            row_limit,
            no_digest,
            manifest,
        } => {
            if let Err(e) = run_plan(&plan, catalog.as_deref(), row_limit, no_digest, manifest) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { plan, catalog } => {
            if let Err(e) = validate_plan(&plan, catalog.as_deref()) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Plan is valid");
        }
        Commands::Explain { plan, catalog } => {
            if let Err(e) = explain_plan(&plan, catalog.as_deref()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Demo => {
            if let Err(e) = demo() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load_document(path: &Path) -> Result<PlanDocument, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let doc = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json_plan(&text)?,
        _ => parse_yaml_plan(&text)?,
    };
    Ok(doc)
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(Catalog::from_json(&fs::read_to_string(p)?)?),
        None => Ok(Catalog::new()),
    }
}

/// Precedence: env defaults, then the document's `config`, then CLI flags.
fn resolve_config(
    doc: Option<&PlanConfig>,
    row_limit: Option<usize>,
    no_digest: bool,
) -> ExecConfig {
    let mut cfg = ExecConfig::from_env();
    if let Some(doc) = doc {
        doc.apply(&mut cfg);
    }
    if let Some(limit) = row_limit {
        cfg.row_limit = Some(limit);
    }
    if no_digest {
        cfg.compute_digest = false;
    }
    cfg
}

fn run_plan(
    plan_path: &Path,
    catalog_path: Option<&Path>,
    row_limit: Option<usize>,
    no_digest: bool,
    print_manifest: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(plan_path)?;
    let catalog = load_catalog(catalog_path)?;
    let cfg = resolve_config(doc.config.as_ref(), row_limit, no_digest);
    print!("{}", render_run(&doc, &catalog, cfg, print_manifest)?);
    Ok(())
}

/// Result rows, a summary line, then the digest and manifest if requested.
fn render_run(
    doc: &PlanDocument,
    catalog: &Catalog,
    cfg: ExecConfig,
    print_manifest: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let result = Engine::new(cfg).run_document(doc, catalog)?;

    let mut out = String::new();
    write!(out, "{}", result.relation)?;
    writeln!(
        out,
        "({} rows{})",
        result.manifest.rows_emitted,
        if result.manifest.limit_reached {
            ", limit reached"
        } else {
            ""
        }
    )?;
    if let Some(digest) = result.manifest.output_digest {
        writeln!(out, "Output digest: {}", digest)?;
    }
    if print_manifest {
        writeln!(out, "{}", serde_json::to_string_pretty(&result.manifest)?)?;
    }
    Ok(out)
}

fn validate_plan(
    plan_path: &Path,
    catalog_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(plan_path)?;
    let catalog = load_catalog(catalog_path)?;
    Engine::default().compose_document(&doc, &catalog)?;
    Ok(())
}

fn explain_plan(
    plan_path: &Path,
    catalog_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(plan_path)?;
    let catalog = load_catalog(catalog_path)?;
    print!("{}", render_explain(&doc, &catalog)?);
    Ok(())
}

fn render_explain(
    doc: &PlanDocument,
    catalog: &Catalog,
) -> Result<String, Box<dyn std::error::Error>> {
    let root = Engine::default().compose_document(doc, catalog)?;
    let mut out = String::from("Plan\n====\n");
    out.push_str(&explain(root.as_ref()));
    writeln!(out, "Output columns: {}", root.schema())?;
    Ok(out)
}

fn show(title: &str, engine: &Engine, root: BoxedNode) -> Result<(), Box<dyn std::error::Error>> {
    println!("{title}");
    let result = engine.run(root)?;
    for row in result.relation.rows() {
        println!("{row}");
    }
    println!();
    Ok(())
}

fn demo() -> Result<(), Box<dyn std::error::Error>> {
    let r = Arc::new(Relation::from_literal(
        ["name", "from", "resides"],
        [
            ["Jordan", "New York", "New York"],
            ["Lauren", "California", "New York"],
            ["Justin", "Ontario", "New York"],
            ["Devin", "California", "California"],
            ["Smudge", "Ontario", "Ontario"],
        ],
    )?);
    let c = Arc::new(Relation::from_literal(
        ["location", "country"],
        [
            ["New York", "United States"],
            ["California", "United States"],
            ["Ontario", "Canada"],
        ],
    )?);
    let c1 = Arc::new(Relation::from_literal(["language"], [["Go"], ["Kotlin"]])?);
    let c2 = Arc::new(Relation::from_literal(
        ["language"],
        [["Python"], ["Go"], ["JavaScript"]],
    )?);
    let scan = |rel: &Arc<Relation>| -> BoxedNode { Box::new(Scan::new(Arc::clone(rel))) };
    let engine = Engine::new(ExecConfig::from_env());

    show("Everyone:", &engine, scan(&r))?;
    show(
        "Justin:",
        &engine,
        Box::new(ConstantSelect::new(scan(&r), 0, "Justin")),
    )?;
    show(
        "Lives where they're from:",
        &engine,
        Box::new(EqualsSelect::new(scan(&r), 1, 2)),
    )?;
    show(
        "Only name and resides:",
        &engine,
        Box::new(Project::new(scan(&r), vec![0, 2])),
    )?;
    show(
        "What country Smudge lives in:",
        &engine,
        Box::new(Project::new(
            Box::new(ConstantSelect::new(
                Box::new(Project::new(
                    Box::new(EqualsSelect::new(
                        Box::new(Cross::new(scan(&r), scan(&c))),
                        2,
                        3,
                    )),
                    vec![0, 4],
                )),
                0,
                "Smudge",
            )),
            vec![1],
        )),
    )?;
    show("Union:", &engine, Box::new(Union::new(scan(&c), scan(&c))))?;
    show("Zip:", &engine, Box::new(Zip::new(scan(&r), scan(&c))))?;
    show(
        "Inspect:",
        &engine,
        Box::new(Inspect::new(
            scan(&c),
            Box::new(|row: &Row| println!("inspect: {row}")),
        )),
    )?;
    show(
        "Languages in use at both c1 and c2:",
        &engine,
        Box::new(Intersect::new(scan(&c1), scan(&c2))),
    )?;
    show(
        "Distinct languages used at c1 and c2:",
        &engine,
        Box::new(Distinct::new(Box::new(Union::new(scan(&c1), scan(&c2))))),
    )?;
    show(
        "Languages at c2, ordered:",
        &engine,
        Box::new(Order::new(scan(&c2), vec![0])),
    )?;
    Ok(())
}
