//! CLI tool for inspecting saved PuppetDB responses
//!
//! Decodes a JSON document as returned by a PuppetDB v4 query endpoint and
//! prints one line per entity.
//!
//! Usage:
//!   pdb-inspect [--config <path>] [--repr] [--verbose] <kind> <file>
//!
//! Kinds:
//!   nodes, facts, resources, reports, events, catalog
//!
//! Options:
//!   --config   Path to configuration file
//!   --repr     Print the tagged form (`<Node: ...>`) instead of the short form
//!   --verbose  Enable debug logging
//!
//! Example:
//!   curl -s http://puppetdb:8080/pdb/query/v4/nodes > nodes.json
//!   pdb-inspect nodes nodes.json

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use openvox_pdb_types::config::{InspectConfig, LogFormat, LogTarget, LoggingConfig};
use openvox_pdb_types::decode_records;
use openvox_pdb_types::models::{
    Catalog, CatalogRecord, Displayable, Event, EventRecord, Fact, FactRecord, Node, NodeRecord,
    Report, ReportRecord, Resource, ResourceRecord,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut repr = false;
    let mut verbose = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--repr" => {
                repr = true;
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("pdb-inspect {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                process::exit(1);
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let [kind, file] = match <[String; 2]>::try_from(positional) {
        Ok(pair) => pair,
        Err(_) => {
            print_help();
            process::exit(1);
        }
    };

    let mut config = match config_path {
        Some(ref path) => InspectConfig::load_from(path),
        None => InspectConfig::load(),
    }
    .context("Failed to load configuration")?;

    if verbose {
        config.logging.level = "debug".to_string();
    }

    // The guard must outlive all logging
    let _guard = init_logging(&config.logging);

    info!(kind = %kind, file = %file, "Inspecting PuppetDB document");

    let contents =
        std::fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file))?;

    let lines = render(&kind, &contents, &config, repr)?;
    debug!(count = lines.len(), "Decoded entities");
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

fn render(kind: &str, contents: &str, config: &InspectConfig, repr: bool) -> Result<Vec<String>> {
    let show = |item: &dyn Displayable| {
        if repr {
            item.repr()
        } else {
            item.to_string()
        }
    };

    let lines = match kind {
        "nodes" => {
            let resolver = config.status.resolver();
            let now = Utc::now();
            decode_list::<NodeRecord>(contents)?
                .into_iter()
                .map(|record| Node::from_record_with_status(record, &resolver, None, now))
                .map(|node| node.map(|n| format_node(&n, show(&n))))
                .collect::<Result<Vec<_>, _>>()?
        }
        "facts" => decode_list::<FactRecord>(contents)?
            .into_iter()
            .map(|record| show(&Fact::from(record)))
            .collect(),
        "resources" => decode_list::<ResourceRecord>(contents)?
            .into_iter()
            .map(|record| show(&Resource::from(record)))
            .collect(),
        "reports" => decode_list::<ReportRecord>(contents)?
            .into_iter()
            .map(|record| Report::try_from(record).map(|r| format_report(&r, show(&r))))
            .collect::<Result<Vec<_>, _>>()?,
        "events" => decode_list::<EventRecord>(contents)?
            .into_iter()
            .map(|record| Event::try_from(record).map(|e| show(&e)))
            .collect::<Result<Vec<_>, _>>()?,
        "catalog" => {
            let mut lines = Vec::new();
            for record in decode_list::<CatalogRecord>(contents)? {
                let catalog = Catalog::try_from(record)?;
                lines.push(show(&catalog));
                lines.extend(catalog.edges.iter().map(|edge| format!("  {}", show(edge))));
            }
            lines
        }
        other => bail!("Unknown kind: {} (expected nodes, facts, resources, reports, events or catalog)", other),
    };

    Ok(lines)
}

fn format_node(node: &Node, label: String) -> String {
    match (&node.status, &node.unreported_time) {
        (Some(status), Some(age)) => format!("{}\t{}\t{}", label, status, age),
        (Some(status), None) => format!("{}\t{}", label, status),
        _ => label,
    }
}

fn format_report(report: &Report, label: String) -> String {
    format!("{}\t{}\t{}s", label, report.node, report.run_time().num_seconds())
}

fn decode_list<T: DeserializeOwned>(contents: &str) -> Result<Vec<T>> {
    decode_records(contents).context("Failed to decode PuppetDB document")
}

/// Initialize the logging/tracing infrastructure
fn init_logging(
    log_config: &LoggingConfig,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&log_config.level));

    let (writer, guard) = match log_config.target {
        LogTarget::Console => (None, None),
        LogTarget::File | LogTarget::Both => {
            let (writer, guard) = create_file_writer(log_config);
            (Some(writer), Some(guard))
        }
    };

    // Logs go to stderr so stdout stays clean for the entity listing
    let console = log_config.target != LogTarget::File;
    let registry = tracing_subscriber::registry().with(env_filter);

    match log_config.format {
        LogFormat::Json => registry
            .with(console.then(|| fmt::layer().json().with_writer(std::io::stderr)))
            .with(writer.map(|w| fmt::layer().json().with_writer(w)))
            .init(),
        LogFormat::Compact => registry
            .with(console.then(|| {
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
            }))
            .with(writer.map(|w| fmt::layer().compact().with_target(false).with_writer(w)))
            .init(),
        LogFormat::Pretty => registry
            .with(console.then(|| {
                fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr)
            }))
            .with(writer.map(|w| {
                fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(w)
            }))
            .init(),
    }

    guard
}

/// Create a file writer with optional daily rotation
fn create_file_writer(
    log_config: &LoggingConfig,
) -> (
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
) {
    if let Err(e) = std::fs::create_dir_all(&log_config.log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_config.log_dir, e
        );
    }

    let file_appender = if log_config.daily_rotation {
        tracing_appender::rolling::daily(&log_config.log_dir, &log_config.log_prefix)
    } else {
        tracing_appender::rolling::never(&log_config.log_dir, &log_config.log_prefix)
    };

    tracing_appender::non_blocking(file_appender)
}

fn print_help() {
    println!(
        r#"pdb-inspect - Inspect saved PuppetDB responses

USAGE:
    pdb-inspect [OPTIONS] <KIND> <FILE>

KINDS:
    nodes, facts, resources, reports, events, catalog

OPTIONS:
    --config <path>   Path to configuration file
    --repr            Print tagged forms such as <Node: name>
    -v, --verbose     Enable debug logging
    -h, --help        Print help information
    -V, --version     Print version

ENVIRONMENT:
    OPENVOX_PDB_CONFIG        Configuration file path
    OPENVOX_UNREPORTED_HOURS  Hours before a node counts as unreported
    OPENVOX_LOG_FORMAT        pretty, compact or json
    RUST_LOG                  Log filter"#
    );
}
