use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use domainmap::render::{render_domain_chunks, render_schema};
use domainmap::{Config, DomainMap, Schema};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "domainmap")]
#[command(about = "Group schema tables into business domains using their STRICT relationships")]
struct Args {
    /// Config file (default: $DOMAINMAP_CONFIG, then ./domainmap.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify tables and print the domain -> tables JSON
    Classify {
        /// Schema document (.json, .yaml or .yml)
        #[arg(short, long)]
        schema: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the schema as a Mermaid ER diagram
    Mermaid {
        /// Schema document (.json, .yaml or .yml)
        #[arg(short, long)]
        schema: PathBuf,

        /// Emit one diagram per domain (JSON array) instead of a single diagram
        #[arg(long)]
        by_domain: bool,

        /// Use an existing domains JSON instead of classifying the schema
        #[arg(long, requires = "by_domain")]
        domains: Option<PathBuf>,

        /// Maximum tables per domain diagram (overrides mermaid.max_tables_per_chunk)
        #[arg(long)]
        max_tables: Option<usize>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;

    // Logs go to stderr so stdout carries only the result
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", config.domainmap.log_level.as_str())
    ).init();

    match args.command {
        Command::Classify { schema, output } => {
            run_classify(&config, &schema, output.as_deref())?;
        }
        Command::Mermaid {
            schema,
            by_domain,
            domains,
            max_tables,
            output,
        } => {
            run_mermaid(
                &config,
                &schema,
                by_domain,
                domains.as_deref(),
                max_tables,
                output.as_deref(),
            )?;
        }
    }

    Ok(())
}

fn load_schema(path: &Path) -> Result<Schema> {
    let schema = Schema::load(path)
        .with_context(|| format!("Failed to load schema: {}", path.display()))?;
    log::info!(
        "Schema loaded: {} tables, {} relationships",
        schema.tables.len(),
        schema.relationships.len()
    );
    Ok(schema)
}

fn classify(config: &Config, schema: &Schema) -> Result<DomainMap> {
    let classifier = config.classifier()?;
    let partition = classifier.classify(schema).context("Classification failed")?;

    log::info!(
        "Classified {} tables into {} domains ({} components)",
        partition.domains.table_count(),
        partition.domains.len(),
        partition.components.len()
    );
    if !partition.residual.is_empty() {
        log::warn!(
            "{} table(s) routed to {} by the coverage check",
            partition.residual.len(),
            config.classifier.fallback_domain
        );
    }

    Ok(partition.domains)
}

fn run_classify(config: &Config, schema_path: &Path, output: Option<&Path>) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let domains = classify(config, &schema)?;

    for (domain, tables) in domains.iter() {
        log::debug!("{}: {} table(s)", domain, tables.len());
    }

    write_output(output, &domains.to_json_pretty()?)
}

fn run_mermaid(
    config: &Config,
    schema_path: &Path,
    by_domain: bool,
    domains_path: Option<&Path>,
    max_tables: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let schema = load_schema(schema_path)?;

    if !by_domain {
        return write_output(output, &render_schema(&schema));
    }

    let domains = match domains_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read domains file: {}", path.display()))?;
            DomainMap::from_json_str(&content)
                .with_context(|| format!("Invalid domains JSON: {}", path.display()))?
        }
        None => classify(config, &schema)?,
    };

    let max_tables = max_tables.unwrap_or(config.mermaid.max_tables_per_chunk);
    let chunks = render_domain_chunks(&schema, &domains, max_tables)?;
    log::info!("Rendered {} domain diagram(s)", chunks.len());

    write_output(output, &serde_json::to_string_pretty(&chunks)?)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", content.trim_end()))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}
