use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use ontograph_core::{Config, Ontology, OntologyLoader, RelationType, TermContainer, TermSet};

#[derive(Parser)]
#[command(name = "ontograph")]
#[command(about = "Ontology ancestry and slim tool", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./ontograph.toml or the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ontology source directory, overriding the configuration
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Log loader progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ancestors of a term
    Ancestors {
        /// Term id, e.g. GO:0008150
        id: String,
        /// Relation filter codes (defaults to the configured slim relations)
        #[arg(short, long)]
        relations: Option<String>,
        /// Print the term summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Work with compact term-set strings
    Slim {
        #[command(subcommand)]
        action: SlimAction,
    },
    /// List the relation vocabulary
    Relations,
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum SlimAction {
    /// Encode term ids (id[#colour], any separators) into a compact string
    Encode {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Decode a compact string into term ids
    Decode { code: String },
    /// Show a subset defined by the ontology source
    Show { name: String },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => Config::load()?,
    };
    if let Some(source) = &cli.source {
        config.ontology.source_dir = source.to_string_lossy().to_string();
    }

    match cli.command {
        Commands::Relations => {
            print_relations();
            Ok(())
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Ancestors {
            id,
            relations,
            json,
        } => {
            let ontology = load(&config)?;
            let relations = relations.unwrap_or_else(|| config.slim.relations.clone());
            show_ancestors(&ontology, &id, &relations, json)
        }
        Commands::Slim { action } => {
            let ontology = load(&config)?;
            run_slim(&ontology, action)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load(config: &Config) -> Result<Ontology> {
    OntologyLoader::from_config(&config.ontology)
        .load()
        .wrap_err_with(|| format!("loading ontology from {}", config.ontology.source_dir))
}

fn show_ancestors(ontology: &Ontology, id: &str, relations: &str, json: bool) -> Result<()> {
    let idx = ontology
        .idx_of(id)
        .ok_or_else(|| eyre!("Unknown term: {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ontology.summary(idx))?);
        return Ok(());
    }

    for ancestor in ontology.ancestry(idx, relations)?.iter() {
        let term = ontology.term_at(*ancestor);
        let kinds: Vec<&str> = ontology
            .ancestors(idx)
            .iter()
            .filter(|tr| tr.parent == *ancestor)
            .map(|tr| tr.relation.formal_name())
            .collect();
        println!("{}\t{}\t{}", term.id, term.name, kinds.join(","));
    }
    Ok(())
}

fn run_slim(ontology: &Ontology, action: SlimAction) -> Result<()> {
    match action {
        SlimAction::Encode { ids } => {
            let mut set = TermSet::new(ontology);
            set.add_all(&ids);
            println!("{}", set.compressed()?);
        }
        SlimAction::Decode { code } => {
            let mut set = TermSet::new(ontology);
            set.add_compressed(&code)?;
            print_members(&set);
        }
        SlimAction::Show { name } => {
            let set = ontology
                .subset(&name)
                .ok_or_else(|| eyre!("No subset named {name}"))?;
            print_members(&set);
            println!("# {}", set.compressed()?);
        }
    }
    Ok(())
}

fn print_members(set: &TermSet<'_>) {
    for term in set.terms() {
        match set.colour_of(&term.id) {
            Some(colour) if !colour.is_empty() => {
                println!("{}\t{}\t{}", term.id, term.name, colour)
            }
            _ => println!("{}\t{}", term.id, term.name),
        }
    }
}

fn print_relations() {
    println!("code\talias\tpolarity\tname");
    for rt in RelationType::ALL {
        println!(
            "{}\t{}\t{:?}\t{}",
            rt.code(),
            rt.alias().unwrap_or("-"),
            rt.polarity(),
            rt.formal_name()
        );
    }
}
