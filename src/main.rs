use clap::{Parser, Subcommand};
use std::path::PathBuf;
use titlex::prelude::*;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// SEO title core: concept parsing and keyword relevance
#[derive(Parser, Debug)]
#[command(name = "titlex")]
#[command(about = "Concept parsing and keyword relevance for product titles", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a product title into concept tokens
    Parse {
        /// The title text to parse
        title: String,

        /// Truth facts as inline JSON, e.g. '{"brand": "Shalimar"}'
        #[arg(long)]
        truth: Option<String>,

        /// Read truth facts from a JSON file instead
        #[arg(long, conflicts_with = "truth")]
        truth_file: Option<PathBuf>,
    },

    /// Rank corpus keywords against one or more queries
    Search {
        /// Path to the corpus snapshot
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Query text (repeat for multi-query aggregation)
        #[arg(required = true)]
        queries: Vec<String>,

        /// Maximum unique results per query
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Return everything at or above this similarity instead of top-K
        #[arg(long)]
        min_similarity: Option<f32>,

        /// Restrict the scan to one dataset
        #[arg(short, long)]
        dataset: Option<String>,
    },

    /// Score the whole corpus against a product description
    Relevance {
        /// Path to the corpus snapshot
        #[arg(short, long)]
        snapshot: PathBuf,

        /// The product description text
        description: String,

        /// Restrict the scan to one dataset
        #[arg(short, long)]
        dataset: Option<String>,
    },

    /// List corpus keywords by score
    Keywords {
        /// Path to the corpus snapshot
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Only keywords with at least this many ad units
        #[arg(long)]
        min_units: Option<f32>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Parse {
            title,
            truth,
            truth_file,
        } => {
            let truth = match (truth, truth_file) {
                (Some(json), _) => serde_json::from_str(&json)?,
                (None, Some(path)) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                (None, None) => TruthFacts::default(),
            };
            let parser = ConceptParser::new(Lexicon::default());
            let tokens = parser.parse_title(&title, &truth);
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }

        Command::Search {
            snapshot,
            queries,
            limit,
            min_similarity,
            dataset,
        } => {
            let engine = load_engine(&snapshot)?;
            let dataset = dataset.as_deref();
            let per_query: Vec<Vec<KeywordMatch>> = queries
                .iter()
                .map(|query| match min_similarity {
                    Some(threshold) => engine.search_broad(query, threshold, dataset),
                    None => engine.top_keywords(query, limit, dataset),
                })
                .collect();
            let merged = if per_query.len() > 1 {
                merge_query_results(per_query)
            } else {
                per_query.into_iter().next().unwrap_or_default()
            };
            println!("{}", serde_json::to_string_pretty(&merged)?);
        }

        Command::Relevance {
            snapshot,
            description,
            dataset,
        } => {
            let engine = load_engine(&snapshot)?;
            let scores = engine.compute_product_relevance(&description, dataset.as_deref());
            println!("{}", serde_json::to_string_pretty(&scores)?);
        }

        Command::Keywords { snapshot, min_units } => {
            let engine = load_engine(&snapshot)?;
            let records = match min_units {
                Some(units) => engine.high_volume_keywords(units),
                None => engine.all_keywords(),
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

/// Load the snapshot into a fresh engine. Queries embed with the reference
/// hash embedder, so the snapshot must have been built with it too.
fn load_engine(snapshot: &PathBuf) -> anyhow::Result<RelevanceEngine> {
    let index = load_index(snapshot)?;
    let embedder = HashEmbedder::new(index.dim());
    info!(rows = index.len(), "corpus ready");
    let engine = RelevanceEngine::new(Box::new(embedder));
    engine.load(index);
    Ok(engine)
}
