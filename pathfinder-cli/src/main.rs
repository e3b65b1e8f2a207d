//! # pathfinder
//!
//! ```bash
//! # Coach a submission against a résumé (plain text or PDF)
//! pathfinder coach --name Ana --role "Data Analyst" --goal "Data Scientist" \
//!     --resume resume.pdf --industry Technology --skills "SQL, Python" \
//!     --ask "What leadership experience do I have?"
//!
//! # Persist an index once, then reuse it
//! pathfinder index build --resume resume.txt --out resume.index.json
//! pathfinder coach --name Ana --role Analyst --goal "Data Scientist" --index resume.index.json
//! pathfinder index query --index resume.index.json -k 3 "cloud migration"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pathfinder_cli::{
    AppConfig, Coach, CoachSettings, Submission, Tone, load_document, render, telemetry,
};
use pathfinder_jobs::{JSearchClient, JobSearch};
use pathfinder_model::GeminiModel;
use pathfinder_rag::{
    DistanceMetric, GeminiEmbeddingProvider, IndexBuilder, IndexStore, RagConfig,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "pathfinder")]
#[command(about = "Résumé summaries, skill gaps, résumé search and job listings from the terminal")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one coaching submission
    Coach(CoachArgs),

    /// Build or query a persisted résumé index
    Index {
        #[command(subcommand)]
        action: IndexAction,
    },
}

#[derive(Subcommand)]
enum IndexAction {
    /// Chunk, embed and save a résumé index
    Build {
        /// Résumé as plain text or PDF; the built-in fallback text when omitted
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Where to write the index
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        chunking: ChunkingArgs,
    },

    /// Print the résumé excerpts closest to a question
    Query {
        /// A file written by `index build`
        #[arg(long)]
        index: PathBuf,

        /// Number of excerpts
        #[arg(short, default_value_t = 4)]
        k: usize,

        /// Question text (may be empty)
        #[arg(default_value = "")]
        text: String,
    },
}

#[derive(Args)]
struct ChunkingArgs {
    /// Characters per segment
    #[arg(long, default_value_t = 300)]
    chunk_size: usize,

    /// Characters shared by neighbouring segments
    #[arg(long, default_value_t = 50)]
    chunk_overlap: usize,

    /// Distance used for nearest-neighbour search
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    metric: MetricArg,
}

impl Default for ChunkingArgs {
    fn default() -> Self {
        let rag = RagConfig::default();
        Self { chunk_size: rag.chunk_size, chunk_overlap: rag.chunk_overlap, metric: MetricArg::Euclidean }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MetricArg {
    Euclidean,
    Cosine,
}

impl From<MetricArg> for DistanceMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Euclidean => DistanceMetric::SquaredEuclidean,
            MetricArg::Cosine => DistanceMetric::Cosine,
        }
    }
}

#[derive(Args)]
struct CoachArgs {
    #[arg(long)]
    name: String,

    /// Current role
    #[arg(long)]
    role: String,

    /// Target role or field
    #[arg(long)]
    goal: String,

    #[arg(long, value_enum, default_value_t = Tone::Professional)]
    tone: Tone,

    /// Skills you already have, comma separated
    #[arg(long, value_delimiter = ',')]
    skills: Vec<String>,

    /// Location for job listings
    #[arg(long)]
    location: Option<String>,

    /// Industry for the skills quiz
    #[arg(long)]
    industry: Option<String>,

    /// Skip the skills quiz even when an industry is given
    #[arg(long)]
    no_quiz: bool,

    /// Question answered from your résumé
    #[arg(long)]
    ask: Option<String>,

    /// Résumé as plain text or PDF; the built-in fallback text when omitted
    #[arg(long, conflicts_with = "index")]
    resume: Option<PathBuf>,

    /// Load a prebuilt index instead of building one
    #[arg(long)]
    index: Option<PathBuf>,

    /// Excerpts retrieved for --ask
    #[arg(long, default_value_t = 4)]
    top_k: usize,

    /// Maximum job listings shown
    #[arg(
        long,
        default_value_t = 5,
        value_parser = PossibleValuesParser::new(["5", "10", "15"])
            .map(|n| n.parse::<usize>().unwrap_or(5))
    )]
    jobs: usize,

    #[command(flatten)]
    chunking: ChunkingArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Coach(args) => coach(&config, args).await,
        Commands::Index { action } => match action {
            IndexAction::Build { resume, out, chunking } => {
                let store = index_store(&config, &chunking, RagConfig::default().top_k)?;
                let document = load_document(resume.as_deref()).await?;
                let index = store.rebuild(&document).await.context("failed to build index")?;
                index.save(&out).await?;
                println!("Indexed {} segments into {}", index.len(), out.display());
                Ok(())
            }
            IndexAction::Query { index, k, text } => {
                let store = index_store(&config, &ChunkingArgs::default(), k)?;
                store.load(&index).await?;
                for (i, excerpt) in store.retrieve(&text, k).await?.iter().enumerate() {
                    println!("{}. {}", i + 1, render::preview(excerpt, usize::MAX));
                }
                Ok(())
            }
        },
    }
}

async fn coach(config: &AppConfig, args: CoachArgs) -> Result<()> {
    let store = Arc::new(index_store(config, &args.chunking, args.top_k)?);
    match &args.index {
        Some(path) => {
            store.load(path).await.context("failed to load index")?;
        }
        None => {
            let document = load_document(args.resume.as_deref()).await?;
            store.ensure(&document).await.context("failed to build résumé index")?;
        }
    }

    let jobs = JSearchClient::from_key(config.jsearch_api_key.as_deref())
        .map(|client| Arc::new(client) as Arc<dyn JobSearch>);
    if jobs.is_none() {
        info!("JSEARCH_API_KEY not set, job search disabled");
    }

    let generator = Arc::new(
        GeminiModel::new(gemini_key(config)?)?.with_model(config.generation_model.clone()),
    );
    let coach = Coach::new(generator, store).with_job_search(jobs).with_settings(CoachSettings {
        top_k: args.top_k,
        job_limit: args.jobs,
        ..CoachSettings::default()
    });

    let submission = Submission {
        name: args.name,
        role: args.role,
        goal: args.goal,
        tone: args.tone,
        skills: args.skills,
        location: args.location,
        industry: args.industry,
        quiz: !args.no_quiz,
        pattern_query: args.ask,
    };

    let report = coach.run(&submission).await?;
    print!("{}", render::report(&report));
    Ok(())
}

fn gemini_key(config: &AppConfig) -> Result<&str> {
    config.google_api_key.as_deref().context("GOOGLE_API_KEY (or GEMINI_API_KEY) is not set")
}

fn index_store(config: &AppConfig, chunking: &ChunkingArgs, top_k: usize) -> Result<IndexStore> {
    let rag = RagConfig::builder()
        .chunk_size(chunking.chunk_size)
        .chunk_overlap(chunking.chunk_overlap)
        .top_k(top_k)
        .metric(chunking.metric.into())
        .build()?;
    let embedder = GeminiEmbeddingProvider::new(gemini_key(config)?)?
        .with_model(config.embedding_model.clone());
    Ok(IndexStore::new(IndexBuilder::new(Arc::new(embedder), rag)))
}
