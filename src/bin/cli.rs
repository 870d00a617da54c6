use clap::{Parser, Subcommand};
use movie_engine::preprocess::{self, MovieRecord};
use movie_engine::{Candidate, EngineConfig, MovieEngine, RankOptions, RecommendQuery, ShortFilmCatalog};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movie-engine")]
#[command(about = "Movie Discovery Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate titles against a query (offline)
    Rank {
        /// Query text
        query: String,

        /// JSON array of candidates; reads stdin when omitted
        #[arg(short = 'f', long)]
        candidates: Option<PathBuf>,

        /// Maximum results
        #[arg(short = 'k', long, default_value = "5")]
        top_k: usize,

        /// Drop the best match
        #[arg(long)]
        exclude_top_match: bool,

        /// Drop the candidate with this id
        #[arg(long)]
        exclude_id: Option<String>,

        /// Remove repeated (id, title) pairs
        #[arg(long)]
        dedup: bool,
    },

    /// Look up a movie and show its details
    Lookup {
        /// Movie name
        query: String,
    },

    /// Recommend movies similar to a title
    Recommend {
        /// Movie name
        query: String,

        /// Maximum results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Keep the best match instead of skipping it
        #[arg(long)]
        keep_top_match: bool,
    },

    /// List movie genres
    Genres,

    /// Popular movies for every genre
    Shelves {
        /// Movies per genre
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List the short film catalog
    ShortFilms,

    /// Clean a JSON array of movie records and print summaries
    Preprocess {
        /// Records file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movie_engine=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Rank { query, candidates, top_k, exclude_top_match, exclude_id, dedup } => {
            let json = match candidates {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let candidates = Candidate::list_from_json_str(&json)?;
            let options = RankOptions {
                top_k,
                exclude_top_match,
                exclude_id,
                deduplicate: dedup,
            };

            let ranked = movie_engine::rank_titles(&query, &candidates, &options)?;
            if ranked.is_empty() {
                println!("No matches.");
            }
            for scored in &ranked {
                println!("{}. [{}] {} ({:.4})", scored.rank + 1, scored.id(), scored.title(), scored.score);
            }
        }

        Commands::Lookup { query } => {
            let engine = MovieEngine::from_config(&config)?;
            println!("🔍 Looking up: {}", query);

            match engine.lookup(&query).await? {
                Some(details) => {
                    let movie = &details.movie;
                    println!("\n✅ {}", movie.display_name());
                    println!("   Overview: {}", if movie.overview.is_empty() { "No overview" } else { movie.overview.as_str() });
                    println!("   Rating: {}", movie.vote_average.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "N/A".to_string()));
                    println!("   Cast: {}", details.cast.join(", "));
                    println!("   Crew: {}", details.crew.join(", "));
                    if let Some(poster) = movie.poster_url() {
                        println!("   Poster: {}", poster);
                    }
                }
                None => println!("\n❌ Movie not found."),
            }
        }

        Commands::Recommend { query, top_k, keep_top_match } => {
            let engine = MovieEngine::from_config(&config)?;
            let mut request = RecommendQuery::new(query);
            request.top_k = top_k;
            if keep_top_match {
                request.exclude_top_match = Some(false);
            }

            let response = engine.recommend(request).await?;
            if response.is_empty() {
                println!("No recommendations found.");
            } else {
                println!("🎯 Recommended for '{}':", response.query);
                for rec in &response.recommendations {
                    println!("   {}. {} ({:.3})", rec.rank + 1, rec.movie.display_name(), rec.score);
                }
            }
            println!("   Latency: {:.2}ms", response.latency_ms);
        }

        Commands::Genres => {
            let engine = MovieEngine::from_config(&config)?;
            for genre in engine.genres().await? {
                println!("{:>6}  {}", genre.id, genre.name);
            }
        }

        Commands::Shelves { limit } => {
            let engine = MovieEngine::from_config(&config)?;
            for shelf in engine.genre_shelves(limit).await? {
                println!("\n🍿 {}", shelf.genre.name);
                for movie in &shelf.movies {
                    println!("   - {}", movie.display_name());
                }
            }
        }

        Commands::ShortFilms => {
            let catalog = ShortFilmCatalog::load(&config.short_films_path).await?;
            println!("🎬 Short Films:");
            for (n, film) in catalog.numbered() {
                println!("   {}. {}", n, film.title);
                println!("      Poster: {}", film.poster);
                println!("      Video: {}", film.video);
            }
        }

        Commands::Preprocess { path } => {
            let records: Vec<MovieRecord> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            let before = records.len();
            let report = preprocess::preprocess(records);

            println!("📋 Records: {} -> {}", before, report.records.len());
            println!("   Missing fields filled: {}", report.missing_filled);
            println!("   Duplicates removed: {}", report.duplicates_removed);

            println!("\n📈 Rating distribution:");
            for (rating, count) in preprocess::rating_distribution(&report.records) {
                println!("   {:.1}: {}", rating, count);
            }

            println!("\n🎭 Genre frequency:");
            for (genre, count) in preprocess::genre_frequency(&report.records) {
                println!("   {}: {}", genre, count);
            }
        }
    }

    Ok(())
}
