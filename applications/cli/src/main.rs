//! Rank My Music - build a track catalog from a music folder and rank it
mod config;
mod error;

use clap::{Parser, Subcommand, ValueEnum};
use crate::config::CliConfig;
use crate::error::CliError;
use rank_core::ranking::MatchOutcome;
use rank_core::{CatalogStore, Track, TrackId};
use rank_importer::CatalogImporter;
use rank_storage::LocalCatalog;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rank-my-music")]
#[command(about = "Populate a music catalog and rank its tracks", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog database URL (overrides the configuration)
    #[arg(long, global = true, env = "RMM_DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a music folder and reconcile every file into the catalog
    Populate {
        /// Folder to scan
        folder: PathBuf,

        /// Stop at the first file that fails
        #[arg(long)]
        stop_on_error: bool,
    },
    /// Show row counts of the catalog
    Stats,
    /// Record the result of a match between two tracks
    Duel {
        /// First track id
        first: TrackId,
        /// Second track id
        second: TrackId,
        /// Which track won
        #[arg(long, value_enum)]
        outcome: DuelOutcome,
    },
    /// Show a track with its albums and artists
    Show {
        /// Track id
        track_id: TrackId,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DuelOutcome {
    /// The first track wins
    A,
    /// The second track wins
    B,
    Draw,
}

impl From<DuelOutcome> for MatchOutcome {
    fn from(outcome: DuelOutcome) -> Self {
        match outcome {
            DuelOutcome::A => MatchOutcome::FirstWins,
            DuelOutcome::B => MatchOutcome::SecondWins,
            DuelOutcome::Draw => MatchOutcome::Draw,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rank_my_music=info,rank_storage=info,rank_importer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        config.storage.database_url = url;
    }
    config.validate()?;

    let catalog = open_catalog(&config).await?;

    match cli.command {
        Commands::Populate {
            folder,
            stop_on_error,
        } => {
            let mut import_config = config.import.clone();
            import_config.stop_on_error |= stop_on_error;
            populate(catalog, import_config, folder).await?;
        }
        Commands::Stats => {
            stats(&catalog).await?;
        }
        Commands::Duel {
            first,
            second,
            outcome,
        } => {
            duel(&catalog, first, second, outcome.into()).await?;
        }
        Commands::Show { track_id } => {
            show(&catalog, track_id).await?;
        }
    }

    Ok(())
}

async fn open_catalog(config: &CliConfig) -> anyhow::Result<LocalCatalog> {
    tracing::debug!("Database: {}", config.storage.database_url);

    let pool = rank_storage::create_pool(&config.storage.database_url).await?;
    rank_storage::run_migrations(&pool).await?;

    Ok(LocalCatalog::new(pool))
}

async fn populate(
    catalog: LocalCatalog,
    import_config: rank_importer::ImportConfig,
    folder: PathBuf,
) -> error::Result<()> {
    let importer = CatalogImporter::new(catalog, import_config);
    let summary = importer.import_directory(&folder).await?;

    println!("{}", summary.summary_text());
    for (path, message) in &summary.errors {
        println!("  failed: {}: {}", path.display(), message);
    }

    Ok(())
}

async fn stats(catalog: &LocalCatalog) -> error::Result<()> {
    let counts = catalog.counts().await?;

    println!("Tracks:        {}", counts.tracks);
    println!("Artists:       {}", counts.artists);
    println!("Albums:        {}", counts.albums);
    println!("Track artists: {}", counts.track_artists);
    println!("Track albums:  {}", counts.track_albums);
    println!("Album artists: {}", counts.album_artists);

    Ok(())
}

async fn duel(
    catalog: &LocalCatalog,
    first: TrackId,
    second: TrackId,
    outcome: MatchOutcome,
) -> error::Result<()> {
    let (new_first, new_second) = catalog.record_match(first, second, outcome).await?;

    println!("Track {}: {:.1}", first, new_first);
    println!("Track {}: {:.1}", second, new_second);

    Ok(())
}

async fn show(catalog: &LocalCatalog, track_id: TrackId) -> error::Result<()> {
    let track = catalog
        .get_track(track_id)
        .await?
        .ok_or(CliError::TrackNotFound(track_id))?;

    print_track(&track);
    Ok(())
}

fn print_track(track: &Track) {
    println!("#{} {}", track.id, track.title);
    println!("  Ranking:  {:.1}", track.ranking);
    if let Some(mbid) = &track.musicbrainz_id {
        println!("  MBID:     {}", mbid);
    }
    println!("  Artist:   {}", track.primary_artist.name);
    if !track.other_artists.is_empty() {
        println!("  With:     {}", track.other_artist_names().join(", "));
    }
    for album in &track.albums {
        println!("  Album:    {}", album.title);
    }
}
