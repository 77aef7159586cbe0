use anyhow::{Context, Result};
use catalog::ingest::{self, BangumiSubject};
use catalog::{CatalogStore, Record, SeasonKey};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::GenreCombinator;
use session::{Browser, SeasonView};
use std::path::PathBuf;
use std::time::Instant;
use trends::{ChartBounds, DEFAULT_WINDOW, build_trend, moving_average};

/// Characters of synopsis shown before it is cut
const SYNOPSIS_PREVIEW: usize = 150;

/// Season Tracker - browse seasonal anime catalogs
#[derive(Parser)]
#[command(name = "season-tracker")]
#[command(about = "Browse a seasonal anime catalog with filters and rating trends", long_about = None)]
struct Cli {
    /// Path to the catalog data directory
    #[arg(short, long, default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available seasons grouped by year
    Seasons,

    /// Show the entries of one season after filtering
    Browse {
        /// Season to open, e.g. 2025-spring
        season: SeasonKey,

        /// Include adult content
        #[arg(long)]
        include_adult: bool,

        /// Hide entries without a score (default depends on the season)
        #[arg(long, conflicts_with = "show_unrated")]
        hide_unrated: bool,

        /// Show entries without a score (default depends on the season)
        #[arg(long)]
        show_unrated: bool,

        /// Keep entries explicitly marked as non-Japanese productions
        #[arg(long)]
        all_origins: bool,

        /// Genre to filter by; repeat for several
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// How several genres combine: any or all
        #[arg(long, default_value = "any")]
        mode: GenreCombinator,

        /// Date used for the default toggles (YYYY-MM-DD, default today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List the genres available in one season
    Genres {
        /// Season, e.g. 2025-spring
        season: SeasonKey,
    },

    /// Rebuild the rating trend from the season files
    Trend {
        /// Save the result as rating-trend.json in the data directory
        #[arg(long)]
        write: bool,
    },

    /// Convert a Bangumi subject dump into a season file
    Ingest {
        /// Season the subjects belong to, e.g. 2025-spring
        season: SeasonKey,

        /// JSON array of Bangumi subjects
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let browser = Browser::new(cli.data_dir.clone());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Seasons => handle_seasons(&browser).await?,
        Commands::Browse {
            season,
            include_adult,
            hide_unrated,
            show_unrated,
            all_origins,
            genres,
            mode,
            today,
            limit,
        } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let mut view = browser.open_season(season, today).await?;

            view.set_include_adult(include_adult);
            if hide_unrated || show_unrated {
                view.set_hide_unrated(hide_unrated);
            }
            if all_origins {
                view.set_domestic_only(false);
            }
            for genre in &genres {
                view.select_genre(genre);
            }
            view.set_combinator(mode);

            print_season(&view, limit);
        }
        Commands::Genres { season } => {
            let view = browser.open_season(season, Local::now().date_naive()).await?;
            print_genres(&view);
        }
        Commands::Trend { write } => handle_trend(browser.store(), write)?,
        Commands::Ingest { season, input } => handle_ingest(browser.store(), season, input)?,
    }

    Ok(())
}

/// Handle the 'seasons' command
async fn handle_seasons(browser: &Browser) -> Result<()> {
    let home = browser.home().await?;

    if home.manifest.is_empty() {
        println!("No seasons available.");
        return Ok(());
    }

    for (year, seasons) in home.manifest.by_year() {
        println!("{}", year.to_string().bold().blue());
        for entry in seasons {
            println!(
                "  {} {:<8} {}",
                entry.season.icon(),
                entry.season.label(),
                format!("({})", entry.count).dimmed()
            );
        }
    }

    if let Some(trend) = &home.trend {
        println!();
        println!(
            "{} overall {:.2}, highest {:.2}, lowest {:.2}",
            "Rating trend:".bold(),
            trend.overall_average,
            trend.max_rating,
            trend.min_rating
        );
    }
    Ok(())
}

/// Handle the 'trend' command
fn handle_trend(store: &CatalogStore, write: bool) -> Result<()> {
    let start = Instant::now();
    let report = match build_trend(store)? {
        Some(report) => report,
        None => {
            println!("No data available to generate the trend.");
            return Ok(());
        }
    };
    println!("{} Built trend in {:?}", "✓".green(), start.elapsed());

    let smoothed = moving_average(&report.ratings, DEFAULT_WINDOW);
    println!("{}", "Average rating per season:".bold().blue());
    for (i, label) in report.labels.iter().enumerate() {
        let trailing = smoothed[i]
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12} {:>5.2}  (from {:>3} rated)  yearly avg {}",
            label, report.ratings[i], report.counts[i], trailing
        );
    }

    let bounds = ChartBounds::for_report(&report);
    println!();
    println!("{}", "Statistics:".bold());
    println!("  Overall Average Rating: {:.2}", report.overall_average);
    println!("  Highest Season Average: {:.2}", report.max_rating);
    println!("  Lowest Season Average: {:.2}", report.min_rating);
    println!("  Total Seasons Analyzed: {}", report.ratings.len());
    println!("  Chart range: {:.0} to {:.0}", bounds.min, bounds.max);

    if write {
        let path = store.write_trend(&report).context("Failed to save trend")?;
        println!("{} Trend saved to {}", "✓".green(), path.display());
    }
    Ok(())
}

/// Handle the 'ingest' command
fn handle_ingest(store: &CatalogStore, season: SeasonKey, input: PathBuf) -> Result<()> {
    let bytes = std::fs::read(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let subjects: Vec<BangumiSubject> =
        ingest::parse_subjects(&bytes, &input.display().to_string())?;
    let count = subjects.len();

    match ingest::ingest_season(store, season, subjects)? {
        Some(path) => println!(
            "{} Processed {} entries for {}, saved to {}",
            "✓".green(),
            count,
            season.label(),
            path.display()
        ),
        None => println!("No subjects found for {}", season.label()),
    }
    Ok(())
}

fn print_genres(view: &SeasonView) {
    println!("{}", format!("Genres in {}:", view.key().label()).bold().blue());
    if view.genres().is_empty() {
        println!("No genres available");
        return;
    }
    for genre in view.genres() {
        let count = view.records().iter().filter(|r| r.has_genre(genre)).count();
        println!("  {} {}", genre, format!("({})", count).dimmed());
    }
}

fn print_season(view: &SeasonView, limit: Option<usize>) {
    let config = view.config();
    let visible = view.visible();

    println!(
        "{} {}",
        view.key().season.icon(),
        view.key().label().bold().blue()
    );
    println!(
        "{}",
        format!(
            "adult: {} | hide unrated: {} | japanese only: {} | genres: {} ({})",
            on_off(config.include_adult_content),
            on_off(config.hide_unrated),
            on_off(config.domestic_only),
            if config.selected_genres.is_empty() {
                "All".to_string()
            } else {
                config
                    .selected_genres
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            },
            config.genre_combinator
        )
        .dimmed()
    );
    println!(
        "Showing {} of {} entries\n",
        visible.len(),
        view.records().len()
    );

    if visible.is_empty() {
        println!("No anime found with current filters.");
        return;
    }

    for record in visible.iter().take(limit.unwrap_or(usize::MAX)) {
        print_card(record);
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

/// Print one entry the way the web page lays out a card
fn print_card(record: &Record) {
    println!("{}", record.title.bold());
    if let Some(english) = record
        .title_english
        .as_deref()
        .filter(|t| !t.is_empty() && *t != record.title)
    {
        println!("  {}", english.dimmed());
    }

    let score = match record.rating {
        Some(score) => format!("⭐ {}", score).yellow(),
        None => "❓ Not rated".normal(),
    };
    let scored_by = record
        .scored_by
        .filter(|n| *n > 0)
        .map(|n| format!("  {:.1}K ratings", n as f64 / 1000.0))
        .unwrap_or_default();
    println!("  {}{}", score, scored_by.dimmed());

    if let Some(episodes) = record.episodes {
        println!("  Episodes: {}", episodes);
    }
    println!("  Studio:   {}", join_or(&record.studios, "Unknown"));
    println!("  Source:   {}", join_or(&record.source, "Unknown"));
    println!(
        "  Aired:    {}",
        record.aired_from.as_deref().filter(|d| !d.is_empty()).unwrap_or("TBA")
    );
    println!("  Genres:   {}", join_or(&record.genres, "N/A"));
    if !record.themes.is_empty() {
        println!("  Themes:   {}", record.themes.join(", "));
    }

    let synopsis = record
        .synopsis
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("No synopsis available.");
    println!("  {}", preview(synopsis).dimmed());

    if let Some(url) = &record.url {
        println!("  {}", url.cyan());
    }
    println!();
}

fn preview(text: &str) -> String {
    if text.chars().count() > SYNOPSIS_PREVIEW {
        let cut: String = text.chars().take(SYNOPSIS_PREVIEW).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_cuts_on_characters() {
        let long = "あ".repeat(SYNOPSIS_PREVIEW + 10);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), SYNOPSIS_PREVIEW + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_cli_parses_browse() {
        let cli = Cli::try_parse_from([
            "season-tracker",
            "browse",
            "2025-spring",
            "--genre",
            "Action",
            "--genre",
            "Comedy",
            "--mode",
            "all",
            "--today",
            "2025-05-02",
        ])
        .unwrap();

        match cli.command {
            Commands::Browse { season, genres, mode, today, .. } => {
                assert_eq!(season, SeasonKey::new(2025, catalog::Season::Spring));
                assert_eq!(genres, vec!["Action", "Comedy"]);
                assert_eq!(mode, GenreCombinator::All);
                assert_eq!(today, NaiveDate::from_ymd_opt(2025, 5, 2));
            }
            _ => panic!("expected browse"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_unrated_flags() {
        let result = Cli::try_parse_from([
            "season-tracker",
            "browse",
            "2025-spring",
            "--hide-unrated",
            "--show-unrated",
        ]);
        assert!(result.is_err());
    }
}
