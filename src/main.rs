// src/main.rs
//
// Command-line host for the list pipeline. Prints the host JSON contract.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use doubanhub::application::{load_list, AppState, ListRequestDto};
use doubanhub::config::PipelineConfig;

#[derive(Parser)]
#[command(name = "doubanhub", about = "Douban lists resolved against TMDB")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// 1-based page number
    #[arg(long, global = true, default_value_t = 1)]
    page: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// A user's watch list
    Interests {
        user_id: String,
        /// mark | doing | done | random_mark
        #[arg(long, default_value = "mark")]
        status: String,
    },
    /// Personalized suggestions (anonymous without a cookie)
    Suggestions {
        #[arg(long, default_value = "movie")]
        media: String,
        #[arg(long, default_value = "")]
        cookie: String,
    },
    /// Subject collection or doulist, by URL
    Collection { url: String },
    /// Hot movies or shows
    Recommend {
        #[arg(long, default_value = "movie")]
        media: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        region: String,
    },
    /// Works of a person
    Filmography {
        celebrity_id: String,
        /// vote | time
        #[arg(long, default_value = "vote")]
        sort_by: String,
    },
    /// Curated home-screen carousel
    Carousel,
}

impl Cli {
    fn into_dto(self) -> ListRequestDto {
        let base = ListRequestDto {
            page: Some(self.page),
            ..Default::default()
        };

        match self.command {
            Command::Interests { user_id, status } => ListRequestDto {
                list: "interests".to_string(),
                user_id,
                status,
                ..base
            },
            Command::Suggestions { media, cookie } => ListRequestDto {
                list: "suggestions".to_string(),
                media,
                cookie,
                ..base
            },
            Command::Collection { url } => ListRequestDto {
                list: "collection".to_string(),
                url,
                ..base
            },
            Command::Recommend { media, category, region } => ListRequestDto {
                list: "recommendations".to_string(),
                media,
                category,
                region,
                ..base
            },
            Command::Filmography { celebrity_id, sort_by } => ListRequestDto {
                list: "filmography".to_string(),
                celebrity_id,
                sort_by,
                ..base
            },
            Command::Carousel => ListRequestDto {
                list: "carousel".to_string(),
                ..base
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut clog = colog::default_builder();
    clog.filter(
        None,
        if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        },
    );
    clog.init();

    let config = PipelineConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if config.metadata_token.is_empty() {
        log::warn!("No metadata catalog token configured; catalog lookups will be rejected");
    }

    let state = AppState::new(config).context("failed to build HTTP client")?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let response = runtime.block_on(load_list(&state, cli.into_dto()));

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
