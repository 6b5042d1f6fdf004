use anyhow::Context;
use serde::Deserialize;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::cover_gen::{GenClient, DEFAULT_GEN_ENDPOINT};
use crate::page_scrapers::{scrape_page, ScraperState};

mod cover_gen;
mod csv_export;
mod page_scrapers;

#[derive(Deserialize)]
struct Config {
    job_urls: Vec<String>,
    #[serde(default = "default_gen_endpoint")]
    gen_endpoint: String,
}

fn default_gen_endpoint() -> String {
    DEFAULT_GEN_ENDPOINT.to_string()
}


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = std::fs::read_to_string("config.toml")?;
    let config: Config = toml::from_str(&config)?;

    let mut scrape_tasks = JoinSet::<anyhow::Result<_>>::new();
    let client = reqwest::Client::new();
    for url in config.job_urls {
        let client = client.clone();
        let gen_endpoint = config.gen_endpoint.clone();
        scrape_tasks.spawn(async move {
            let html = client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;

            let state = ScraperState {
                html,
                url: Url::parse(&url).context("Job listing URL should have been valid")?,
            };

            let Some(result) = scrape_page(&state) else {
                tracing::warn!(%url, "no scraper matched this website");
                return Ok(());
            };
            let fields = result.context(format!("Failed to scrape {url}"))?;

            let csv_path = csv_export::write_listing_csv(&fields).await?;
            tracing::info!(%url, path = %csv_path.display(), "saved listing fields");

            let Some(description) = state.job_ad_text() else {
                tracing::warn!(%url, "listing has no job ad text, skipping cover letter");
                return Ok(());
            };

            // Generation failures are logged and swallowed; they never abort the run.
            match GenClient::new(gen_endpoint, client).generate(&description).await {
                Ok(letter) => println!("{letter}"),
                Err(e) => tracing::error!(%url, error = %e, "cover letter generation failed"),
            }
            Ok(())
        });
    }

    while let Some(result) = scrape_tasks.join_next().await {
        result??;
    }

    println!("All listings processed successfully!");
    Ok(())
}
