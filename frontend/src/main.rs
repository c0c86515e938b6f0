//! `portal-search`: run a catalog file through a search controller from the command line.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use portal_backend::catalogs::{CatalogKind, associates_config, courses_config, directory_units_config, events_config};
use portal_backend::db_utils::json_catalog::load_catalog;
use portal_backend::search::SearchConfig;
use portal_common::search_result::{FacetOptionPolicy, FacetOptionSort};
use portal_frontend::{ControllerSettings, MemoryUrlState, SearchController};
use serde::{Serialize, de::DeserializeOwned};
use tracing_subscriber::EnvFilter;


#[derive(Debug, Parser)]
#[command(name = "portal-search", about = "Filter a portal catalog the way a search page would")]
struct Cli {
    /// Which collection the file holds: units, associates, events or courses
    #[arg(long)]
    catalog: CatalogKind,

    /// JSON file with the records (an array, or {"data": [...]})
    #[arg(long)]
    file: PathBuf,

    /// Page URL query string to mount with, e.g. "?q=dubai&sectors=Operations"
    #[arg(long, default_value = "")]
    url: String,

    /// Text-box values to replay as rapid keystrokes before printing
    #[arg(long = "type")]
    typed: Vec<String>,

    /// Facet toggles as key=value, applied after typing
    #[arg(long = "toggle")]
    toggles: Vec<String>,

    #[arg(long, env = "PORTAL_SEARCH_FACET_POLICY")]
    facet_policy: Option<FacetOptionPolicy>,

    #[arg(long, env = "PORTAL_SEARCH_OPTION_SORT")]
    option_sort: Option<FacetOptionSort>,

    /// Print at most this many records
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Serialize)]
struct SearchReport<'a, R> {
    url: &'a str,
    query: &'a str,
    result_count: usize,
    commits: u64,
    results: Vec<&'a R>,
    facets: Vec<portal_common::search_result::SearchResultFacets>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = ControllerSettings::from_env();
    if let Some(policy) = cli.facet_policy {
        settings.facet_option_policy = policy;
    }
    if let Some(sort) = cli.option_sort {
        settings.option_sort = sort;
    }

    match cli.catalog {
        CatalogKind::Units => run(&cli, directory_units_config(), settings).await,
        CatalogKind::Associates => run(&cli, associates_config(), settings).await,
        CatalogKind::Events => run(&cli, events_config(), settings).await,
        CatalogKind::Courses => run(&cli, courses_config(), settings).await,
    }
}

async fn run<R>(cli: &Cli, config: SearchConfig<R>, settings: ControllerSettings) -> anyhow::Result<()>
where
    R: Serialize + DeserializeOwned,
{
    let records = load_catalog::<R>(&cli.file).await?;
    let mut controller = SearchController::mount(records, config, settings, MemoryUrlState::new(cli.url.clone()));

    // replay typing faster than the debounce window, then let it settle
    let t0 = Instant::now();
    let keystroke_gap = Duration::from_millis(10);
    let mut now = t0;
    for text in &cli.typed {
        controller.input_query(text.clone(), now);
        now += keystroke_gap;
    }
    if let Some(deadline) = controller.next_deadline() {
        controller.poll(deadline);
    }

    for toggle in &cli.toggles {
        let (facet_key, value) = toggle
            .split_once('=')
            .with_context(|| format!("--toggle expects key=value, got {toggle:?}"))?;
        if !controller.toggle_facet(facet_key, value) {
            tracing::warn!("{} has no facet named {facet_key:?}", cli.catalog);
        }
    }

    let report = SearchReport {
        url: controller.url_state().query(),
        query: &controller.selection().query_string,
        result_count: controller.result_count(),
        commits: controller.commit_count(),
        results: controller.filtered_results().into_iter().take(cli.limit).collect(),
        facets: controller.facet_option_lists(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
