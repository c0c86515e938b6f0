//! Loading record collections from JSON catalog files (mock tables or saved REST reads).

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};


/// A catalog file is either a bare array of records or a REST-style envelope `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile<R> {
    Records(Vec<R>),
    Envelope { data: Vec<R> },
}

pub fn parse_catalog<R: DeserializeOwned>(json_txt: &str) -> anyhow::Result<Vec<R>> {
    let parsed: CatalogFile<R> = serde_json::from_str(json_txt).context("catalog is neither a record array nor a {\"data\": [...]} envelope")?;
    Ok(match parsed {
        CatalogFile::Records(records) => records,
        CatalogFile::Envelope { data } => data,
    })
}

pub async fn load_catalog<R: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<Vec<R>> {
    let path = path.as_ref();
    let t0 = std::time::Instant::now();
    let json_txt = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let records = parse_catalog::<R>(&json_txt).with_context(|| format!("parsing catalog {}", path.display()))?;
    let dt_ms = t0.elapsed().as_millis();
    tracing::info!("loaded {} records from {} in {}ms", records.len(), path.display(), dt_ms);
    Ok(records)
}
