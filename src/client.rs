//! Client for the remote study index.
//!
//! The committed query string is used verbatim (percent-encoded) as a path
//! segment of `GET {base}/query/{query}/studies`. Every failure mode —
//! transport error, non-2xx status, malformed JSON — maps to an empty
//! result list with no user-facing error: an expected "no query yet"
//! condition must not flash error banners. [`StudiesClient::try_fetch`]
//! keeps the failures observable for tests and debug logging.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::time::Duration;

use crate::utils::percent_encode;

/// Request timeout for study lookups.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Studies shown per results page.
pub const PAGE_SIZE: usize = 20;

/// A resolved study record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Study {
    pub title: String,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub year: Option<i64>,
    pub study_id: Option<String>,
    pub n_contrasts: Option<u64>,
}

impl Study {
    /// PubMed link for studies that resolved an id.
    pub fn pubmed_url(&self) -> Option<String> {
        self.study_id
            .as_ref()
            .map(|id| format!("https://pubmed.ncbi.nlm.nih.gov/{}/", percent_encode(id)))
    }
}

/// Wire-format study record. The remote index is loose about field names
/// and value types, so everything is optional here and resolved into
/// [`Study`] by a fixed priority list.
#[derive(Debug, Default, Deserialize)]
struct RawStudy {
    title: Option<String>,
    authors: Option<String>,
    journal: Option<String>,
    year: Option<Value>,
    study_id: Option<Value>,
    id: Option<Value>,
    pmid: Option<Value>,
    contrast: Option<Value>,
    contrasts: Option<Value>,
    n_contrasts: Option<Value>,
    #[serde(rename = "nContrasts")]
    n_contrasts_camel: Option<Value>,
}

impl RawStudy {
    fn resolve(self) -> Study {
        // id: study_id, then id, then pmid; first present field wins
        let study_id = [self.study_id, self.id, self.pmid]
            .into_iter()
            .flatten()
            .next()
            .and_then(|v| value_to_string(&v))
            .filter(|s| !s.is_empty());

        // contrast count: contrast, contrasts, n_contrasts, nContrasts
        let n_contrasts = [
            self.contrast,
            self.contrasts,
            self.n_contrasts,
            self.n_contrasts_camel,
        ]
        .into_iter()
        .flatten()
        .next()
        .and_then(|v| value_to_u64(&v));

        Study {
            title: self.title.unwrap_or_default(),
            authors: self.authors,
            journal: self.journal,
            year: self.year.as_ref().and_then(value_to_i64),
            study_id,
            n_contrasts,
        }
    }
}

fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Lookup response envelope; a missing `results` array means zero results.
#[derive(Debug, Default, Deserialize)]
struct StudiesResponse {
    #[serde(default)]
    results: Vec<RawStudy>,
}

/// Blocking HTTP client for the study index.
pub struct StudiesClient {
    base: String,
}

impl StudiesClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// Build the lookup URL for a query.
    pub fn studies_url(&self, query: &str) -> String {
        format!("{}/query/{}/studies", self.base, percent_encode(query))
    }

    /// Fetch studies for a committed query, swallowing every failure into
    /// an empty list. An empty query never goes on the wire.
    pub fn fetch(&self, query: &str) -> Vec<Study> {
        if query.is_empty() {
            return Vec::new();
        }
        match self.try_fetch(query) {
            Ok(studies) => studies,
            Err(err) => {
                log::debug!("study lookup failed: {err:#}");
                Vec::new()
            }
        }
    }

    /// Fetch studies, surfacing failures. The interactive surface only ever
    /// goes through [`StudiesClient::fetch`].
    pub fn try_fetch(&self, query: &str) -> Result<Vec<Study>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start fetch runtime")?;
        runtime.block_on(self.fetch_async(query))
    }

    async fn fetch_async(&self, query: &str) -> Result<Vec<Study>> {
        let url = self.studies_url(query);
        let uri: hyper::Uri = url
            .parse()
            .with_context(|| format!("invalid lookup URL: {url}"))?;

        let client = hyper::Client::new();
        let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(uri))
            .await
            .context("study lookup timed out")?
            .context("study lookup request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("study lookup returned HTTP {status}");
        }

        let body = hyper::body::to_bytes(response.into_body())
            .await
            .context("failed to read study lookup body")?;
        let parsed: StudiesResponse =
            serde_json::from_slice(&body).context("study lookup returned malformed JSON")?;

        Ok(parsed.results.into_iter().map(RawStudy::resolve).collect())
    }
}

/// Sort key for the results pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Year,
    Journal,
    Title,
    Authors,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Year => "year",
            SortKey::Journal => "journal",
            SortKey::Title => "title",
            SortKey::Authors => "authors",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::Year => SortKey::Journal,
            SortKey::Journal => SortKey::Title,
            SortKey::Title => SortKey::Authors,
            SortKey::Authors => SortKey::Year,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggled(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDir::Asc => "^",
            SortDir::Desc => "v",
        }
    }
}

/// Order studies for display. Year compares numerically (missing years
/// sort as 0); the other keys compare as strings (missing fields as "").
pub fn sort_studies<'a>(rows: &'a [Study], key: SortKey, dir: SortDir) -> Vec<&'a Study> {
    let mut sorted: Vec<&Study> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = match key {
            SortKey::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
            SortKey::Journal => cmp_str(&a.journal, &b.journal),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Authors => cmp_str(&a.authors, &b.authors),
        };
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
    sorted
}

fn cmp_str(a: &Option<String>, b: &Option<String>) -> Ordering {
    a.as_deref().unwrap_or("").cmp(b.as_deref().unwrap_or(""))
}

/// Number of pages for a result count (at least one).
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}
