//! REST implementation of [`Backend`]
//!
//! Each collection is a `GET` on a fixed path, scoped by query parameters.
//! Responses may be a bare JSON array or a paginated `{"results": [...]}`
//! envelope; both are accepted.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::backend::Backend;
use crate::config::ApiConfig;
use crate::entities::{
    AcademicYear, Batch, PracticalBatch, Program, Regulation, Section, Semester, Subject,
    SubjectType,
};

const ACADEMIC_YEARS_PATH: &str = "academic-years/";
const PROGRAMS_PATH: &str = "programs/";
const REGULATIONS_PATH: &str = "regulations/";
const BATCHES_PATH: &str = "batches/";
const SEMESTERS_PATH: &str = "batch-semesters/";
const SECTIONS_PATH: &str = "sections/";
const PRACTICAL_BATCHES_PATH: &str = "practical-batches/";
const SUBJECTS_PATH: &str = "subjects/";

/// Characters of an error body kept in the error message
const ERROR_BODY_PREVIEW: usize = 200;

/// Upper bound on `next` links followed for one collection
const MAX_PAGES: usize = 1000;

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Page {
        results: Vec<T>,
        #[serde(default)]
        next: Option<String>,
    },
}

impl<T> Listing<T> {
    /// Split into this page's items and the link to the following page
    fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            Listing::Bare(items) => (items, None),
            Listing::Page { results, next } => (results, next),
        }
    }
}

/// Backend that talks to the college REST API
#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    config: ApiConfig,
}

impl HttpBackend {
    /// Create a new client from the given configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, config })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the full URL for an endpoint path and its query parameters
    pub fn endpoint_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.config.base_url, path);
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        parsed.with_context(|| format!("Invalid endpoint URL {}", raw))
    }

    /// Fetch every page of a collection, following `next` links
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut url = self.endpoint_url(path, query)?;
        let mut items = Vec::new();

        for _ in 0..MAX_PAGES {
            let (page, next) = self.fetch_page::<T>(&url).await?.into_parts();
            items.extend(page);

            match next {
                Some(next) => {
                    url = url
                        .join(&next)
                        .with_context(|| format!("Invalid next page link {}", next))?;
                }
                None => return Ok(items),
            }
        }

        Err(anyhow!(
            "Gave up on {} after {} pages",
            path,
            MAX_PAGES
        ))
    }

    async fn fetch_page<T: DeserializeOwned>(&self, url: &Url) -> Result<Listing<T>> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "API error {} for {}: {}",
                status,
                url,
                body.chars().take(ERROR_BODY_PREVIEW).collect::<String>()
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_academic_years(&self) -> Result<Vec<AcademicYear>> {
        self.fetch_list(ACADEMIC_YEARS_PATH, &[]).await
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        self.fetch_list(PROGRAMS_PATH, &[]).await
    }

    async fn list_regulations(&self) -> Result<Vec<Regulation>> {
        self.fetch_list(REGULATIONS_PATH, &[]).await
    }

    async fn list_batches(&self, program_id: Option<i64>) -> Result<Vec<Batch>> {
        let query: Vec<(&str, String)> = program_id
            .map(|id| vec![("program_id", id.to_string())])
            .unwrap_or_default();
        self.fetch_list(BATCHES_PATH, &query).await
    }

    async fn list_semesters(&self, batch_id: i64) -> Result<Vec<Semester>> {
        self.fetch_list(SEMESTERS_PATH, &[("batch_id", batch_id.to_string())])
            .await
    }

    async fn list_sections(&self, batch_semester_id: i64) -> Result<Vec<Section>> {
        self.fetch_list(
            SECTIONS_PATH,
            &[("batch_semester_id", batch_semester_id.to_string())],
        )
        .await
    }

    async fn list_practical_batches(&self, batch_semester_id: i64) -> Result<Vec<PracticalBatch>> {
        self.fetch_list(
            PRACTICAL_BATCHES_PATH,
            &[("batch_semester_id", batch_semester_id.to_string())],
        )
        .await
    }

    async fn list_subjects(
        &self,
        batch_semester_id: i64,
        subject_type: Option<SubjectType>,
    ) -> Result<Vec<Subject>> {
        let mut query = vec![("batch_semester_id", batch_semester_id.to_string())];
        if let Some(kind) = subject_type {
            query.push(("subject_type", kind.to_string()));
        }
        self.fetch_list(SUBJECTS_PATH, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpBackend {
        HttpBackend::new(ApiConfig::default().with_base_url("https://college.example/api")).unwrap()
    }

    #[test]
    fn test_endpoint_url_with_query() {
        let url = backend()
            .endpoint_url(
                SUBJECTS_PATH,
                &[
                    ("batch_semester_id", "101".to_string()),
                    ("subject_type", SubjectType::Theory.to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://college.example/api/subjects/?batch_semester_id=101&subject_type=theory"
        );
    }

    #[test]
    fn test_endpoint_url_without_query() {
        let url = backend().endpoint_url(PROGRAMS_PATH, &[]).unwrap();
        assert_eq!(url.as_str(), "https://college.example/api/programs/");
    }

    #[test]
    fn test_listing_accepts_both_shapes() {
        let bare: Listing<Program> =
            serde_json::from_str(r#"[{"id": 7, "name": "B.Tech CSE"}]"#).unwrap();
        let (programs, next) = bare.into_parts();
        assert_eq!(programs.len(), 1);
        assert_eq!(next, None);

        let page: Listing<Program> = serde_json::from_str(
            r#"{"count": 2, "next": "https://college.example/api/programs/?page=2", "results": [{"id": 7, "name": "B.Tech CSE"}]}"#,
        )
        .unwrap();
        let (programs, next) = page.into_parts();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].id, 7);
        assert_eq!(
            next.as_deref(),
            Some("https://college.example/api/programs/?page=2")
        );
    }
}
