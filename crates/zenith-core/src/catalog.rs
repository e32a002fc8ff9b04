//! Static marketing content compiled into the binary.
//!
//! Layout:
//!   content/services.yaml: service offerings with package pricing
//!   content/case_studies.yaml: portfolio entries
//!   content/jobs.yaml: open positions
//!   content/pricing.yaml: site-wide pricing packages
//!   content/posts.yaml: seed blog posts used when the store is empty
//!
//! Each document is parsed on first use and cached for the process lifetime.

use crate::error::{Result, ZenithError};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const SERVICES_YAML: &str = include_str!("../content/services.yaml");
const CASE_STUDIES_YAML: &str = include_str!("../content/case_studies.yaml");
const JOBS_YAML: &str = include_str!("../content/jobs.yaml");
const PRICING_YAML: &str = include_str!("../content/pricing.yaml");
const POSTS_YAML: &str = include_str!("../content/posts.yaml");

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicePackage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub title: String,
    pub slug: String,
    pub tagline: String,
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub pricing: Vec<ServicePackage>,
    #[serde(default)]
    pub faq: Vec<Faq>,
    /// Slugs into the case-study catalog.
    #[serde(default)]
    pub case_studies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub image: String,
    pub industry: String,
    #[serde(default)]
    pub services: Vec<String>,
    pub problem: String,
    pub approach: String,
    pub results: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub slug: String,
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Site-wide package. Missing prices render as "Custom".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingPackage {
    pub name: String,
    #[serde(default)]
    pub monthly: Option<u32>,
    #[serde(default)]
    pub onetime: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedPost {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
}

/// A service with its case studies resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub related_case_studies: Vec<CaseStudy>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

struct Catalog {
    services: Vec<Service>,
    case_studies: Vec<CaseStudy>,
    jobs: Vec<Job>,
    pricing: Vec<PricingPackage>,
    posts: Vec<SeedPost>,
}

fn parse<T: serde::de::DeserializeOwned>(name: &str, yaml: &str) -> Result<Vec<T>> {
    serde_yaml::from_str(yaml).map_err(|e| ZenithError::Catalog(format!("{name}: {e}")))
}

fn load() -> Result<Catalog> {
    Ok(Catalog {
        services: parse("services.yaml", SERVICES_YAML)?,
        case_studies: parse("case_studies.yaml", CASE_STUDIES_YAML)?,
        jobs: parse("jobs.yaml", JOBS_YAML)?,
        pricing: parse("pricing.yaml", PRICING_YAML)?,
        posts: parse("posts.yaml", POSTS_YAML)?,
    })
}

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| match load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("embedded catalog is invalid: {e}");
            Catalog {
                services: Vec::new(),
                case_studies: Vec::new(),
                jobs: Vec::new(),
                pricing: Vec::new(),
                posts: Vec::new(),
            }
        }
    })
}

/// Parse every embedded document, reporting the first failure.
pub fn check() -> Result<()> {
    load().map(|_| ())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn services() -> &'static [Service] {
    &catalog().services
}

pub fn service(slug: &str) -> Option<&'static Service> {
    services().iter().find(|s| s.slug == slug)
}

pub fn service_detail(slug: &str) -> Option<ServiceDetail> {
    let service = service(slug)?.clone();
    let related_case_studies = service
        .case_studies
        .iter()
        .filter_map(|s| case_study(s).cloned())
        .collect();
    Some(ServiceDetail {
        service,
        related_case_studies,
    })
}

pub fn case_studies() -> &'static [CaseStudy] {
    &catalog().case_studies
}

pub fn case_study(slug: &str) -> Option<&'static CaseStudy> {
    case_studies().iter().find(|c| c.slug == slug)
}

pub fn jobs() -> &'static [Job] {
    &catalog().jobs
}

pub fn job(slug: &str) -> Option<&'static Job> {
    jobs().iter().find(|j| j.slug == slug)
}

pub fn pricing() -> &'static [PricingPackage] {
    &catalog().pricing
}

pub fn seed_posts() -> &'static [SeedPost] {
    &catalog().posts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_documents_parse() {
        check().unwrap();
        assert!(!services().is_empty());
        assert!(!jobs().is_empty());
        assert!(!case_studies().is_empty());
        assert_eq!(pricing().len(), 3);
        assert_eq!(seed_posts().len(), 3);
    }

    #[test]
    fn slugs_are_unique_per_collection() {
        let mut slugs: Vec<&str> = services().iter().map(|s| s.slug.as_str()).collect();
        let before = slugs.len();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), before);

        let mut slugs: Vec<&str> = case_studies().iter().map(|c| c.slug.as_str()).collect();
        let before = slugs.len();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), before);
    }

    #[test]
    fn every_service_case_study_resolves() {
        for s in services() {
            for cs in &s.case_studies {
                assert!(case_study(cs).is_some(), "{} references missing {cs}", s.slug);
            }
        }
    }

    #[test]
    fn service_detail_includes_related_case_studies() {
        let detail = service_detail("ai-automation").unwrap();
        let slugs: Vec<&str> = detail
            .related_case_studies
            .iter()
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(slugs, ["ai-automation-case", "process-automation"]);
    }

    #[test]
    fn job_type_is_renamed_on_the_wire() {
        let job = job("data-scientist").unwrap();
        assert_eq!(job.kind, "Contract");
        let json = serde_json::to_value(job).unwrap();
        assert_eq!(json["type"], "Contract");
    }

    #[test]
    fn enterprise_pricing_has_no_fixed_price() {
        let ent = pricing().iter().find(|p| p.name == "Enterprise").unwrap();
        assert!(ent.monthly.is_none() && ent.onetime.is_none());
    }

    #[test]
    fn unknown_slugs_return_none() {
        assert!(service("nope").is_none());
        assert!(job("nope").is_none());
        assert!(service_detail("nope").is_none());
    }
}
