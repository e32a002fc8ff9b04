//! Blog posts (`posts` table) with the embedded seed posts as fallback.

use crate::catalog::{self, SeedPost};
use crate::error::{Result, ZenithError};
use crate::store::{Filter, Order, Query, Row, Store};
use crate::validate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

pub const TABLE: &str = "posts";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Body of `POST /api/admin/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A published post. Stored rows pass through as-is: `id` keeps whatever
/// type the table uses, and null text columns read as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub slug: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl From<&SeedPost> for Post {
    fn from(p: &SeedPost) -> Self {
        Self {
            id: None,
            slug: p.slug.clone(),
            title: p.title.clone(),
            date: p.date.clone(),
            excerpt: p.excerpt.clone(),
            content: p.content.clone(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Post {
    /// Listing description: the excerpt, or the first 120 characters of content.
    pub fn summary(&self) -> String {
        if !self.excerpt.is_empty() {
            return self.excerpt.clone();
        }
        self.content.chars().take(120).collect()
    }
}

/// Where a public read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSource {
    Store,
    Seed,
}

// ---------------------------------------------------------------------------
// Admin API
// ---------------------------------------------------------------------------

/// Explicit slug when given, otherwise derived from the title.
pub fn resolve_slug(title: &str, slug: Option<&str>) -> String {
    match validate::present(slug) {
        Some(s) => s.trim().to_string(),
        None => validate::slugify(title),
    }
}

pub async fn create(store: &dyn Store, input: &PostInput) -> Result<Row> {
    let title = validate::present(input.title.as_deref());
    let date = validate::present(input.date.as_deref());
    let content = validate::present(input.content.as_deref());
    let (Some(title), Some(date), Some(content)) = (title, date, content) else {
        return Err(ZenithError::Validation(
            "title, date and content are required".to_string(),
        ));
    };

    let slug = resolve_slug(title, input.slug.as_deref());
    let row = store
        .insert(
            TABLE,
            json!({
                "title": title,
                "slug": slug,
                "date": date,
                "excerpt": input.excerpt.as_deref().unwrap_or_default(),
                "content": content,
            }),
        )
        .await?;
    tracing::info!(%slug, "post created");
    Ok(row)
}

/// All stored posts, newest `date` first.
pub async fn list(store: &dyn Store) -> Result<Vec<Row>> {
    store
        .select(TABLE, &Query::new().order(Order::desc("date")))
        .await
}

pub async fn delete(store: &dyn Store, id: &str) -> Result<()> {
    store.delete(TABLE, &[Filter::eq("id", id)]).await?;
    tracing::info!(%id, "post deleted");
    Ok(())
}

pub async fn count(store: &dyn Store) -> Result<usize> {
    Ok(store.select(TABLE, &Query::new()).await?.len())
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

fn seeds() -> Vec<Post> {
    catalog::seed_posts().iter().map(Post::from).collect()
}

/// Rows that don't look like a post are skipped, not fatal to the listing.
fn decode(rows: Vec<Row>) -> Vec<Post> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Post>(row) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!("skipping malformed post row: {e}");
                None
            }
        })
        .collect()
}

/// Published posts. Falls back to the seed posts when there is no store,
/// the query fails, or the table is empty.
pub async fn published(store: Option<&dyn Store>) -> (Vec<Post>, PostSource) {
    let Some(store) = store else {
        return (seeds(), PostSource::Seed);
    };
    match list(store).await.map(decode) {
        Ok(posts) if !posts.is_empty() => (posts, PostSource::Store),
        Ok(_) => (seeds(), PostSource::Seed),
        Err(e) => {
            tracing::warn!("falling back to seed posts: {e}");
            (seeds(), PostSource::Seed)
        }
    }
}

/// Look a post up by slug in the store, then among the seeds.
pub async fn find_published(store: Option<&dyn Store>, slug: &str) -> Option<Post> {
    if let Some(store) = store {
        let q = Query::new().filter(Filter::eq("slug", slug)).limit(1);
        match store.select(TABLE, &q).await.map(decode) {
            Ok(mut posts) if !posts.is_empty() => return Some(posts.remove(0)),
            Ok(_) => {}
            Err(e) => tracing::warn!(%slug, "post lookup failed, trying seeds: {e}"),
        }
    }
    seeds().into_iter().find(|p| p.slug == slug)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
