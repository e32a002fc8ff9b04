use crate::output::{print_json, print_table};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use zenith_core::post::PostInput;
use zenith_core::store::Backend;
use zenith_core::{application, consultation, lead, post, ZenithError};
use zenith_server::supabase::SupabaseBackend;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum AdminSubcommand {
    /// Contact-form leads
    Leads {
        #[command(subcommand)]
        subcommand: RecordSubcommand,
    },
    /// Job applications
    Applications {
        #[command(subcommand)]
        subcommand: RecordSubcommand,
    },
    /// Blog posts
    Posts {
        #[command(subcommand)]
        subcommand: PostSubcommand,
    },
    /// Booked consultation calls
    Consultations,
    /// Record counts
    Summary,
}

#[derive(Subcommand)]
pub enum RecordSubcommand {
    /// List records, newest first
    List,
    /// Set a record's triage status
    Status { id: String, status: String },
    /// Delete records by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum PostSubcommand {
    /// List stored posts
    List,
    /// Publish a post
    Create {
        #[arg(long)]
        title: String,
        /// Publication date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Defaults to the title, lowercased and hyphenated
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        /// Markdown file holding the post body
        #[arg(long)]
        content_file: PathBuf,
    },
    /// Delete a post by id
    Delete { id: String },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config_path: &Path, subcmd: AdminSubcommand, json: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let backend = SupabaseBackend::from_settings(&config.supabase)?
        .ok_or(ZenithError::MissingCredentials)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(dispatch(&backend, subcmd, json))
}

async fn dispatch(backend: &Backend, subcmd: AdminSubcommand, json: bool) -> Result<()> {
    let store = backend.store.as_ref();
    match subcmd {
        AdminSubcommand::Leads { subcommand } => match subcommand {
            RecordSubcommand::List => list_leads(backend, json).await,
            RecordSubcommand::Status { id, status } => {
                let row = lead::set_status(store, &id, &status).await?;
                report(&row, json, &format!("Lead {id} → {status}"))
            }
            RecordSubcommand::Delete { ids } => {
                lead::delete_many(store, &ids).await?;
                report(&ids, json, &format!("Deleted {} lead(s)", ids.len()))
            }
        },
        AdminSubcommand::Applications { subcommand } => match subcommand {
            RecordSubcommand::List => list_applications(backend, json).await,
            RecordSubcommand::Status { id, status } => {
                let row = application::set_status(store, &id, &status).await?;
                report(&row, json, &format!("Application {id} → {status}"))
            }
            RecordSubcommand::Delete { ids } => {
                application::delete_many(store, &ids).await?;
                report(&ids, json, &format!("Deleted {} application(s)", ids.len()))
            }
        },
        AdminSubcommand::Posts { subcommand } => run_posts(backend, subcommand, json).await,
        AdminSubcommand::Consultations => {
            let rows = consultation::list(store).await?;
            if json {
                return print_json(&rows);
            }
            let rows = rows
                .iter()
                .map(|r| vec![cell(r, "id"), cell(r, "name"), cell(r, "email"), cell(r, "scheduled_at")])
                .collect();
            print_table(&["ID", "NAME", "EMAIL", "SCHEDULED"], rows);
            Ok(())
        }
        AdminSubcommand::Summary => {
            let summary = serde_json::json!({
                "leads": lead::count(store).await?,
                "applications": application::count(store).await?,
                "posts": post::count(store).await?,
            });
            if json {
                return print_json(&summary);
            }
            println!(
                "{} leads, {} applications, {} posts",
                summary["leads"], summary["applications"], summary["posts"]
            );
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn report<T: serde::Serialize>(value: &T, json: bool, message: &str) -> Result<()> {
    if json {
        print_json(value)
    } else {
        println!("{message}");
        Ok(())
    }
}

/// Display text for a row column; null and missing render as `-`.
fn cell(row: &serde_json::Value, key: &str) -> String {
    match row.get(key) {
        None | Some(serde_json::Value::Null) => "-".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

async fn list_leads(backend: &Backend, json: bool) -> Result<()> {
    let leads = lead::list_typed(backend.store.as_ref()).await?;
    if json {
        return print_json(&leads);
    }
    let rows = leads
        .iter()
        .map(|l| {
            vec![
                l.id.clone(),
                l.name.clone(),
                l.email.clone(),
                opt(&l.source),
                opt(&l.budget),
                opt(&l.status),
                opt(&l.created_at),
            ]
        })
        .collect();
    print_table(
        &["ID", "NAME", "EMAIL", "SERVICE", "BUDGET", "STATUS", "CREATED"],
        rows,
    );
    Ok(())
}

async fn list_applications(backend: &Backend, json: bool) -> Result<()> {
    let apps = application::list_typed(backend.store.as_ref()).await?;
    if json {
        return print_json(&apps);
    }
    let rows = apps
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.name.clone(),
                a.email.clone(),
                a.job_slug.clone(),
                opt(&a.status),
                opt(&a.resume_url),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "EMAIL", "JOB", "STATUS", "RESUME"], rows);
    Ok(())
}

async fn run_posts(backend: &Backend, subcmd: PostSubcommand, json: bool) -> Result<()> {
    let store = backend.store.as_ref();
    match subcmd {
        PostSubcommand::List => {
            let rows = post::list(store).await?;
            if json {
                return print_json(&rows);
            }
            let rows = rows
                .iter()
                .map(|r| vec![cell(r, "id"), cell(r, "date"), cell(r, "slug"), cell(r, "title")])
                .collect();
            print_table(&["ID", "DATE", "SLUG", "TITLE"], rows);
            Ok(())
        }
        PostSubcommand::Create {
            title,
            date,
            slug,
            excerpt,
            content_file,
        } => {
            let content = std::fs::read_to_string(&content_file)
                .with_context(|| format!("failed to read {}", content_file.display()))?;
            let input = PostInput {
                title: Some(title),
                slug,
                date: Some(date),
                excerpt,
                content: Some(content),
            };
            let row = post::create(store, &input).await?;
            report(&row, json, &format!("Published {}", cell(&row, "slug")))
        }
        PostSubcommand::Delete { id } => {
            post::delete(store, &id).await?;
            report(&id, json, &format!("Deleted post {id}"))
        }
    }
}
