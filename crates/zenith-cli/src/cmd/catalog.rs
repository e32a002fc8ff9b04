use crate::output::{print_json, print_table};
use anyhow::{bail, Result};
use clap::Subcommand;
use zenith_core::catalog;

#[derive(Subcommand)]
pub enum CatalogSubcommand {
    /// List services, or show one with its related case studies
    Services {
        /// Service slug
        slug: Option<String>,
    },
    /// List open positions, or show one
    Jobs {
        /// Job slug
        slug: Option<String>,
    },
    /// List portfolio case studies
    CaseStudies,
    /// List pricing packages
    Pricing,
}

pub fn run(subcmd: CatalogSubcommand, json: bool) -> Result<()> {
    catalog::check()?;
    match subcmd {
        CatalogSubcommand::Services { slug: None } => services(json),
        CatalogSubcommand::Services { slug: Some(slug) } => service(&slug, json),
        CatalogSubcommand::Jobs { slug: None } => jobs(json),
        CatalogSubcommand::Jobs { slug: Some(slug) } => job(&slug, json),
        CatalogSubcommand::CaseStudies => case_studies(json),
        CatalogSubcommand::Pricing => pricing(json),
    }
}

fn services(json: bool) -> Result<()> {
    let services = catalog::services();
    if json {
        return print_json(&services);
    }
    let rows = services
        .iter()
        .map(|s| vec![s.slug.clone(), s.title.clone(), s.tagline.clone()])
        .collect();
    print_table(&["SLUG", "TITLE", "TAGLINE"], rows);
    Ok(())
}

fn service(slug: &str, json: bool) -> Result<()> {
    let Some(detail) = catalog::service_detail(slug) else {
        bail!("service '{slug}' not found");
    };
    if json {
        return print_json(&detail);
    }
    let s = &detail.service;
    println!("{}: {}", s.title, s.tagline);
    println!();
    println!("Problem:  {}", s.problem);
    println!("Solution: {}", s.solution);
    if !s.deliverables.is_empty() {
        println!();
        println!("Deliverables:");
        for d in &s.deliverables {
            println!("  - {d}");
        }
    }
    if !s.pricing.is_empty() {
        println!();
        let rows = s
            .pricing
            .iter()
            .map(|p| vec![p.name.clone(), p.price.clone().unwrap_or_else(|| "-".into())])
            .collect();
        print_table(&["PACKAGE", "PRICE"], rows);
    }
    if !detail.related_case_studies.is_empty() {
        println!();
        println!("Case studies:");
        for cs in &detail.related_case_studies {
            println!("  - {} ({})", cs.title, cs.slug);
        }
    }
    Ok(())
}

fn jobs(json: bool) -> Result<()> {
    let jobs = catalog::jobs();
    if json {
        return print_json(&jobs);
    }
    let rows = jobs
        .iter()
        .map(|j| {
            vec![
                j.slug.clone(),
                j.title.clone(),
                j.location.clone(),
                j.kind.clone(),
            ]
        })
        .collect();
    print_table(&["SLUG", "TITLE", "LOCATION", "TYPE"], rows);
    Ok(())
}

fn job(slug: &str, json: bool) -> Result<()> {
    let Some(job) = catalog::job(slug) else {
        bail!("job '{slug}' not found");
    };
    if json {
        return print_json(job);
    }
    println!("{} ({}, {})", job.title, job.location, job.kind);
    println!();
    println!("{}", job.description);
    if !job.requirements.is_empty() {
        println!();
        println!("Requirements:");
        for r in &job.requirements {
            println!("  - {r}");
        }
    }
    Ok(())
}

fn case_studies(json: bool) -> Result<()> {
    let studies = catalog::case_studies();
    if json {
        return print_json(&studies);
    }
    let rows = studies
        .iter()
        .map(|c| vec![c.slug.clone(), c.title.clone(), c.industry.clone()])
        .collect();
    print_table(&["SLUG", "TITLE", "INDUSTRY"], rows);
    Ok(())
}

fn money(v: Option<u32>) -> String {
    v.map_or_else(|| "custom".to_string(), |n| format!("${n}"))
}

fn pricing(json: bool) -> Result<()> {
    let packages = catalog::pricing();
    if json {
        return print_json(&packages);
    }
    let rows = packages
        .iter()
        .map(|p| vec![p.name.clone(), money(p.monthly), money(p.onetime)])
        .collect();
    print_table(&["PACKAGE", "MONTHLY", "ONE-TIME"], rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_custom_quotes() {
        assert_eq!(money(Some(1500)), "$1500");
        assert_eq!(money(None), "custom");
    }
}
