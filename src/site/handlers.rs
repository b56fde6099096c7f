//! Route handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Html;
use serde::Serialize;
use tracing::warn;

use folio_client::services::ProjectFilters;
use folio_core::config::SiteConfig;
use folio_entity::personal::PersonalInfo;
use folio_service::status::StatusView;

use super::error::SiteError;
use super::render::{IndexPage, ProjectCard, ProjectPage, group_skills, render};
use super::state::SiteState;

/// GET /
///
/// Every section degrades: the profile falls back to the configured
/// identity, skills and projects to empty sections.
pub async fn index(State(state): State<SiteState>) -> Result<Html<String>, SiteError> {
    let services = &state.services;
    let filters = ProjectFilters::default();
    let (info, skills, projects) = futures::join!(
        services.personal.get(),
        services.skills.list(),
        services.projects.list(&filters),
    );

    let info = info.unwrap_or_else(|e| {
        warn!(error = %e, "Profile unavailable, using site defaults");
        fallback_profile(&state.config.site)
    });
    let skills = skills.unwrap_or_else(|e| {
        warn!(error = %e, "Skills unavailable");
        Vec::new()
    });
    let projects = match projects {
        Ok(page) => page.items,
        Err(e) => {
            warn!(error = %e, "Projects unavailable");
            Vec::new()
        }
    };

    let page = IndexPage {
        info,
        status: state.current_status(),
        skill_groups: group_skills(&skills),
        projects: projects.iter().map(ProjectCard::from).collect(),
    };
    Ok(Html(render(&page)?))
}

fn fallback_profile(site: &SiteConfig) -> PersonalInfo {
    PersonalInfo {
        name: site.name.clone(),
        title: site.title.clone(),
        description: site.description.clone(),
        email: site.email.clone(),
        social_links: Some(Vec::new()),
        ..Default::default()
    }
}

/// GET /project/{slug}
pub async fn project(
    State(state): State<SiteState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, SiteError> {
    let project = state.services.projects.get_by_slug(&slug).await?;
    Ok(Html(render(&ProjectPage::new(project))?))
}

/// GET /status
pub async fn status(State(state): State<SiteState>) -> Json<Option<StatusView>> {
    Json(state.current_status())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
