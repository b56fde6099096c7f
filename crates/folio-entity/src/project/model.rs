//! Project entity and list payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::types::Paged;

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description shown on cards.
    pub description: String,
    /// Long-form description for the detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Technologies used.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Source repository URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    /// Live deployment URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Feature bullet points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// URL slug, unique per project.
    pub slug: String,
    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the project is highlighted on the home page.
    #[serde(default)]
    pub featured: bool,
    /// Free-form start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Free-form end date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Paged project list as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsPage {
    /// Projects on this page.
    pub projects: Vec<Project>,
    /// Total matching projects.
    pub total: u64,
    /// Current page (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

/// The list endpoint answers either with a page or with a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProjectListResponse {
    /// `{projects, total, page, limit, totalPages}`
    Paged(ProjectsPage),
    /// `[...]`
    Bare(Vec<Project>),
}

impl From<ProjectsPage> for Paged<Project> {
    fn from(page: ProjectsPage) -> Self {
        Self {
            items: page.projects,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

impl From<ProjectListResponse> for Paged<Project> {
    fn from(resp: ProjectListResponse) -> Self {
        match resp {
            ProjectListResponse::Paged(page) => page.into(),
            ProjectListResponse::Bare(items) => Paged::single(items),
        }
    }
}
