//! Admin project list: filters, fetcher and actions.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use folio_client::services::{ProjectFilters, ProjectService};
use folio_core::AppResult;
use folio_entity::project::Project;

use crate::manage::{ListFetcher, ResourceManager};

/// Filter state of the projects page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilterState {
    pub search_term: String,
    /// `None` selects every category.
    pub category: Option<String>,
    pub featured_only: bool,
}

impl ProjectFilterState {
    /// Translate page filters into list query filters.
    pub fn to_filters(&self) -> ProjectFilters {
        ProjectFilters {
            search: Some(self.search_term.clone()).filter(|s| !s.is_empty()),
            category: self.category.clone().filter(|c| c != "all"),
            featured: self.featured_only.then_some(true),
            ..Default::default()
        }
    }
}

/// Loads projects for the admin list.
#[derive(Debug, Clone)]
pub struct ProjectsFetcher {
    service: ProjectService,
}

impl ProjectsFetcher {
    pub fn new(service: ProjectService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ListFetcher for ProjectsFetcher {
    type Filters = ProjectFilterState;
    type Item = Project;
    type Stats = ();

    const ERROR_MESSAGE: &'static str = "Failed to load projects";

    async fn fetch_list(&self, filters: &ProjectFilterState) -> AppResult<Vec<Project>> {
        Ok(self.service.list(&filters.to_filters()).await?.items)
    }
}

/// Row actions on the projects page.
#[derive(Debug, Clone)]
pub struct ProjectActions {
    service: ProjectService,
    manager: Arc<ResourceManager<ProjectsFetcher>>,
}

impl ProjectActions {
    pub fn new(service: ProjectService, manager: Arc<ResourceManager<ProjectsFetcher>>) -> Self {
        Self { service, manager }
    }

    /// Route of the edit form for `project`.
    pub fn edit_route(project: &Project) -> String {
        format!("/admin/projects/edit/{}", project.id)
    }

    /// Delete a project, then reload the list.
    pub async fn delete(&self, project: &Project) -> AppResult<()> {
        if let Err(err) = self.service.delete(&project.id).await {
            warn!(project_id = %project.id, error = %err, "Error deleting project");
            return Err(err);
        }
        info!(project_id = %project.id, title = %project.title, "Project deleted");
        self.manager.refetch_data().await;
        Ok(())
    }
}
