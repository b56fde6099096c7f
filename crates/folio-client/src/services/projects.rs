//! Project endpoints.

use std::sync::Arc;

use tracing::info;

use folio_core::AppResult;
use folio_core::types::{Paged, QueryParams};
use folio_entity::project::{
    CreateProjectRequest, Project, ProjectListResponse, UpdateProjectRequest,
};
use folio_entity::system::MessageResponse;

use crate::client::ApiClient;
use crate::endpoints::projects as ep;

/// Filters accepted by the project list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

impl ProjectFilters {
    /// Encode the set filters as query parameters.
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page.filter(|p| *p > 0))
            .push_opt("limit", self.limit.filter(|l| *l > 0))
            .push_non_empty("category", self.category.as_deref())
            .push_opt("featured", self.featured)
            .push_non_empty("search", self.search.as_deref())
    }
}

/// Typed access to `/projects`.
#[derive(Debug, Clone)]
pub struct ProjectService {
    client: Arc<ApiClient>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists projects. Accepts a paged object or a bare array.
    pub async fn list(&self, filters: &ProjectFilters) -> AppResult<Paged<Project>> {
        let resp: ProjectListResponse = self
            .client
            .get_with_query(ep::LIST, &filters.to_query())
            .await?;
        Ok(resp.into())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Project> {
        self.client.get(&ep::by_id(id)).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Project> {
        self.client.get(&ep::by_slug(slug)).await
    }

    pub async fn create(&self, req: &CreateProjectRequest) -> AppResult<Project> {
        let project: Project = self.client.post(ep::LIST, req).await?;
        info!(project_id = %project.id, slug = %project.slug, "Project created");
        Ok(project)
    }

    pub async fn update(&self, id: &str, req: &UpdateProjectRequest) -> AppResult<Project> {
        let project: Project = self.client.put(&ep::by_id(id), req).await?;
        info!(project_id = %project.id, "Project updated");
        Ok(project)
    }

    pub async fn delete(&self, id: &str) -> AppResult<MessageResponse> {
        let resp: Option<MessageResponse> = self.client.delete(&ep::by_id(id)).await?;
        info!(project_id = %id, "Project deleted");
        Ok(resp.unwrap_or_default())
    }

    pub async fn featured(&self) -> AppResult<Vec<Project>> {
        self.client.get(ep::FEATURED).await
    }

    pub async fn by_category(
        &self,
        category: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> AppResult<Paged<Project>> {
        let query = QueryParams::new()
            .push_opt("page", page.filter(|p| *p > 0))
            .push_opt("limit", limit.filter(|l| *l > 0));
        let resp: ProjectListResponse = self
            .client
            .get_with_query(&ep::by_category(category), &query)
            .await?;
        Ok(resp.into())
    }

    pub async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> AppResult<Paged<Project>> {
        let params = QueryParams::new()
            .push("q", query)
            .push_opt("page", page.filter(|p| *p > 0))
            .push_opt("limit", limit.filter(|l| *l > 0));
        let resp: ProjectListResponse = self.client.get_with_query(ep::SEARCH, &params).await?;
        Ok(resp.into())
    }
}
