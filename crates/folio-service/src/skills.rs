//! Admin skill list. The skills endpoint takes no query parameters, so
//! search and category filtering happen on the client.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use folio_client::services::SkillService;
use folio_core::AppResult;
use folio_entity::skill::{CreateSkillRequest, Skill, UpdateSkillRequest};

use crate::manage::{ListFetcher, ResourceManager};

/// Filter state of the skills page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillFilterState {
    pub search_term: String,
    /// `None` selects every category.
    pub category: Option<String>,
}

impl SkillFilterState {
    /// Whether `skill` passes the filters. The search term matches the
    /// name or the category, case-insensitively.
    pub fn matches(&self, skill: &Skill) -> bool {
        let term = self.search_term.to_lowercase();
        let matches_search = skill.name.to_lowercase().contains(&term)
            || skill.category.to_lowercase().contains(&term);
        let matches_category = match self.category.as_deref() {
            None | Some("all") => true,
            Some(category) => skill.category == category,
        };
        matches_search && matches_category
    }
}

/// Apply `filters` and sort by name.
pub fn filter_skills(skills: Vec<Skill>, filters: &SkillFilterState) -> Vec<Skill> {
    let mut visible: Vec<Skill> = skills.into_iter().filter(|s| filters.matches(s)).collect();
    visible.sort_by_key(|s| s.name.to_lowercase());
    visible
}

/// Distinct categories in first-seen order.
pub fn skill_categories(skills: &[Skill]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for skill in skills {
        if !categories.contains(&skill.category) {
            categories.push(skill.category.clone());
        }
    }
    categories
}

/// Loads the skill list and filters it locally.
#[derive(Debug, Clone)]
pub struct SkillsFetcher {
    service: SkillService,
}

impl SkillsFetcher {
    pub fn new(service: SkillService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ListFetcher for SkillsFetcher {
    type Filters = SkillFilterState;
    type Item = Skill;
    type Stats = ();

    const ERROR_MESSAGE: &'static str = "Failed to load skills";

    async fn fetch_list(&self, filters: &SkillFilterState) -> AppResult<Vec<Skill>> {
        Ok(filter_skills(self.service.list().await?, filters))
    }
}

/// Create, update and delete on the skills page. Results are spliced into
/// the list without a reload; created and updated skills go through the
/// page filters and name sort again.
#[derive(Debug, Clone)]
pub struct SkillActions {
    service: SkillService,
    manager: Arc<ResourceManager<SkillsFetcher>>,
}

impl SkillActions {
    pub fn new(service: SkillService, manager: Arc<ResourceManager<SkillsFetcher>>) -> Self {
        Self { service, manager }
    }

    pub async fn create(&self, req: &CreateSkillRequest) -> Option<Skill> {
        match self.service.create(req).await {
            Ok(skill) => {
                self.manager.add_item(skill.clone());
                self.manager.reshape_items(filter_skills);
                Some(skill)
            }
            Err(err) => {
                warn!(name = %req.name, error = %err, "Error adding skill");
                self.manager.set_error("Failed to add skill");
                None
            }
        }
    }

    pub async fn update(&self, id: &str, req: &UpdateSkillRequest) -> Option<Skill> {
        match self.service.update(id, req).await {
            Ok(skill) => {
                self.manager.update_item(skill.clone());
                self.manager.reshape_items(filter_skills);
                Some(skill)
            }
            Err(err) => {
                warn!(skill_id = %id, error = %err, "Error updating skill");
                self.manager.set_error("Failed to update skill");
                None
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        match self.service.delete(id).await {
            Ok(()) => {
                self.manager.remove_item(id);
                true
            }
            Err(err) => {
                warn!(skill_id = %id, error = %err, "Error deleting skill");
                self.manager.set_error("Failed to delete skill");
                false
            }
        }
    }
}
