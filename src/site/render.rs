//! Page templates and the view models behind them.

use askama::Template;

use folio_core::{AppError, AppResult};
use folio_entity::personal::PersonalInfo;
use folio_entity::project::Project;
use folio_entity::skill::Skill;
use folio_service::skills::{SkillFilterState, skill_categories};
use folio_service::status::StatusView;

/// Technologies shown on a project card before "+N more".
pub const TECHNOLOGIES_PREVIEW: usize = 3;

/// A section of the skills grid.
#[derive(Debug, Clone)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<Skill>,
}

/// Group skills by category in first-seen order, each group sorted by
/// name.
pub fn group_skills(skills: &[Skill]) -> Vec<SkillGroup> {
    skill_categories(skills)
        .into_iter()
        .map(|category| {
            let filter = SkillFilterState {
                category: Some(category.clone()),
                ..Default::default()
            };
            let mut members: Vec<Skill> =
                skills.iter().filter(|s| filter.matches(s)).cloned().collect();
            members.sort_by_key(|s| s.name.to_lowercase());
            SkillGroup {
                category,
                skills: members,
            }
        })
        .collect()
}

/// A project as its card shows it.
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub featured: bool,
    pub technologies: Vec<String>,
    /// Count of technologies left out of the preview.
    pub more: usize,
}

impl From<&Project> for ProjectCard {
    fn from(p: &Project) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            slug: p.slug.clone(),
            featured: p.featured,
            technologies: p.technologies.iter().take(TECHNOLOGIES_PREVIEW).cloned().collect(),
            more: p.technologies.len().saturating_sub(TECHNOLOGIES_PREVIEW),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub info: PersonalInfo,
    pub status: Option<StatusView>,
    pub skill_groups: Vec<SkillGroup>,
    pub projects: Vec<ProjectCard>,
}

#[derive(Template)]
#[template(path = "project.html")]
pub struct ProjectPage {
    pub project: Project,
    pub features: Vec<String>,
}

impl ProjectPage {
    pub fn new(project: Project) -> Self {
        let features = project.features.clone().unwrap_or_default();
        Self { project, features }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub code: u16,
    pub message: String,
}

/// Render a template, mapping template failures onto [`AppError`].
pub fn render<T: Template>(page: &T) -> AppResult<String> {
    page.render()
        .map_err(|e| AppError::internal(format!("Template rendering failed: {e}")))
}
