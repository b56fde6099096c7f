//! Skill management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use folio_core::{AppError, AppResult};
use folio_entity::skill::{CreateSkillRequest, Skill, SkillLevel};
use folio_service::ResourceManager;
use folio_service::skills::{SkillActions, SkillsFetcher, skill_categories};
use folio_service::validation::{SkillForm, ensure_valid, validate_skill_form};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for skill commands
#[derive(Debug, Args)]
pub struct SkillsArgs {
    /// Skills subcommand
    #[command(subcommand)]
    pub command: SkillsCommand,
}

/// Skills subcommands
#[derive(Debug, Subcommand)]
pub enum SkillsCommand {
    /// List skills, sorted by name
    List {
        /// Match against name or category
        #[arg(short, long)]
        search: Option<String>,
        /// Category filter ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a skill
    Add {
        /// Skill name
        name: String,
        /// Category, e.g. "Frontend"
        #[arg(short, long)]
        category: String,
        /// BEGINNER, INTERMEDIATE, ADVANCED or EXPERT
        #[arg(short, long, default_value = "BEGINNER")]
        level: SkillLevel,
        /// Icon name
        #[arg(long)]
        icon: Option<String>,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
        /// Years of experience
        #[arg(short, long)]
        years: Option<u32>,
    },
    /// Change the level of a skill
    Level {
        /// Skill id
        id: String,
        /// New level
        level: SkillLevel,
    },
    /// Delete a skill
    Delete {
        /// Skill id
        id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// List skill categories
    Categories,
}

/// Skill display row for table output
#[derive(Debug, Serialize, Tabled)]
struct SkillRow {
    id: String,
    name: String,
    category: String,
    level: &'static str,
    years: String,
}

impl From<&Skill> for SkillRow {
    fn from(s: &Skill) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            category: s.category.clone(),
            level: s.level.label(),
            years: s
                .years_of_experience
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute skill commands
pub async fn execute(args: &SkillsArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let service = ctx.services.skills.clone();
    let manager = Arc::new(ResourceManager::with_debounce(
        SkillsFetcher::new(service.clone()),
        ctx.config.admin.debounce(),
    ));

    match &args.command {
        SkillsCommand::List { search, category } => {
            manager.update_filters(|f| {
                f.search_term = search.clone().unwrap_or_default();
                f.category = category.clone();
            });
            manager.mount().await;
            let state = manager.snapshot();
            if let Some(message) = state.error {
                return Err(AppError::internal(message));
            }
            let rows: Vec<SkillRow> = state.items.iter().map(SkillRow::from).collect();
            output::print_list(&rows, format);
        }
        SkillsCommand::Add {
            name,
            category,
            level,
            icon,
            description,
            years,
        } => {
            ctx.require_login()?;
            let form = SkillForm {
                name: name.clone(),
                category: category.clone(),
                level: *level,
                icon: icon.clone(),
                description: description.clone(),
                years_of_experience: *years,
            };
            ensure_valid(validate_skill_form(&form))?;

            let actions = SkillActions::new(service, Arc::clone(&manager));
            let Some(skill) = actions.create(&CreateSkillRequest::from(form)).await else {
                return Err(failure(&manager));
            };
            output::print_success(&format!("Added skill '{}' ({})", skill.name, skill.id));
        }
        SkillsCommand::Level { id, level } => {
            ctx.require_login()?;
            manager.mount().await;
            let Some(skill) = manager.items().into_iter().find(|s| &s.id == id) else {
                return Err(AppError::validation(format!("No skill with id '{id}'")));
            };
            let req = CreateSkillRequest {
                level: *level,
                ..CreateSkillRequest::from(&skill)
            };

            let actions = SkillActions::new(service, Arc::clone(&manager));
            let Some(updated) = actions.update(id, &req).await else {
                return Err(failure(&manager));
            };
            output::print_success(&format!(
                "'{}' is now {}",
                updated.name,
                updated.level.label()
            ));
        }
        SkillsCommand::Delete { id, force } => {
            ctx.require_login()?;
            if !output::confirm(&format!("Delete skill {id}?"), *force)? {
                return Ok(());
            }
            let actions = SkillActions::new(service, Arc::clone(&manager));
            if !actions.delete(id).await {
                return Err(failure(&manager));
            }
            output::print_success("Skill deleted");
        }
        SkillsCommand::Categories => {
            let skills = service.list().await?;
            for category in skill_categories(&skills) {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn failure(manager: &ResourceManager<SkillsFetcher>) -> AppError {
    let message = manager
        .snapshot()
        .error
        .unwrap_or_else(|| "Skill request failed".to_string());
    AppError::internal(message)
}
