//! Project management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use folio_core::{AppError, AppResult};
use folio_entity::project::{CreateProjectRequest, Project};
use folio_service::ResourceManager;
use folio_service::projects::{ProjectActions, ProjectsFetcher};
use folio_service::validation::{
    ensure_valid, format_project_form, generate_slug, validate_project_form,
};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for project commands
#[derive(Debug, Args)]
pub struct ProjectsArgs {
    /// Projects subcommand
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

/// Projects subcommands
#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects
    List {
        /// Search term
        #[arg(short, long)]
        search: Option<String>,
        /// Category filter ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,
        /// Featured projects only
        #[arg(long)]
        featured: bool,
    },
    /// Show a project by slug
    Show {
        /// Project slug
        slug: String,
    },
    /// Create a project from a JSON file
    Create {
        /// Path to a JSON document with the project fields
        file: String,
    },
    /// Delete a project
    Delete {
        /// Project slug
        slug: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// List featured projects
    Featured,
    /// Suggest a slug for a title
    Slug {
        /// Project title
        title: String,
    },
}

/// Project display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    slug: String,
    title: String,
    category: String,
    featured: String,
    technologies: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            slug: p.slug.clone(),
            title: output::truncate(&p.title, 40),
            category: p.category.clone().unwrap_or_else(|| "-".to_string()),
            featured: if p.featured { "★" } else { "" }.to_string(),
            technologies: output::truncate(&p.technologies.join(", "), 40),
        }
    }
}

/// Execute project commands
pub async fn execute(args: &ProjectsArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let service = ctx.services.projects.clone();

    match &args.command {
        ProjectsCommand::List {
            search,
            category,
            featured,
        } => {
            let manager = ResourceManager::with_debounce(
                ProjectsFetcher::new(service),
                ctx.config.admin.debounce(),
            );
            manager.update_filters(|f| {
                f.search_term = search.clone().unwrap_or_default();
                f.category = category.clone();
                f.featured_only = *featured;
            });
            manager.mount().await;

            let state = manager.snapshot();
            if let Some(message) = state.error {
                return Err(AppError::internal(message));
            }
            let rows: Vec<ProjectRow> = state.items.iter().map(ProjectRow::from).collect();
            output::print_list(&rows, format);
        }
        ProjectsCommand::Show { slug } => {
            let project = service.get_by_slug(slug).await?;
            output::print_item(&project, format);
        }
        ProjectsCommand::Create { file } => {
            ctx.require_login()?;
            let raw = std::fs::read_to_string(file)
                .map_err(|e| AppError::validation(format!("Cannot read {file}: {e}")))?;
            let form: CreateProjectRequest = serde_json::from_str(&raw)
                .map_err(|e| AppError::validation(format!("Invalid project JSON: {e}")))?;
            let form = format_project_form(form);
            ensure_valid(validate_project_form(&form))?;

            let project = service.create(&form).await?;
            output::print_success(&format!("Created project '{}' ({})", project.title, project.slug));
        }
        ProjectsCommand::Delete { slug, force } => {
            ctx.require_login()?;
            let project = service.get_by_slug(slug).await?;
            if !output::confirm(&format!("Delete project '{}'?", project.title), *force)? {
                return Ok(());
            }

            let manager = Arc::new(ResourceManager::with_debounce(
                ProjectsFetcher::new(service.clone()),
                ctx.config.admin.debounce(),
            ));
            ProjectActions::new(service, manager).delete(&project).await?;
            output::print_success(&format!("Deleted project '{}'", project.title));
        }
        ProjectsCommand::Featured => {
            let projects = service.featured().await?;
            let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
            output::print_list(&rows, format);
        }
        ProjectsCommand::Slug { title } => {
            println!("{}", generate_slug(title));
        }
    }

    Ok(())
}
