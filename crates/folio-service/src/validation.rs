//! Client-side form validation.
//!
//! Every check produces a [`ValidationErrors`] map of field name to the
//! message shown next to that field. Nothing here touches the network.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use folio_core::{AppError, AppResult};
use folio_entity::contact::ContactSubmission;
use folio_entity::personal::{PersonalInfo, PersonalInfoUpdate, SocialLink};
use folio_entity::project::CreateProjectRequest;
use folio_entity::skill::{CreateSkillRequest, SkillLevel};

pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("valid regex"));

pub static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

pub const MIN_TITLE_LENGTH: usize = 3;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MIN_TECHNOLOGIES: usize = 1;

/// Field name to message.
pub type ValidationErrors = BTreeMap<String, String>;

/// Turn a non-empty error map into a validation error carrying the map.
pub fn ensure_valid(errors: ValidationErrors) -> AppResult<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let summary = errors
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join("; ");
    let data = serde_json::to_value(&errors)?;
    Err(AppError::validation(summary).with_data(data))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

/// Blank URLs are accepted; optional fields use this.
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() || is_valid_url(url) {
        Ok(())
    } else {
        Err("Please enter a valid URL".to_string())
    }
}

pub fn validate_required(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field_name} is required"))
    } else {
        Ok(())
    }
}

pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.trim().is_empty() {
        return Err("Slug is required".to_string());
    }
    if !is_valid_slug(slug) {
        return Err("Slug must contain only lowercase letters, numbers, and hyphens".to_string());
    }
    Ok(())
}

/// Lowercase `title`, collapse every run of other characters into one
/// `-`, and strip leading and trailing dashes.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALNUM_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

fn record(errors: &mut ValidationErrors, field: &str, result: Result<(), String>) {
    if let Err(msg) = result {
        errors.insert(field.to_string(), msg);
    }
}

pub fn validate_contact_form(form: &ContactSubmission) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    record(&mut errors, "name", validate_required(&form.name, "Name"));
    record(&mut errors, "email", validate_email(&form.email));
    record(&mut errors, "subject", validate_required(&form.subject, "Subject"));
    record(&mut errors, "message", validate_required(&form.message, "Message"));
    errors
}

fn blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Check a project form. Keys use the wire (camelCase) field names.
pub fn validate_project_form(form: &CreateProjectRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let title_len = form.title.chars().count();
    if form.title.trim().is_empty() {
        errors.insert("title".into(), "Title is required".into());
    } else if title_len < MIN_TITLE_LENGTH {
        errors.insert("title".into(), "Title must be at least 3 characters".into());
    } else if title_len > MAX_TITLE_LENGTH {
        errors.insert("title".into(), "Title must be less than 100 characters".into());
    }

    let description_len = form.description.chars().count();
    if form.description.trim().is_empty() {
        errors.insert("description".into(), "Description is required".into());
    } else if description_len < MIN_DESCRIPTION_LENGTH {
        errors.insert(
            "description".into(),
            "Description must be at least 10 characters".into(),
        );
    } else if description_len > MAX_DESCRIPTION_LENGTH {
        errors.insert(
            "description".into(),
            "Description must be less than 500 characters".into(),
        );
    }

    match form.image.as_deref() {
        image if blank(image) => {
            errors.insert("image".into(), "Project image is required".into());
        }
        Some(image) if !is_valid_url(image) => {
            errors.insert("image".into(), "Please enter a valid image URL".into());
        }
        _ => {}
    }

    if blank(form.category.as_deref()) {
        errors.insert("category".into(), "Category is required".into());
    }
    if form.slug.trim().is_empty() {
        errors.insert("slug".into(), "Slug is required".into());
    }
    if form.technologies.len() < MIN_TECHNOLOGIES {
        errors.insert(
            "technologies".into(),
            "At least one technology is required".into(),
        );
    }
    if let Some(url) = form.github_url.as_deref().filter(|u| !u.is_empty()) {
        if !is_valid_url(url) {
            errors.insert("githubUrl".into(), "Invalid GitHub URL".into());
        }
    }
    if let Some(url) = form.live_url.as_deref().filter(|u| !u.is_empty()) {
        if !is_valid_url(url) {
            errors.insert("liveUrl".into(), "Please enter a valid live URL".into());
        }
    }

    errors
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Trim text fields and derive a missing slug from the title.
pub fn format_project_form(form: CreateProjectRequest) -> CreateProjectRequest {
    let title = form.title.trim().to_string();
    let slug = match form.slug.trim() {
        "" => generate_slug(&title),
        s => s.to_string(),
    };
    CreateProjectRequest {
        description: form.description.trim().to_string(),
        category: trimmed(form.category),
        github_url: trimmed(form.github_url),
        live_url: trimmed(form.live_url),
        title,
        slug,
        ..form
    }
}

/// Add/edit skill form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillForm {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
    pub level: SkillLevel,
    pub icon: Option<String>,
    #[validate(length(max = 500, message = "Description must be less than 500 characters"))]
    pub description: Option<String>,
    #[validate(range(max = 60, message = "Years of experience looks too large"))]
    pub years_of_experience: Option<u32>,
}

impl Default for SkillForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            level: SkillLevel::Beginner,
            icon: None,
            description: None,
            years_of_experience: None,
        }
    }
}

impl From<SkillForm> for CreateSkillRequest {
    fn from(form: SkillForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            category: form.category.trim().to_string(),
            level: form.level,
            icon: form.icon.filter(|i| !i.trim().is_empty()),
            description: form.description.filter(|d| !d.trim().is_empty()),
            years_of_experience: form.years_of_experience,
            featured: None,
        }
    }
}

/// Profile form on the admin profile page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        regex(path = *EMAIL_RE, message = "Please enter a valid email address")
    )]
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[validate(regex(path = *URL_RE, message = "Please enter a valid profile image URL"))]
    pub profile_image: Option<String>,
    #[validate(regex(path = *URL_RE, message = "Please enter a valid hero image URL"))]
    pub hero_image: Option<String>,
    pub social_links: Vec<SocialLink>,
}

impl From<&PersonalInfo> for ProfileForm {
    fn from(info: &PersonalInfo) -> Self {
        Self {
            name: info.name.clone(),
            title: info.title.clone(),
            description: info.description.clone(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            location: info.location.clone(),
            profile_image: info.profile_image.clone(),
            hero_image: info.hero_image.clone(),
            social_links: info.social_links.clone().unwrap_or_default(),
        }
    }
}

impl ProfileForm {
    /// Full update body for the profile endpoint. Blank optional fields
    /// are left out.
    pub fn into_update(self) -> PersonalInfoUpdate {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        PersonalInfoUpdate {
            name: Some(self.name.trim().to_string()),
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            phone: non_blank(self.phone),
            location: non_blank(self.location),
            profile_image: non_blank(self.profile_image),
            hero_image: non_blank(self.hero_image),
            social_links: Some(self.social_links),
        }
    }
}

/// Flatten derive-based results into a field map, keeping the first
/// message per field.
fn collect(result: Result<(), validator::ValidationErrors>) -> ValidationErrors {
    let Err(errs) = result else {
        return ValidationErrors::new();
    };
    errs.field_errors()
        .into_iter()
        .filter_map(|(field, list)| {
            let first = list.first()?;
            let msg = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {field}"));
            Some((camel_case(&field), msg))
        })
        .collect()
}

/// `hero_image` -> `heroImage`, matching the wire field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn trim_blank_optional(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}

pub fn validate_skill_form(form: &SkillForm) -> ValidationErrors {
    let mut form = form.clone();
    form.name = form.name.trim().to_string();
    form.category = form.category.trim().to_string();
    collect(form.validate())
}

pub fn validate_profile_form(form: &ProfileForm) -> ValidationErrors {
    let mut form = form.clone();
    form.name = form.name.trim().to_string();
    form.title = form.title.trim().to_string();
    form.description = form.description.trim().to_string();
    form.email = form.email.trim().to_string();
    trim_blank_optional(&mut form.profile_image);
    trim_blank_optional(&mut form.hero_image);
    let mut errors = collect(form.validate());
    // "required" wins over "invalid format" for a blank email.
    if form.email.is_empty() {
        errors.insert("email".into(), "Email is required".into());
    }
    errors
}
