//! Skill entity and request payloads.

use serde::{Deserialize, Serialize};

use super::level::SkillLevel;

/// A skill listed on the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Unique skill identifier.
    pub id: String,
    /// Skill name.
    pub name: String,
    /// Grouping category, e.g. "Languages".
    pub category: String,
    /// Proficiency level.
    pub level: SkillLevel,
    /// Icon name or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Years of hands-on experience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    /// Whether the skill is highlighted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Body of `POST /skills` and `PUT /skills/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillRequest {
    pub name: String,
    pub category: String,
    pub level: SkillLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Updates send the full skill body.
pub type UpdateSkillRequest = CreateSkillRequest;

impl From<&Skill> for CreateSkillRequest {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            category: skill.category.clone(),
            level: skill.level,
            icon: skill.icon.clone(),
            description: skill.description.clone(),
            years_of_experience: skill.years_of_experience,
            featured: skill.featured,
        }
    }
}
