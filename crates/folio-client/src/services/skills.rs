//! Skill endpoints.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use folio_core::AppResult;
use folio_entity::skill::{CreateSkillRequest, Skill, UpdateSkillRequest};

use crate::client::ApiClient;
use crate::endpoints::skills as ep;

/// Typed access to `/skills`.
#[derive(Debug, Clone)]
pub struct SkillService {
    client: Arc<ApiClient>,
}

impl SkillService {
    /// Creates a new skill service.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists all skills.
    ///
    /// The backend has answered with a bare array, `{data: [...]}` and
    /// `{skills: [...]}` over time; all three are accepted.
    pub async fn list(&self) -> AppResult<Vec<Skill>> {
        let raw: Value = self.client.get(ep::LIST).await?;
        normalize_skills(raw)
    }

    pub async fn by_category(&self, category: &str) -> AppResult<Vec<Skill>> {
        self.client.get(&ep::by_category(category)).await
    }

    pub async fn create(&self, req: &CreateSkillRequest) -> AppResult<Skill> {
        let skill: Skill = self.client.post(ep::LIST, req).await?;
        info!(skill_id = %skill.id, name = %skill.name, "Skill created");
        Ok(skill)
    }

    pub async fn update(&self, id: &str, req: &UpdateSkillRequest) -> AppResult<Skill> {
        let skill: Skill = self.client.put(&ep::by_id(id), req).await?;
        info!(skill_id = %skill.id, "Skill updated");
        Ok(skill)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let _: Option<Value> = self.client.delete(&ep::by_id(id)).await?;
        info!(skill_id = %id, "Skill deleted");
        Ok(())
    }
}

/// Extract the skill list from any of the accepted response shapes.
///
/// Unknown shapes yield an empty list; malformed entries are an error.
pub fn normalize_skills(raw: Value) -> AppResult<Vec<Skill>> {
    let list = match raw {
        Value::Array(_) => raw,
        Value::Object(mut map) => match (map.remove("data"), map.remove("skills")) {
            (Some(data @ Value::Array(_)), _) => data,
            (_, Some(skills @ Value::Array(_))) => skills,
            _ => {
                warn!("Unexpected skills response structure, treating as empty");
                return Ok(Vec::new());
            }
        },
        other => {
            warn!(response = %other, "Unexpected skills response structure, treating as empty");
            return Ok(Vec::new());
        }
    };
    Ok(serde_json::from_value(list)?)
}
