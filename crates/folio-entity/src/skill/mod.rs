//! Skill records.

pub mod level;
pub mod model;

pub use level::SkillLevel;
pub use model::{CreateSkillRequest, Skill, UpdateSkillRequest};
