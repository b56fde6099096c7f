//! One typed service per backend resource.
//!
//! Services are thin: they pick the endpoint, encode the set filters as
//! query parameters and normalize response shapes. Errors bubble up
//! unchanged.

pub mod auth;
pub mod contact;
pub mod health;
pub mod personal;
pub mod projects;
pub mod skills;
pub mod status;

use std::sync::Arc;

use crate::client::ApiClient;

pub use auth::AuthService;
pub use contact::{ContactFilters, ContactService};
pub use health::HealthService;
pub use personal::PersonalService;
pub use projects::{ProjectFilters, ProjectService};
pub use skills::SkillService;
pub use status::StatusService;

/// All services sharing one [`ApiClient`].
#[derive(Debug, Clone)]
pub struct Services {
    pub projects: ProjectService,
    pub skills: SkillService,
    pub contact: ContactService,
    pub personal: PersonalService,
    pub status: StatusService,
    pub auth: AuthService,
    pub health: HealthService,
}

impl Services {
    /// Build every service on top of `client`.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            projects: ProjectService::new(Arc::clone(&client)),
            skills: SkillService::new(Arc::clone(&client)),
            contact: ContactService::new(Arc::clone(&client)),
            personal: PersonalService::new(Arc::clone(&client)),
            status: StatusService::new(Arc::clone(&client)),
            auth: AuthService::new(Arc::clone(&client)),
            health: HealthService::new(client),
        }
    }
}
