//! Portfolio project records.

pub mod model;
pub mod request;

pub use model::{Project, ProjectListResponse, ProjectsPage};
pub use request::{CreateProjectRequest, UpdateProjectRequest};
