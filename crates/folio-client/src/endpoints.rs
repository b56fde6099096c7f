//! Backend endpoint paths, relative to the configured base URL.
//!
//! Dynamic values are inserted raw; the client percent-encodes each path
//! segment when it builds the request URL.

pub mod projects {
    pub const LIST: &str = "/projects";
    pub const FEATURED: &str = "/projects/featured";
    pub const SEARCH: &str = "/projects/search";

    pub fn by_id(id: &str) -> String {
        format!("/projects/{id}")
    }

    pub fn by_slug(slug: &str) -> String {
        format!("/projects/slug/{slug}")
    }

    pub fn by_category(category: &str) -> String {
        format!("/projects/category/{category}")
    }
}

pub mod skills {
    pub const LIST: &str = "/skills";

    pub fn by_id(id: &str) -> String {
        format!("/skills/{id}")
    }

    pub fn by_category(category: &str) -> String {
        format!("/skills/category/{category}")
    }
}

pub mod contact {
    pub const SUBMIT: &str = "/contact";
    pub const LIST: &str = "/contact/messages";
    pub const STATS: &str = "/contact/stats";

    pub fn by_id(id: &str) -> String {
        format!("/contact/messages/{id}")
    }

    pub fn mark_read(id: &str) -> String {
        format!("/contact/messages/{id}/read")
    }

    pub fn mark_replied(id: &str) -> String {
        format!("/contact/messages/{id}/replied")
    }

    pub fn archive(id: &str) -> String {
        format!("/contact/messages/{id}/archive")
    }
}

pub mod status {
    pub const CURRENT: &str = "/status/current";
    pub const MINE: &str = "/status/me";
    pub const SET: &str = "/status";
    pub const CLEAR: &str = "/status";
    pub const HISTORY: &str = "/status/history";

    pub fn by_id(id: &str) -> String {
        format!("/status/{id}")
    }
}

pub mod auth {
    pub const REFRESH: &str = "/auth/refresh";
    pub const PROFILE: &str = "/auth/profile";
}

pub mod system {
    pub const HEALTH: &str = "/health";
    pub const TEST_EMAIL: &str = "/test/email";
}
