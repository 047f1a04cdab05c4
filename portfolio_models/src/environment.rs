use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Name of the deployment environment the process runs in (e.g.
/// `development` or `production`).
///
/// Production mode hides internal error details from clients and makes a
/// missing database fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(Arc<str>);

impl Environment {
    pub const DEVELOPMENT: &'static str = "development";
    pub const PRODUCTION: &'static str = "production";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_production(&self) -> bool {
        &*self.0 == Self::PRODUCTION
    }

    pub fn is_development(&self) -> bool {
        &*self.0 == Self::DEVELOPMENT
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Self::DEVELOPMENT)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
