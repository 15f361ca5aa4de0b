use crate::application::error::{ApplicationError, ApplicationResult};

/// Identity of the caller, as established by the surrounding platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> ApplicationResult<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ApplicationError::authentication("actor id cannot be empty"));
        }
        Ok(Self {
            id: trimmed.to_string(),
        })
    }
}
