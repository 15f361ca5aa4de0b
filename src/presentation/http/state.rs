// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Shared by every handler and by the audit middleware through `Extension`.
#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>) -> Self {
        Self { services }
    }
}
