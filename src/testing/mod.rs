use std::sync::Arc;

use uuid::Uuid;

use crate::database::MemoryStore;
use crate::middleware::AuthUser;
use crate::services::{ProjectService, TaskService};

/// Services wired to a fresh in-memory store
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            projects: ProjectService::new(store.clone()),
            tasks: TaskService::new(store.clone()),
            store,
        }
    }

    /// A distinct authenticated identity
    pub fn user(&self, name: &str) -> AuthUser {
        AuthUser::new(Uuid::new_v4(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_get_distinct_ids() {
        let ctx = TestContext::new();
        assert_ne!(ctx.user("a").user_id, ctx.user("a").user_id);
    }
}
