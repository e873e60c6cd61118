use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use backend_domain::{Actor, IdentityProvider};

use crate::config::IdentityEntry;

/// Token table loaded from configuration.
#[derive(Default)]
pub struct StaticIdentityProvider {
    actors: HashMap<String, Actor>,
}

impl StaticIdentityProvider {
    pub fn from_entries(entries: &[IdentityEntry]) -> Result<Self> {
        let mut actors = HashMap::with_capacity(entries.len());
        for entry in entries {
            actors.insert(entry.token.trim().to_string(), entry.to_actor()?);
        }
        Ok(Self { actors })
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_actor(&self, token: &str) -> Result<Option<Actor>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self.actors.get(token).cloned())
    }
}
