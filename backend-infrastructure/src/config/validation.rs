use std::collections::HashSet;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use backend_domain::{Actor, Role};

/// One session token accepted by the static identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEntry {
    pub token: String,
    pub id: String,
    pub name: String,
    pub role: String,
}

impl IdentityEntry {
    pub fn to_actor(&self) -> Result<Actor> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| anyhow!("identity '{}' has unknown role '{}'", self.id, self.role))?;
        Ok(Actor::new(self.id.trim(), self.name.trim(), role))
    }
}

pub fn validate_identities(entries: &[IdentityEntry]) -> Result<()> {
    let mut tokens = HashSet::new();
    for entry in entries {
        if entry.token.trim().is_empty() {
            return Err(anyhow!("identity '{}' has an empty token", entry.id));
        }
        if entry.id.trim().is_empty() || entry.name.trim().is_empty() {
            return Err(anyhow!("identity entries need a non-empty id and name"));
        }
        entry.to_actor()?;
        if !tokens.insert(entry.token.trim()) {
            return Err(anyhow!("identity token for '{}' is not unique", entry.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(token: &str, id: &str, role: &str) -> IdentityEntry {
        IdentityEntry {
            token: token.to_string(),
            id: id.to_string(),
            name: format!("name-{id}"),
            role: role.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_entries() {
        let entries = vec![entry("t1", "u1", "organizer"), entry("t2", "u2", "Attendee")];
        validate_identities(&entries).expect("valid identities");
        let actor = entries[1].to_actor().expect("actor");
        assert_eq!(actor.role, Role::Attendee);
    }

    #[test]
    fn rejects_unknown_roles_blank_tokens_and_duplicates() {
        assert!(validate_identities(&[entry("t1", "u1", "superuser")]).is_err());
        assert!(validate_identities(&[entry(" ", "u1", "admin")]).is_err());
        let duplicated = [entry("t1", "u1", "admin"), entry("t1", "u2", "admin")];
        assert!(validate_identities(&duplicated).is_err());
    }
}
