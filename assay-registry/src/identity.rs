use crate::{RegistryError, RegistryResult};

/// Supplies the identity of whoever is making the current call.
///
/// The host extracts it (from a transaction certificate, a session, ...);
/// the registry only records it as the owner of what gets registered.
/// Providers are `Send + Sync` so one can be shared by every worker thread.
pub trait IdentityProvider: Send + Sync {
    fn current_caller(&self) -> RegistryResult<String>;
}

/// A fixed identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity(String);

impl StaticIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_caller(&self) -> RegistryResult<String> {
        if self.0.is_empty() {
            return Err(RegistryError::Identity("caller identity is empty".into()));
        }
        Ok(self.0.clone())
    }
}
