//! Provider registry — maps a provider identifier to its backend adapter.
//!
//! Extending the service to a new provider means one new [`ChatBackend`]
//! impl and one entry in [`ProviderRegistry::with_default_backends`]; the
//! analyze handler stays untouched.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use reqwest::Client;

use super::google::GoogleBackend;
use super::openai::OpenAiBackend;
use super::ChatBackend;

/// Identifier of a hosted model provider, as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAi,
    Google,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Google => "google",
        }
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAi),
            "google" => Ok(ProviderId::Google),
            other => Err(format!("Unknown AI provider '{other}'")),
        }
    }
}

pub struct ProviderRegistry {
    backends: HashMap<ProviderId, Arc<dyn ChatBackend>>,
}

impl ProviderRegistry {
    /// Builds the registry with every known backend, all sharing one
    /// connection pool.
    pub fn with_default_backends(client: Client) -> Self {
        let mut backends: HashMap<ProviderId, Arc<dyn ChatBackend>> = HashMap::new();
        backends.insert(
            ProviderId::OpenAi,
            Arc::new(OpenAiBackend::new(client.clone())),
        );
        backends.insert(ProviderId::Google, Arc::new(GoogleBackend::new(client)));
        Self { backends }
    }

    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn ChatBackend>> {
        self.backends.get(&id).cloned()
    }
}
