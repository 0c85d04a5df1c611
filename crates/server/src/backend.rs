use std::sync::{Arc, OnceLock};

use crate::gateway::{Gateway, MemoryBackend, SessionProvider, SupabaseClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Supabase,
    Memory,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Supabase => "supabase",
            BackendMode::Memory => "memory",
        }
    }
}

/// The data gateway and session provider every server function talks to.
#[derive(Clone)]
pub struct Backend {
    pub gateway: Arc<dyn Gateway>,
    pub sessions: Arc<dyn SessionProvider>,
    pub mode: BackendMode,
}

impl Backend {
    pub fn supabase(client: SupabaseClient) -> Self {
        let client = Arc::new(client);
        Self {
            gateway: client.clone(),
            sessions: client,
            mode: BackendMode::Supabase,
        }
    }

    pub fn memory(backend: Arc<MemoryBackend>) -> Self {
        Self {
            gateway: backend.clone(),
            sessions: backend,
            mode: BackendMode::Memory,
        }
    }

    /// Supabase when `SUPABASE_URL` and `SUPABASE_ANON_KEY` are set, else the
    /// in-memory backend (seeded when `demo_content` is on).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        match SupabaseClient::from_env() {
            Ok(client) => {
                tracing::info!("using Supabase backend");
                Self::supabase(client)
            }
            Err(e) => {
                let demo = crate::config::feature_flags().demo_content;
                tracing::warn!(reason = %e, demo_content = demo, "Supabase not configured; using in-memory backend");
                let memory = if demo {
                    MemoryBackend::with_demo_content()
                } else {
                    MemoryBackend::new()
                };
                Self::memory(Arc::new(memory))
            }
        }
    }
}

static BACKEND: OnceLock<Backend> = OnceLock::new();

/// Process-wide backend, built from the environment on first use.
pub fn backend() -> &'static Backend {
    BACKEND.get_or_init(Backend::from_env)
}
