use crate::models::Transporter;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::sync::RwLock;
use validator::Validate;

/// Errors that can occur when loading the transporter directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid transporter {id}: {message}")]
    InvalidTransporter { id: String, message: String },
}

/// Source of transporter snapshots for matching requests
///
/// The engine never talks to the owning service directly; handlers read a
/// point-in-time copy through this trait.
#[async_trait]
pub trait TransporterDirectory: Send + Sync {
    /// Point-in-time copy of the transporters currently online
    async fn online(&self) -> Vec<Transporter>;

    /// Total and online counts
    async fn counts(&self) -> (usize, usize);

    /// Replace the whole snapshot, returning the new size
    async fn replace(&self, transporters: Vec<Transporter>) -> Result<usize, DirectoryError>;
}

/// In-memory transporter directory
///
/// Holds the latest snapshot of transporter records pushed by the owning
/// service. Matching requests read a consistent copy of the online subset.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    transporters: RwLock<Vec<Transporter>>,
}

impl InMemoryDirectory {
    pub fn new(transporters: Vec<Transporter>) -> Self {
        Self {
            transporters: RwLock::new(transporters),
        }
    }

    /// Load a JSON array of transporters from disk
    pub async fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let transporters: Vec<Transporter> = serde_json::from_str(&raw)?;
        validate_all(&transporters)?;

        tracing::info!(
            "Loaded {} transporters from {}",
            transporters.len(),
            path.as_ref().display()
        );

        Ok(Self::new(transporters))
    }
}

#[async_trait]
impl TransporterDirectory for InMemoryDirectory {
    async fn online(&self) -> Vec<Transporter> {
        self.transporters
            .read()
            .await
            .iter()
            .filter(|t| t.online)
            .cloned()
            .collect()
    }

    async fn counts(&self) -> (usize, usize) {
        let guard = self.transporters.read().await;
        let online = guard.iter().filter(|t| t.online).count();
        (guard.len(), online)
    }

    async fn replace(&self, transporters: Vec<Transporter>) -> Result<usize, DirectoryError> {
        validate_all(&transporters)?;
        let count = transporters.len();
        *self.transporters.write().await = transporters;
        tracing::debug!("Directory snapshot replaced with {} transporters", count);
        Ok(count)
    }
}

fn validate_all(transporters: &[Transporter]) -> Result<(), DirectoryError> {
    for t in transporters {
        if let Err(errors) = t.validate() {
            return Err(DirectoryError::InvalidTransporter {
                id: t.id.clone(),
                message: errors.to_string(),
            });
        }
    }
    Ok(())
}
