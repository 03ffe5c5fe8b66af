//! Application state
//!
//! Everything a handler needs, cheap to clone per request.

use std::sync::Arc;

use pacsocial_auth::TeamAuthenticator;
use pacsocial_store::{Archive, EdgeStore, SqliteEdgeStore};
use pacsocial_timeline::CompetitionClock;

/// Page size defaults and bound shared by the timeline and cursor extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Relational archive (users, tweets, scans, competition tables)
    pub archive: Archive,
    /// Follow-edge store
    pub edges: Arc<dyn EdgeStore>,
    /// Virtual-time translator
    pub clock: CompetitionClock,
    /// Bearer passcode to team resolution
    pub auth: Arc<TeamAuthenticator>,
    pub limits: PageLimits,
}

impl AppState {
    /// State over one archive, with edges and teams read from the same file
    pub fn new(archive: Archive, clock: CompetitionClock, limits: PageLimits) -> Self {
        let edges = Arc::new(SqliteEdgeStore::new(archive.clone()));
        let auth = Arc::new(TeamAuthenticator::new(Arc::new(archive.clone())));

        Self {
            archive,
            edges,
            clock,
            auth,
            limits,
        }
    }

    /// Swap the edge backend
    pub fn with_edges(mut self, edges: Arc<dyn EdgeStore>) -> Self {
        self.edges = edges;
        self
    }
}
