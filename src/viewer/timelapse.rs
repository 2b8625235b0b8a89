//! Viewer session: ties the snapshot service, navigation state and document
//! assembler together, and arbitrates racing document builds.
//!
//! Navigation hands out a [`BuildTicket`] stamped with a generation counter.
//! Building runs against `&self`, so several builds may be in flight at once
//! after rapid navigation; only the ticket from the most recent navigation is
//! accepted at commit time. A slower, older build that completes after a
//! newer one is discarded instead of overwriting the current view.

use crate::models::snapshot::Snapshot;
use crate::viewer::assembler;
use crate::viewer::navigation::NavigationState;
use crate::viewer::service::{ServiceError, SnapshotService};

/// Proof of a navigation change, consumed when its build result is committed.
#[derive(Debug)]
pub struct BuildTicket {
    generation: u64,
    index: usize,
}

/// What the rendering surface should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Index not loaded yet, or a build is in flight.
    Loading,
    /// Index loaded but no snapshot has been captured yet. Not an error.
    Empty,
    /// An assembled document is ready for display.
    Document(String),
    /// A fetch or build failed; recovery requires a user-initiated reload.
    Failed(String),
}

pub struct TimelapseSession<S: SnapshotService> {
    service: S,
    nav: NavigationState,
    view: ViewState,
    generation: u64,
}

impl<S: SnapshotService> TimelapseSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            nav: NavigationState::new(),
            view: ViewState::Loading,
            generation: 0,
        }
    }

    /// Fetch the index and show the newest snapshot. An empty index is the
    /// distinct "nothing captured yet" state, not a failure.
    pub async fn init(&mut self) -> Result<(), ServiceError> {
        let snapshots = self.service.list_snapshots().await?;
        self.nav.load(snapshots);

        if self.nav.is_empty() {
            self.view = ViewState::Empty;
            return Ok(());
        }

        if let Some(ticket) = self.retarget(self.nav.current_index()) {
            let result = self.build(&ticket).await;
            self.commit(ticket, result);
        }
        Ok(())
    }

    /// Jump to an index. Returns `None` when out of range (silent no-op).
    pub fn select(&mut self, index: usize) -> Option<BuildTicket> {
        if index >= self.nav.len() {
            return None;
        }
        self.nav.go_to(index);
        self.retarget(Some(index))
    }

    /// Move towards older snapshots. `None` at the boundary.
    pub fn next(&mut self) -> Option<BuildTicket> {
        if !self.nav.has_next() {
            return None;
        }
        self.nav.next();
        self.retarget(self.nav.current_index())
    }

    /// Move towards newer snapshots. `None` at the boundary.
    pub fn previous(&mut self) -> Option<BuildTicket> {
        if !self.nav.has_previous() {
            return None;
        }
        self.nav.previous();
        self.retarget(self.nav.current_index())
    }

    fn retarget(&mut self, index: Option<usize>) -> Option<BuildTicket> {
        let index = index?;
        self.generation += 1;
        self.view = ViewState::Loading;
        Some(BuildTicket {
            generation: self.generation,
            index,
        })
    }

    /// Assemble the document for a ticket. Shared-nothing with the session
    /// state, so builds for superseded tickets can still be running here.
    pub async fn build(&self, ticket: &BuildTicket) -> Result<String, ServiceError> {
        let snapshot = self
            .nav
            .snapshots()
            .get(ticket.index)
            .ok_or_else(|| ServiceError::NotFound(format!("snapshot index {}", ticket.index)))?;

        let contents = self.service.list_files(&snapshot.hash).await?;
        assembler::build_document(
            &self.service,
            &snapshot.hash,
            &snapshot.folder,
            &contents.files,
        )
        .await
    }

    /// Apply a finished build. Returns `false` when the ticket was superseded
    /// by a newer navigation change and the result was discarded.
    pub fn commit(&mut self, ticket: BuildTicket, result: Result<String, ServiceError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale document build"
            );
            return false;
        }
        self.view = match result {
            Ok(doc) => ViewState::Document(doc),
            Err(e) => ViewState::Failed(e.to_string()),
        };
        true
    }

    /// Navigate and build in one step, for callers without concurrent input.
    pub async fn show(&mut self, index: usize) -> bool {
        match self.select(index) {
            Some(ticket) => {
                let result = self.build(&ticket).await;
                self.commit(ticket, result)
            }
            None => false,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.nav.current()
    }

    pub fn screenshot_url(&self, hash: &str) -> String {
        self.service.screenshot_url(hash)
    }
}
