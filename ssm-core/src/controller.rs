//! Application state machine: loading, error and ready views, plus search
//! and selection over the loaded schools.
//!
//! Loads are numbered. A result is applied only if no newer load has started
//! since its ticket was issued, so a slow response can never overwrite a
//! newer one. Every applied result replaces the whole collection.

use crate::config::RefreshPolicy;
use crate::error::{LoadError, LoadFailure};
use chrono::{DateTime, Utc};
use ssm_schools::{MappedBatch, RowWarning, School};

/// Content shown once a load has succeeded.
#[derive(Debug, PartialEq, Clone)]
pub struct ReadyState {
    pub schools: Vec<School>,
    /// Id of the selected school
    pub selection: Option<String>,
    pub loaded_at: DateTime<Utc>,
    /// A refresh is running behind the current content
    pub updating: bool,
    /// Rows dropped by the mapper, kept for diagnostics
    pub warnings: Vec<RowWarning>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ViewState {
    Loading,
    Error(LoadFailure),
    Ready(ReadyState),
}

/// Issued by [`Controller::begin_load`], handed back with the result.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LoadTicket {
    pub generation: u64,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadCompletion {
    Applied,
    /// A newer load started after this one; the result was dropped.
    Superseded,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SearchOutcome {
    /// Blank query, selection cleared
    Cleared,
    /// Id of the first school whose name matched
    Selected(String),
    /// Nothing matched, selection cleared
    NoMatch,
}

pub struct Controller {
    view: ViewState,
    policy: RefreshPolicy,
    generation: u64,
    in_flight: bool,
    revision: u64,
    focus_requests: u64,
}

impl Controller {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            view: ViewState::Loading,
            policy,
            generation: 0,
            in_flight: false,
            revision: 0,
            focus_requests: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// True while a load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Bumped whenever the collection is replaced or cleared.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumped on every selection, repeats included.
    pub fn focus_requests(&self) -> u64 {
        self.focus_requests
    }

    pub fn schools(&self) -> &[School] {
        match &self.view {
            ViewState::Ready(ready) => &ready.schools,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&School> {
        let ViewState::Ready(ready) = &self.view else {
            return None;
        };
        let id = ready.selection.as_deref()?;
        ready.schools.iter().find(|s| s.id == id)
    }

    /// Start a load. Under `SingleFlight` this returns `None` while another
    /// load is outstanding.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.in_flight && self.policy == RefreshPolicy::SingleFlight {
            log::info!("controller: load {} still in flight, ignoring refresh", self.generation);
            return None;
        }
        self.generation += 1;
        self.in_flight = true;
        match &mut self.view {
            ViewState::Ready(ready) => ready.updating = true,
            view => *view = ViewState::Loading,
        }
        log::info!("controller: starting load {}", self.generation);
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Apply the result of a load unless a newer one has started.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<MappedBatch, LoadError>,
        now: DateTime<Utc>,
    ) -> LoadCompletion {
        if ticket.generation != self.generation {
            log::info!(
                "controller: dropping result of load {} (latest is {})",
                ticket.generation,
                self.generation
            );
            return LoadCompletion::Superseded;
        }
        self.in_flight = false;
        self.revision += 1;
        self.view = match result {
            Ok(batch) => {
                log::info!(
                    "controller: load {} ready with {} schools ({} rows skipped)",
                    ticket.generation,
                    batch.schools.len(),
                    batch.warnings.len()
                );
                ViewState::Ready(ReadyState {
                    schools: batch.schools,
                    selection: None,
                    loaded_at: now,
                    updating: false,
                    warnings: batch.warnings,
                })
            }
            Err(err) => {
                log::error!("controller: load {} failed: {}", ticket.generation, err);
                ViewState::Error(LoadFailure::from(&err))
            }
        };
        LoadCompletion::Applied
    }

    /// Select the first school whose name contains `query`, ignoring case.
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            self.clear_selection();
            return SearchOutcome::Cleared;
        }
        let found = self
            .schools()
            .iter()
            .find(|s| s.name_contains(&needle))
            .map(|s| s.id.clone());
        match found {
            Some(id) => {
                self.select(&id);
                SearchOutcome::Selected(id)
            }
            None => {
                log::info!("controller: no school matches {:?}", query);
                self.clear_selection();
                SearchOutcome::NoMatch
            }
        }
    }

    /// Select a school by id. Unknown ids are ignored.
    pub fn select(&mut self, school_id: &str) -> bool {
        let ViewState::Ready(ready) = &mut self.view else {
            return false;
        };
        if !ready.schools.iter().any(|s| s.id == school_id) {
            return false;
        }
        ready.selection = Some(school_id.to_string());
        self.focus_requests += 1;
        true
    }

    pub fn clear_selection(&mut self) {
        if let ViewState::Ready(ready) = &mut self.view {
            ready.selection = None;
        }
    }
}
