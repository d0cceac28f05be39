//! Forecast view state.
//!
//! All selection and result state lives here and only changes through the
//! methods below. Derived state (the child list) is recomputed by a pure
//! function on every parent change instead of by an implicit reactive
//! runtime.

use std::collections::BTreeMap;

use tenki_core::{ChildSource, ForecastError};
use tenki_weather::{
    cards, regions, AreaCatalog, ChildRegion, ForecastCard, ForecastPayload, OfficeSummary,
    ParentRegion,
};

/// A forecast fetch the caller should issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub ticket: u64,
    pub code: String,
}

/// Child list for a parent according to the configured source
pub fn derive_children(
    parent: Option<&ParentRegion>,
    source: ChildSource,
    office_names: &BTreeMap<String, String>,
) -> Vec<ChildRegion> {
    match (parent, source) {
        (None, _) => Vec::new(),
        (Some(p), ChildSource::Static) => regions::static_children(p),
        (Some(p), ChildSource::Catalog) => regions::catalog_children(p, office_names),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastModel {
    child_source: ChildSource,
    parents: Vec<ParentRegion>,
    office_names: BTreeMap<String, String>,
    selected_parent: Option<String>,
    children: Vec<ChildRegion>,
    selected_child: Option<String>,
    forecast: Option<ForecastPayload>,
    error_message: Option<String>,
    last_ticket: u64,
    pending_ticket: Option<u64>,
}

impl ForecastModel {
    pub fn new(child_source: ChildSource) -> Self {
        Self {
            child_source,
            ..Self::default()
        }
    }

    pub fn parents(&self) -> &[ParentRegion] {
        &self.parents
    }

    pub fn children(&self) -> &[ChildRegion] {
        &self.children
    }

    pub fn selected_parent_code(&self) -> Option<&str> {
        self.selected_parent.as_deref()
    }

    pub fn selected_child_code(&self) -> Option<&str> {
        self.selected_child.as_deref()
    }

    pub fn selected_parent(&self) -> Option<&ParentRegion> {
        let code = self.selected_parent.as_deref()?;
        self.parents.iter().find(|p| p.code == code)
    }

    pub fn selected_child(&self) -> Option<&ChildRegion> {
        let code = self.selected_child.as_deref()?;
        self.children.iter().find(|c| c.code == code)
    }

    /// The child selector is disabled while there is nothing to pick
    pub fn child_selector_enabled(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn forecast(&self) -> Option<&ForecastPayload> {
        self.forecast.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// True while the latest forecast request has not answered
    pub fn is_loading(&self) -> bool {
        self.pending_ticket.is_some()
    }

    /// Header of the first office record, if the payload has one
    pub fn summary(&self) -> Option<OfficeSummary> {
        self.forecast
            .as_ref()?
            .primary_office()
            .map(OfficeSummary::from_office)
    }

    /// Cards for the current payload, rebuilt on every call
    pub fn cards(&self) -> impl Iterator<Item = ForecastCard> + '_ {
        self.forecast.iter().flat_map(cards)
    }

    /// Install the region catalog, or the region-data error.
    pub fn apply_catalog(&mut self, result: Result<AreaCatalog, ForecastError>) {
        match result {
            Ok(catalog) => {
                self.parents = catalog.parents();
                self.office_names = catalog.office_names();
                tracing::info!(parents = self.parents.len(), "Parent regions loaded");

                if let Some(code) = self.parents.first().map(|p| p.code.clone()) {
                    self.select_parent(&code);
                }
            }
            Err(e) => {
                tracing::error!("Failed to load region catalog: {}", e);
                self.parents.clear();
                self.selected_parent = None;
                self.children.clear();
                self.selected_child = None;
                self.error_message = Some(e.user_message().to_string());
            }
        }
    }

    /// Select a parent and re-derive its children. Unknown codes are ignored.
    pub fn select_parent(&mut self, code: &str) -> bool {
        if !self.parents.iter().any(|p| p.code == code) {
            tracing::debug!("Ignoring unknown parent code {}", code);
            return false;
        }
        self.selected_parent = Some(code.to_string());
        self.refresh_children();
        true
    }

    /// Select a child of the current parent. Unknown codes are ignored.
    pub fn select_child(&mut self, code: &str) -> bool {
        if !self.children.iter().any(|c| c.code == code) {
            tracing::debug!("Ignoring unknown child code {}", code);
            return false;
        }
        self.selected_child = Some(code.to_string());
        true
    }

    /// Move the parent selection by `delta`, wrapping around
    pub fn step_parent(&mut self, delta: isize) -> bool {
        let current = self
            .selected_parent
            .as_deref()
            .and_then(|code| self.parents.iter().position(|p| p.code == code));
        match step(current, self.parents.len(), delta) {
            Some(i) => {
                let code = self.parents[i].code.clone();
                self.select_parent(&code)
            }
            None => false,
        }
    }

    /// Move the child selection by `delta`, wrapping around
    pub fn step_child(&mut self, delta: isize) -> bool {
        let current = self
            .selected_child
            .as_deref()
            .and_then(|code| self.children.iter().position(|c| c.code == code));
        match step(current, self.children.len(), delta) {
            Some(i) => {
                let code = self.children[i].code.clone();
                self.select_child(&code)
            }
            None => false,
        }
    }

    fn refresh_children(&mut self) {
        let children = derive_children(
            self.selected_parent(),
            self.child_source,
            &self.office_names,
        );
        self.children = children;
        self.selected_child = self.children.first().map(|c| c.code.clone());
        tracing::debug!(
            parent = ?self.selected_parent,
            children = self.children.len(),
            selected = ?self.selected_child,
            "Children derived"
        );
    }

    /// Start a forecast fetch for the selected child.
    ///
    /// Returns `None` and leaves the state untouched when no child is
    /// selected. Otherwise clears the previous error and payload and issues a
    /// new ticket; only that ticket's answer will be applied.
    pub fn begin_forecast(&mut self) -> Option<ForecastRequest> {
        let code = self.selected_child.clone()?;
        self.error_message = None;
        self.forecast = None;
        self.last_ticket += 1;
        self.pending_ticket = Some(self.last_ticket);
        Some(ForecastRequest {
            ticket: self.last_ticket,
            code,
        })
    }

    /// Apply a forecast answer. Returns false for stale tickets, which are dropped.
    pub fn apply_forecast(
        &mut self,
        ticket: u64,
        result: Result<ForecastPayload, ForecastError>,
    ) -> bool {
        if self.pending_ticket != Some(ticket) {
            tracing::warn!(
                ticket,
                latest = self.last_ticket,
                "Dropping stale forecast response"
            );
            return false;
        }
        self.pending_ticket = None;

        match result {
            Ok(payload) => {
                self.forecast = Some(payload);
            }
            Err(e) => {
                tracing::error!("Failed to fetch forecast: {}", e);
                self.error_message = Some(e.user_message().to_string());
            }
        }
        true
    }
}

fn step(current: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let from = current.map(|i| i as isize).unwrap_or(0);
    Some((from + delta).rem_euclid(len) as usize)
}
