// src/store.rs

use crate::domain::filter::{self, FilterCriteria};
use crate::domain::listing::{Listing, ListingId, ListingKind};

/// Last listing snapshot pulled from the backend, plus the current filter result.
#[derive(Debug, Default)]
pub struct ListingStore {
    snapshot: Vec<Listing>,
    criteria: Option<FilterCriteria>,
    filtered: Vec<Listing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a fresh snapshot. The last applied criteria are re-run against it.
    pub fn replace(&mut self, listings: Vec<Listing>) {
        self.snapshot = listings;
        self.refilter();
    }

    pub fn apply(&mut self, criteria: FilterCriteria) -> &[Listing] {
        self.criteria = Some(criteria);
        self.refilter();
        &self.filtered
    }

    fn refilter(&mut self) {
        self.filtered = match &self.criteria {
            Some(c) => filter::apply(&self.snapshot, c),
            None => Vec::new(),
        };
    }

    pub fn snapshot(&self) -> &[Listing] {
        &self.snapshot
    }

    pub fn filtered(&self) -> &[Listing] {
        &self.filtered
    }

    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.snapshot.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

/// Tasks and workers, each in input order.
pub fn split_by_kind(listings: &[Listing]) -> (Vec<Listing>, Vec<Listing>) {
    listings
        .iter()
        .cloned()
        .partition(|l| l.kind == ListingKind::Task)
}
