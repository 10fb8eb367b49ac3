// src/domain/filter.rs

use crate::domain::listing::{Listing, ListingKind};
use crate::domain::payment::{extract_amount, parse_min_payment};

/// Board view selector. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Tasks,
    Workers,
}

impl Category {
    pub fn kind(&self) -> ListingKind {
        match self {
            Category::Tasks => ListingKind::Task,
            Category::Workers => ListingKind::Worker,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tasks => "tasks",
            Category::Workers => "workers",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "tasks" | "task" => Some(Category::Tasks),
            "workers" | "worker" => Some(Category::Workers),
            _ => None,
        }
    }
}

/// Raw filter inputs as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInput {
    pub search: String,
    pub min_payment: String,
    pub payment_type: String,
}

/// Criteria rebuilt from the inputs on every apply.
/// Text fields are stored case-folded.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub category: Category,
    pub search_text: String,
    pub min_payment: f64,
    pub payment_type_hint: String,
}

impl FilterCriteria {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            search_text: String::new(),
            min_payment: 0.0,
            payment_type_hint: String::new(),
        }
    }

    pub fn from_input(category: Category, input: &FilterInput) -> Self {
        Self {
            category,
            search_text: input.search.trim().to_lowercase(),
            min_payment: parse_min_payment(&input.min_payment),
            payment_type_hint: input.payment_type.trim().to_lowercase(),
        }
    }

    fn payment_gate_active(&self) -> bool {
        self.min_payment > 0.0 || !self.payment_type_hint.is_empty()
    }

    /// True when `listing` survives every active gate.
    pub fn matches(&self, listing: &Listing) -> bool {
        if listing.kind != self.category.kind() {
            return false;
        }

        if !self.search_text.is_empty()
            && !listing.title.to_lowercase().contains(&self.search_text)
            && !listing.description.to_lowercase().contains(&self.search_text)
        {
            return false;
        }

        if self.payment_gate_active() {
            if self.min_payment > 0.0 && extract_amount(&listing.payment) < self.min_payment {
                return false;
            }
            if !self.payment_type_hint.is_empty()
                && !listing
                    .payment
                    .to_lowercase()
                    .contains(&self.payment_type_hint)
            {
                return false;
            }
        }

        true
    }
}

/// Order-preserving subset of `listings` matching `criteria`.
pub fn apply(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| criteria.matches(l))
        .cloned()
        .collect()
}
