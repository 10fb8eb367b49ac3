use crate::domain::listing::{Listing, ListingKind};
use maud::{html, Markup};

pub fn kind_badge(kind: ListingKind) -> (&'static str, &'static str) {
    match kind {
        ListingKind::Task => ("🔴", "Ищут исполнителя"),
        ListingKind::Worker => ("🟢", "Ищут работу"),
    }
}

/// Board entry. The whole card links to the detail view.
pub fn listing_card(listing: &Listing) -> Markup {
    let (emoji, label) = kind_badge(listing.kind);

    html! {
        a class="listing-card" href=(format!("/listings/{}", listing.id)) {
            div class="listing-card-header" {
                span class={ "listing-card-type " (listing.kind.as_str()) } { (emoji) " " (label) }
            }
            div class="listing-card-title" { (listing.title) }
            div class="listing-card-info" { "📍 " (listing.address) }
            div class="listing-card-info" { "💰 " (listing.payment) }
            div class="listing-card-info text-xs text-gray-400 mt-2" {
                (listing.description_preview(100))
            }
        }
    }
}
