use crate::domain::listing::Listing;
use maud::{html, Markup};

/// Marker popup: title, address, payment and a link to the full listing.
pub fn listing_popup(listing: &Listing) -> Markup {
    html! {
        div class="popup" data-listing-id=(listing.id) {
            strong { (listing.title) }
            br;
            small { (listing.address) }
            br;
            strong { "💰 " (listing.payment) }
            br;
            a class="btn btn-primary"
              href=(format!("/listings/{}", listing.id))
              hx-get=(format!("/listings/{}", listing.id))
              hx-target="#detail" {
                "Подробнее"
            }
        }
    }
}
