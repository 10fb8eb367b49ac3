// templates/pages/my_listings.rs

use crate::domain::filter::Category;
use crate::domain::listing::Listing;
use crate::templates::components::{category_tabs, empty_state};
use crate::templates::mini_app_layout;
use maud::{html, Markup};

pub fn my_listings_page(tab: Category, listings: &[Listing]) -> Markup {
    mini_app_layout(
        "Мои объявления",
        html! {
            main class="container" {
                h1 { "Мои объявления" }

                (category_tabs("/my", "tab", tab, ("Мои задачи", "Мои анкеты")))

                @if listings.is_empty() {
                    (empty_state())
                } @else {
                    @for listing in listings {
                        div class="listing-item" id=(format!("listing-{}", listing.id)) {
                            h4 { (listing.title) }
                            p { "📍 " (listing.address) }
                            p { "💰 " (listing.payment) }
                            p class="text-xs text-gray-400 mt-2" { (listing.description_preview(100)) }
                            button class="btn-remove"
                                   hx-delete=(format!("/listings/{}", listing.id))
                                   hx-confirm="Снять объявление с публикации?"
                                   hx-target=(format!("#listing-{}", listing.id))
                                   hx-swap="outerHTML" {
                                "Снять"
                            }
                        }
                    }
                }
            }
        },
    )
}
