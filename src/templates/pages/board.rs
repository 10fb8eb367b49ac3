// templates/pages/board.rs

use crate::domain::filter::{Category, FilterInput};
use crate::domain::listing::Listing;
use crate::templates::components::{category_tabs, empty_state, listing_card};
use crate::templates::mini_app_layout;
use maud::{html, Markup};

pub fn board_page(category: Category, input: &FilterInput, listings: &[Listing]) -> Markup {
    mini_app_layout(
        "Доска объявлений",
        html! {
            main class="container" {
                h1 { "Доска объявлений" }

                (category_tabs("/board", "category", category, ("Задачи", "Исполнители")))

                form class="filters" action="/board" method="get"
                     hx-get="/board" hx-target="#board-listings" hx-select="#board-listings" {
                    input type="hidden" name="category" value=(category.as_str());
                    input type="search" name="search" placeholder="Поиск" value=(input.search);
                    input type="number" name="min_payment" min="0" placeholder="Оплата от"
                          value=(input.min_payment);
                    input type="text" name="payment_type" placeholder="BYN, USD, /час..."
                          value=(input.payment_type);
                    button type="submit" class="btn" { "Применить" }
                }

                div id="board-listings" {
                    @if listings.is_empty() {
                        (empty_state())
                    } @else {
                        @for listing in listings {
                            (listing_card(listing))
                        }
                    }
                }
            }
        },
    )
}
