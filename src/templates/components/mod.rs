use crate::app::published_message;
use crate::domain::filter::Category;
use crate::domain::listing::{ListingId, ListingKind};
use maud::{html, Markup};

pub mod error;
pub mod listing_card;
pub mod popup;

pub use error::html_error_response;
pub use listing_card::listing_card;
pub use popup::listing_popup;

pub fn empty_state() -> Markup {
    html! {
        p class="text-center text-gray-400 p-5" { "Нет объявлений" }
    }
}

/// Swapped into the placement form after a successful publish.
pub fn published_notice(kind: ListingKind, id: ListingId) -> Markup {
    html! {
        div class="notice success" {
            p { "✅ " (published_message(kind)) }
            a href=(format!("/listings/{id}")) hx-get=(format!("/listings/{id}")) hx-target="#detail" {
                "Открыть объявление"
            }
        }
    }
}

/// Tasks/workers switch linking to `{path}?{param}=tasks|workers`.
pub fn category_tabs(path: &str, param: &str, active: Category, labels: (&str, &str)) -> Markup {
    html! {
        div class="tabs" {
            @for (category, label) in [(Category::Tasks, labels.0), (Category::Workers, labels.1)] {
                a.tab.active[category == active]
                  href=(format!("{path}?{param}={}", category.as_str())) {
                    (label)
                }
            }
        }
    }
}
