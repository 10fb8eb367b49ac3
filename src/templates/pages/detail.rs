// templates/pages/detail.rs

use crate::domain::listing::{Listing, ListingKind};
use crate::templates::mini_app_layout;
use maud::{html, Markup};

/// Listing body, without the page chrome. Used as an htmx fragment too.
pub fn listing_detail(listing: &Listing) -> Markup {
    let owner = listing.username.as_deref().unwrap_or("не указан");

    html! {
        div class="listing-detail" {
            @match listing.kind {
                ListingKind::Task => {
                    h3 { "🔴 ЗАДАЧА" }
                    p { strong { "👤 Заказчик:" } " @" (owner) }
                    p { strong { "🔧 Что сделать:" } " " (listing.title) }
                    p { strong { "📝 Описание:" } " " (listing.description) }
                    p { strong { "📍 Адрес:" } " " (listing.address) }
                    p { strong { "💰 Оплата:" } " " (listing.payment) }
                    p { strong { "📞 Контакты:" } " " (listing.contacts) }
                    a class="btn-contact" href=(listing.contact_link()) { "Написать заказчику" }
                }
                ListingKind::Worker => {
                    h3 { "🟢 ИЩУ РАБОТУ" }
                    p { strong { "👤 Исполнитель:" } " @" (owner) }
                    p { strong { "🔧 Что умеет:" } " " (listing.title) }
                    p { strong { "📝 Описание:" } " " (listing.description) }
                    p { strong { "📍 Готов работать:" } " " (listing.address) }
                    p { strong { "💸 Оплата:" } " " (listing.payment) }
                    p { strong { "📞 Контакты:" } " " (listing.contacts) }
                    a class="btn-contact" href=(listing.contact_link()) { "Написать исполнителю" }
                }
            }
            @if let Some(created) = listing.created_at {
                p class="text-xs text-gray-400" { (created.format("%d.%m.%Y %H:%M").to_string()) }
            }
            a class="btn" href=(format!("/?show={}&lat={}&lng={}", listing.id, listing.latitude, listing.longitude)) {
                "Показать на карте"
            }
        }
    }
}

pub fn detail_page(listing: &Listing) -> Markup {
    mini_app_layout(&listing.title, html! {
        main class="container narrow" {
            (listing_detail(listing))
        }
    })
}
