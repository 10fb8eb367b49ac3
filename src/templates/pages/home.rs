// templates/pages/home.rs

use crate::domain::listing::ListingId;
use crate::map::{Viewport, MAX_ZOOM, TILE_ATTRIBUTION, TILE_URL};
use crate::templates::mini_app_layout;
use maud::{html, Markup, PreEscaped};

pub struct HomeVm {
    pub viewport: Viewport,
    /// Marker layer as JSON, embedded for the map widget.
    pub markers_json: String,
    /// Listing whose popup a deep link opened.
    pub focus: Option<ListingId>,
    /// Address to show once deep-link parameters are consumed.
    pub clean_url: Option<String>,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    mini_app_layout(
        "Работа на карте",
        html! {
            div id="map"
                data-lat=(vm.viewport.center.lat)
                data-lng=(vm.viewport.center.lng)
                data-zoom=(vm.viewport.zoom)
                data-max-zoom=(MAX_ZOOM)
                data-tiles=(TILE_URL)
                data-attribution=(TILE_ATTRIBUTION)
                data-focus=[vm.focus]
                data-clean-url=[vm.clean_url.as_deref()] {}

            div id="hint" class="hint" {}

            div class="actions" {
                button class="btn btn-task" data-place="task" { "🔴 Разместить задачу" }
                button class="btn btn-worker" data-place="worker" { "🟢 Ищу работу" }
                a class="btn" href="/board" { "📋 Доска объявлений" }
            }

            // Hidden until a pin is down; the map script fills kind and coordinates.
            form id="listing-form" class="modal" hidden
                 hx-post="/listings" hx-target="#form-result" {
                input type="hidden" name="kind";
                input type="hidden" name="lat";
                input type="hidden" name="lng";
                input type="text" name="title" placeholder="Что нужно сделать / что вы умеете";
                textarea name="description" placeholder="Описание" {}
                input type="text" name="address" placeholder="Адрес";
                label { input type="radio" name="payment" value="amount" checked; " Сумма" }
                label { input type="radio" name="payment" value="negotiable"; " Договорная" }
                input type="number" name="amount" min="0" placeholder="Сумма";
                select name="unit" {
                    option value="BYN" { "BYN" }
                    option value="BYN/час" { "BYN/час" }
                    option value="USD" { "USD" }
                }
                input type="text" name="contacts" placeholder="@username или телефон";
                button type="button" class="btn" data-choose-on-map { "Выбрать на карте" }
                button type="submit" class="btn btn-primary" { "Опубликовать" }
                div id="form-result" {}
            }

            div id="detail" {}

            // JSON is escaped for `</` so it cannot close the script element.
            script id="markers" type="application/json" {
                (PreEscaped(vm.markers_json.replace("</", "<\\/")))
            }
        },
    )
}
