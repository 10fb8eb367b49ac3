use crate::api::INIT_DATA_HEADER;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Attaches the Telegram init data to every htmx request. A plain browser
/// navigation cannot carry it, so owner-scoped pages are only reached
/// through htmx.
fn init_data_script() -> String {
    format!(
        "document.addEventListener('htmx:configRequest', function (e) {{\n\
         \x20 var tg = window.Telegram && window.Telegram.WebApp;\n\
         \x20 if (tg && tg.initData) {{ e.detail.headers['{INIT_DATA_HEADER}'] = tg.initData; }}\n\
         }});"
    )
}

pub fn mini_app_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
                link rel="stylesheet" href="/static/main.css";
                script src="https://telegram.org/js/telegram-web-app.js" {}
                script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" defer {}
                script src="/static/htmx.js" defer {}
                script src="/static/app.js" defer {}
                script { (PreEscaped(init_data_script())) }
            }
            body {
                header class="flex items-center justify-between px-4 py-2 shadow" {
                    h3 { "Работа на карте" }
                    nav {
                        ul class="flex gap-3" {
                            li { a href="/" { "Карта" } }
                            li { a href="/board" { "Доска" } }
                            li {
                                a hx-get="/my" hx-target="#content" hx-select="#content"
                                  hx-swap="outerHTML" role="link" { "Мои объявления" }
                            }
                        }
                    }
                }
                div id="content" { (content) }
            }
        }
    }
}
