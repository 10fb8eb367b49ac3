use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};

/// Convert a ServerError into an HTML error page with a matching status.
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound => "Объявление не найдено".to_string(),
        ServerError::BadRequest(msg) | ServerError::Unauthorized(msg) => msg.clone(),
        ServerError::Upstream(_) => "Сервис объявлений недоступен, попробуйте позже".to_string(),
        ServerError::InternalError => "Внутренняя ошибка".to_string(),
    };
    render_error(status, &message)
}

fn render_error(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                title { "Ошибка " (status) }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="container narrow" {
                h1 { "Ошибка " (status) }
                p { (message) }
                p { a href="/" { "← На карту" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
