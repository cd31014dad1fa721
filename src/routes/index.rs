use axum::response::Html;

/// Landing page with plain HTML forms for the API
///
/// GET /
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../views/index.html"))
}
