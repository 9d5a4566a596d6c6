//! `/sitemap.xml` for the single-page website.

use super::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{DateTime, SecondsFormat, Utc};

/// Render the sitemap with one entry for the site root.
pub fn render(site_url: &str, last_modified: DateTime<Utc>) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         <url>\n\
         <loc>{}</loc>\n\
         <lastmod>{}</lastmod>\n\
         <changefreq>monthly</changefreq>\n\
         <priority>1.0</priority>\n\
         </url>\n\
         </urlset>\n",
        escape_xml(site_url),
        last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        render(&state.site_url, Utc::now()),
    )
}
