// HTTP surface - thin wrapper over the resolver and the session loop

use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::{header::ORIGIN, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::models::PageRecord;
use crate::render::render_markdown;
use crate::session;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/{slug}", get(view_page))
        .route("/{slug}/ws", get(edit_channel))
        .with_state(state)
}

/// Landing page: a link to a freshly generated slug. Never touches the
/// store; the page only comes to exist when someone follows the link.
async fn home(State(state): State<AppState>) -> Html<String> {
    let slug = state.ids.generate_slug();
    let markdown = format!(
        "<a href='/{}' class='fr'>New</a>\n\n# scrawl\n\nThe simplest way to take notes.\n",
        slug
    );
    Html(page_shell("scrawl", &render_markdown(&markdown), None))
}

async fn view_page(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    info!(%slug, "loading page");
    let resolved = state.resolver.resolve(&slug).await?;
    Ok(Html(page_shell(
        &slug,
        &resolved.rendered,
        resolved.record.as_ref(),
    )))
}

/// Upgrade to the live edit channel. The accepted-origin policy is plain
/// configuration; an upgrade from anywhere else is refused before the
/// handshake completes.
async fn edit_channel(
    Path(_slug): Path<String>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    if !state.config.websocket.origin_allowed(origin) {
        warn!(origin = origin.unwrap_or("<none>"), "rejected ws upgrade");
        return StatusCode::FORBIDDEN.into_response();
    }

    let store = state.store.clone();
    ws.on_upgrade(move |socket| session::run(socket, store))
}

/// Minimal HTML shell around rendered content. Pages that resolved to a
/// single record also get the autosave client: a hidden textarea plus a
/// script that streams edits over the websocket.
fn page_shell(title: &str, rendered: &str, record: Option<&PageRecord>) -> String {
    let client = match record {
        Some(record) => autosave_client(record),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ max-width: 42em; margin: 2em auto; font-family: sans-serif; }}\n\
         .fr {{ float: right; }}\n\
         #editor {{ width: 100%; height: 24em; display: none; }}\n\
         </style>\n\
         </head>\n<body>\n<div id='rendered'>{rendered}</div>\n{client}\n</body>\n</html>\n",
        title = html_escape(title),
        rendered = rendered,
        client = client,
    )
}

fn autosave_client(record: &PageRecord) -> String {
    // Values cross into script text as JSON string literals.
    let id = json_string(&record.id);
    let slug = json_string(&record.slug);
    let content = json_string(&record.content);

    format!(
        "<textarea id='editor'></textarea>\n\
         <script>\n\
         const pageId = {id};\n\
         const pageSlug = {slug};\n\
         const editor = document.getElementById('editor');\n\
         editor.value = {content};\n\
         const socket = new WebSocket(\n\
           (location.protocol === 'https:' ? 'wss://' : 'ws://') +\n\
           location.host + '/' + encodeURIComponent(pageSlug) + '/ws');\n\
         document.getElementById('editlink').addEventListener('click', (e) => {{\n\
           e.preventDefault();\n\
           editor.style.display = editor.style.display === 'block' ? 'none' : 'block';\n\
         }});\n\
         editor.addEventListener('input', () => {{\n\
           socket.send(JSON.stringify({{ id: pageId, slug: pageSlug, data: editor.value }}));\n\
         }});\n\
         socket.onmessage = (event) => {{\n\
           const ack = JSON.parse(event.data);\n\
           if (!ack.success) {{ console.warn('autosave failed:', ack.message); }}\n\
         }};\n\
         </script>",
        id = id,
        slug = slug,
        content = content,
    )
}

fn json_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_embeds_rendered_content() {
        let html = page_shell("notes", "<h1>notes</h1>", None);
        assert!(html.contains("<h1>notes</h1>"));
        assert!(!html.contains("new WebSocket"));
    }

    #[test]
    fn shell_with_record_carries_autosave_client() {
        let record = PageRecord {
            id: "abc123".to_string(),
            slug: "notes".to_string(),
            content: "# notes\n".to_string(),
            created_at: 0,
            modified_at: 0,
        };
        let html = page_shell("notes", "<h1>notes</h1>", Some(&record));
        assert!(html.contains("new WebSocket"));
        assert!(html.contains("\"abc123\""));
    }

    #[test]
    fn titles_are_escaped() {
        let html = page_shell("<script>", "", None);
        assert!(html.contains("<title>&lt;script&gt;</title>"));
    }
}
