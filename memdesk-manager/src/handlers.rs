use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use memdesk_core::{Error, MemoryKind};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::pages::{self, MemorySection};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub content: String,
}

fn oversized_response(max: usize) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("内容长度超过限制（{}KB）", max / 1024),
    )
        .into_response()
}

/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> Response {
    let worker = state.clone();
    let contents = tokio::task::spawn_blocking(move || {
        let contents =
            MemoryKind::ALL.map(|kind| worker.files.read_to_string(worker.layout.path_of(kind)));
        // Read first so a file deleted out from under us shows as unavailable.
        if let Err(e) = worker.layout.ensure() {
            warn!("Failed to ensure memory layout: {}", e);
        }
        contents
    })
    .await;

    let contents = match contents {
        Ok(contents) => contents,
        Err(e) => {
            error!("Home page read task failed: {}", e);
            [None, None]
        }
    };

    let sections: Vec<MemorySection<'_>> = MemoryKind::ALL
        .into_iter()
        .zip(contents)
        .map(|(kind, content)| MemorySection {
            kind,
            filename: state.layout.filename(kind),
            content: content.unwrap_or_else(|| kind.empty_placeholder().to_string()),
        })
        .collect();

    Html(pages::render_index(&sections)).into_response()
}

/// `GET /edit/:filename`
pub async fn edit_form_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Html<String> {
    let files = state.files.clone();
    let target = files.join(&filename);
    let content = tokio::task::spawn_blocking(move || files.read_to_string(&target))
        .await
        .unwrap_or_else(|e| {
            error!(file = %filename, "Edit page read task failed: {}", e);
            None
        })
        .unwrap_or_default();
    Html(pages::render_edit(&filename, &content))
}

/// `POST /edit/:filename`
pub async fn save_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    form: Result<Form<EditForm>, FormRejection>,
) -> Response {
    let max = state.max_content_length();
    let form = match form {
        Ok(Form(form)) => form,
        // Treated like a form without a `content` field.
        Err(FormRejection::InvalidFormContentType(_)) => EditForm::default(),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(file = %filename, max, "Rejected submission over the body limit");
            return oversized_response(max);
        }
        Err(rejection) => return rejection.into_response(),
    };

    if form.content.len() > max {
        warn!(
            file = %filename,
            len = form.content.len(),
            max,
            "Rejected oversized submission"
        );
        return oversized_response(max);
    }

    let files = state.files.clone();
    let target = files.join(&filename);
    let bytes = form.content.len();
    let result = tokio::task::spawn_blocking(move || files.write(&target, &form.content)).await;

    match result {
        Ok(Ok(())) => {
            info!(file = %filename, bytes, "Saved memory file");
            (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
        }
        Ok(Err(Error::AccessDenied(path))) => {
            warn!(file = %filename, "Refused write outside base directory: {}", path);
            (StatusCode::FORBIDDEN, "拒绝访问：文件不在记忆目录内").into_response()
        }
        Ok(Err(e)) => {
            error!(file = %filename, "Failed to save memory file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "保存失败").into_response()
        }
        Err(e) => {
            error!(file = %filename, "Save task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "保存失败").into_response()
        }
    }
}
