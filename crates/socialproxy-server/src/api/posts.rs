use axum::{body::Bytes, extract::State, Extension, Json};
use serde::Serialize;
use serde_json::{json, Value};
use socialproxy_core::{ProfileQuery, MAX_COLLECTED_POSTS};
use socialproxy_imaging::{is_image_link, ImageFetcher, ImagingError};

use crate::middleware::RequestId;

use super::{AggregateError, AppState};

#[derive(Debug, Default, Serialize)]
pub(super) struct PostsSummary {
    /// Sum of every profile's upstream-reported total; may exceed `posts.len()`.
    pub total: i64,
    pub posts: Vec<Value>,
}

impl PostsSummary {
    fn is_full(&self) -> bool {
        self.posts.len() >= MAX_COLLECTED_POSTS
    }
}

/// What to do with a post pulled from an upstream page.
#[derive(Debug, PartialEq, Eq)]
enum PictureAction {
    /// No truthy `picture`; the post is not collected.
    Drop,
    /// Collected as-is.
    Keep,
    /// Collected with `picture` replaced by a grayscale rendition of this URL.
    Transcode(String),
}

fn classify(post: &Value) -> PictureAction {
    match post.get("picture") {
        Some(Value::String(url)) if is_image_link(url) => PictureAction::Transcode(url.clone()),
        Some(picture) if is_truthy(picture) => PictureAction::Keep,
        _ => PictureAction::Drop,
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

async fn prepare_post(
    images: &ImageFetcher,
    mut post: Value,
) -> Result<Option<Value>, ImagingError> {
    match classify(&post) {
        PictureAction::Drop => Ok(None),
        PictureAction::Keep => Ok(Some(post)),
        PictureAction::Transcode(url) => {
            let encoded = images.grayscale_base64(&url).await?;
            if let Some(fields) = post.as_object_mut() {
                fields.insert("picture".to_string(), json!({"url": url, "base64": encoded}));
            }
            Ok(Some(post))
        }
    }
}

/// `POST /posts`: first page of posts per profile, capped across all profiles.
///
/// Profiles are fetched strictly in order. Every profile is queried and
/// counted even once the cap is reached; only collection stops.
pub(super) async fn aggregate_posts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<PostsSummary>, AggregateError> {
    let query: ProfileQuery =
        serde_json::from_slice(&body).map_err(AggregateError::InvalidRequest)?;

    let mut summary = PostsSummary::default();
    for profile in &query.profiles {
        let page = state.upstream.get_posts(profile, &query.range).await?;
        summary.total += page.total;

        for post in page.posts {
            if summary.is_full() {
                break;
            }
            if let Some(post) = prepare_post(&state.images, post).await? {
                summary.posts.push(post);
            }
        }
    }

    tracing::info!(
        request_id = %req_id.0,
        profiles = query.profiles.len(),
        total = summary.total,
        collected = summary.posts.len(),
        "aggregated posts"
    );
    Ok(Json(summary))
}
