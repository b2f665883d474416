use axum::extract::Extension;
use std::sync::Arc;

use crate::services::ChatService;

/// Static facts surfaced by the liveness text.
#[derive(Debug, Clone)]
pub struct StatusState {
    pub api_key_configured: bool,
}

pub async fn status_handler(
    Extension(status): Extension<Arc<StatusState>>,
    Extension(chat_service): Extension<Arc<ChatService>>,
) -> String {
    format!(
        "API key configured: {}. Catalog: {} entries loaded.",
        if status.api_key_configured { "yes" } else { "no" },
        chat_service.catalog_len()
    )
}
