//! Translation lookup handler

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::api::types::TranslationResponse;
use crate::i18n::Vars;

/// GET /api/i18n/:key?lang=zh&label=foo
///
/// Every query parameter other than `lang` binds a `$name` placeholder.
pub async fn translate_key(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Json<TranslationResponse> {
    let translator = &state.translator;
    let language = params
        .remove("lang")
        .unwrap_or_else(|| translator.default_language().to_string());
    let vars: Vars = params.into_iter().collect();
    let vars = (!vars.is_empty()).then_some(vars);

    Json(TranslationResponse {
        text: translator.get_text(&language, &key, vars.as_ref()),
        found: translator.has_key(&language, &key),
        key,
        language,
    })
}
