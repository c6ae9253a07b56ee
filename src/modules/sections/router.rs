use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    bulk_delete_sections, create_section, delete_section, get_section_by_id, get_section_options,
    get_sections, update_section,
};

pub fn init_sections_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_section).get(get_sections))
        .route("/options", get(get_section_options))
        .route("/bulk-delete", post(bulk_delete_sections))
        .route(
            "/{id}",
            get(get_section_by_id)
                .put(update_section)
                .delete(delete_section),
        )
}
