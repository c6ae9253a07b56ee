use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    bulk_delete_students, create_student, delete_student, export_students, get_student_by_id,
    get_students, update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/bulk-delete", post(bulk_delete_students))
        .route("/export", post(export_students))
        .route(
            "/{id}",
            get(get_student_by_id)
                .put(update_student)
                .delete(delete_student),
        )
}
