use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    records::{
        dto::{AddUserRequest, MessageResponse, UserItem, UsersResponse},
        services::{self, RecordError},
    },
    state::AppState,
};

const ADD_USER_FORM: &str = r#"
    <h2>Add User (Browser Form)</h2>
    <form method="POST">
        Name: <input name="name"><br><br>
        Email: <input name="email"><br><br>
        Phone: <input name="phone"><br><br>
        <input type="submit" value="Add User">
    </form>
"#;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/all_users", get(all_users))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/add_user", post(add_user))
        .route("/add_user_form", get(add_user_form_page).post(add_user_form))
}

pub async fn home() -> &'static str {
    "✅ Data Redundancy Removal System is Running!"
}

/// POST /add_user { name, email, phone }
#[instrument(skip(state, payload))]
pub async fn add_user(
    State(state): State<AppState>,
    payload: Option<Json<AddUserRequest>>,
) -> (StatusCode, Json<MessageResponse>) {
    // `{}` carries no data at all, same as a missing body.
    let Some(Json(body)) = payload.filter(|Json(b)| !b.is_empty()) else {
        warn!("add_user without JSON data");
        return (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Missing JSON data")),
        );
    };

    match services::submit(state.records.as_ref(), body.name, body.email, body.phone).await {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse::new("Unique Data Added Successfully")),
        ),
        Err(e) => {
            let message = match &e {
                RecordError::InvalidInput(_) => "Invalid input".to_string(),
                RecordError::DuplicateRecord => "Duplicate or Redundant Data Found".to_string(),
                RecordError::Persistence(detail) => format!("Error: {}", detail),
            };
            (status_for(&e), Json(MessageResponse::new(message)))
        }
    }
}

pub async fn add_user_form_page() -> Html<&'static str> {
    Html(ADD_USER_FORM)
}

/// POST /add_user_form (application/x-www-form-urlencoded)
#[instrument(skip(state, form))]
pub async fn add_user_form(
    State(state): State<AppState>,
    form: Option<Form<AddUserRequest>>,
) -> (StatusCode, String) {
    let body = form.map(|Form(b)| b).unwrap_or_default();

    match services::submit(state.records.as_ref(), body.name, body.email, body.phone).await {
        Ok(_) => (StatusCode::OK, "✅ User added successfully".into()),
        Err(RecordError::InvalidInput(_)) => (StatusCode::BAD_REQUEST, "⚠ Invalid input".into()),
        // Browser flow answers duplicates with a normal page.
        Err(RecordError::DuplicateRecord) => {
            (StatusCode::OK, "⚠ Duplicate or redundant user".into())
        }
        Err(RecordError::Persistence(detail)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("⚠ Error: {}", detail),
        ),
    }
}

#[instrument(skip(state))]
pub async fn all_users(
    State(state): State<AppState>,
) -> Result<Json<UsersResponse>, (StatusCode, Json<MessageResponse>)> {
    let users = services::list_all(state.records.as_ref()).await.map_err(|e| {
        (
            status_for(&e),
            Json(MessageResponse::new(format!("Error: {}", e))),
        )
    })?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(UserItem::from).collect(),
    }))
}

fn status_for(e: &RecordError) -> StatusCode {
    match e {
        RecordError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        RecordError::DuplicateRecord => StatusCode::CONFLICT,
        RecordError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
