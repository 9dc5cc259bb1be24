use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use serde_json::Value;
use tracing::info;

use super::{JsonBody, MessageBody, QueryParams};
use crate::error::ApiError;
use crate::models::{NewUser, User};
use crate::repo::UserRepo;
use crate::validation::USER_SCHEMA;

#[derive(Serialize)]
pub struct UsersBody {
    users: Vec<User>,
}

#[derive(Serialize)]
pub struct UserBody {
    user: User,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(rename = "type")]
    user_type: Option<String>,
}

pub fn routes<R: UserRepo>(repo: R) -> Router {
    Router::new()
        .route("/users", get(list_users::<R>).post(insert_user::<R>))
        .route("/users/search", get(search_users::<R>))
        .route(
            "/users/{id}",
            get(get_user::<R>)
                .patch(update_user::<R>)
                .delete(delete_user::<R>),
        )
        .with_state(repo)
}

async fn list_users<R: UserRepo>(State(repo): State<R>) -> Result<Json<UsersBody>, ApiError> {
    let users = repo.list_users().await.map_err(ApiError::internal)?;

    info!("Retrieved {} users from the DB", users.len());

    Ok(Json(UsersBody { users }))
}

async fn search_users<R: UserRepo>(
    State(repo): State<R>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    // No type matches no rows
    let Some(user_type) = params.user_type else {
        info!("User search without a type");
        return Ok(Json(Vec::new()));
    };

    let users = repo
        .search_users(&user_type)
        .await
        .map_err(ApiError::internal)?;

    info!(
        "Found {} users with type {:?}",
        users.len(),
        user_type
    );

    Ok(Json(users))
}

async fn get_user<R: UserRepo>(
    State(repo): State<R>,
    Path(id): Path<String>,
) -> Result<Json<UserBody>, ApiError> {
    let Some(id) = parse_user_id(&id)? else {
        info!("User ID out of range: {}", id);
        return Err(no_such_user(&id));
    };

    let user = repo.get_user(id).await.map_err(ApiError::internal)?;

    match user {
        Some(user) => {
            info!("Retrieved user from DB: {:?}", user);
            Ok(Json(UserBody { user }))
        }
        None => {
            info!("No user found in DB with ID: {}", id);
            Err(no_such_user(&id.to_string()))
        }
    }
}

async fn insert_user<R: UserRepo>(
    State(repo): State<R>,
    JsonBody(body): JsonBody<Value>,
) -> Result<(StatusCode, Json<UserBody>), ApiError> {
    let new_user: NewUser = USER_SCHEMA.parse(body)?;

    let user = repo
        .insert_user(new_user)
        .await
        .map_err(ApiError::internal)?;

    info!("Inserted user into the DB: {:?}", user);

    Ok((StatusCode::CREATED, Json(UserBody { user })))
}

async fn update_user<R: UserRepo>(
    State(repo): State<R>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<UserBody>, ApiError> {
    let parsed_id = parse_user_id(&id)?;
    let new_user: NewUser = USER_SCHEMA.parse(body)?;
    let Some(id) = parsed_id else {
        info!("Tried to update user with out of range ID: {}", id);
        return Err(cannot_update_user(&id));
    };

    let updated_user = repo
        .update_user(id, new_user)
        .await
        .map_err(ApiError::internal)?;

    match updated_user {
        Some(user) => {
            info!("Updated user in DB: {:?}", user);
            Ok(Json(UserBody { user }))
        }
        None => {
            info!("Tried to update non-existent user with ID: {}", id);
            Err(cannot_update_user(&id.to_string()))
        }
    }
}

async fn delete_user<R: UserRepo>(
    State(repo): State<R>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let deleted = match parse_user_id(&id)? {
        Some(id) => repo.delete_user(id).await.map_err(ApiError::internal)?,
        None => false,
    };

    if deleted {
        info!("Deleted user from DB with ID: {}", id);
    } else {
        info!("Nothing to delete for user ID: {}", id);
    }

    Ok(Json(MessageBody { message: "Deleted" }))
}

/// `None` for a well-formed number that no row can have, since ids are `i32`
fn parse_user_id(id: &str) -> Result<Option<i32>, ApiError> {
    match id.parse::<i32>() {
        Ok(id) => Ok(Some(id)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(None)
        }
        Err(_) => Err(ApiError::BadRequest(format!("Invalid user id: {}", id))),
    }
}

fn no_such_user(id: &str) -> ApiError {
    ApiError::NotFound(format!("Can't find user with id of {}", id))
}

fn cannot_update_user(id: &str) -> ApiError {
    ApiError::NotFound(format!("Can't update user with id of {}", id))
}
