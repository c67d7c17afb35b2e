use crate::{
    auth::{ensure_owner, AuthenticatedUser},
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
    state::AppState,
    store::Store,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Loads a task and checks that `user` owns it.
///
/// Existence is confirmed first (`NotFound`), ownership second (`Forbidden`).
/// Every handler that reads or mutates a single task goes through here.
async fn load_owned_task(
    store: &dyn Store,
    task_id: Uuid,
    user: AuthenticatedUser,
) -> Result<Task, AppError> {
    let task = store
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    ensure_owner(user.0, &task)?;
    Ok(task)
}

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: A JSON array of `Task` objects owned by the caller.
/// - `401 Unauthorized`: Missing, malformed or invalid bearer token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.store.list_tasks_by_owner(user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner is taken from the verified token, never from the body.
///
/// ## Responses:
/// - `201 Created`: The new `Task`.
/// - `401 Unauthorized`: Missing, malformed or invalid bearer token.
/// - `422 Unprocessable Entity`: Title empty or too long, description too long.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0);
    state.store.create_task(&task).await?;
    log::debug!("Created task {} for {}", task.id, task.user_id);

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `400 Bad Request`: The id is not a UUID.
/// - `403 Forbidden`: The task belongs to someone else.
/// - `404 Not Found`: No task with this id.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = load_owned_task(state.store.as_ref(), task_id.into_inner(), user).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task the caller owns. Fields absent from the body are kept.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `400 Bad Request`: The id is not a UUID or the body is not valid JSON.
/// - `403 Forbidden`: The task belongs to someone else; nothing is written.
/// - `404 Not Found`: No task with this id.
/// - `422 Unprocessable Entity`: Input validation failed.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let mut task = load_owned_task(state.store.as_ref(), task_id.into_inner(), user).await?;
    task.apply(task_data.into_inner());
    state.store.update_task(&task).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task the caller owns.
///
/// ## Responses:
/// - `204 No Content`: Deleted.
/// - `400 Bad Request`: The id is not a UUID.
/// - `403 Forbidden`: The task belongs to someone else; nothing is deleted.
/// - `404 Not Found`: No task with this id.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = load_owned_task(state.store.as_ref(), task_id.into_inner(), user).await?;
    state.store.delete_task(task.id).await?;
    log::debug!("Deleted task {}", task.id);

    Ok(HttpResponse::NoContent().finish())
}
