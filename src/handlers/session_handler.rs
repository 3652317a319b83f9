use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{SetAnswerRequest, SetTopicRequest, SetUserNameRequest},
};

#[post("/api/sessions")]
pub async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = state.session_service.create_session().await;
    Ok(HttpResponse::Created().json(view))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[delete("/api/sessions/{id}")]
pub async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.session_service.delete_session(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/api/sessions/{id}/topic")]
pub async fn set_topic(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SetTopicRequest>,
) -> Result<HttpResponse, AppError> {
    let view = state
        .session_service
        .set_topic(&id, &request.topic)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/generate")]
pub async fn request_generation(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.request_generation(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/api/sessions/{id}/answers")]
pub async fn set_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SetAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let key = request.option_key()?;
    let view = state
        .session_service
        .set_answer(&id, request.question_index, key)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/submit")]
pub async fn submit_test(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.submit(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/api/sessions/{id}/name")]
pub async fn set_user_name(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SetUserNameRequest>,
) -> Result<HttpResponse, AppError> {
    let view = state
        .session_service
        .set_user_name(&id, &request.user_name)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/reset")]
pub async fn reset_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.reset(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/api/sessions/{id}/certificate")]
pub async fn get_certificate(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let certificate = state.session_service.certificate(&id).await?;
    Ok(HttpResponse::Ok().json(certificate))
}

#[post("/api/sessions/{id}/certificate/download")]
pub async fn download_certificate(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let ack = state.session_service.download_certificate(&id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
