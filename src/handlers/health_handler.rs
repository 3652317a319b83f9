use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready only when quiz generation is configured.
#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let configured = state.config.gemini_api_key.is_some();
    let active_sessions = state.session_service.session_count().await;

    let response = serde_json::json!({
        "status": if configured { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": active_sessions,
        "dependencies": {
            "generation_api": if configured { "configured" } else { "missing_api_key" }
        }
    });

    if configured {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_health_ready_without_api_key() {
        let mut config = Config::test_config();
        config.gemini_api_key = None;
        let state = AppState::new(config).expect("state should build");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check_ready),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_health_ready_reports_active_sessions() {
        let state = AppState::new(Config::test_config()).expect("state should build");
        state.session_service.create_session().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check_ready),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ready");
        assert_eq!(body["active_sessions"], 1);
    }
}
