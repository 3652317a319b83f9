pub mod health_handler;
pub mod session_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_ready};
pub use session_handler::{
    create_session, delete_session, download_certificate, get_certificate, get_session,
    request_generation, reset_session, set_answer, set_topic, set_user_name, submit_test,
};

/// Registers every route of the quiz API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_ready)
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(set_topic)
        .service(request_generation)
        .service(set_answer)
        .service(submit_test)
        .service(set_user_name)
        .service(reset_session)
        .service(get_certificate)
        .service(download_certificate);
}
