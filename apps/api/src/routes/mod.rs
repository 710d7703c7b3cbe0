pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::admin::handlers as admin;
use crate::catalog::handlers as catalog;
use crate::quiz::handlers as quiz;
use crate::result::handlers as result;
use crate::state::AppState;
use crate::stylist::handlers as stylist;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Storefront
        .route("/api/v1/quiz", get(quiz::handle_get_quiz))
        .route("/api/v1/quiz/advance", post(quiz::handle_advance))
        .route("/api/v1/quiz/submit", post(quiz::handle_submit))
        .route("/api/v1/result", get(result::handle_get_result))
        .route("/api/v1/result/share", post(result::handle_share))
        .route("/api/v1/products", get(catalog::handle_list_products))
        .route("/api/v1/products/:id", get(catalog::handle_get_product))
        // AI stylist chat
        .route(
            "/api/v1/stylist/quick-questions",
            get(stylist::handle_quick_questions),
        )
        .route("/api/v1/stylist/sessions", post(stylist::handle_open_session))
        .route(
            "/api/v1/stylist/sessions/:id",
            get(stylist::handle_get_session).delete(stylist::handle_close_session),
        )
        .route(
            "/api/v1/stylist/sessions/:id/messages",
            post(stylist::handle_send_message),
        )
        // Admin
        .route(
            "/api/v1/admin/results",
            get(admin::handle_list_results).post(admin::handle_create_result),
        )
        .route(
            "/api/v1/admin/results/combinations",
            get(admin::handle_list_combinations),
        )
        .route(
            "/api/v1/admin/results/generate-missing",
            post(admin::handle_generate_missing),
        )
        .route(
            "/api/v1/admin/results/:id",
            put(admin::handle_update_result).delete(admin::handle_delete_result),
        )
        .route(
            "/api/v1/admin/ai-responses",
            get(admin::handle_list_rules).post(admin::handle_create_rule),
        )
        .route(
            "/api/v1/admin/ai-responses/:id",
            put(admin::handle_update_rule).delete(admin::handle_delete_rule),
        )
        .route(
            "/api/v1/admin/quick-questions",
            get(admin::handle_list_quick_questions).post(admin::handle_create_quick_question),
        )
        .route(
            "/api/v1/admin/quick-questions/:id",
            put(admin::handle_update_quick_question).delete(admin::handle_delete_quick_question),
        )
        .route(
            "/api/v1/admin/quiz-questions",
            get(admin::handle_list_quiz_questions),
        )
        .route(
            "/api/v1/admin/quiz-questions/:id",
            put(admin::handle_update_quiz_question),
        )
        .route(
            "/api/v1/admin/quiz-questions/:id/options",
            post(admin::handle_add_quiz_option),
        )
        .route(
            "/api/v1/admin/quiz-questions/:id/options/:option_id",
            delete(admin::handle_delete_quiz_option),
        )
        .route(
            "/api/v1/admin/settings",
            get(admin::handle_get_settings).put(admin::handle_put_settings),
        )
        .route(
            "/api/v1/admin/images",
            get(admin::handle_list_images).post(admin::handle_register_image),
        )
        .route("/api/v1/admin/images/delete", post(admin::handle_delete_images))
        .route("/api/v1/admin/images/:id", put(admin::handle_update_image))
        .with_state(state)
}
