pub mod document_handlers;
pub mod health_handlers;
pub mod token_handlers;
pub mod user_handlers;

pub use document_handlers::{
    create_worksheet_handler, list_services_handler, list_testimonials_handler,
    list_worksheets_handler,
};
pub use health_handlers::liveness_handler;
pub use token_handlers::issue_token_handler;
pub use user_handlers::{
    assign_employee_handler, check_admin_handler, check_hr_handler, list_users_handler,
    promote_to_hr_handler, register_user_handler, unverify_user_handler, verify_user_handler,
};
