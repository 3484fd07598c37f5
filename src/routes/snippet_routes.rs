use actix_web::web;

use crate::{handlers::snippet_handler, middleware::jwt_middleware::VerifyJWT};

pub fn config(config: &mut web::ServiceConfig, jwt_middleware: VerifyJWT) {
    config.service(
        web::scope("/snippets")
            .wrap(jwt_middleware)
            .service(snippet_handler::list_snippets)
            .service(snippet_handler::create_snippet)
            .service(snippet_handler::get_snippet)
            .service(snippet_handler::update_snippet)
            .service(snippet_handler::delete_snippet)
            .service(snippet_handler::toggle_favorite),
    );
}
