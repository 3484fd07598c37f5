use actix_web::web;

use crate::{handlers::auth_handler, middleware::jwt_middleware::VerifyJWT};

pub fn config(config: &mut web::ServiceConfig, jwt_middleware: VerifyJWT) {
    config.service(
        web::scope("/auth")
            .service(auth_handler::register)
            .service(auth_handler::login)
            .service(
                web::scope("/me")
                    .wrap(jwt_middleware)
                    .service(auth_handler::me),
            ),
    );
}
