use crate::authentication::reject_anonymous_users;
use crate::routes::{create_post, get_post};
use actix_web::middleware::from_fn;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/get/{post_id}", web::get().to(get_post))
        // Protected routes (require authentication)
        .service(
            web::scope("/me")
                .wrap(from_fn(reject_anonymous_users))
                .route("/create", web::post().to(create_post)),
        );
}
