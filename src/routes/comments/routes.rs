use crate::{authentication, rate_limit, routes};
use actix_web::middleware;
use actix_web::web;

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route(
            "/get/posts/{post_id}",
            web::get().to(routes::show_comments_for_post),
        )
        .route(
            "/get/posts/{post_id}/expand/{comment_id}",
            web::get().to(routes::expand_comment_replies),
        )
        // Protected routes; `wrap` order is outermost last, so identity runs before the limiter
        .service(
            web::scope("/me")
                .wrap(middleware::from_fn(rate_limit::limit_comment_creation))
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .route("/create", web::post().to(routes::create_comment))
                .route(
                    "/reply/{comment_id}",
                    web::post().to(routes::reply_to_comment),
                ),
        );
}
