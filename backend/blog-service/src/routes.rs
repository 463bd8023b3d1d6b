/// Route table
///
/// Shared between `main` and the integration tests so both run the exact
/// same wiring. Protected handlers declare an `Identity` parameter; the
/// access-control stage rejects the request before the handler body runs.
use actix_web::web;

use crate::{handlers, AppState};

pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .route("/api/v1/health", web::get().to(handlers::health))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .service(
                                web::resource("/register")
                                    .route(web::post().to(handlers::auth::register)),
                            )
                            .service(
                                web::resource("/login").route(web::post().to(handlers::auth::login)),
                            )
                            .service(web::resource("/me").route(web::get().to(handlers::auth::me))),
                    )
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::posts::list_posts))
                                    .route(web::post().to(handlers::posts::create_post)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::posts::get_post))
                                    .route(web::put().to(handlers::posts::update_post))
                                    .route(web::delete().to(handlers::posts::delete_post)),
                            )
                            .service(
                                web::resource("/{post_id}/image")
                                    .route(web::post().to(handlers::posts::attach_image)),
                            )
                            .service(
                                web::resource("/{post_id}/comments")
                                    .route(web::get().to(handlers::comments::get_post_comments))
                                    .route(web::post().to(handlers::comments::add_comment)),
                            ),
                    ),
            );
    }
}
