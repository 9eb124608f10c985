//! HTTP handlers and route configuration.

mod auth;
mod catalog;
mod comments;
mod health;
mod media;
mod posts;
mod profiles;
mod views;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::PayloadConfig::new(media::MAX_UPLOAD_BYTES))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .service(
                        web::resource("/me")
                            .route(web::get().to(auth::me))
                            .route(web::put().to(auth::update_me))
                            .route(web::delete().to(auth::delete_me)),
                    ),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list))
                            .route(web::post().to(posts::create)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(posts::detail))
                            .route(web::put().to(posts::update))
                            .route(web::delete().to(posts::delete)),
                    )
                    .route("/{id}/comments", web::post().to(comments::create))
                    .service(
                        web::resource("/{id}/comments/{comment_id}")
                            .route(web::put().to(comments::update))
                            .route(web::delete().to(comments::delete)),
                    ),
            )
            .route("/categories", web::get().to(catalog::list_categories))
            .route(
                "/categories/{slug}/posts",
                web::get().to(catalog::category_feed),
            )
            .route("/locations", web::get().to(catalog::list_locations))
            .route("/profile/{username}", web::get().to(profiles::profile_feed))
            .route("/media", web::post().to(media::upload))
            .route("/media/{name}", web::get().to(media::fetch))
            .service(
                web::scope("/admin")
                    .route("/categories", web::post().to(catalog::create_category))
                    .service(
                        web::resource("/categories/{id}")
                            .route(web::put().to(catalog::update_category))
                            .route(web::delete().to(catalog::delete_category)),
                    )
                    .route("/locations", web::post().to(catalog::create_location))
                    .service(
                        web::resource("/locations/{id}")
                            .route(web::put().to(catalog::update_location))
                            .route(web::delete().to(catalog::delete_location)),
                    ),
            ),
    );
}
