use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, middleware, web, App, HttpServer};

use civictrack::auth::bootstrap;
use civictrack::config::AppConfig;
use civictrack::feed::{self, IssueFeed};
use civictrack::db;
use civictrack::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let cfg = AppConfig::from_env();

    let pool = db::init_pool(&cfg.database_url)
        .await
        .expect("Failed to connect to the complaint store");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let issue_feed = Arc::new(IssueFeed::new());
    let clients = handlers::ws::new_client_registry();

    // One-shot session bootstrap: on failure the dashboard stays up but inert,
    // showing the demonstration records with no live subscription.
    let listener_handle = match bootstrap::establish(&pool, &cfg).await {
        Ok(session) => {
            log::info!(
                "Store session {} ({:?}) ready; starting change listener",
                session.id,
                session.kind
            );
            Some(actix_web::rt::spawn(feed::run_listener(
                pool.clone(),
                cfg.tenant_id.clone(),
                issue_feed.clone(),
                clients.clone(),
            )))
        }
        Err(e) => {
            log::error!("Authentication failed: {e}");
            None
        }
    };

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    log::info!("Starting CivicTrack admin at http://{}", cfg.bind_addr);

    let bind_addr = cfg.bind_addr.clone();
    let server = HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(cfg.clone()))
            .app_data(web::Data::new(issue_feed.clone()))
            .app_data(web::Data::new(clients.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Root redirect
            .route(
                "/",
                web::get().to(|| async {
                    actix_web::HttpResponse::SeeOther()
                        .insert_header(("Location", "/dashboard"))
                        .finish()
                }),
            )
            // Admin views — one route per page of the view router
            .route("/dashboard", web::get().to(handlers::dashboard::index))
            .route("/issues", web::get().to(handlers::issue_handlers::list::issues))
            .route("/resolved", web::get().to(handlers::issue_handlers::list::resolved))
            // /issues/new BEFORE /issues/{id} routes to avoid routing conflict
            .route("/issues/new", web::get().to(handlers::issue_handlers::create::form))
            .route("/issues", web::post().to(handlers::issue_handlers::create::submit))
            .route(
                "/issues/{id}/status",
                web::post().to(handlers::issue_handlers::actions::update_status),
            )
            .route(
                "/issues/{id}/assign",
                web::get().to(handlers::issue_handlers::assign::form),
            )
            .route(
                "/issues/{id}/assign",
                web::post().to(handlers::issue_handlers::assign::submit),
            )
            // Live-update push channel
            .route("/ws", web::get().to(handlers::ws::connect))
            // JSON API
            .service(web::scope("/api/v1").configure(handlers::api_v1::configure))
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&bind_addr)?
    .run();

    let result = server.await;

    // Tear down the subscription with the server.
    if let Some(handle) = listener_handle {
        handle.abort();
        log::info!("Change listener stopped");
    }

    result
}
