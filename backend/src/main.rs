//! Backend entry-point: loads settings, wires the users routes and OpenAPI docs.

use actix_web::{App, HttpServer, web};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
use backend::api::{HttpState, add_routers};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = (settings.host().to_owned(), settings.port());
    let state = web::Data::new(HttpState::in_memory());
    #[cfg(debug_assertions)]
    let openapi = ApiDoc::with_prefix(settings.api_v1_str());

    info!(
        host = %bind_addr.0,
        port = bind_addr.1,
        api_prefix = settings.api_v1_str(),
        "starting users backend"
    );

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(|cfg| add_routers(cfg, &settings));

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
        );

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
