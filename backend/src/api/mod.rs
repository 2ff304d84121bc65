//! REST API modules and router registration.

pub mod state;
pub mod users;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};

use crate::models::Error;
use crate::settings::AppSettings;

pub use state::HttpState;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

/// Mount every router under the configured API prefix.
///
/// The users handlers live at `<api_v1_str>/users`. Calling this twice on the
/// same application registers the routes twice; the first match wins.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::api::{HttpState, add_routers};
/// use backend::settings::AppSettings;
///
/// let settings = AppSettings::default();
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::in_memory()))
///     .configure(|cfg| add_routers(cfg, &settings));
/// ```
pub fn add_routers(cfg: &mut web::ServiceConfig, settings: &AppSettings) {
    cfg.service(
        web::scope(&format!("{}/users", settings.api_v1_str()))
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .configure(users::configure),
    );
}
