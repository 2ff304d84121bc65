//! Application settings loaded via OrthoConfig.
//!
//! Values come from `USERS_*` environment variables, configuration files and
//! command-line flags, in increasing order of precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_API_V1_STR: &str = "/api/v1";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings for the HTTP server and router mount points.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct AppSettings {
    /// Path prefix for version 1 of the API.
    pub api_v1_str: Option<String>,
    /// Interface the server binds to.
    pub host: Option<String>,
    /// Port the server listens on.
    pub port: Option<u16>,
}

impl AppSettings {
    /// Return the API prefix with any trailing slash removed.
    ///
    /// # Examples
    /// ```
    /// use backend::settings::AppSettings;
    ///
    /// let settings = AppSettings {
    ///     api_v1_str: Some("/v1/".to_owned()),
    ///     ..AppSettings::default()
    /// };
    /// assert_eq!(settings.api_v1_str(), "/v1");
    /// assert_eq!(AppSettings::default().api_v1_str(), "/api/v1");
    /// ```
    #[must_use]
    pub fn api_v1_str(&self) -> &str {
        self.api_v1_str
            .as_deref()
            .unwrap_or(DEFAULT_API_V1_STR)
            .trim_end_matches('/')
    }

    /// Return the bind host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the bind port, falling back to the default.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("USERS_API_V1_STR", None::<String>),
            ("USERS_HOST", None::<String>),
            ("USERS_PORT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_v1_str(), DEFAULT_API_V1_STR);
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_API_V1_STR", Some("/v2".to_owned())),
            ("USERS_HOST", Some("127.0.0.1".to_owned())),
            ("USERS_PORT", Some("9000".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_v1_str(), "/v2");
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 9000);
    }

    #[rstest]
    #[case("/api/v1", "/api/v1")]
    #[case("/api/v1/", "/api/v1")]
    #[case("", "")]
    fn prefix_drops_trailing_slash(#[case] raw: &str, #[case] expected: &str) {
        let settings = AppSettings {
            api_v1_str: Some(raw.to_owned()),
            ..AppSettings::default()
        };
        assert_eq!(settings.api_v1_str(), expected);
    }
}
