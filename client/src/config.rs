//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `LOCALPAY_*` environment variables or a config file;
//! accessors fall back to local-development defaults.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{PageSize, PageSizeError};
use serde::Deserialize;
use url::Url;

use crate::domain::screens::page_size_option;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";
const DEFAULT_STATE_DIR: &str = ".localpay";
const DEFAULT_REPORT_DIR: &str = "reports";

/// Settings shared by every command of the `localpay` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOCALPAY")]
pub struct ClientSettings {
    /// Base URL of the LocalPay API.
    pub api_url: Option<String>,
    /// Directory holding the persisted credential.
    pub state_dir: Option<PathBuf>,
    /// Directory receiving downloaded reports.
    pub report_dir: Option<PathBuf>,
    /// HTTP request timeout in seconds.
    #[ortho_config(default = 30)]
    pub timeout_secs: u64,
    /// Initial page size of cursor-paged screens.
    pub page_size: Option<usize>,
}

impl ClientSettings {
    /// Parsed API base URL.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed configured URL.
    pub fn api_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))
    }

    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
    }

    pub fn report_dir(&self) -> PathBuf {
        self.report_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Configured page size, limited to the sizes screens offer.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError`] for a size outside the offered options.
    pub fn page_size(&self) -> Result<PageSize, PageSizeError> {
        self.page_size.map_or(Ok(PageSize::DEFAULT), page_size_option)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 5] = [
        "LOCALPAY_API_URL",
        "LOCALPAY_STATE_DIR",
        "LOCALPAY_REPORT_DIR",
        "LOCALPAY_TIMEOUT_SECS",
        "LOCALPAY_PAGE_SIZE",
    ];

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("localpay")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_url().expect("url").as_str(),
            "http://127.0.0.1:8000/"
        );
        assert_eq!(settings.state_dir(), PathBuf::from(".localpay"));
        assert_eq!(settings.report_dir(), PathBuf::from("reports"));
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.page_size(), Ok(PageSize::DEFAULT));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LOCALPAY_API_URL", Some("https://pay.example.kg/api/".to_owned())),
            ("LOCALPAY_STATE_DIR", Some("/var/lib/localpay".to_owned())),
            ("LOCALPAY_REPORT_DIR", Some("/srv/reports".to_owned())),
            ("LOCALPAY_TIMEOUT_SECS", Some("5".to_owned())),
            ("LOCALPAY_PAGE_SIZE", Some("50".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_url().expect("url").host_str(), Some("pay.example.kg"));
        assert_eq!(settings.state_dir(), PathBuf::from("/var/lib/localpay"));
        assert_eq!(settings.report_dir(), PathBuf::from("/srv/reports"));
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.page_size().map(PageSize::get), Ok(50));
    }

    #[rstest]
    fn zero_timeout_is_raised_to_one_second() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));
        let settings = ClientSettings {
            timeout_secs: 0,
            ..load_from_empty_args()
        };
        assert_eq!(settings.timeout(), Duration::from_secs(1));
    }

    #[rstest]
    fn unsupported_page_size_is_refused() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));
        let settings = ClientSettings {
            page_size: Some(7),
            ..load_from_empty_args()
        };
        assert_eq!(settings.page_size(), Err(PageSizeError));
    }
}
