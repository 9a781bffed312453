use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf};

/// Default root of the 2.5 API. Endpoint suffixes are appended to it.
pub const DEFAULT_API_BASE: &str = "http://api.openweathermap.org/data/2.5/";

/// Unit system the API reports measurements in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Units::all()
            .iter()
            .copied()
            .find(|units| units.as_str() == lower)
            .ok_or_else(|| anyhow!("Unknown units '{value}'. Supported units: metric, imperial."))
    }
}

impl TryFrom<String> for Units {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Units::try_from(value.as_str())
    }
}

impl From<Units> for String {
    fn from(units: Units) -> Self {
        units.as_str().to_string()
    }
}

/// Languages the API can localise condition descriptions into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Russian,
    Italian,
    Spanish,
    Ukrainian,
    German,
    Portuguese,
    Romanian,
    Polish,
    Finnish,
    Dutch,
    French,
    Bulgarian,
    Swedish,
    ChineseTraditional,
    ChineseSimplified,
    Turkish,
    Croatian,
    Catalan,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Italian => "it",
            Language::Spanish => "es",
            Language::Ukrainian => "uk",
            Language::German => "de",
            Language::Portuguese => "pt",
            Language::Romanian => "ro",
            Language::Polish => "pl",
            Language::Finnish => "fi",
            Language::Dutch => "nl",
            Language::French => "fr",
            Language::Bulgarian => "bg",
            Language::Swedish => "sv",
            Language::ChineseTraditional => "zh_tw",
            Language::ChineseSimplified => "zh",
            Language::Turkish => "tr",
            Language::Croatian => "hr",
            Language::Catalan => "ca",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Russian,
            Language::Italian,
            Language::Spanish,
            Language::Ukrainian,
            Language::German,
            Language::Portuguese,
            Language::Romanian,
            Language::Polish,
            Language::Finnish,
            Language::Dutch,
            Language::French,
            Language::Bulgarian,
            Language::Swedish,
            Language::ChineseTraditional,
            Language::ChineseSimplified,
            Language::Turkish,
            Language::Croatian,
            Language::Catalan,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.as_str() == lower)
            .ok_or_else(|| {
                let supported: Vec<&str> = Language::all().iter().map(Language::as_str).collect();
                anyhow!(
                    "Unknown language '{value}'. Supported languages: {}.",
                    supported.join(", ")
                )
            })
    }
}

impl TryFrom<String> for Language {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::try_from(value.as_str())
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

/// Basic-auth credentials for an HTTP proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyCredentials {
    pub user: String,
    pub password: String,
}

/// HTTP proxy every request is routed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    #[serde(flatten)]
    pub credentials: Option<ProxyCredentials>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, credentials: None }
    }

    pub fn with_credentials(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            credentials: Some(ProxyCredentials { user: user.into(), password: password.into() }),
        }
    }

    /// A proxy without a host is treated as "no proxy".
    pub fn is_enabled(&self) -> bool {
        !self.host.trim().is_empty()
    }

    /// Credentials are only used when both user and password are non-empty.
    pub fn usable_credentials(&self) -> Option<&ProxyCredentials> {
        self.credentials
            .as_ref()
            .filter(|c| !c.user.is_empty() && !c.password.is_empty())
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Settings applied to every outbound request.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "imperial"
/// language = "de"
///
/// [proxy]
/// host = "proxy.local"
/// port = 3128
/// user = "me"
/// password = "secret"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub api_key: String,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl RequestConfig {
    /// Metric units, English descriptions, no proxy.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            units: Units::default(),
            language: Language::default(),
            proxy: None,
            api_base: default_api_base(),
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Proxy to route through, if one is configured with a host.
    pub fn active_proxy(&self) -> Option<&ProxyConfig> {
        self.proxy.as_ref().filter(|p| p.is_enabled())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse OpenWeatherMap configuration")
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load config from the platform config directory.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Err(anyhow!(
                "No configuration found at {}.\n\
                 Hint: create it with at least `api_key = \"...\"`.",
                path.display()
            ));
        }

        Self::load_from(&path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "openweathermap", "owm-core")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
