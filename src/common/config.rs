use std::env;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8085/api/v1";
pub const DEFAULT_THEME_STORE_PATH: &str = "data/theme.txt";
/// Same limit the verification server enforces on its side.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub theme_store_path: String,
    pub max_upload_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            theme_store_path: DEFAULT_THEME_STORE_PATH.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source. Missing or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_base_url: non_empty("API_BASE_URL")
                .or_else(|| non_empty("VITE_API_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            theme_store_path: non_empty("THEME_STORE_PATH")
                .unwrap_or_else(|| DEFAULT_THEME_STORE_PATH.to_string()),
            max_upload_bytes: non_empty("MAX_UPLOAD_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    pub fn verification_url(&self) -> String {
        verification_url(&self.api_base_url)
    }
}

pub fn verification_url(base_url: &str) -> String {
    format!("{}/face/verification", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.verification_url(), "http://localhost:8085/api/v1/face/verification");
    }

    #[test]
    fn api_base_url_wins_over_vite_fallback() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("API_BASE_URL", "http://verify.local/api/v2/"),
            ("VITE_API_BASE_URL", "http://ignored"),
        ]));
        assert_eq!(cfg.verification_url(), "http://verify.local/api/v2/face/verification");

        let cfg = ClientConfig::from_lookup(lookup(&[("VITE_API_BASE_URL", "http://vite:9000")]));
        assert_eq!(cfg.api_base_url, "http://vite:9000");
    }

    #[test]
    fn bad_size_limit_falls_back() {
        let cfg = ClientConfig::from_lookup(lookup(&[("MAX_UPLOAD_BYTES", "lots")]));
        assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        let cfg = ClientConfig::from_lookup(lookup(&[("MAX_UPLOAD_BYTES", " 1024 ")]));
        assert_eq!(cfg.max_upload_bytes, 1024);
    }
}
