// ============================================================================
// Configuration
// ============================================================================
// Lue depuis les variables d'environnement (et un éventuel fichier .env)
//
// Variables reconnues :
// - LAZYCOIN_API_URL      : URL de base de l'API (défaut CoinPaprika v1)
// - LAZYCOIN_TIMEOUT_SECS : timeout des requêtes HTTP en secondes (défaut 15)
// - LAZYCOIN_LOG_DIR      : répertoire des logs (défaut : data dir de l'OS)
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// URL de base de l'API publique CoinPaprika
pub const DEFAULT_API_URL: &str = "https://api.coinpaprika.com/v1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const ENV_API_URL: &str = "LAZYCOIN_API_URL";
const ENV_TIMEOUT: &str = "LAZYCOIN_TIMEOUT_SECS";
const ENV_LOG_DIR: &str = "LAZYCOIN_LOG_DIR";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_dir: None,
        }
    }
}

impl Config {
    /// Charge la configuration depuis l'environnement
    ///
    /// Un fichier `.env` absent n'est pas une erreur.
    pub fn from_env() -> Result<Self> {
        // Ignore l'absence de .env, on garde les valeurs par défaut
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture
    ///
    /// CONCEPT RUST : Closures en paramètre (impl Fn)
    /// - Permet de tester sans toucher aux vraies variables d'environnement
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim().trim_end_matches('/').to_string();
            if url.is_empty() {
                anyhow::bail!("{} ne peut pas être vide", ENV_API_URL);
            }
            config.api_url = url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} invalide : {:?}", ENV_TIMEOUT, raw))?;
            if secs == 0 {
                anyhow::bail!("{} doit être supérieur à 0", ENV_TIMEOUT);
            }
            config.timeout = Duration::from_secs(secs);
        }

        config.log_dir = lookup(ENV_LOG_DIR)
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Répertoire des logs effectif
    ///
    /// - Linux/WSL : ~/.local/share/lazycoin/logs
    /// - macOS : ~/Library/Application Support/lazycoin/logs
    /// - Windows : C:\Users\<user>\AppData\Local\lazycoin\logs
    /// - Sinon : ./logs
    pub fn effective_log_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .map(|dir| dir.join("lazycoin").join("logs"))
                .unwrap_or_else(|| PathBuf::from("./logs")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_API_URL, "http://localhost:8080/v1/"),
            (ENV_TIMEOUT, "3"),
            (ENV_LOG_DIR, "/tmp/lazycoin"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.effective_log_dir(), PathBuf::from("/tmp/lazycoin"));
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(Config::from_lookup(lookup_from(&[(ENV_TIMEOUT, "abc")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_TIMEOUT, "0")])).is_err());
    }

    #[test]
    fn test_empty_api_url_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[(ENV_API_URL, " / ")])).is_err());
    }
}
