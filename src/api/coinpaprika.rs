// ============================================================================
// API Client : CoinPaprika
// ============================================================================
// Récupère la liste des cryptomonnaies et le détail d'un coin
//
// Endpoints utilisés :
// - GET {base}/coins            -> Vec<CoinDto>
// - GET {base}/coins/{coin_id}  -> CoinDetailDto
//
// Pas de clé API nécessaire pour ces deux endpoints.
// Aucun retry ni cache : une erreur remonte telle quelle.
// ============================================================================

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::api::dto::{CoinDetailDto, CoinDto};
use crate::api::error::ApiError;
use crate::api::CryptoApiService;
use crate::config::Config;

/// User-Agent envoyé avec chaque requête
const USER_AGENT: &str = concat!("lazycoin/", env!("CARGO_PKG_VERSION"));

/// Client HTTP vers l'API CoinPaprika
///
/// CONCEPT RUST : reqwest::Client réutilisé
/// - Le client garde un pool de connexions
/// - On le crée une fois et on le partage (Clone est bon marché, c'est un Arc)
#[derive(Debug, Clone)]
pub struct PaprikaClient {
    client: reqwest::Client,
    base_url: String,
}

impl PaprikaClient {
    /// Crée un client à partir de la configuration
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(client, &config.api_url))
    }

    /// Crée un client avec un reqwest::Client déjà configuré
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Envoie un GET et désérialise la réponse
    ///
    /// CONCEPT RUST : Générique avec trait bound
    /// - T: DeserializeOwned : n'importe quel type désérialisable sans emprunt
    /// - Le même code sert pour Vec<CoinDto> et CoinDetailDto
    ///
    /// Le corps est lu en texte puis parsé avec serde_json, pour que les
    /// erreurs de format deviennent des ApiError::Decode.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Sending HTTP request to CoinPaprika");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "CoinPaprika returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body_len = body.len(), "Failed to parse CoinPaprika response");
            ApiError::from(e)
        })
    }
}

/// Vérifie qu'un identifiant peut être placé tel quel dans l'URL
fn validate_coin_id(coin_id: &str) -> Result<(), ApiError> {
    let valid = !coin_id.is_empty()
        && coin_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidCoinId(coin_id.to_string()))
    }
}

#[async_trait]
impl CryptoApiService for PaprikaClient {
    #[instrument(skip(self))]
    async fn get_coins(&self) -> Result<Vec<CoinDto>, ApiError> {
        let coins: Vec<CoinDto> = self.get_json("coins").await?;
        info!(count = coins.len(), "Successfully fetched coin list");
        Ok(coins)
    }

    #[instrument(skip(self))]
    async fn get_coin_by_id(&self, coin_id: &str) -> Result<CoinDetailDto, ApiError> {
        validate_coin_id(coin_id)?;

        match self.get_json(&format!("coins/{}", coin_id)).await {
            Ok(detail) => {
                info!("Successfully fetched coin detail");
                Ok(detail)
            }
            Err(ApiError::Status { status: 404, .. }) => {
                warn!("Coin not found");
                Err(ApiError::NotFound(coin_id.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
