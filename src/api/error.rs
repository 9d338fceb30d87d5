// ============================================================================
// Erreurs de la couche réseau
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] génère Display
// - Erreurs typées : l'UI peut distinguer "pas de réseau" du reste
//   (anyhow seul ne permettrait qu'un message texte)
// ============================================================================

use thiserror::Error;

/// Erreur renvoyée par un `CryptoApiService`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Impossible de joindre le serveur (DNS, connexion refusée, timeout)
    #[error("Impossible de joindre l'API : {0}")]
    Connection(String),

    /// Le serveur a répondu avec un statut HTTP d'erreur
    #[error("L'API a retourné une erreur : HTTP {status}")]
    Status { status: u16, body: String },

    /// Coin inconnu (HTTP 404)
    #[error("Coin introuvable : {0}")]
    NotFound(String),

    /// Réponse reçue mais JSON invalide
    #[error("Réponse JSON invalide : {0}")]
    Decode(String),

    /// Identifiant vide, refusé avant tout appel réseau
    #[error("Identifiant de coin invalide : {0:?}")]
    InvalidCoinId(String),

    /// Autre erreur reqwest (construction du client, URL, etc.)
    #[error("Erreur HTTP : {0}")]
    Request(String),
}

impl ApiError {
    /// Vrai si l'erreur vient de l'absence de connexion
    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Connection(_))
    }
}

impl From<reqwest::Error> for ApiError {
    /// CONCEPT RUST : From
    /// - Permet d'utiliser ? directement sur un reqwest::Error
    /// - On classe l'erreur selon sa nature
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Connection(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
