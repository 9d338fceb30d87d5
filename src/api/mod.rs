// ============================================================================
// Module : api
// ============================================================================
// Couche réseau : le trait CryptoApiService, son implémentation CoinPaprika
// et les DTOs (format JSON brut de l'API)
// ============================================================================

pub mod coinpaprika; // Client API CoinPaprika
pub mod dto;         // Structures JSON de l'API
pub mod error;       // Erreurs typées de la couche réseau

use async_trait::async_trait;

// Re-export des types principaux
pub use coinpaprika::PaprikaClient;
pub use dto::{CoinDetailDto, CoinDto, TagDto, TeamMemberDto};
pub use error::ApiError;

/// Service réseau qui fournit les données brutes
///
/// CONCEPT RUST : Trait async (async-trait)
/// - Les traits ne supportent pas directement `async fn` avec dyn
/// - #[async_trait] transforme les méthodes en Pin<Box<dyn Future>>
/// - Send + Sync : le service est utilisé depuis le worker thread
///
/// Le repository dépend de ce trait, pas de PaprikaClient : les tests
/// lui passent un faux service.
#[async_trait]
pub trait CryptoApiService: Send + Sync {
    /// Liste de tous les coins
    async fn get_coins(&self) -> Result<Vec<CoinDto>, ApiError>;

    /// Détail d'un coin par son identifiant (ex: "btc-bitcoin")
    async fn get_coin_by_id(&self, coin_id: &str) -> Result<CoinDetailDto, ApiError>;
}
