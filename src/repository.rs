// ============================================================================
// Repository : CoinRepository
// ============================================================================
// Adapte le service réseau au domaine :
// - appelle le CryptoApiService
// - convertit les DTOs en modèles (Coin, CoinDetail, TeamMember)
//
// Pas de cache, pas de retry : un appel au repository = un appel réseau,
// et les erreurs du service remontent sans transformation.
// ============================================================================

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::api::{CoinDetailDto, CoinDto, CryptoApiService, TeamMemberDto};
use crate::models::{Coin, CoinDetail, TeamMember};

/// Source des données du domaine
#[async_trait]
pub trait CoinRepository: Send + Sync {
    async fn get_coins(&self) -> Result<Vec<Coin>>;

    async fn get_coin(&self, coin_id: &str) -> Result<CoinDetail>;
}

/// Implémentation adossée à un service réseau
///
/// CONCEPT RUST : Générique plutôt que Box<dyn ...>
/// - S est connu à la compilation, pas d'allocation ni d'appel dynamique
/// - En prod S = PaprikaClient, en test S = un faux service
pub struct CoinRepositoryImpl<S: CryptoApiService> {
    api_service: S,
}

impl<S: CryptoApiService> CoinRepositoryImpl<S> {
    pub fn new(api_service: S) -> Self {
        Self { api_service }
    }
}

#[async_trait]
impl<S: CryptoApiService> CoinRepository for CoinRepositoryImpl<S> {
    #[instrument(skip(self))]
    async fn get_coins(&self) -> Result<Vec<Coin>> {
        let dtos = self.api_service.get_coins().await?;
        debug!(count = dtos.len(), "Mapping coin DTOs");

        // CONCEPT RUST : into_iter + map(From::from)
        // - Consomme les DTOs (pas de clone des String)
        Ok(dtos.into_iter().map(Coin::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_coin(&self, coin_id: &str) -> Result<CoinDetail> {
        let dto = self.api_service.get_coin_by_id(coin_id).await?;
        Ok(CoinDetail::from(dto))
    }
}

// ============================================================================
// Conversions DTO -> domaine
// ============================================================================
// CONCEPT RUST : Trait From
// - impl From<A> for B donne aussi B::from(a) et a.into()
// - Conversion par valeur : on déplace les champs au lieu de les copier
// ============================================================================

impl From<CoinDto> for Coin {
    fn from(dto: CoinDto) -> Self {
        Coin {
            id: dto.id,
            is_active: dto.is_active,
            name: dto.name,
            rank: dto.rank,
            symbol: dto.symbol,
        }
    }
}

impl From<TeamMemberDto> for TeamMember {
    fn from(dto: TeamMemberDto) -> Self {
        TeamMember {
            id: dto.id,
            name: dto.name,
            position: dto.position,
        }
    }
}

impl From<CoinDetailDto> for CoinDetail {
    fn from(dto: CoinDetailDto) -> Self {
        CoinDetail {
            coin_id: dto.id,
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            symbol: dto.symbol,
            rank: dto.rank,
            is_active: dto.is_active,
            tags: dto.tags.into_iter().map(|tag| tag.name).collect(),
            team: dto.team.into_iter().map(TeamMember::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{LinksDto, TagDto, WhitepaperDto};
    use crate::api::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Faux service : réponses fixes + compteur d'appels
    struct FakeApiService {
        coins: Vec<CoinDto>,
        detail: Option<CoinDetailDto>,
        calls: AtomicUsize,
    }

    impl FakeApiService {
        fn new(coins: Vec<CoinDto>, detail: Option<CoinDetailDto>) -> Self {
            Self {
                coins,
                detail,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CryptoApiService for FakeApiService {
        async fn get_coins(&self) -> Result<Vec<CoinDto>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.coins.clone())
        }

        async fn get_coin_by_id(&self, coin_id: &str) -> Result<CoinDetailDto, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.detail {
                Some(detail) if detail.id == coin_id => Ok(detail.clone()),
                _ => Err(ApiError::NotFound(coin_id.to_string())),
            }
        }
    }

    fn btc_dto() -> CoinDto {
        CoinDto {
            id: "btc".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            rank: 1,
            is_new: false,
            is_active: true,
            r#type: "coin".to_string(),
        }
    }

    fn btc_detail_dto() -> CoinDetailDto {
        CoinDetailDto {
            id: "btc".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            rank: 1,
            is_new: false,
            is_active: true,
            r#type: "coin".to_string(),
            description: Some("Bitcoin description".to_string()),
            message: Some(String::new()),
            open_source: Some(true),
            started_at: Some("2009-01-03T00:00:00Z".to_string()),
            development_status: Some("Working".to_string()),
            hardware_wallet: Some(true),
            proof_type: Some("Proof of Work".to_string()),
            org_structure: Some("Decentralized".to_string()),
            hash_algorithm: Some("SHA256".to_string()),
            first_data_at: Some("2009-01-03T00:00:00Z".to_string()),
            last_data_at: Some("2023-01-01T00:00:00Z".to_string()),
            tags: vec![TagDto {
                id: "tagId".to_string(),
                name: "tag1".to_string(),
                coin_counter: 1,
                ico_counter: 100,
            }],
            team: vec![TeamMemberDto {
                id: "1".to_string(),
                name: "Satoshi".to_string(),
                position: "Creator".to_string(),
            }],
            links: Some(LinksDto::default()),
            links_extended: Vec::new(),
            whitepaper: Some(WhitepaperDto::default()),
        }
    }

    #[tokio::test]
    async fn test_get_coins_returns_mapped_models() {
        let repository = CoinRepositoryImpl::new(FakeApiService::new(vec![btc_dto()], None));

        let coins = repository.get_coins().await.unwrap();

        assert_eq!(
            coins,
            vec![Coin::new(
                "btc".to_string(),
                true,
                "Bitcoin".to_string(),
                1,
                "BTC".to_string(),
            )]
        );
        assert_eq!(repository.api_service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_coins_preserves_order() {
        let mut eth = btc_dto();
        eth.id = "eth".to_string();
        eth.rank = 2;
        let repository = CoinRepositoryImpl::new(FakeApiService::new(vec![eth, btc_dto()], None));

        let ids: Vec<String> = repository
            .get_coins()
            .await
            .unwrap()
            .into_iter()
            .map(|coin| coin.id)
            .collect();

        assert_eq!(ids, vec!["eth", "btc"]);
    }

    #[tokio::test]
    async fn test_get_coin_returns_mapped_model() {
        let repository =
            CoinRepositoryImpl::new(FakeApiService::new(Vec::new(), Some(btc_detail_dto())));

        let detail = repository.get_coin("btc").await.unwrap();

        assert_eq!(
            detail,
            CoinDetail {
                coin_id: "btc".to_string(),
                name: "Bitcoin".to_string(),
                description: "Bitcoin description".to_string(),
                symbol: "BTC".to_string(),
                rank: 1,
                is_active: true,
                tags: vec!["tag1".to_string()],
                team: vec![TeamMember::new(
                    "1".to_string(),
                    "Satoshi".to_string(),
                    "Creator".to_string(),
                )],
            }
        );
    }

    #[tokio::test]
    async fn test_get_coin_missing_description_is_empty() {
        let mut dto = btc_detail_dto();
        dto.description = None;
        let repository = CoinRepositoryImpl::new(FakeApiService::new(Vec::new(), Some(dto)));

        let detail = repository.get_coin("btc").await.unwrap();
        assert_eq!(detail.description, "");
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let repository = CoinRepositoryImpl::new(FakeApiService::new(Vec::new(), None));

        let err = repository.get_coin("doge").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NotFound(id)) if id == "doge"
        ));
        assert_eq!(repository.api_service.calls.load(Ordering::SeqCst), 1);
    }
}
