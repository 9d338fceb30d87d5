// ============================================================================
// Use cases : GetCoinsUseCase et GetCoinUseCase
// ============================================================================
// Chaque use case fait exactement un appel au repository et renvoie son
// résultat tel quel. Ils existent pour que l'UI dépende d'opérations
// nommées plutôt que du repository complet.
// ============================================================================

use std::sync::Arc;

use anyhow::Result;

use crate::models::{Coin, CoinDetail};
use crate::repository::CoinRepository;

/// Récupère la liste des coins
///
/// CONCEPT RUST : Arc<dyn Trait>
/// - Les deux use cases partagent le même repository
/// - Arc : ownership partagé, dyn : implémentation choisie à l'exécution
#[derive(Clone)]
pub struct GetCoinsUseCase {
    repository: Arc<dyn CoinRepository>,
}

impl GetCoinsUseCase {
    pub fn new(repository: Arc<dyn CoinRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<Coin>> {
        self.repository.get_coins().await
    }
}

/// Récupère le détail d'un coin
#[derive(Clone)]
pub struct GetCoinUseCase {
    repository: Arc<dyn CoinRepository>,
}

impl GetCoinUseCase {
    pub fn new(repository: Arc<dyn CoinRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, coin_id: &str) -> Result<CoinDetail> {
        self.repository.get_coin(coin_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamMember;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Faux repository qui enregistre chaque appel
    #[derive(Default)]
    struct FakeRepository {
        coins: Vec<Coin>,
        detail: Option<CoinDetail>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeRepository {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CoinRepository for FakeRepository {
        async fn get_coins(&self) -> Result<Vec<Coin>> {
            self.calls.lock().unwrap().push("get_coins".to_string());
            Ok(self.coins.clone())
        }

        async fn get_coin(&self, coin_id: &str) -> Result<CoinDetail> {
            self.calls.lock().unwrap().push(format!("get_coin({})", coin_id));
            self.detail
                .clone()
                .ok_or_else(|| anyhow::anyhow!("no detail for {}", coin_id))
        }
    }

    fn coin(id: &str, name: &str, rank: u32, symbol: &str) -> Coin {
        Coin::new(id.to_string(), true, name.to_string(), rank, symbol.to_string())
    }

    #[tokio::test]
    async fn test_get_coins_returns_repository_list() {
        let expected = vec![
            coin("bitcoin", "Bitcoin", 1, "BTC"),
            coin("ethereum", "Ethereum", 2, "ETH"),
        ];
        let repository = Arc::new(FakeRepository {
            coins: expected.clone(),
            ..Default::default()
        });
        let use_case = GetCoinsUseCase::new(repository.clone());

        let result = use_case.execute().await.unwrap();

        assert_eq!(result, expected);
        assert_eq!(repository.calls(), vec!["get_coins"]);
    }

    #[tokio::test]
    async fn test_get_coins_empty_list() {
        let repository = Arc::new(FakeRepository::default());
        let use_case = GetCoinsUseCase::new(repository.clone());

        let result = use_case.execute().await.unwrap();

        assert!(result.is_empty());
        assert_eq!(repository.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_get_coin_returns_repository_detail() {
        let expected = CoinDetail {
            coin_id: "bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            description: "Bitcoin is a cryptocurrency".to_string(),
            symbol: "BTC".to_string(),
            rank: 1,
            is_active: true,
            tags: vec!["cryptocurrency".to_string(), "digital-currency".to_string()],
            team: vec![TeamMember::new(
                "satoshi-nakamoto".to_string(),
                "Satoshi Nakamoto".to_string(),
                "Founder".to_string(),
            )],
        };
        let repository = Arc::new(FakeRepository {
            detail: Some(expected.clone()),
            ..Default::default()
        });
        let use_case = GetCoinUseCase::new(repository.clone());

        let result = use_case.execute("bitcoin").await.unwrap();

        assert_eq!(result, expected);
        assert_eq!(repository.calls(), vec!["get_coin(bitcoin)"]);
    }

    #[tokio::test]
    async fn test_get_coin_forwards_error() {
        let repository = Arc::new(FakeRepository::default());
        let use_case = GetCoinUseCase::new(repository.clone());

        let err = use_case.execute("unknown").await.unwrap_err();

        assert!(err.to_string().contains("unknown"));
        assert_eq!(repository.calls().len(), 1);
    }
}
