// ============================================================================
// Structure : Coin
// ============================================================================
// Une cryptomonnaie telle qu'affichée dans la liste
//
// CONCEPTS RUST :
// 1. #[derive(...)] : génère automatiquement l'implémentation de traits
//    - PartialEq / Eq : deux coins sont égaux si tous leurs champs le sont
//    - Hash : utilisable comme clé de HashMap / HashSet
// 2. Modèle du domaine vs DTO :
//    - CoinDto colle au JSON (is_new, type...)
//    - Coin ne garde que ce dont l'application a besoin
// ============================================================================

use serde::{Deserialize, Serialize};

/// Cryptomonnaie (vue liste)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Identifiant CoinPaprika (ex: "btc-bitcoin")
    pub id: String,

    /// false si le coin n'est plus échangé
    pub is_active: bool,

    /// Nom complet (ex: "Bitcoin")
    pub name: String,

    /// Rang par capitalisation (1 = plus grosse)
    pub rank: u32,

    /// Symbole (ex: "BTC")
    pub symbol: String,
}

impl Coin {
    /// Constructeur
    pub fn new(id: String, is_active: bool, name: String, rank: u32, symbol: String) -> Self {
        Self {
            id,
            is_active,
            name,
            rank,
            symbol,
        }
    }

    /// Formatte le coin pour l'affichage dans la liste
    ///
    /// Format : "   1. BTC      Bitcoin"
    /// Le nom est tronqué à 24 caractères, "(inactive)" est ajouté si besoin
    pub fn display(&self) -> String {
        let truncated_name = if self.name.chars().count() <= 24 {
            self.name.clone()
        } else {
            let truncated: String = self.name.chars().take(23).collect();
            format!("{}…", truncated)
        };

        let status = if self.is_active { "" } else { "  (inactive)" };

        format!(
            "{:>4}. {:<8} {}{}",
            self.rank, self.symbol, truncated_name, status
        )
    }

    /// Vrai si le nom ou le symbole contient `query` (insensible à la casse)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query) || self.symbol.to_lowercase().contains(&query)
    }
}
