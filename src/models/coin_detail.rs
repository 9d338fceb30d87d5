// ============================================================================
// Structures : CoinDetail et TeamMember
// ============================================================================
// Détail d'une cryptomonnaie, affiché sur l'écran de détail
// ============================================================================

use serde::{Deserialize, Serialize};

/// Membre de l'équipe d'un projet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub position: String,
}

impl TeamMember {
    pub fn new(id: String, name: String, position: String) -> Self {
        Self { id, name, position }
    }
}

/// Détail d'une cryptomonnaie
///
/// CONCEPT RUST : Composition
/// - CoinDetail contient un Vec<TeamMember>
/// - Clone duplique tout le contenu (deep copy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub coin_id: String,
    pub name: String,

    /// Texte libre fourni par l'API (vide si absent)
    pub description: String,

    pub symbol: String,
    pub rank: u32,
    pub is_active: bool,

    /// Noms des tags, dans l'ordre de l'API
    pub tags: Vec<String>,

    pub team: Vec<TeamMember>,
}

impl CoinDetail {
    /// Titre de l'écran de détail : "1. Bitcoin (BTC)"
    pub fn title(&self) -> String {
        format!("{}. {} ({})", self.rank, self.name, self.symbol)
    }

    /// Libellé du statut
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "active"
        } else {
            "inactive"
        }
    }
}
