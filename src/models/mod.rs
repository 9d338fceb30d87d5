// ============================================================================
// Module : models
// ============================================================================
// Modèles du domaine : ce que l'application manipule et affiche
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod coin;        // Coin (vue liste)
pub mod coin_detail; // CoinDetail et TeamMember (vue détail)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazycoin::models::coin::Coin;
// On peut faire : use lazycoin::models::Coin;
pub use coin::Coin;
pub use coin_detail::{CoinDetail, TeamMember};
