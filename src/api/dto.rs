// ============================================================================
// DTOs : format JSON de l'API CoinPaprika
// ============================================================================
// Ces structures collent exactement au JSON renvoyé par l'API.
// Elles ne sont jamais affichées directement : le repository les convertit
// en modèles du domaine (voir crate::models).
//
// CONCEPT RUST : #[serde(default)]
// - Un champ absent du JSON prend sa valeur Default (Vec vide, None...)
// - L'API omet souvent les listes vides, on ne veut pas échouer pour ça
// ============================================================================

use serde::{Deserialize, Serialize};

/// Une entrée de `GET /coins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDto {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub rank: u32,
    pub is_new: bool,
    pub is_active: bool,

    /// "coin" ou "token"
    /// CONCEPT RUST : r#type
    /// - `type` est un mot-clé réservé, r# permet de l'utiliser comme nom
    #[serde(rename = "type")]
    pub r#type: String,
}

/// Réponse de `GET /coins/{coin_id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinDetailDto {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub rank: u32,
    pub is_new: bool,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub r#type: String,
    pub description: Option<String>,
    pub message: Option<String>,
    pub open_source: Option<bool>,
    pub started_at: Option<String>,
    pub development_status: Option<String>,
    pub hardware_wallet: Option<bool>,
    pub proof_type: Option<String>,
    pub org_structure: Option<String>,
    pub hash_algorithm: Option<String>,
    pub first_data_at: Option<String>,
    pub last_data_at: Option<String>,
    pub tags: Vec<TagDto>,
    pub team: Vec<TeamMemberDto>,
    pub links: Option<LinksDto>,
    pub links_extended: Vec<LinkExtendedDto>,
    pub whitepaper: Option<WhitepaperDto>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagDto {
    pub id: String,
    pub name: String,
    pub coin_counter: u32,
    pub ico_counter: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMemberDto {
    pub id: String,
    pub name: String,
    pub position: String,
}

/// Liens publics du projet, regroupés par catégorie
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksDto {
    pub explorer: Vec<String>,
    pub facebook: Vec<String>,
    pub reddit: Vec<String>,
    pub source_code: Vec<String>,
    pub website: Vec<String>,
    pub youtube: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkExtendedDto {
    pub url: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub stats: Option<LinkStatsDto>,
}

/// Statistiques d'un lien (abonnés reddit, étoiles github, etc.)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkStatsDto {
    pub subscribers: Option<u64>,
    pub contributors: Option<u64>,
    pub stars: Option<u64>,
    pub followers: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitepaperDto {
    pub link: Option<String>,
    pub thumbnail: Option<String>,
}
