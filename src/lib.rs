// ============================================================================
// LazyCoin - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
//
// Flux des données :
// UI -> use case -> repository -> service réseau -> DTO -> modèle du domaine
// ============================================================================

pub mod api;        // Service réseau CoinPaprika + DTOs
pub mod app;        // État de l'application (UI states)
pub mod config;     // Configuration (variables d'environnement)
pub mod models;     // Modèles du domaine
pub mod repository; // DTO -> domaine
pub mod ui;         // Interface utilisateur
pub mod usecase;    // GetCoinsUseCase, GetCoinUseCase
