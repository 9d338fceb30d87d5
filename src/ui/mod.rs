// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod coin_detail; // Écran détail d'un coin
pub mod coin_list;   // Écran liste (+ ligne de recherche)
pub mod events;      // Gestion des événements clavier

use ratatui::Frame;

use crate::app::{App, Screen};

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};

/// Dessine l'écran courant
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit que chaque Screen a un rendu
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::CoinList | Screen::Search => coin_list::render_coin_list(frame, app),
        Screen::CoinDetail => coin_detail::render_coin_detail(frame, app),
    }
}
