// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Encapsulation : les écrans lisent l'état, les méthodes le modifient
//
// PATTERN : Un "UI state" par écran
// - CoinListUiState : ce que l'écran liste affiche
// - CoinDetailUiState : ce que l'écran détail affiche
// - L'UI est redessinée à chaque frame à partir de ces états
// ============================================================================

use chrono::{DateTime, Local};

use crate::api::ApiError;
use crate::models::{Coin, CoinDetail};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Liste des coins
    CoinList,

    /// Détail du coin sélectionné
    CoinDetail,

    /// Saisie du filtre de recherche (la liste reste visible)
    Search,
}

// ============================================================================
// Enum : ErrorState
// ============================================================================

/// Erreur affichable par un écran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorState {
    /// Pas de connexion au serveur
    NotConnected,

    /// Toute autre erreur, avec son message si disponible
    Other(Option<String>),
}

impl ErrorState {
    /// Classe une erreur remontée par un use case
    ///
    /// CONCEPT RUST : anyhow::Error::chain + downcast_ref
    /// - chain() parcourt l'erreur et toutes ses causes
    /// - downcast_ref::<T>() retrouve le type concret s'il correspond
    pub fn from_error(err: &anyhow::Error) -> Self {
        let not_connected = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<ApiError>())
            .any(ApiError::is_connection);

        if not_connected {
            ErrorState::NotConnected
        } else {
            // {:#} : message complet, contexte puis causes ("a: b: c")
            ErrorState::Other(Some(format!("{:#}", err)))
        }
    }

    /// Message affiché à l'utilisateur
    pub fn message(&self) -> String {
        match self {
            ErrorState::NotConnected => {
                "Pas de connexion. Vérifiez le réseau puis appuyez sur [r].".to_string()
            }
            ErrorState::Other(Some(message)) => format!("Erreur : {}", message),
            ErrorState::Other(None) => "Une erreur inconnue est survenue.".to_string(),
        }
    }
}

// ============================================================================
// UI states
// ============================================================================

/// État de l'écran liste
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinListUiState {
    pub is_loading: bool,
    pub coins: Vec<Coin>,
    pub error_state: Option<ErrorState>,
}

/// État de l'écran détail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinDetailUiState {
    /// Coin demandé (les résultats d'un autre coin sont ignorés)
    pub coin_id: Option<String>,
    pub is_loading: bool,
    pub coin: Option<CoinDetail>,
    pub error_state: Option<ErrorState>,
    /// Défilement vertical de la description (en lignes)
    pub description_scroll: u16,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    pub list: CoinListUiState,

    pub detail: CoinDetailUiState,

    /// Index dans la liste *filtrée* (voir visible_coins)
    pub selected_index: usize,

    /// Two-step quit : première pression de 'q' -> confirmation
    pub confirm_quit: bool,

    /// Filtre de recherche (nom ou symbole)
    pub search_query: String,

    /// Heure du dernier chargement réussi de la liste
    pub last_updated: Option<DateTime<Local>>,
}

impl App {
    /// Crée une nouvelle instance de App avec une liste vide
    pub fn new() -> Self {
        Self {
            running: true,
            current_screen: Screen::CoinList,
            list: CoinListUiState::default(),
            detail: CoinDetailUiState::default(),
            selected_index: 0,
            confirm_quit: false,
            search_query: String::new(),
            last_updated: None,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Rien à faire pour l'instant : tout changement d'état vient d'un
    /// événement clavier ou d'un résultat du worker.
    pub fn tick(&mut self) {}

    // ========================================================================
    // Liste
    // ========================================================================

    /// Coins visibles après application du filtre de recherche
    ///
    /// CONCEPT RUST : Vec<&T>
    /// - On retourne des références : aucune copie des coins
    /// - La durée de vie est liée à &self (élision de lifetime)
    pub fn visible_coins(&self) -> Vec<&Coin> {
        self.list
            .coins
            .iter()
            .filter(|coin| coin.matches(&self.search_query))
            .collect()
    }

    /// Coin sélectionné dans la liste filtrée
    pub fn selected_coin(&self) -> Option<&Coin> {
        self.visible_coins().get(self.selected_index).copied()
    }

    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.visible_coins().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Ramène la sélection dans les bornes de la liste filtrée
    fn clamp_selection(&mut self) {
        let max_index = self.visible_coins().len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }

    /// Début du chargement de la liste
    ///
    /// Les coins déjà affichés restent visibles pendant le rafraîchissement.
    pub fn start_loading_coins(&mut self) {
        self.list.is_loading = true;
        self.list.error_state = None;
    }

    pub fn coins_loaded(&mut self, coins: Vec<Coin>) {
        self.list = CoinListUiState {
            is_loading: false,
            coins,
            error_state: None,
        };
        self.last_updated = Some(Local::now());
        self.clamp_selection();
    }

    pub fn coins_failed(&mut self, err: &anyhow::Error) {
        self.list.is_loading = false;
        self.list.error_state = Some(ErrorState::from_error(err));
    }

    // ========================================================================
    // Détail
    // ========================================================================

    /// Ouvre l'écran détail pour le coin sélectionné
    ///
    /// Retourne l'identifiant à charger, ou None si la liste est vide.
    pub fn open_detail(&mut self) -> Option<String> {
        let coin_id = self.selected_coin()?.id.clone();

        self.detail = CoinDetailUiState {
            coin_id: Some(coin_id.clone()),
            is_loading: true,
            coin: None,
            error_state: None,
            description_scroll: 0,
        };
        self.current_screen = Screen::CoinDetail;

        Some(coin_id)
    }

    /// Vrai si `coin_id` est le coin actuellement demandé
    fn is_current_detail(&self, coin_id: &str) -> bool {
        self.detail.coin_id.as_deref() == Some(coin_id)
    }

    /// Enregistre le détail reçu ; retourne false si le résultat est périmé
    pub fn detail_loaded(&mut self, coin_id: &str, coin: CoinDetail) -> bool {
        if !self.is_current_detail(coin_id) {
            return false;
        }

        self.detail.is_loading = false;
        self.detail.coin = Some(coin);
        self.detail.error_state = None;
        true
    }

    /// Enregistre l'échec ; retourne false si le résultat est périmé
    pub fn detail_failed(&mut self, coin_id: &str, err: &anyhow::Error) -> bool {
        if !self.is_current_detail(coin_id) {
            return false;
        }

        self.detail.is_loading = false;
        self.detail.error_state = Some(ErrorState::from_error(err));
        true
    }

    /// Relance le chargement du détail affiché
    pub fn reload_detail(&mut self) -> Option<String> {
        let coin_id = self.detail.coin_id.clone()?;
        self.detail.is_loading = true;
        self.detail.error_state = None;
        Some(coin_id)
    }

    pub fn scroll_description_up(&mut self) {
        self.detail.description_scroll = self.detail.description_scroll.saturating_sub(1);
    }

    /// Descend d'une ligne dans la description
    ///
    /// Borne haute : chaque ligne affichée contient au moins un mot, donc
    /// on ne défile jamais au-delà du nombre de mots (+ statut et ligne vide).
    pub fn scroll_description_down(&mut self) {
        let Some(coin) = &self.detail.coin else {
            return;
        };
        let words = coin.description.split_whitespace().count() + 2;
        let max_scroll = u16::try_from(words).unwrap_or(u16::MAX);
        self.detail.description_scroll =
            self.detail.description_scroll.saturating_add(1).min(max_scroll);
    }

    /// Retour à la liste ; le détail en cours est abandonné
    pub fn back_to_list(&mut self) {
        self.current_screen = Screen::CoinList;
        self.detail = CoinDetailUiState::default();
    }

    pub fn is_on_list(&self) -> bool {
        self.current_screen == Screen::CoinList
    }

    pub fn is_on_detail(&self) -> bool {
        self.current_screen == Screen::CoinDetail
    }

    // ========================================================================
    // Quit confirmation
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Recherche
    // ========================================================================

    /// Entre en mode recherche (le filtre courant est conservé)
    pub fn start_search(&mut self) {
        self.current_screen = Screen::Search;
    }

    /// Garde le filtre et revient à la liste
    pub fn submit_search(&mut self) {
        self.current_screen = Screen::CoinList;
    }

    /// Efface le filtre et revient à la liste
    pub fn cancel_search(&mut self) {
        self.search_query.clear();
        self.current_screen = Screen::CoinList;
        self.clamp_selection();
    }

    /// Filtrage en direct : la sélection repart du début
    pub fn append_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_index = 0;
    }

    pub fn backspace(&mut self) {
        self.search_query.pop();
        self.selected_index = 0;
    }

    pub fn is_in_search_mode(&self) -> bool {
        self.current_screen == Screen::Search
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, name: &str, rank: u32, symbol: &str) -> Coin {
        Coin::new(id.to_string(), true, name.to_string(), rank, symbol.to_string())
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.coins_loaded(vec![
            coin("btc-bitcoin", "Bitcoin", 1, "BTC"),
            coin("eth-ethereum", "Ethereum", 2, "ETH"),
            coin("sol-solana", "Solana", 3, "SOL"),
        ]);
        app
    }

    fn detail(coin_id: &str) -> CoinDetail {
        CoinDetail {
            coin_id: coin_id.to_string(),
            name: "Bitcoin".to_string(),
            description: String::new(),
            symbol: "BTC".to_string(),
            rank: 1,
            is_active: true,
            tags: Vec::new(),
            team: Vec::new(),
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.is_on_list());
        assert_eq!(app.list, CoinListUiState::default());
        assert!(app.last_updated.is_none());
    }

    #[test]
    fn test_loading_lifecycle() {
        let mut app = App::new();

        app.start_loading_coins();
        assert!(app.list.is_loading);

        app.coins_loaded(vec![coin("btc-bitcoin", "Bitcoin", 1, "BTC")]);
        assert!(!app.list.is_loading);
        assert_eq!(app.list.coins.len(), 1);
        assert!(app.last_updated.is_some());
    }

    #[test]
    fn test_coins_failed_keeps_previous_coins() {
        let mut app = loaded_app();
        app.start_loading_coins();
        app.coins_failed(&anyhow::anyhow!("boom"));

        assert!(!app.list.is_loading);
        assert_eq!(app.list.coins.len(), 3);
        assert_eq!(
            app.list.error_state,
            Some(ErrorState::Other(Some("boom".to_string())))
        );
    }

    #[test]
    fn test_error_state_not_connected() {
        let err = anyhow::Error::new(ApiError::Connection("refused".to_string()))
            .context("Chargement de la liste");
        assert_eq!(ErrorState::from_error(&err), ErrorState::NotConnected);

        let err = anyhow::Error::new(ApiError::Status { status: 500, body: String::new() });
        assert!(matches!(ErrorState::from_error(&err), ErrorState::Other(Some(_))));
    }

    #[test]
    fn test_error_state_keeps_cause_behind_context() {
        let err = anyhow::Error::new(ApiError::NotFound("nope-coin".to_string()))
            .context("Chargement du coin nope-coin");

        match ErrorState::from_error(&err) {
            ErrorState::Other(Some(message)) => {
                assert!(message.starts_with("Chargement du coin nope-coin: "));
                assert!(message.contains("nope-coin"));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = loaded_app();

        app.navigate_up();
        assert_eq!(app.selected_index, 0);

        app.navigate_down();
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        // Une liste plus courte ramène la sélection dans les bornes
        app.coins_loaded(vec![coin("btc-bitcoin", "Bitcoin", 1, "BTC")]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut app = App::new();
        app.navigate_down();
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_coin().is_none());
        assert!(app.open_detail().is_none());
        assert!(app.is_on_list());
    }

    #[test]
    fn test_search_filters_and_resets_selection() {
        let mut app = loaded_app();
        app.navigate_down();

        app.start_search();
        assert!(app.is_in_search_mode());
        for c in "eth".chars() {
            app.append_char(c);
        }

        assert_eq!(app.selected_index, 0);
        assert_eq!(app.visible_coins().len(), 1);
        assert_eq!(app.selected_coin().unwrap().symbol, "ETH");

        app.submit_search();
        assert!(app.is_on_list());
        assert_eq!(app.search_query, "eth");

        app.start_search();
        app.cancel_search();
        assert!(app.search_query.is_empty());
        assert_eq!(app.visible_coins().len(), 3);
    }

    #[test]
    fn test_search_matches_substring_of_name() {
        let mut app = App::new();
        app.coins_loaded(vec![
            coin("eth-ethereum", "Ethereum", 2, "ETH"),
            coin("usdt-tether", "Tether", 3, "USDT"),
            coin("sol-solana", "Solana", 5, "SOL"),
        ]);

        for c in "ETH".chars() {
            app.append_char(c);
        }

        // "ETH" est aussi contenu dans "Tether"
        let symbols: Vec<&str> = app
            .visible_coins()
            .iter()
            .map(|coin| coin.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["ETH", "USDT"]);
    }

    #[test]
    fn test_open_detail_and_load() {
        let mut app = loaded_app();

        let coin_id = app.open_detail().unwrap();
        assert_eq!(coin_id, "btc-bitcoin");
        assert!(app.is_on_detail());
        assert!(app.detail.is_loading);

        assert!(app.detail_loaded("btc-bitcoin", detail("btc-bitcoin")));
        assert!(!app.detail.is_loading);
        assert_eq!(app.detail.coin.as_ref().unwrap().coin_id, "btc-bitcoin");
    }

    #[test]
    fn test_stale_detail_result_is_ignored() {
        let mut app = loaded_app();
        app.open_detail();
        app.back_to_list();
        app.navigate_down();
        app.open_detail();

        // Résultat du premier coin, arrivé après l'ouverture du second
        assert!(!app.detail_loaded("btc-bitcoin", detail("btc-bitcoin")));
        assert!(!app.detail_failed("btc-bitcoin", &anyhow::anyhow!("late")));
        assert!(app.detail.is_loading);
        assert!(app.detail.coin.is_none());
        assert_eq!(app.detail.coin_id.as_deref(), Some("eth-ethereum"));
    }

    #[test]
    fn test_detail_failed_and_reload() {
        let mut app = loaded_app();
        app.open_detail();

        let err = anyhow::Error::new(ApiError::Connection("offline".to_string()));
        assert!(app.detail_failed("btc-bitcoin", &err));
        assert_eq!(app.detail.error_state, Some(ErrorState::NotConnected));

        assert_eq!(app.reload_detail().as_deref(), Some("btc-bitcoin"));
        assert!(app.detail.is_loading);
        assert!(app.detail.error_state.is_none());
    }

    #[test]
    fn test_description_scroll() {
        let mut app = loaded_app();
        app.open_detail();

        // Rien à faire défiler tant que le détail n'est pas chargé
        app.scroll_description_down();
        assert_eq!(app.detail.description_scroll, 0);

        let mut coin = detail("btc-bitcoin");
        coin.description = "one two".to_string();
        app.detail_loaded("btc-bitcoin", coin);

        app.scroll_description_up();
        assert_eq!(app.detail.description_scroll, 0);

        for _ in 0..10 {
            app.scroll_description_down();
        }
        assert_eq!(app.detail.description_scroll, 4);

        app.scroll_description_up();
        assert_eq!(app.detail.description_scroll, 3);

        // Un nouveau détail repart du haut
        app.back_to_list();
        app.open_detail();
        assert_eq!(app.detail.description_scroll, 0);
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_error_messages() {
        assert!(ErrorState::NotConnected.message().contains("[r]"));
        assert_eq!(
            ErrorState::Other(Some("HTTP 500".to_string())).message(),
            "Erreur : HTTP 500"
        );
        assert!(!ErrorState::Other(None).message().is_empty());
    }
}
