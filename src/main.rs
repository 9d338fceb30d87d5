// ============================================================================
// LazyCoin - Liste et détail des cryptomonnaies (CoinPaprika)
// ============================================================================
// Programme TUI : liste des coins, recherche, écran de détail
//
// Câblage (fait à la main, pas de framework d'injection) :
//   Config -> PaprikaClient -> CoinRepositoryImpl -> GetCoinsUseCase
//                                                 -> GetCoinUseCase
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Worker thread + runtime tokio : les appels réseau ne bloquent pas l'UI
// 4. Channels mpsc : commandes vers le worker, résultats vers l'UI
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use lazycoin::api::PaprikaClient;
use lazycoin::app::App;
use lazycoin::config::Config;
use lazycoin::models::{Coin, CoinDetail};
use lazycoin::repository::{CoinRepository, CoinRepositoryImpl};
use lazycoin::ui::{events::EventHandler, render};
use lazycoin::usecase::{GetCoinUseCase, GetCoinsUseCase};

// ============================================================================
// AppCommand / AppResult : messages échangés avec le worker
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Charger (ou recharger) la liste des coins
    LoadCoins,

    /// Charger le détail d'un coin
    LoadCoin { coin_id: String },
}

/// Résultats renvoyés par le worker thread
///
/// CONCEPT RUST : anyhow::Error est Send + Sync
/// - On peut l'envoyer tel quel d'un thread à l'autre
/// - L'UI le classe ensuite (ErrorState::from_error)
#[derive(Debug)]
enum AppResult {
    CoinsLoaded(Vec<Coin>),
    CoinsFailed(anyhow::Error),
    CoinLoaded { coin_id: String, detail: CoinDetail },
    CoinFailed { coin_id: String, error: anyhow::Error },
}

/// Les deux use cases, partagés avec le worker
#[derive(Clone)]
struct UseCases {
    get_coins: GetCoinsUseCase,
    get_coin: GetCoinUseCase,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne.
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazycoin/logs/lazycoin.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=lazycoin=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.effective_log_dir();

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "lazycoin.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // UI et worker tournent sur deux threads
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour lazycoin, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazycoin=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env().context("Configuration invalide")?;

    // Si le logging échoue, on continue quand même
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(api_url = %config.api_url, timeout = ?config.timeout, "LazyCoin starting up");

    // Câblage : service -> repository -> use cases
    let client = PaprikaClient::new(&config).context("Échec de la création du client HTTP")?;
    let repository: Arc<dyn CoinRepository> = Arc::new(CoinRepositoryImpl::new(client));
    let use_cases = UseCases {
        get_coins: GetCoinsUseCase::new(repository.clone()),
        get_coin: GetCoinUseCase::new(repository),
    };

    // Le runtime est créé ici pour que l'erreur remonte proprement,
    // puis déplacé dans le worker
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(runtime, use_cases, command_rx, result_tx);

    // Premier chargement : l'UI s'affiche tout de suite avec l'indicateur
    let mut app = App::new();
    app.start_loading_coins();
    send_command(&command_tx, AppCommand::LoadCoins);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    if let Err(e) = restore_terminal(&mut terminal) {
        error!(error = ?e, "Failed to restore terminal");
        // L'erreur de la boucle prime sur celle de la restauration
        return result.and(Err(e));
    }

    result
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Thread OS + runtime async
// - std::thread::spawn() : crée un thread OS
// - runtime.block_on() : bloque le worker, jamais l'UI
// - La boucle s'arrête quand command_tx est droppé (fin du main)
// ============================================================================

fn spawn_background_worker(
    runtime: tokio::runtime::Runtime,
    use_cases: UseCases,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) {
    std::thread::spawn(move || {
        // CONCEPT RUST : while let sur recv()
        // - Ok(command) tant que le channel est ouvert
        // - Err quand tous les Sender sont droppés -> fin de boucle
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            let result = match command {
                AppCommand::LoadCoins => {
                    match runtime
                        .block_on(use_cases.get_coins.execute())
                        .context("Chargement de la liste des coins")
                    {
                        Ok(coins) => {
                            info!(count = coins.len(), "Coins loaded");
                            AppResult::CoinsLoaded(coins)
                        }
                        Err(e) => {
                            error!(error = ?e, "Failed to load coins");
                            AppResult::CoinsFailed(e)
                        }
                    }
                }

                AppCommand::LoadCoin { coin_id } => {
                    match runtime
                        .block_on(use_cases.get_coin.execute(&coin_id))
                        .with_context(|| format!("Chargement du coin {}", coin_id))
                    {
                        Ok(detail) => {
                            info!(coin_id = %coin_id, "Coin detail loaded");
                            AppResult::CoinLoaded { coin_id, detail }
                        }
                        Err(e) => {
                            error!(coin_id = %coin_id, error = ?e, "Failed to load coin detail");
                            AppResult::CoinFailed { coin_id, error: e }
                        }
                    }
                }
            };

            if result_tx.send(result).is_err() {
                // L'event loop est terminée, plus personne n'écoute
                break;
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

/// Envoie une commande au worker, en loggant si le worker est mort
fn send_command(command_tx: &mpsc::Sender<AppCommand>, command: AppCommand) {
    if let Err(e) = command_tx.send(command) {
        error!(command = ?e.0, "Worker thread disconnected, command dropped");
    }
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Résultats du worker
//   1. Render
//   2. Input
//   3. Update (tick)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    let mut worker_disconnected = false;

    while app.is_running() {
        // 0. RÉSULTATS : on vide tout ce qui est arrivé depuis le dernier tour
        loop {
            match result_rx.try_recv() {
                Ok(result) => apply_result(app, result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Le worker est mort : l'UI reste utilisable pour quitter
                    if !worker_disconnected {
                        warn!("Worker thread disconnected");
                        worker_disconnected = true;
                    }
                    break;
                }
            }
        }

        // 1. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 2. INPUT
        match events.next() {
            Ok(event) => handle_event(app, event, command_tx),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }

        // 3. UPDATE
        app.tick();
    }

    Ok(())
}

/// Applique un résultat du worker à l'état de l'application
fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::CoinsLoaded(coins) => {
            info!(count = coins.len(), "Updating coin list");
            app.coins_loaded(coins);
        }
        AppResult::CoinsFailed(error) => {
            app.coins_failed(&error);
        }
        AppResult::CoinLoaded { coin_id, detail } => {
            if !app.detail_loaded(&coin_id, detail) {
                debug!(coin_id = %coin_id, "Ignoring stale coin detail");
            }
        }
        AppResult::CoinFailed { coin_id, error } => {
            if !app.detail_failed(&coin_id, &error) {
                debug!(coin_id = %coin_id, "Ignoring stale coin detail error");
            }
        }
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Le mode recherche passe en premier : 'q', 'r', 'j'... y sont du texte
/// - Ensuite la navigation dépend de l'écran courant
fn handle_event(app: &mut App, event: lazycoin::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazycoin::ui::events::{
        get_char_from_event, is_backspace_event, is_down_event, is_enter_event, is_escape_event,
        is_quit_event, is_refresh_event, is_search_char_event, is_search_event, is_space_event,
        is_up_event, Event,
    };

    if let Event::Tick = event {
        return;
    }

    // ========================================
    // Mode recherche : saisie du filtre
    // ========================================
    if app.is_in_search_mode() {
        if is_escape_event(&event) {
            debug!("User cleared search");
            app.cancel_search();
        } else if is_enter_event(&event) {
            info!(query = %app.search_query, "User applied search filter");
            app.submit_search();
        } else if is_backspace_event(&event) {
            app.backspace();
        } else if is_search_char_event(&event) {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }
        return;
    }

    match event {
        // 'q' : two-step quit
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // Navigation dans la liste
        Event::Key(_) if is_up_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            app.navigate_down();
        }

        // Défilement de la description
        Event::Key(_) if is_up_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            app.scroll_description_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            app.scroll_description_down();
        }

        // Enter : ouvrir le détail du coin sélectionné
        Event::Key(_) if is_enter_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            if let Some(coin_id) = app.open_detail() {
                info!(coin_id = %coin_id, "User opened coin detail");
                send_command(command_tx, AppCommand::LoadCoin { coin_id });
            }
        }

        // '/' : recherche
        Event::Key(_) if is_search_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            debug!("User started search");
            app.start_search();
        }

        // 'r' : recharger la liste (une seule requête à la fois)
        Event::Key(_) if is_refresh_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            if app.list.is_loading {
                debug!("Coin list already loading, refresh ignored");
            } else {
                info!("User requested coin list refresh");
                app.start_loading_coins();
                send_command(command_tx, AppCommand::LoadCoins);
            }
        }

        // 'r' : recharger le détail
        Event::Key(_) if is_refresh_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            if !app.detail.is_loading {
                if let Some(coin_id) = app.reload_detail() {
                    info!(coin_id = %coin_id, "User requested coin detail reload");
                    send_command(command_tx, AppCommand::LoadCoin { coin_id });
                }
            }
        }

        // ESC ou SPACE : retour à la liste
        Event::Key(_) if (is_escape_event(&event) || is_space_event(&event)) && app.is_on_detail() => {
            app.cancel_quit();
            debug!("User returned to coin list");
            app.back_to_list();
        }

        // Toute autre touche : annule la confirmation de quit
        Event::Key(_) => app.cancel_quit(),

        Event::Tick => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    // Si la suite échoue, on ne laisse pas le terminal en raw mode
    let terminal = enter_alternate_screen().map_err(|e| {
        if let Err(raw_err) = disable_raw_mode() {
            error!(error = ?raw_err, "Failed to disable raw mode");
        }
        e
    })?;

    Ok(terminal)
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
