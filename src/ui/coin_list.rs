// ============================================================================
// Écran liste - Rendu de l'interface principale
// ============================================================================
// Dessine la liste des cryptomonnaies avec les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, List)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Dessine l'écran liste (avec la ligne de recherche si elle est active)
pub fn render_coin_list(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);

    if app.is_in_search_mode() {
        render_search_footer(frame, app, chunks[2]);
    } else {
        render_footer(frame, app, chunks[2]);
    }
}

/// Crée le layout principal (header, content, footer)
///
/// CONCEPT RUST : Rc<[T]> vs Vec<T>
/// - Layout::split() retourne Rc<[Rect]>
/// - On le convertit en Vec avec .to_vec() pour simplifier
pub(crate) fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : 3 lignes
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : 3 lignes
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : titre + statut du chargement
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyCoin ")
        .title_alignment(Alignment::Center);

    // Le statut dépend de l'état de la liste :
    // chargement > erreur > heure du dernier rafraîchissement
    let status = if app.list.is_loading {
        Span::styled(
            "⏳ Chargement des coins...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if let Some(error) = &app.list.error_state {
        Span::styled(
            format!("⚠ {}", error.message()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if let Some(updated) = app.last_updated {
        Span::styled(
            format!(
                "{} coins · mis à jour à {}",
                app.list.coins.len(),
                updated.format("%H:%M:%S")
            ),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::raw("")
    };

    let paragraph = Paragraph::new(Line::from(status))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Main Content : la liste
// ============================================================================

/// Calcule la première ligne affichée pour que la sélection reste visible
///
/// L'API renvoie plusieurs milliers de coins : on ne construit que les
/// ListItem de la fenêtre visible.
pub(crate) fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 || selected < height {
        0
    } else {
        selected + 1 - height
    }
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.search_query.is_empty() {
        " 🪙 Cryptomonnaies ".to_string()
    } else {
        format!(" 🪙 Cryptomonnaies · filtre \"{}\" ", app.search_query)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    let coins = app.visible_coins();

    // Rien à afficher : message selon la situation
    if coins.is_empty() {
        let (message, color) = if app.list.is_loading {
            ("Chargement...".to_string(), Color::Yellow)
        } else if let Some(error) = &app.list.error_state {
            (error.message(), Color::Red)
        } else if !app.search_query.is_empty() {
            (format!("Aucun coin ne correspond à \"{}\"", app.search_query), Color::Gray)
        } else {
            ("Aucun coin".to_string(), Color::Gray)
        };

        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(color))),
        ])
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
        return;
    }

    // Hauteur utile = hauteur - 2 bordures
    let height = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.selected_index, height);

    let items: Vec<ListItem> = coins
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, coin)| {
            let style = if coin.is_active {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let style = if index == app.selected_index {
                style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED)
            } else {
                style
            };

            ListItem::new(format!(" {}", coin.display())).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

// ============================================================================
// Footer : raccourcis ou confirmation de quit
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.is_awaiting_quit_confirmation() {
        quit_confirmation_line()
    } else {
        let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("[q]", key),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", key),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", key),
            Span::raw(" Detail  "),
            Span::styled("[/]", key),
            Span::raw(" Search  "),
            Span::styled("[r]", key),
            Span::raw(" Refresh"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Message de confirmation de quit, partagé avec l'écran détail
pub(crate) fn quit_confirmation_line() -> Line<'static> {
    let warning = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("⚠  Appuyez sur ", warning),
        Span::styled(
            "[q]",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
        Span::styled(
            " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
            warning,
        ),
    ])
}

/// Footer en mode recherche : ligne de saisie
fn render_search_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" [Enter] Garder  [ESC] Effacer ");

    let input_line = Line::from(vec![
        Span::styled(
            "Search: ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.search_query.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let paragraph = Paragraph::new(vec![input_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
