// ============================================================================
// Écran détail
// ============================================================================
// Affiche le détail du coin sélectionné : identité, description, tags, équipe
//
// Trois cas possibles (CoinDetailUiState) :
// - chargement en cours
// - erreur (avec possibilité de recharger via [r])
// - détail disponible ; un rechargement raté est signalé dans le header
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::CoinDetail;
use crate::ui::coin_list::{create_layout, quit_confirmation_line};

pub fn render_coin_detail(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    match (&app.detail.coin, &app.detail.error_state) {
        // Une erreur n'efface pas un détail déjà affiché (rechargement raté)
        (Some(coin), _) => {
            render_detail_body(frame, coin, app.detail.description_scroll, chunks[1])
        }
        (None, Some(error)) => render_message(frame, chunks[1], &error.message(), Color::Red),
        (None, None) => render_message(frame, chunks[1], "Chargement...", Color::Yellow),
    }

    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyCoin · Détail ")
        .title_alignment(Alignment::Center);

    let title = match (&app.detail.coin, &app.detail.coin_id) {
        (Some(coin), _) => coin.title(),
        (None, Some(coin_id)) => coin_id.clone(),
        (None, None) => String::new(),
    };

    let mut spans = vec![Span::styled(
        title,
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    if app.detail.coin.is_some() {
        if app.detail.is_loading {
            spans.push(Span::styled("  ⏳", Style::default().fg(Color::Yellow)));
        } else if let Some(error) = &app.detail.error_state {
            spans.push(Span::styled(
                format!("  ⚠ {}", error.message()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Corps du détail : description à gauche, tags + équipe à droite
fn render_detail_body(frame: &mut Frame, coin: &CoinDetail, scroll: u16, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    // Description
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_color = if coin.is_active { Color::Green } else { Color::Red };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Statut : ", label),
            Span::styled(coin.status_label(), Style::default().fg(status_color)),
        ]),
        Line::from(""),
    ];
    if coin.description.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "Pas de description",
            Style::default().fg(Color::Gray),
        )));
    } else {
        lines.push(Line::from(coin.description.as_str()));
    }

    let description = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Description "),
        )
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(description, columns[0]);

    // Tags + équipe
    let mut side = vec![Line::from(Span::styled("Tags", label))];
    if coin.tags.is_empty() {
        side.push(Line::from(Span::styled("  aucun", Style::default().fg(Color::Gray))));
    } else {
        side.extend(coin.tags.iter().map(|tag| Line::from(format!("  • {}", tag))));
    }

    side.push(Line::from(""));
    side.push(Line::from(Span::styled("Équipe", label)));
    if coin.team.is_empty() {
        side.push(Line::from(Span::styled("  aucune", Style::default().fg(Color::Gray))));
    } else {
        side.extend(coin.team.iter().map(|member| {
            Line::from(vec![
                Span::raw(format!("  • {}", member.name)),
                Span::styled(
                    format!(" ({})", member.position),
                    Style::default().fg(Color::Gray),
                ),
            ])
        }));
    }

    let side_panel = Paragraph::new(side)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(side_panel, columns[1]);
}

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
            Span::styled("[ESC / Space]", key),
            Span::raw(" Back  "),
            Span::styled("[↑↓]", key),
            Span::raw(" Scroll  "),
            Span::styled("[r]", key),
            Span::raw(" Reload"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
