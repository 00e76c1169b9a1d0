mod art;
pub mod view;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use std::time::Instant;

use crate::app::{App, CreateField, Popup, ACTION_KEYS};
use crate::theme::Theme;

/// Widest a stat bar gets before it stops growing
const BAR_WIDTH: usize = 20;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let theme = &app.theme;

    // Short terminals give the log less room
    let log_height = if area.height < 24 { 5 } else { 9 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Info line
            Constraint::Min(8),             // Roster + pet panel
            Constraint::Length(log_height), // Log
            Constraint::Length(1),          // Footer
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    draw_info_line(f, app, chunks[0]);
    draw_roster(f, app, body[0]);
    draw_pet_panel(f, app, body[1]);
    draw_log(f, app, chunks[2]);
    draw_footer(f, theme, chunks[3]);

    match app.popup {
        Popup::None => {}
        Popup::CreatePet => draw_create_popup(f, app),
        Popup::RenamePet => draw_rename_popup(f, app),
        Popup::Notice => draw_notice_popup(f, app),
        Popup::Help => draw_help_popup(f, theme),
    }
}

fn panel<'a>(title: &'a str, theme: &Theme, active: bool) -> Block<'a> {
    let color = if active { theme.accent } else { theme.inactive };
    let title_style = if active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.inactive)
    };
    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(theme.accent)))
    } else {
        let count = app.widget.registry().len();
        let noun = if count == 1 { "pet" } else { "pets" };
        Line::from(Span::styled(
            format!("{} {}", count, noun),
            Style::default().fg(theme.text_dim),
        ))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_roster(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let view = app.widget.display();
    let block = panel(" Pets ", theme, true);

    let rows: Vec<Row> = if view.roster.is_empty() {
        vec![Row::new(vec![Span::styled(
            "  No pets yet, press n",
            Style::default().fg(theme.text_dim),
        )])]
    } else {
        view.roster
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let selected = view.roster_selected == Some(i);
                let marker = if selected { "●" } else { " " };
                let style = if selected {
                    Style::default().bg(theme.bg_selected).fg(theme.text)
                } else {
                    Style::default()
                };
                let position = if i < 9 { format!("{}", i + 1) } else { String::new() };

                Row::new(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(position, Style::default().fg(theme.text_dim)),
                    Span::styled(label.as_str(), Style::default().fg(theme.text)),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [Constraint::Length(2), Constraint::Length(2), Constraint::Min(5)];
    let table = Table::new(rows, widths).block(block);
    f.render_widget(table, area);
}

fn stat_line<'a>(label: &'a str, value: Option<i64>, color: Color, theme: &Theme) -> Line<'a> {
    match value {
        Some(v) => {
            let filled = (v.max(0) as usize).min(BAR_WIDTH);
            let bar_color = if v == 0 { theme.danger } else { color };
            Line::from(vec![
                Span::styled(format!("{:<10}", label), Style::default().fg(theme.header)),
                Span::styled(format!("{:>4} ", v), Style::default().fg(theme.text)),
                Span::styled("█".repeat(filled), Style::default().fg(bar_color)),
                Span::styled("░".repeat(BAR_WIDTH - filled), Style::default().fg(theme.inactive)),
            ])
        }
        None => Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(theme.header)),
            Span::styled("-", Style::default().fg(theme.text_dim)),
        ]),
    }
}

fn draw_pet_panel(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let view = app.widget.display();
    let title = match view.animation {
        Some(active) => format!(" Pet · {} ", active.animation.name()),
        None => " Pet ".to_string(),
    };
    let block = panel(&title, theme, false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(inner);

    let Some(pet) = &view.pet else {
        let lines = vec![
            Line::from(Span::styled("No Pet Selected", Style::default().fg(theme.text_dim))),
            stat_line("Weight", None, theme.weight, theme),
            stat_line("Happiness", None, theme.happiness, theme),
        ];
        f.render_widget(Paragraph::new(lines), parts[0]);
        return;
    };

    let info = vec![
        Line::from(vec![
            Span::styled(pet.name.as_str(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  the {}", pet.kind), Style::default().fg(theme.text_dim)),
        ]),
        Line::from(Span::styled(pet.image.as_str(), Style::default().fg(theme.inactive))),
        Line::from(""),
        stat_line("Weight", Some(pet.weight), theme.weight, theme),
        stat_line("Happiness", Some(pet.happiness), theme.happiness, theme),
    ];
    f.render_widget(Paragraph::new(info), parts[0]);

    let now = Instant::now();
    let animation = view
        .animation
        .map(|a| (a.animation, now.saturating_duration_since(a.started)));
    let frame = art::frame(&pet.kind, animation);

    let style = if frame.emphasis {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let portrait: Vec<Line> = frame.lines.into_iter().map(|l| Line::styled(l, style)).collect();
    f.render_widget(Paragraph::new(portrait).alignment(Alignment::Center), parts[1]);
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let view = app.widget.display();

    let title = if view.log_scroll > 0 {
        format!(" Log (↑{}) ", view.log_scroll)
    } else {
        " Log ".to_string()
    };
    let block = panel(&title, theme, false);

    // Newest entry sits on the bottom row unless scrolled back
    let visible = area.height.saturating_sub(2) as usize;
    let end = view.log.len().saturating_sub(view.log_scroll);
    let start = end.saturating_sub(visible);

    let lines: Vec<Line> = view.log[start..end]
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let newest = start + i + 1 == view.log.len();
            let color = if newest { theme.text } else { theme.text_dim };
            Line::from(vec![
                Span::styled("• ", Style::default().fg(theme.inactive)),
                Span::styled(entry.as_str(), Style::default().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(f: &mut Frame, theme: &Theme, area: Rect) {
    let hints: [(&str, &str); 8] = [
        ("↑↓", "Pet"),
        ("t", "Treat"),
        ("p", "Play"),
        ("e", "Exercise"),
        ("s", "Sleep"),
        ("n", "New"),
        ("r", "Rename"),
        ("h", "Help"),
    ];

    let max_hints = if area.width < 60 { 5 } else { hints.len() };

    let spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(theme.text_dim)),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn input_box<'a>(label: &'a str, value: &str, focused: bool, theme: &Theme) -> Paragraph<'a> {
    let border = if focused { theme.accent } else { theme.inactive };
    let cursor = if focused { "_" } else { "" };
    Paragraph::new(format!("{}{}", value, cursor))
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .title(Span::styled(label, Style::default().fg(if focused { theme.accent } else { theme.header })))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
}

fn draw_create_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, popup_area);
    let block = panel(" New Pet ", theme, true);
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    let name_focused = app.create_field == CreateField::Name;
    f.render_widget(input_box(" Name ", &app.name_input, name_focused, theme), rows[0]);
    f.render_widget(input_box(" Kind (←/→ to cycle) ", &app.kind_input, !name_focused, theme), rows[1]);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" field │ "),
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" create │ "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" cancel"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(theme.text_dim));
    f.render_widget(hint, rows[2]);
}

fn draw_rename_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, popup_area);

    let current = app
        .widget
        .current_pet()
        .map(|p| format!(" Rename {} ", p.name()))
        .unwrap_or_else(|| " Rename ".to_string());
    let block = panel(&current, theme, true);
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    f.render_widget(input_box(" New name ", &app.name_input, true, theme), rows[0]);
    let hint = Paragraph::new("Enter save │ Esc cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_dim));
    f.render_widget(hint, rows[1]);
}

fn draw_notice_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(40, 20, f.area());
    f.render_widget(Clear, popup_area);

    let message = app.notice.as_deref().unwrap_or("");
    let notice = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(theme.danger))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::raw(" OK"),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Notice ", Style::default().fg(theme.danger)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.danger)),
    )
    .alignment(Alignment::Center);

    f.render_widget(notice, popup_area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 85 },
        area,
    );
    f.render_widget(Clear, popup_area);

    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(theme.header).add_modifier(Modifier::BOLD)))
    };
    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(theme.accent)),
            Span::raw(what),
        ])
    };

    let signed = |n: i64| if n >= 0 { format!("+{}", n) } else { n.to_string() };
    let actions = ACTION_KEYS.iter().map(|(k, action)| {
        let (weight, happiness) = action.deltas();
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(theme.accent)),
            Span::raw(format!(
                "{:<10}weight {}, happiness {}",
                action.name(),
                signed(weight),
                signed(happiness)
            )),
        ])
    });

    let mut help_text = vec![
        heading("═══ Pets ═══"),
        key("↑/↓ j/k", "Previous / next pet"),
        key("1-9", "Jump to pet by position"),
        key("n", "Create a pet"),
        key("r", "Rename the selected pet"),
        Line::from(""),
        heading("═══ Actions ═══"),
    ];
    help_text.extend(actions);
    help_text.extend([
        Line::from(""),
        heading("═══ Log ═══"),
        key("PgUp/PgDn", "Scroll back / forward"),
        key("End", "Jump to newest"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("h", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("?", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close, ", Style::default().fg(theme.text_dim)),
            Span::styled("q", Style::default().fg(theme.accent)),
            Span::styled(" quits", Style::default().fg(theme.text_dim)),
        ]),
    ]);

    let help = Paragraph::new(help_text)
        .block(panel(" gigapet Help ", theme, true))
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
