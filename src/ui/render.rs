use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use tripbudget::affordability::{affordability_tier, price_level};
use tripbudget::allocator::daily_amount;

use super::app::{App, InputMode};
use super::commands;
use super::theme;
use super::util::{format_money, share_bar, truncate};

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Summary bar
            Constraint::Min(5),    // Categories
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_summary_bar(f, chunks[0], app);
    render_categories(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_summary_bar(f: &mut Frame, area: Rect, app: &App) {
    let plan = &app.plan;
    let line = Line::from(vec![
        Span::styled(" tripbudget ", theme::header_style().fg(theme::ACCENT)),
        Span::styled(
            format!(
                "| {} over {} days | {} | allocated {}% | price level {}/3 ",
                format_money(plan.total_budget(), plan.currency()),
                plan.duration(),
                plan.currency(),
                plan.percentage_sum(),
                price_level(plan, &app.rates),
            ),
            theme::header_style(),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
}

fn render_categories(f: &mut Frame, area: Rect, app: &App) {
    let plan = &app.plan;
    let duration = i64::from(plan.duration());
    let currency = plan.currency();

    let header = ListItem::new(Line::from(Span::styled(
        format!(
            "{:<18} {:<22} {:>4}  {:>14}  {:>12}  {}",
            "Category", "Share", "%", "Amount", "Per day", "Tier"
        ),
        theme::dim_style().add_modifier(Modifier::BOLD),
    )));

    let rows = plan.categories().iter().enumerate().map(|(i, cat)| {
        let tier = affordability_tier(cat, duration, currency, &app.rates);
        let style = if i == app.category_index {
            theme::selected_style()
        } else if i % 2 == 0 {
            theme::alt_row_style()
        } else {
            theme::normal_style()
        };
        let share_style = if i == app.category_index {
            style
        } else {
            theme::share_style(cat.within_ui_range())
        };
        let tier_style = if i == app.category_index {
            style
        } else {
            theme::tier_style(tier)
        };

        ListItem::new(Line::from(vec![
            Span::styled(format!("{:<18} ", truncate(&cat.name, 17)), style),
            Span::styled(format!("{:<22} ", share_bar(cat.percentage, 20)), share_style),
            Span::styled(format!("{:>3}%  ", cat.percentage), share_style),
            Span::styled(format!("{:>14}  ", format_money(cat.amount, currency)), style),
            Span::styled(
                format!("{:>12}  ", format_money(daily_amount(cat, duration), currency)),
                style,
            ),
            Span::styled(tier.to_string(), tier_style),
        ]))
    });

    let items: Vec<ListItem> = std::iter::once(header).chain(rows).collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Categories ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
    };

    let info = match app.selected_category() {
        Some(cat) => format!(" {} ", cat.name),
        None => String::new(),
    };
    let right = " j/k move | +/- share | Enter edit | ? help ";

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

const KEY_HELP: [&str; 3] = [
    "  j/k or Up/Down   Move cursor           +/-        Nudge share by 1%",
    "  Enter            Edit selected share   :          Command mode",
    "  Esc              Cancel                q/Ctrl-c   Quit",
];

/// One `(name, description)` row per command, the longest alias standing in
/// for its shorter ones.
fn help_commands() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<(&'static str, &'static str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .map(|(&name, cmd)| (name, cmd.description))
        .collect();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

    let mut seen = std::collections::HashSet::new();
    entries.retain(|(_, desc)| seen.insert(*desc));
    entries.sort_by_key(|(name, _)| *name);
    entries
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut help_text = vec![
        Line::from(Span::styled(
            " tripbudget Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Keys"),
    ];
    help_text.extend(
        KEY_HELP
            .iter()
            .map(|row| Line::from(Span::styled(*row, theme::normal_style()))),
    );
    help_text.push(Line::from(""));
    help_text.push(section(" Commands"));

    for (name, desc) in help_commands() {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<10} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_each_command_once() {
        let rows = help_commands();
        let currency: Vec<_> = rows
            .iter()
            .filter(|(_, desc)| desc.contains("currency"))
            .collect();
        assert_eq!(currency.len(), 1);
        assert_eq!(currency[0].0, "currency");
        assert!(rows.iter().all(|(name, _)| *name != "cur"));
    }

    #[test]
    fn test_key_help_names_quit_binding() {
        assert!(KEY_HELP.iter().any(|row| row.contains("q/Ctrl-c   Quit")));
        assert!(KEY_HELP.iter().all(|row| !row.contains("Ctrl-q")));
    }
}
