use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::entity::Company;
use crate::output::{change_tone, format_change, format_percent, format_summary};
use crate::query::{SortField, View};
use crate::scoring::{classify_band, Band};
use crate::signals::ModelAttribution;
use crate::tui::app::{App, DetailData, InputMode};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    match app.session.view {
        View::Watchlist => draw_watchlist(frame, area, app),
        View::Detail => draw_detail(frame, area, app),
    }

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.colors);
    }
}

fn draw_watchlist(frame: &mut Frame, area: Rect, app: &mut App) {
    // Title(1) + Filters(1) + Table(fill) + Legend(1) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app, "Watchlist");
    render_filters(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_legend(frame, chunks[3], &app.colors);
    render_status_bar(frame, chunks[4], app);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, subtitle: &str) {
    let left = format!("Model Watchlist · {}", subtitle);
    let right = format!(
        "loaded {}",
        app.collection.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    let padding = (area.width as usize).saturating_sub(left.chars().count() + right.len());
    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.colors.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(app.colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let editing = app.input_mode == InputMode::SearchInput;
    let search = if editing {
        format!("{}|", app.session.search)
    } else if app.session.search.is_empty() {
        "(none)".to_string()
    } else {
        app.session.search.clone()
    };
    let search_style = if editing {
        Style::default().fg(colors.status_key_color).bold()
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(colors.muted)),
        Span::styled(search, search_style),
        Span::raw("   "),
        Span::styled("Sector: ", Style::default().fg(colors.muted)),
        Span::raw(app.session.sector.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn header_cell(field: SortField, app: &App) -> Cell<'static> {
    let sort = app.session.sort;
    if field == sort.field {
        Cell::from(format!("{} {}", field.header(), sort.direction.arrow()))
            .style(app.colors.sort_header_style)
    } else {
        Cell::from(field.header())
    }
}

fn company_row<'a>(idx: usize, company: &'a Company, colors: &ThemeColors) -> Row<'a> {
    let band = classify_band(company.composite());
    let scores = company.scores();

    let name = Line::from(vec![
        Span::raw(company.name.as_str()),
        Span::raw(" "),
        Span::styled(company.ticker.as_str(), Style::default().fg(colors.muted)),
    ]);

    let row_style = if idx % 2 == 1 {
        Style::default().bg(colors.row_alt_bg)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(colors.index_color)),
        Cell::from(name),
        Cell::from(company.sector.as_str()),
        Cell::from(format_percent(company.composite()))
            .style(Style::default().fg(colors.tone_color(band.tone())).bold()),
        Cell::from(format_percent(scores.baseline())),
        Cell::from(format_percent(scores.gbm())),
        Cell::from(format_percent(scores.logistic())),
        Cell::from(format_change(company.change))
            .style(Style::default().fg(colors.tone_color(change_tone(company.change)))),
    ])
    .style(row_style)
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let view = app.visible();

    if view.is_empty() {
        let empty_msg = Paragraph::new("No companies match the current filters")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.colors.muted));
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = view
        .iter()
        .enumerate()
        .map(|(idx, company)| company_row(idx, company, &app.colors))
        .collect();

    let mut header = vec![Cell::from("#"), Cell::from("Company"), Cell::from("Sector")];
    header.extend(SortField::ALL.iter().map(|&f| header_cell(f, app)));

    let widths = [
        Constraint::Length(4),  // "50."
        Constraint::Fill(1),    // name + ticker
        Constraint::Length(14), // sector
        Constraint::Length(12), // composite
        Constraint::Length(11), // baseline
        Constraint::Length(9),  // gbm
        Constraint::Length(12), // logistic
        Constraint::Length(10), // change
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(app.colors.header_style).bottom_margin(1))
        .row_highlight_style(app.colors.row_selected);

    // `view` borrows the collection, the table state is a separate field
    let mut state = app.table_state.clone();
    frame.render_stateful_widget(table, area, &mut state);
    app.table_state = state;
}

fn render_legend(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let mut spans = Vec::new();
    for band in Band::ALL {
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled("● ", Style::default().fg(colors.tone_color(band.tone()))));
        spans.push(Span::styled(band.legend(), Style::default().fg(colors.muted)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hints(hints: &[(&'static str, &'static str)], colors: &ThemeColors) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*key, Style::default().fg(colors.status_key_color)));
        spans.push(Span::raw(*label));
    }
    spans
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Reload failed") || msg.starts_with("Error") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&'static str, &'static str)] = match (&app.input_mode, app.session.view) {
            (InputMode::SearchInput, _) => &[("Enter", ":done"), ("Esc", ":clear")],
            (_, View::Watchlist) => &[
                ("j/k", ":nav"),
                ("Enter", ":detail"),
                ("/", ":search"),
                ("f", ":sector"),
                ("1-5", ":sort"),
                ("r", ":reload"),
                ("?", ":help"),
                ("q", ":quit"),
            ],
            (_, View::Detail) => &[("Esc", ":back"), ("r", ":reload"), ("q", ":quit")],
        };

        let summary = format_summary(app.visible().len(), app.collection.len());
        let mut spans = vec![
            Span::styled(summary, Style::default().fg(colors.muted)),
            Span::raw("  "),
        ];
        spans.extend(key_hints(hints, colors));
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

fn score_bar(score: f64, width: usize, color: Color, empty: Color) -> Vec<Span<'static>> {
    let filled = (score.clamp(0.0, 1.0) * width as f64).round() as usize;
    let rest = width.saturating_sub(filled);
    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(color)));
    }
    if rest > 0 {
        spans.push(Span::styled("░".repeat(rest), Style::default().fg(empty)));
    }
    spans
}

fn panel<'a>(title: &'a str, colors: &ThemeColors) -> Block<'a> {
    Block::bordered()
        .title(format!(" {} ", title))
        .title_style(colors.popup_title)
        .border_style(Style::default().fg(colors.panel_border))
}

fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(company), Some(detail)) = (app.detail_company(), app.detail.as_ref()) else {
        // Nothing selected; the watchlist is the only meaningful view
        let msg = Paragraph::new("No company selected")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.colors.muted));
        frame.render_widget(msg, area);
        return;
    };

    // Title(1) + Header(4) + Models(5) + Recommendation(5) + Signals(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app, &company.ticker);
    render_detail_header(frame, chunks[1], company, detail, &app.colors);
    render_model_scores(frame, chunks[2], detail, &app.colors);
    render_recommendation(frame, chunks[3], detail, &app.colors);
    render_signal_panels(frame, chunks[4], &detail.attributions, &app.colors);
    render_status_bar(frame, chunks[5], app);
}

fn render_detail_header(
    frame: &mut Frame,
    area: Rect,
    company: &Company,
    detail: &DetailData,
    colors: &ThemeColors,
) {
    let tone = colors.tone_color(detail.card.band.tone());
    let lines = vec![
        Line::from(vec![
            Span::styled(company.name.as_str(), Style::default().bold()),
            Span::raw("   "),
            Span::styled(
                format!("{} ", format_percent(detail.card.composite)),
                Style::default().fg(tone).bold(),
            ),
            Span::styled("Composite Score", Style::default().fg(colors.muted)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} • {}", company.ticker, company.sector),
                Style::default().fg(colors.muted),
            ),
            Span::raw("   "),
            Span::styled(
                format_change(company.change),
                Style::default().fg(colors.tone_color(change_tone(company.change))),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(panel(detail.card.band.label(), colors)),
        area,
    );
}

fn render_model_scores(frame: &mut Frame, area: Rect, detail: &DetailData, colors: &ThemeColors) {
    let block = panel("Model Scores", colors);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar_width = (inner.width as usize).saturating_sub(30).clamp(5, 40);
    let lines: Vec<Line> = detail
        .card
        .models
        .iter()
        .map(|m| {
            let mut spans = vec![Span::raw(format!("{:<20} ", m.model.label()))];
            spans.extend(score_bar(
                m.score,
                bar_width,
                colors.tone_color(m.band.tone()),
                colors.bar_empty,
            ));
            spans.push(Span::raw(format!(" {:>6}", format_percent(m.score))));
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_recommendation(frame: &mut Frame, area: Rect, detail: &DetailData, colors: &ThemeColors) {
    let rec = &detail.card.recommendation;
    let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let entry = Paragraph::new(vec![
        Line::from(Span::styled(rec.entry_window, Style::default().bold())),
        Line::from(Span::styled(rec.entry_rationale, Style::default().fg(colors.muted))),
    ])
    .wrap(Wrap { trim: true })
    .block(panel("Recommended Entry Window", colors));

    let confidence = Paragraph::new(vec![
        Line::from(Span::styled(rec.confidence, Style::default().bold())),
        Line::from(Span::styled(
            rec.confidence_rationale,
            Style::default().fg(colors.muted),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(panel("Confidence Level", colors));

    frame.render_widget(entry, halves[0]);
    frame.render_widget(confidence, halves[1]);
}

fn render_signal_panels(
    frame: &mut Frame,
    area: Rect,
    attributions: &[ModelAttribution],
    colors: &ThemeColors,
) {
    let columns = Layout::horizontal(
        attributions
            .iter()
            .map(|_| Constraint::Ratio(1, attributions.len().max(1) as u32)),
    )
    .split(area);

    for (attribution, column) in attributions.iter().zip(columns.iter()) {
        let block = panel(attribution.model.label(), colors);
        let inner = block.inner(*column);
        frame.render_widget(block, *column);

        let bar_width = (inner.width as usize).saturating_sub(6).min(20);
        let mut lines = Vec::new();
        for signal in &attribution.signals {
            lines.push(Line::from(signal.name.clone()));
            let mut spans = score_bar(
                signal.contribution / 100.0,
                bar_width,
                colors.title_color,
                colors.bar_empty,
            );
            spans.push(Span::styled(
                format!(" {:>3.0}", signal.contribution),
                Style::default().fg(colors.muted),
            ));
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(colors.popup_title)
        .border_style(Style::default().fg(colors.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let entries = [
        ("j / Down", "Move down"),
        ("k / Up", "Move up"),
        ("Enter", "Open company detail"),
        ("Esc / Backspace", "Back to watchlist"),
        ("/", "Edit search (name or ticker)"),
        ("f", "Cycle sector filter"),
        ("1 / c", "Sort by composite"),
        ("2 / b", "Sort by baseline"),
        ("3 / g", "Sort by GBM"),
        ("4 / l", "Sort by logistic"),
        ("5 / d", "Sort by change"),
        ("r", "Reload data"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<17}", key), key_style),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
