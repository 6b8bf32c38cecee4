use owo_colors::{AnsiColors, OwoColorize};
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::entity::Company;
use crate::query::{SortField, SortSpec};
use crate::scoring::{classify_band, Band, ScoreCard, Tone};
use crate::signals::ModelAttribution;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn tone_color(tone: Tone) -> AnsiColors {
    match tone {
        Tone::Danger => AnsiColors::Red,
        Tone::Warning => AnsiColors::Yellow,
        Tone::Safe => AnsiColors::Green,
    }
}

fn paint(text: &str, tone: Tone, use_colors: bool) -> String {
    if use_colors {
        text.color(tone_color(tone)).to_string()
    } else {
        text.to_string()
    }
}

/// Score in [0, 1] as a percentage with one decimal: 0.8123 -> "81.2%"
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Period change with a direction marker: 0.032 -> "▲ 3.2%", -0.01 -> "▼ 1.0%"
pub fn format_change(change: f64) -> String {
    let arrow = if change > 0.0 { "▲" } else { "▼" };
    format!("{} {:.1}%", arrow, (change * 100.0).abs())
}

/// A rising change is a rising risk, so it takes the danger tone.
pub fn change_tone(change: f64) -> Tone {
    if change > 0.0 {
        Tone::Danger
    } else {
        Tone::Safe
    }
}

/// Truncate to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Text bar of `width` cells filled in proportion to a [0, 1] score
pub fn score_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 1.0)) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width.saturating_sub(filled)))
}

fn header_label(field: SortField, sort: &SortSpec) -> String {
    if field == sort.field {
        format!("{} {}", field.header(), sort.direction.arrow())
    } else {
        field.header().to_string()
    }
}

const RANK_WIDTH: usize = 3;
const TICKER_WIDTH: usize = 8;
const SECTOR_WIDTH: usize = 12;
const NUMBER_WIDTH: usize = 11;
const MIN_NAME_WIDTH: usize = 12;
const MAX_NAME_WIDTH: usize = 28;

/// Format a query view as an aligned table with a header row.
/// The active sort column header carries ↑ or ↓.
pub fn format_view_table(view: &[&Company], sort: &SortSpec, use_colors: bool) -> String {
    if view.is_empty() {
        return "No companies match the current filters.".to_string();
    }

    let fixed_width = RANK_WIDTH + 1 + TICKER_WIDTH + 1 + SECTOR_WIDTH + 1 + NUMBER_WIDTH * 5 + 5;
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + MIN_NAME_WIDTH => {
            (width - fixed_width).min(MAX_NAME_WIDTH)
        }
        Some(_) => MIN_NAME_WIDTH,
        None => MAX_NAME_WIDTH,
    };

    let numeric_headers: Vec<String> = SortField::ALL
        .iter()
        .map(|&f| format!("{:>width$}", header_label(f, sort), width = NUMBER_WIDTH))
        .collect();
    let header = format!(
        "{:>rw$} {:<nw$} {:<tw$} {:<sw$} {}",
        "#",
        "Company",
        "Ticker",
        "Sector",
        numeric_headers.join(""),
        rw = RANK_WIDTH,
        nw = name_width,
        tw = TICKER_WIDTH,
        sw = SECTOR_WIDTH,
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let rows = view.iter().enumerate().map(|(idx, company)| {
        let band = classify_band(company.composite());
        let composite = paint(
            &format!("{:>width$}", format_percent(company.composite()), width = NUMBER_WIDTH),
            band.tone(),
            use_colors,
        );
        let change = paint(
            &format!("{:>width$}", format_change(company.change), width = NUMBER_WIDTH),
            change_tone(company.change),
            use_colors,
        );
        let scores = company.scores();
        format!(
            "{:>rw$} {:<nw$} {:<tw$} {:<sw$} {}{:>w$}{:>w$}{:>w$}{}",
            format!("{}.", idx + 1),
            truncate_name(&company.name, name_width),
            company.ticker,
            truncate_name(&company.sector, SECTOR_WIDTH),
            composite,
            format_percent(scores.baseline()),
            format_percent(scores.gbm()),
            format_percent(scores.logistic()),
            change,
            rw = RANK_WIDTH,
            nw = name_width,
            tw = TICKER_WIDTH,
            sw = SECTOR_WIDTH,
            w = NUMBER_WIDTH,
        )
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a view as tab-separated values for scripting.
/// Columns: rank, ticker, name, sector, composite, baseline, gbm, logistic, change
/// (no headers, no colors, raw scores)
pub fn format_tsv(view: &[&Company]) -> String {
    view.iter()
        .enumerate()
        .map(|(idx, c)| {
            format!(
                "{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
                idx + 1,
                c.ticker,
                c.name,
                c.sector,
                c.composite(),
                c.scores().baseline(),
                c.scores().gbm(),
                c.scores().logistic(),
                c.change
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_summary(shown: usize, total: usize) -> String {
    format!("Showing {} of {} companies", shown, total)
}

pub fn format_legend(use_colors: bool) -> String {
    Band::ALL
        .iter()
        .map(|band| format!("{} {}", paint("●", band.tone(), use_colors), band.legend()))
        .collect::<Vec<_>>()
        .join("   ")
}

/// Detail view: composite, per-model bars, recommendation, and top signals.
pub fn format_detail(
    company: &Company,
    card: &ScoreCard,
    attributions: &[ModelAttribution],
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    let title = if use_colors {
        company.name.bold().to_string()
    } else {
        company.name.clone()
    };
    lines.push(title);
    lines.push(format!("  {} • {}", company.ticker, company.sector));
    lines.push(format!(
        "  Composite Score: {} ({})",
        paint(&format_percent(card.composite), card.band.tone(), use_colors),
        card.band.label()
    ));
    lines.push(format!(
        "  Change: {}",
        paint(&format_change(company.change), change_tone(company.change), use_colors)
    ));

    lines.push(String::new());
    lines.push("Model Scores".to_string());
    for contribution in &card.models {
        lines.push(format!(
            "  {:<20} {} {:>6}",
            contribution.model.label(),
            paint(&score_bar(contribution.score, 20), contribution.band.tone(), use_colors),
            format_percent(contribution.score)
        ));
    }

    let rec = &card.recommendation;
    lines.push(String::new());
    lines.push(format!("Recommended Entry Window: {}", rec.entry_window));
    lines.push(format!("  {}", rec.entry_rationale));
    lines.push(format!("Confidence Level: {}", rec.confidence));
    lines.push(format!("  {}", rec.confidence_rationale));

    for attribution in attributions {
        lines.push(String::new());
        lines.push(format!("{} - Top Contributing Signals", attribution.model.label()));
        for signal in &attribution.signals {
            // Contributions are unbounded; the bar saturates at 100
            lines.push(format!(
                "  {:<22} {} {:>4.0}",
                truncate_name(&signal.name, 22),
                score_bar(signal.contribution / 100.0, 20),
                signal.contribution
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Model, ModelScores};
    use crate::query::{query, QueryParams, SortDirection};
    use crate::scoring::score_card;
    use crate::signals::SignalAttribution;

    fn company(id: u32, name: &str, ticker: &str, scores: (f64, f64, f64), change: f64) -> Company {
        let scores = ModelScores::new(id, scores.0, scores.1, scores.2).unwrap();
        Company::new(id, ticker, name, "Healthcare", scores, change).unwrap()
    }

    fn sample() -> Vec<Company> {
        vec![
            company(1, "Summit Biotech", "SB112", (0.9, 0.8, 0.85), 0.032),
            company(2, "Prism Healthcare", "PH108", (0.5, 0.55, 0.6), -0.01),
        ]
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.8123), "81.2%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(0.032), "▲ 3.2%");
        assert_eq!(format_change(-0.01), "▼ 1.0%");
        assert_eq!(format_change(0.0), "▼ 0.0%");
    }

    #[test]
    fn test_change_tone() {
        assert_eq!(change_tone(0.05), Tone::Danger);
        assert_eq!(change_tone(-0.05), Tone::Safe);
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0.5, 4), "██░░");
        assert_eq!(score_bar(0.0, 3), "░░░");
        assert_eq!(score_bar(1.7, 3), "███");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("Vortex Communications", 10), "Vortex ...");
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_table_empty() {
        let result = format_view_table(&[], &SortSpec::default(), false);
        assert_eq!(result, "No companies match the current filters.");
    }

    #[test]
    fn test_table_rows_and_header() {
        let companies = sample();
        let view = query(&companies, &QueryParams::default());
        let result = format_view_table(&view, &SortSpec::default(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Composite ↓"));
        assert!(lines[1].contains("1."));
        assert!(lines[1].contains("Summit Biotech"));
        assert!(lines[1].contains("85.0%"));
        assert!(lines[1].contains("▲ 3.2%"));
        assert!(lines[2].contains("Prism Healthcare"));
    }

    #[test]
    fn test_table_arrow_follows_sort() {
        let companies = sample();
        let view = query(&companies, &QueryParams::default());
        let sort = SortSpec {
            field: SortField::Gbm,
            direction: SortDirection::Ascending,
        };
        let result = format_view_table(&view, &sort, false);
        assert!(result.lines().next().unwrap().contains("GBM ↑"));
        assert!(!result.contains("Composite ↓"));
    }

    #[test]
    fn test_tsv() {
        let companies = sample();
        let view = query(&companies, &QueryParams::default());
        let result = format_tsv(&view);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 9);
        assert!(lines[0].starts_with("1\tSB112\tSummit Biotech\tHealthcare\t0.8500"));
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_summary_and_legend() {
        assert_eq!(format_summary(3, 50), "Showing 3 of 50 companies");
        let legend = format_legend(false);
        assert!(legend.contains("High Score (75%+)"));
        assert!(legend.contains("Low Score (<60%)"));
    }

    #[test]
    fn test_detail() {
        let companies = sample();
        let card = score_card(&companies[0]);
        let attributions = vec![ModelAttribution {
            model: Model::Gbm,
            signals: vec![SignalAttribution {
                name: "Momentum Signal".to_string(),
                contribution: 87.4,
            }],
        }];
        let result = format_detail(&companies[0], &card, &attributions, false);
        assert!(result.contains("SB112 • Healthcare"));
        assert!(result.contains("Composite Score: 85.0% (High)"));
        assert!(result.contains("Recommended Entry Window: Now – 3 months"));
        assert!(result.contains("Confidence Level: High (85–95%)"));
        assert!(result.contains("LightGBM - Top Contributing Signals"));
        assert!(result.contains("Momentum Signal"));
        assert!(result.contains("  87"));
    }
}
