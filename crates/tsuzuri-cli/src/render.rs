//! Plain-text rendering of the candidate popup for terminal output.

use tsuzuri_session::{PopupModel, SelectingPopup};
use unicode_width::UnicodeWidthStr;

const CURSOR: &str = "|";

/// Content lines of the popup, without the frame.
pub fn popup_lines(model: &PopupModel) -> Vec<String> {
    match model {
        PopupModel::Composing { text, cursor } => {
            let cursor = (*cursor).min(text.len());
            let (before, after) = text.split_at(cursor);
            vec![format!("{before}{CURSOR}{after}")]
        }
        PopupModel::Selecting(popup) => selecting_lines(popup),
    }
}

fn selecting_lines(popup: &SelectingPopup) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(segments) = &popup.segments {
        let line: Vec<String> = segments
            .iter()
            .enumerate()
            .map(|(i, text)| {
                if i == popup.current_segment {
                    format!("[{text}]")
                } else {
                    text.clone()
                }
            })
            .collect();
        lines.push(line.join(" "));
    }
    for (label, selected) in popup.page.labels() {
        let marker = if selected { '>' } else { ' ' };
        lines.push(format!("{marker} {label}"));
    }
    let page = &popup.page;
    if page.total > page.candidates.len() {
        lines.push(format!(
            "  ({}-{}/{})",
            page.first + 1,
            page.first + page.candidates.len(),
            page.total
        ));
    }
    lines
}

/// Draw `lines` in a box sized by display width, so wide kana and kanji
/// line up.
pub fn frame(lines: &[String]) -> String {
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let rule = "─".repeat(width + 2);
    let mut out = format!("┌{rule}┐\n");
    for line in lines {
        let pad = " ".repeat(width - line.width());
        out.push_str(&format!("│ {line}{pad} │\n"));
    }
    out.push_str(&format!("└{rule}┘\n"));
    out
}

pub fn render_popup(model: &PopupModel) -> String {
    frame(&popup_lines(model))
}
