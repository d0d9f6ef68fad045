//! Startup banner: figlet title over a framed card listing the pipelines.

use crossterm::QueueableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "COPILOT";
const TITLE_COLOR: Color = Color::Rgb {
    r: 0xff,
    g: 0xb0,
    b: 0x00,
};
const FRAME_COLOR: Color = Color::DarkGrey;

const PIPELINES: [&str; 5] = [
    "Roadmap and task guidance",
    "Legal compliance checklist",
    "SWOT and competitor scan",
    "Failure-risk prediction",
    "Mentor chat",
];

/// Figlet art for `text` in the standard font; plain text if the font cannot render.
fn render(text: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(text).map(|figure| figure.to_string()))
        .unwrap_or_else(|| text.to_string())
}

/// Box around `rows`, padded to the widest row.
fn card(rows: &[String]) -> Vec<String> {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let rule = "─".repeat(width + 2);
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("┌{}┐", rule));
    for row in rows {
        let pad = width - row.chars().count();
        lines.push(format!("│ {}{} │", row, " ".repeat(pad)));
    }
    lines.push(format!("└{}┘", rule));
    lines
}

fn card_rows() -> Vec<String> {
    let mut rows = vec![format!("startup-copilot v{}", env!("CARGO_PKG_VERSION"))];
    rows.push(String::new());
    rows.extend(PIPELINES.iter().enumerate().map(|(i, p)| format!("{}. {}", i + 1, p)));
    rows
}

pub fn print_welcome() {
    let mut out = stdout();
    let _ = out.queue(SetForegroundColor(TITLE_COLOR));
    let _ = out.queue(SetAttribute(Attribute::Bold));
    for line in render(TITLE).lines().filter(|l| !l.trim().is_empty()) {
        let _ = out.queue(Print(format!("{}\r\n", line)));
    }
    let _ = out.queue(SetAttribute(Attribute::Reset));
    let _ = out.queue(SetForegroundColor(FRAME_COLOR));
    for line in card(&card_rows()) {
        let _ = out.queue(Print(format!("{}\r\n", line)));
    }
    let _ = out.queue(ResetColor);
    let _ = out.flush();
}
