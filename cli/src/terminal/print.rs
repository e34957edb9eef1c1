use std::fmt::Display;
use std::io::{self, Write};

use crate::terminal::colors;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "tunnelgate::print";
const KEY_WIDTH: usize = 9;

#[macro_export]
macro_rules! tprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Decorated output goes through the log stream so it lands on stderr.
pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// `fill` on both sides of `title`, centred within `TOTAL_WIDTH` columns.
fn titled_rule(fill: &str, title: ColoredString, title_width: usize) -> String {
    let pad: usize = TOTAL_WIDTH.saturating_sub(title_width);
    let (left, right) = (pad / 2, pad - pad / 2);
    format!(
        "{}{title}{}",
        fill.repeat(left).bright_black(),
        fill.repeat(right).bright_black()
    )
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    let title: String = format!("⟦ TUNNELGATE v{} ⟧", env!("CARGO_PKG_VERSION"));
    let width: usize = UnicodeWidthStr::width(title.as_str());
    print(&titled_rule("═", title.bright_green().bold(), width));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let width: usize = UnicodeWidthStr::width(title.as_str());
    print(&titled_rule("─", title.bright_green(), width));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}

/// `key.....: value`, keys padded so values line up in one column.
pub fn aligned_line(key: &str, value: impl Display) {
    let leader: String = format!("{}:", ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len())));
    print_status(format!(
        "{}{} {value}",
        key.color(colors::PRIMARY),
        leader.color(colors::SEPARATOR)
    ));
}

pub fn print_status(msg: impl AsRef<str>) {
    print(&format!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

/// One `├─ key...: value` row per pair, the last closed with `└─`.
pub fn key_value_tree(rows: &[(String, ColoredString)]) {
    let Some(last) = rows.len().checked_sub(1) else {
        return;
    };
    for (i, (key, value)) in rows.iter().enumerate() {
        let branch: &str = if i == last { "└─" } else { "├─" };
        let leader: String = format!("{}:", ".".repeat(7usize.saturating_sub(key.len())));
        print(&format!(
            " {} {}{} {value}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            leader.color(colors::SEPARATOR)
        ));
    }
}

/// Centres text that may carry ANSI colour codes.
pub fn centerln(msg: &str) {
    let indent: usize = TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{:indent$}{msg}", ""));
}

/// Writes the selected response verbatim. This is the only stdout output.
pub fn response_body(body: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(body)?;
    stdout.flush()
}
