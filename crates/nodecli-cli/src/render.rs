use anstyle::{AnsiColor, Effects, Style};

use crate::ColorChoice;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn resolve_output_style(choice: ColorChoice, is_terminal: bool) -> OutputStyle {
    match choice {
        ColorChoice::Always => OutputStyle::Rich,
        ColorChoice::Never => OutputStyle::Plain,
        ColorChoice::Auto if is_terminal => OutputStyle::Rich,
        ColorChoice::Auto => OutputStyle::Plain,
    }
}

pub(crate) fn render_error_line(style: OutputStyle, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("error: {message}"),
        OutputStyle::Rich => format!("{} {message}", colorize(error_style(), "error:")),
    }
}

pub(crate) fn render_warning_line(style: OutputStyle, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("warning: {message}"),
        OutputStyle::Rich => format!("{} {message}", colorize(warning_style(), "warning:")),
    }
}

fn error_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightRed.into()))
        .effects(Effects::BOLD)
}

fn warning_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightYellow.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
