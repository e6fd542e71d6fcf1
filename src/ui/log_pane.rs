/// Append-only log pane
///
/// Every status line shown to the user goes through here and is mirrored to
/// the `log` facade at the matching level.
use iced::widget::{column, container, scrollable, text, Column};
use iced::{Color, Element, Length, Task};

use super::theme::Palette;
use crate::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct LogPane {
    lines: Vec<LogLine>,
}

fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("log-pane")
}

impl LogPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let text = message.into();
        match level {
            LogLevel::Info => log::info!("{}", text),
            LogLevel::Warning => log::warn!("{}", text),
            LogLevel::Error => log::error!("{}", text),
        }
        self.lines.push(LogLine { level, text });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    /// Task that scrolls the pane to its newest line
    pub fn scroll_to_end() -> Task<Message> {
        scrollable::snap_to(scroll_id(), scrollable::RelativeOffset::END)
    }

    pub fn view(&self, palette: Palette) -> Element<'_, Message> {
        let lines: Column<Message> = self
            .lines
            .iter()
            .fold(column![].spacing(2), |col, line| {
                col.push(text(line.text.as_str()).size(14).color(line_color(palette, line.level)))
            });

        container(
            scrollable(container(lines).padding(8).width(Length::Fill))
                .id(scroll_id())
                .height(Length::Fill),
        )
        .style(move |_theme| palette.terminal_style())
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn line_color(palette: Palette, level: LogLevel) -> Color {
    match level {
        LogLevel::Info => palette.terminal_fg,
        LogLevel::Warning => Color::from_rgb(0.85, 0.65, 0.1),
        LogLevel::Error => Color::from_rgb(0.85, 0.25, 0.25),
    }
}
