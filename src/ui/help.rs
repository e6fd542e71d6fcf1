// Help panel: usage text plus a link to the author's channel.

use iced::widget::{button, column, container, text, Column};
use iced::{Element, Length};

use super::theme::Palette;
use crate::Message;

pub const CHANNEL_URL: &str = "https://youtube.com/@stableace6661";

/// Suggested input folder of a default IL-2 Great Battles install
pub const DEFAULT_INPUT_DIR: &str = r"C:\Program Files\IL-2 Sturmovik Great Battles\data\input";

const HELP_TEXT: &str = "\
IL-2 JoyBackup
--------------
This program helps you manage control files for IL-2 Sturmovik Great Battles.

Features:
1. Open Folder: Load control files from a folder.
2. Backup Controls: Create a backup of all control files as a zip.
3. Import Backup: Import a backup zip file.
4. Restore Backup: Restore backup files to their original location.

How to Use:
- Open Folder: Select the folder containing your control files.
- Backup Controls: Create a backup of all control files.
- Import Backup: Import a previously created backup.
- Restore Backup: Restore files from the imported backup.

Created by: LLv24_StableAce
YouTube: https://youtube.com/@stableace6661";

pub fn view(palette: Palette) -> Element<'static, Message> {
    let content: Column<'static, Message> = column![
        text(HELP_TEXT).size(14),
        button("Check my YouTube")
            .on_press(Message::OpenChannel)
            .style(move |_theme, status| palette.button_style(status))
            .padding(8),
        button("Close")
            .on_press(Message::ToggleHelp)
            .style(move |_theme, status| palette.button_style(status))
            .padding(8),
    ]
    .spacing(10)
    .padding(10);

    container(content)
        .style(move |_theme| palette.popup_style())
        .width(Length::Shrink)
        .into()
}

/// Open URL in the system default browser
pub fn open_in_browser(url: &str) {
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("explorer").arg(url).spawn();
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(url).spawn();
    #[cfg(all(unix, not(target_os = "macos")))]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();

    if let Err(e) = result {
        log::error!("Failed to open browser for {}: {}", url, e);
    }
}
