use iced::widget::{button, column, container, horizontal_space, row, text, Button, Column, Row};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::{Path, PathBuf};

mod backup;
mod state;
mod ui;

use backup::BackupError;
use state::{Settings, TrackedFiles};
use ui::log_pane::LogPane;

/// Name of the staging directory created under the working directory
const STAGING_DIR_NAME: &str = "temp_backup";

/// Main application state
struct JoyBackup {
    /// The four control files and where they live
    files: TrackedFiles,
    /// Where imported archives are extracted until a restore
    staging_dir: PathBuf,
    /// Status lines shown to the user
    log: LogPane,
    /// Persisted theme and last folder
    settings: Settings,
    /// Settings file location (None if no config directory is available)
    settings_path: Option<PathBuf>,
    /// Whether the help panel is shown
    help_visible: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Open Folder"
    OpenFolder,
    /// User clicked "Backup Controls"
    BackupControls,
    /// User clicked "Import Backup"
    ImportBackup,
    /// User clicked "Restore Backup"
    RestoreBackup,
    /// Switch between dark and light
    ToggleTheme,
    /// Show or hide the help panel
    ToggleHelp,
    /// Open the author's channel in the browser
    OpenChannel,
}

impl JoyBackup {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings_path = Settings::default_path();
        let settings = Settings::load_or_default(settings_path.as_deref());

        let app = Self::with_paths(working_dir().join(STAGING_DIR_NAME), settings, settings_path);
        log::info!("🕹️  JoyBackup initialized, staging at {}", app.staging_dir.display());

        (app, Task::none())
    }

    /// Build the application around an explicit staging directory and settings
    fn with_paths(staging_dir: PathBuf, settings: Settings, settings_path: Option<PathBuf>) -> Self {
        let mut log = LogPane::new();
        if let Err(e) = std::fs::create_dir_all(&staging_dir) {
            log.error(format!(
                "Failed to create staging directory {}: {}",
                staging_dir.display(),
                e
            ));
        }

        JoyBackup {
            files: TrackedFiles::new(),
            staging_dir,
            log,
            settings,
            settings_path,
            help_visible: false,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Control Files")
                    .set_directory(self.open_dialog_start())
                    .pick_folder();

                if let Some(folder_path) = folder {
                    self.load_folder(&folder_path);
                }
            }
            Message::BackupControls => self.backup(),
            Message::ImportBackup => {
                let zip_path = FileDialog::new()
                    .set_title("Select Backup Zip File")
                    .add_filter("Zip Files", &["zip"])
                    .add_filter("All Files", &["*"])
                    .pick_file();

                if let Some(zip_path) = zip_path {
                    self.import(&zip_path);
                }
            }
            Message::RestoreBackup => {
                if let Err(e) = backup::check_staging(&self.staging_dir) {
                    self.log.warn(format!("Restore Warning: {}", e));
                    return LogPane::scroll_to_end();
                }

                let dest = FileDialog::new()
                    .set_title("Select Destination Folder for Restore")
                    .set_directory(self.restore_dialog_start())
                    .pick_folder();
                self.restore_to(dest);
            }
            Message::ToggleTheme => {
                self.settings.theme = self.settings.theme.toggled();
                self.persist_settings();
                return Task::none();
            }
            Message::ToggleHelp => {
                self.help_visible = !self.help_visible;
                return Task::none();
            }
            Message::OpenChannel => {
                ui::help::open_in_browser(ui::help::CHANNEL_URL);
                return Task::none();
            }
        }

        LogPane::scroll_to_end()
    }

    /// Start folder for the open dialog: last folder, then the default install, then cwd
    fn open_dialog_start(&self) -> PathBuf {
        let default_dir = PathBuf::from(ui::help::DEFAULT_INPUT_DIR);
        self.settings
            .last_folder
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(|| default_dir.is_dir().then_some(default_dir))
            .unwrap_or_else(working_dir)
    }

    /// Start folder for the restore dialog: folder of the loaded files, else cwd
    fn restore_dialog_start(&self) -> PathBuf {
        self.files
            .first_directory()
            .map(Path::to_path_buf)
            .unwrap_or_else(working_dir)
    }

    fn load_folder(&mut self, folder: &Path) {
        self.log.info(format!("Working directory: {}", folder.display()));

        let report = backup::load_folder(folder, &mut self.files);
        for (kind, reason) in &report.failed {
            self.log.error(format!("Failed to open {}: {}", kind.file_name(), reason));
        }
        for kind in &report.missing {
            self.log.warn(format!(
                "Warning: {} not found in {}",
                kind.file_name(),
                folder.display()
            ));
        }
        self.log.info("Files loaded successfully!");

        self.settings.last_folder = Some(folder.to_path_buf());
        self.persist_settings();
    }

    fn backup(&mut self) {
        match backup::create_backup(&self.files) {
            Ok(zip_path) => {
                self.log
                    .info(format!("Backup created successfully: {}", zip_path.display()));
            }
            Err(e @ BackupError::NotLoaded(_)) => {
                self.log.warn(format!("Backup Warning: {}", e));
            }
            Err(e) => self.log.error(format!("Failed to create backup: {}", e)),
        }
    }

    fn import(&mut self, zip_path: &Path) {
        match backup::import_backup(zip_path, &self.staging_dir) {
            Ok(_) => self.log.info(format!(
                "Backup imported successfully from: {}",
                zip_path.display()
            )),
            Err(e @ BackupError::NotAnArchive(_)) => self.log.error(format!("Error: {}", e)),
            Err(e) => self.log.error(format!("Failed to import backup: {}", e)),
        }
    }

    /// Restore staged files into `dest`; `None` means the user canceled the dialog
    fn restore_to(&mut self, dest: Option<PathBuf>) {
        let Some(dest) = dest else {
            self.log.info("Restore canceled: No destination folder selected.");
            return;
        };

        match backup::restore_backup(&self.staging_dir, &dest, &mut self.files) {
            Ok(report) => {
                for kind in &report.discarded {
                    self.log.warn(format!(
                        "Warning: {} was not restored and has been removed from staging",
                        kind.file_name()
                    ));
                }
                if report.is_success() {
                    self.log.info("Backup files restored successfully!");
                } else if let Some(e) = &report.error {
                    self.log.error(format!("Failed to restore backup: {}", e));
                }
            }
            Err(e @ BackupError::NoStaging(_)) => self.log.warn(format!("Restore Warning: {}", e)),
            Err(e) => self.log.error(format!("Error: {}", e)),
        }
    }

    fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let palette = self.settings.theme.palette();
        let styled = move |label: &'static str, message: Message| -> Button<'static, Message> {
            button(text(label))
                .on_press(message)
                .style(move |_theme, status| palette.button_style(status))
                .padding(8)
        };

        let top_bar: Row<'_, Message> = row![
            horizontal_space(),
            styled("?", Message::ToggleHelp),
            styled("Toggle Theme", Message::ToggleTheme),
        ]
        .spacing(10);

        let action = |label: &'static str, message: Message, description: &'static str| -> Column<'static, Message> {
            column![styled(label, message), text(description).size(13)]
                .spacing(8)
                .align_x(Alignment::Center)
                .width(Length::FillPortion(1))
        };

        let controls: Row<'_, Message> = row![
            action(
                "Open Folder",
                Message::OpenFolder,
                "Start here, open your input folder.\nUsually located at:\nC:\\Program Files\\IL-2 Sturmovik Great Battles\\data\\input",
            ),
            action(
                "Backup Controls",
                Message::BackupControls,
                "Create a backup of all control files as a zip.",
            ),
            action("Import Backup", Message::ImportBackup, "Import a backup zip file."),
            action(
                "Restore Backup",
                Message::RestoreBackup,
                "Restore backup files to their original location.",
            ),
        ]
        .spacing(10);

        // Which control files are currently loaded
        let status: Row<'_, Message> =
            self.files
                .iter()
                .fold(Row::new().spacing(20), |status, (kind, file)| {
                    let label = match &file.path {
                        Some(_) => format!("✔ {} ({} bytes)", kind.file_name(), file.content.len()),
                        None => format!("✘ {}", kind.file_name()),
                    };
                    status.push(text(label).size(13))
                });
        let status = if self.files.all_loaded() {
            status.push(text("Ready to back up").size(13))
        } else {
            status
        };

        let mut content: Column<Message> = column![top_bar, controls, status]
            .spacing(15)
            .padding(10);
        if self.help_visible {
            content = content.push(ui::help::view(palette));
        }
        content = content.push(self.log.view(palette));

        container(content)
            .style(move |_theme| palette.window_style())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.settings.theme.iced_theme()
    }
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("IL-2 JoyBackup", JoyBackup::update, JoyBackup::view)
        .theme(JoyBackup::theme)
        .window_size((900.0, 600.0))
        .centered()
        .run_with(JoyBackup::new)
}
