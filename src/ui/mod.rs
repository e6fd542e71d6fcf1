/// User interface pieces
///
/// - Color schemes and widget styles (theme.rs)
/// - The append-only log pane (log_pane.rs)
/// - Help panel and browser link (help.rs)

pub mod help;
pub mod log_pane;
pub mod theme;
