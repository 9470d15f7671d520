// Re-export the public API
mod app;
mod message;
mod session;
mod theme;
mod ui;
mod view;

pub use app::run;

// The public modules and types users need
pub use message::{Author, Message};
pub use session::{Action, ChatSession};
pub use theme::ThemeMode;
pub use ui::render_to_lines;
pub use view::compose;
