mod pane;
mod session;
mod window;

pub use pane::{Pane, ShellLine, ShellLineKind};
pub use session::Session;
pub use window::Window;
