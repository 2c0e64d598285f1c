//! Commands Layer
//!
//! Screen-level handlers over the repositories. Every handler takes the
//! shared `AppState` and returns a `Result<T, String>` whose error text is
//! ready to show the user.

mod services;
mod location_cmd;
mod board_cmd;

pub use services::{LogNotifier, NoticeKind, Notifier, Services, Session, StaticSession};
pub use location_cmd::*;
pub use board_cmd::*;
