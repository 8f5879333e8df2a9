//! SQLite storage implementation for reminders.

mod model;
mod repository;

pub use model::{ReminderDB, NewReminderDB};
pub use repository::ReminderRepository;
pub(crate) use repository::{clear_reminders, insert_reminder_rows, load_reminders};
