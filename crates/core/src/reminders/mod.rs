//! Reminders module - bills and recurring nudges.

mod reminders_model;
mod reminders_service;

pub use reminders_model::{NewReminder, Reminder, ReminderFrequency, BILL_CATEGORY};
pub use reminders_service::{ReminderService, ReminderServiceTrait};
