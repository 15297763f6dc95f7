pub mod auth;
pub mod content;
pub mod health;
pub mod homepage;
pub mod interest;
pub mod watch_progress;
