//! sea-orm entity definitions for the Skillstream backend.

pub mod contents;
pub mod otp_verifications;
pub mod user_interests;
pub mod users;
pub mod watch_history;
