pub mod code;
pub mod content;
pub mod homepage;
pub mod interest;
pub mod issue_otp;
pub mod rate_limit;
pub mod token;
pub mod user;
pub mod verify_otp;
pub mod watch_progress;
