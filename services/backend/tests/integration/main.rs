mod helpers;
mod issue_otp_test;
mod token_test;
mod verify_otp_test;
