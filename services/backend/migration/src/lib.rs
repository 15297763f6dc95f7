use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_otp_verifications;
mod m20260801_000003_create_contents;
mod m20260801_000004_create_user_interests;
mod m20260801_000005_create_watch_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_otp_verifications::Migration),
            Box::new(m20260801_000003_create_contents::Migration),
            Box::new(m20260801_000004_create_user_interests::Migration),
            Box::new(m20260801_000005_create_watch_history::Migration),
        ]
    }
}
