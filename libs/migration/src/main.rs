use migration::Migrator;
use sea_orm_migration::cli;

/// Schema CLI for the catalog database (`up`, `down`, `status`, `fresh`, ...).
/// Reads `DATABASE_URL` like the service does.
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
