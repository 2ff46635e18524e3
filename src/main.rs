//! Bootstrap binary: loads configuration, runs migrations and seeds the
//! built-in roles and the initial admin account when missing.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;

use almacen_api::auth::ROLES;
use almacen_api::events::{process_events, EventSender};
use almacen_api::services::users::NewUser;
use almacen_api::services::UserService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = almacen_api::load_config().context("loading configuration")?;
    almacen_api::init_tracing(cfg.log_level(), cfg.log_json);

    info!(environment = %cfg.environment, "starting almacen-api");

    let pool = Arc::new(almacen_api::create_db_pool().await?);
    almacen_api::run_migrations(&pool)
        .await
        .context("running migrations")?;

    let (tx, rx) = mpsc::channel(100);
    let event_sender = Arc::new(EventSender::new(tx));
    let events = tokio::spawn(process_events(rx));

    seed(&pool, &event_sender).await.context("seeding")?;

    drop(event_sender);
    events.await.context("event loop")?;

    info!("bootstrap complete");
    Ok(())
}

/// Create the built-in roles and, when no account exists yet, an
/// initial admin with a password that must be rotated on first use.
async fn seed(
    pool: &Arc<almacen_api::DbPool>,
    event_sender: &Arc<EventSender>,
) -> anyhow::Result<()> {
    let users = UserService::new(pool.clone(), event_sender.clone());

    for role in ROLES.keys() {
        users.ensure_role(role, None).await?;
    }

    if users.list().await?.is_empty() {
        let password = std::env::var("APP__ADMIN_PASSWORD")
            .context("APP__ADMIN_PASSWORD must be set to seed the initial admin")?;
        users
            .create(NewUser {
                username: "admin".into(),
                password,
                first_name: "Administrador".into(),
                last_name: "Sistema".into(),
                email: None,
                roles: vec!["admin".into()],
            })
            .await?;
        info!("initial admin account created");
    }

    Ok(())
}
