//! Shared setup for integration tests: in-memory database plus a live
//! event channel.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use tokio::sync::mpsc;

use almacen_api::db::{establish_connection_with_config, run_migrations, DbConfig, DbPool};
use almacen_api::entities::{product, role, supplier, user, user_role};
use almacen_api::events::{process_events, EventSender};

/// Fresh in-memory database with the schema applied and an event
/// channel drained by a background task.
///
/// A single connection keeps every query on the same in-memory
/// database.
pub async fn setup() -> (Arc<DbPool>, Arc<EventSender>) {
    let config = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout: Duration::from_secs(5),
        idle_timeout: Duration::from_secs(60),
        acquire_timeout: Duration::from_secs(5),
    };

    let pool = establish_connection_with_config(&config)
        .await
        .expect("in-memory database");
    run_migrations(&pool).await.expect("migrations");

    let (tx, rx) = mpsc::channel(100);
    tokio::spawn(process_events(rx));

    (Arc::new(pool), Arc::new(EventSender::new(tx)))
}

pub async fn seed_product(
    db: &DbPool,
    code: &str,
    name: &str,
    quantity: i32,
    min_stock: i32,
) -> product::Model {
    product::ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        description: Set(None),
        quantity: Set(quantity),
        unit: Set(Some("unidad".to_string())),
        min_stock: Set(min_stock),
        category: Set(Some("Abarrotes".to_string())),
        unit_price: Set(Decimal::new(250, 2)),
        expires_at: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed product")
}

pub async fn seed_supplier(db: &DbPool, ruc: &str, name: &str) -> supplier::Model {
    supplier::ActiveModel {
        ruc: Set(ruc.to_string()),
        name: Set(name.to_string()),
        address: Set(None),
        phone: Set(None),
        email: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed supplier")
}

pub async fn seed_user(db: &DbPool, username: &str) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set("$argon2id$unused".to_string()),
        first_name: Set("Test".to_string()),
        last_name: Set("User".to_string()),
        email: Set(None),
        enabled: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed user")
}

pub async fn seed_role(db: &DbPool, name: &str) -> role::Model {
    role::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed role")
}

pub async fn grant_role(db: &DbPool, user_id: i64, role_id: i64) {
    user_role::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(role_id),
    }
    .insert(db)
    .await
    .expect("grant role");
}
