mod common;

use assert_matches::assert_matches;

use almacen_api::errors::ServiceError;
use almacen_api::services::{NewUser, UserService, UserUpdate};

fn new_user(username: &str, roles: Vec<String>) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "correcthorse1".to_string(),
        first_name: "Rosa".to_string(),
        last_name: "Mendoza".to_string(),
        email: None,
        roles,
    }
}

#[tokio::test]
async fn create_assigns_roles_and_hashes_the_password() {
    let (pool, events) = common::setup().await;
    common::seed_role(&pool, "almacenero").await;

    let service = UserService::new(pool, events);
    let user = service
        .create(new_user("rmendoza", vec!["almacenero".to_string()]))
        .await
        .unwrap();

    assert!(user.enabled);
    assert_ne!(user.password_hash, "correcthorse1");
    assert!(user.password_hash.starts_with("$argon2"));
    assert_eq!(
        service.roles_of(user.id).await.unwrap(),
        vec!["almacenero".to_string()]
    );
}

#[tokio::test]
async fn duplicate_usernames_and_unknown_roles_are_rejected() {
    let (pool, events) = common::setup().await;
    common::seed_role(&pool, "almacenero").await;

    let service = UserService::new(pool, events);
    service
        .create(new_user("rmendoza", vec!["almacenero".to_string()]))
        .await
        .unwrap();

    assert_matches!(
        service.create(new_user("rmendoza", vec![])).await,
        Err(ServiceError::Conflict(_))
    );
    assert_matches!(
        service
            .create(new_user("otro", vec!["sysadmin".to_string()]))
            .await,
        Err(ServiceError::ValidationError(_))
    );
}

#[tokio::test]
async fn authenticate_checks_credentials_and_enabled_flag() {
    let (pool, events) = common::setup().await;
    common::seed_role(&pool, "almacenero").await;

    let service = UserService::new(pool, events);
    let user = service
        .create(new_user("rmendoza", vec!["almacenero".to_string()]))
        .await
        .unwrap();

    let caller = service
        .authenticate("rmendoza", "correcthorse1")
        .await
        .unwrap();
    assert_eq!(caller.user_id, user.id);
    assert!(caller.has_role("almacenero"));
    assert!(!caller.is_admin());

    assert_matches!(
        service.authenticate("rmendoza", "wrong").await,
        Err(ServiceError::Forbidden(_))
    );
    assert_matches!(
        service.authenticate("ghost", "correcthorse1").await,
        Err(ServiceError::Forbidden(_))
    );

    service.set_enabled(user.id, false).await.unwrap();
    assert_matches!(
        service.authenticate("rmendoza", "correcthorse1").await,
        Err(ServiceError::Forbidden(_))
    );
}

#[tokio::test]
async fn update_rehashes_only_when_a_password_is_given() {
    let (pool, events) = common::setup().await;

    let service = UserService::new(pool, events);
    let user = service.create(new_user("rmendoza", vec![])).await.unwrap();
    let original_hash = user.password_hash.clone();

    let updated = service
        .update(
            user.id,
            UserUpdate {
                first_name: "Rosa María".to_string(),
                last_name: "Mendoza".to_string(),
                email: Some("rmendoza@beneficencia.gob.pe".to_string()),
                password: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.password_hash, original_hash);
    assert_eq!(updated.first_name, "Rosa María");

    let rehashed = service
        .update(
            user.id,
            UserUpdate {
                first_name: "Rosa María".to_string(),
                last_name: "Mendoza".to_string(),
                email: None,
                password: Some("battery-staple2".to_string()),
            },
        )
        .await
        .unwrap();
    assert_ne!(rehashed.password_hash, original_hash);

    service
        .authenticate("rmendoza", "battery-staple2")
        .await
        .unwrap();
}

#[tokio::test]
async fn set_roles_replaces_the_whole_set() {
    let (pool, events) = common::setup().await;
    common::seed_role(&pool, "almacenero").await;
    common::seed_role(&pool, "admin").await;

    let service = UserService::new(pool, events);
    let user = service
        .create(new_user("rmendoza", vec!["almacenero".to_string()]))
        .await
        .unwrap();

    service
        .set_roles(user.id, vec!["admin".to_string()])
        .await
        .unwrap();
    assert_eq!(
        service.roles_of(user.id).await.unwrap(),
        vec!["admin".to_string()]
    );
}

#[tokio::test]
async fn delete_removes_user_and_role_links() {
    let (pool, events) = common::setup().await;
    common::seed_role(&pool, "almacenero").await;

    let service = UserService::new(pool, events);
    let user = service
        .create(new_user("rmendoza", vec!["almacenero".to_string()]))
        .await
        .unwrap();

    service.delete(user.id).await.unwrap();
    assert_matches!(service.get(user.id).await, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn ensure_role_is_idempotent() {
    let (pool, events) = common::setup().await;

    let service = UserService::new(pool, events);
    let first = service.ensure_role("admin", Some("full access")).await.unwrap();
    let second = service.ensure_role("admin", None).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn weak_passwords_are_rejected() {
    let (pool, events) = common::setup().await;

    let service = UserService::new(pool, events);
    let mut input = new_user("rmendoza", vec![]);
    input.password = "short".to_string();
    assert_matches!(
        service.create(input).await,
        Err(ServiceError::ValidationError(_))
    );
}
