mod common;

use account_app::auth::hasher::check_password;
use account_app::types::{error::AppError, user::{DBUserUpdate, UserExtra, UserListQuery}};
use common::{client::TestClient, test_data::{birthday, STRONG_PASSWORD}, TestContext};

#[tokio::test]
async fn test_create_user_hashes_and_normalizes() {
    println!("\n\n[+] Running test: test_create_user_hashes_and_normalizes");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let user = client
        .create_test_user("Grace.Hopper@NAVY.MIL", UserExtra::default())
        .await
        .expect("user creation failed");
    println!("[<] Created user {}", user.id);

    assert_eq!(user.email, "Grace.Hopper@navy.mil");
    assert_ne!(user.password, STRONG_PASSWORD);
    assert!(check_password(STRONG_PASSWORD, &user.password));
    assert!(user.is_active);
    assert!(!user.is_admin);
    assert!(!user.is_staff());
    assert_eq!(user.phone_number, None);
    assert_eq!(user.to_string(), "Grace.Hopper@navy.mil");

    assert!(ctx.db.check_user_password("Grace.Hopper@NAVY.mil", STRONG_PASSWORD).await.unwrap());
    assert!(!ctx.db.check_user_password("Grace.Hopper@navy.mil", "nope").await.unwrap());
    assert!(!ctx.db.check_user_password("nobody@navy.mil", STRONG_PASSWORD).await.unwrap());
    println!("[/] Test passed.");
}

#[tokio::test]
async fn test_create_user_without_email_fails() {
    println!("\n\n[+] Running test: test_create_user_without_email_fails");
    let ctx = TestContext::new().await;

    let result = ctx.db.create_user("   ", birthday(), Some(STRONG_PASSWORD), UserExtra::default()).await;
    match result {
        Err(AppError::Validation(errors)) => {
            assert_eq!(errors.get("email").unwrap(), ["Users must have an email address".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other.map(|u| u.id)),
    }
    println!("[/] Test passed.");
}

#[tokio::test]
async fn test_create_user_without_password_is_unusable() {
    let ctx = TestContext::new().await;

    let user = ctx.db
        .create_user("nopass@example.com", birthday(), None, UserExtra::default())
        .await
        .unwrap();

    assert!(!user.has_usable_password());
    assert!(!check_password("", &user.password));
}

#[tokio::test]
async fn test_duplicate_email_already_exists() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    client.create_test_user("dup@example.com", UserExtra::default()).await.unwrap();
    // domain case differences normalize to the same identity
    let second = client.create_test_user("dup@EXAMPLE.com", UserExtra::default()).await;
    assert!(matches!(second, Err(AppError::AlreadyExists)));
}

#[tokio::test]
async fn test_create_superuser_defaults_flags() {
    println!("\n\n[+] Running test: test_create_superuser_defaults_flags");
    let ctx = TestContext::new().await;

    let root = ctx.db
        .create_superuser("root@example.com", birthday(), Some(STRONG_PASSWORD), UserExtra::default())
        .await
        .unwrap();
    assert!(root.is_admin);
    assert!(root.is_active);
    assert!(root.is_staff());
    assert!(root.has_perm("anything"));
    assert!(root.has_module_perms("account_app"));

    // explicit values win over the defaults
    let dormant = ctx.db
        .create_superuser(
            "dormant@example.com",
            birthday(),
            Some(STRONG_PASSWORD),
            UserExtra { is_active: Some(false), ..Default::default() },
        )
        .await
        .unwrap();
    assert!(dormant.is_admin);
    assert!(!dormant.is_active);
    println!("[/] Test passed.");
}

#[tokio::test]
async fn test_update_user_rejects_taken_email() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    client.create_test_user("first@example.com", UserExtra::default()).await.unwrap();
    let second = client.create_test_user("second@example.com", UserExtra::default()).await.unwrap();

    let changes = DBUserUpdate {
        email: "first@example.com".to_string(),
        date_of_birth: second.date_of_birth,
        first_name: String::new(),
        last_name: String::new(),
        nickname: String::new(),
        username: String::new(),
        phone_number: None,
        is_active: true,
        is_admin: false,
    };
    let result = ctx.db.update_user(second.id, changes.clone()).await;
    assert!(matches!(result, Err(AppError::AlreadyExists)));

    // keeping its own email is fine
    let kept = ctx.db
        .update_user(second.id, DBUserUpdate { email: "second@example.com".to_string(), ..changes })
        .await
        .unwrap();
    assert_eq!(kept.email, "second@example.com");
}

#[tokio::test]
async fn test_list_users_search_filter_order() {
    println!("\n\n[+] Running test: test_list_users_search_filter_order");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    client
        .create_test_user("zed@example.com", UserExtra { first_name: Some("Zed".into()), ..Default::default() })
        .await
        .unwrap();
    client
        .create_test_user("amy@example.com", UserExtra { last_name: Some("Pond".into()), ..Default::default() })
        .await
        .unwrap();
    ctx.db
        .create_superuser("boss@example.com", birthday(), Some(STRONG_PASSWORD), UserExtra::default())
        .await
        .unwrap();

    let all = ctx.db.list_users(&UserListQuery::default(), 100).await.unwrap();
    let emails: Vec<&str> = all.results.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, ["amy@example.com", "boss@example.com", "zed@example.com"]);
    assert_eq!(all.count, 3);

    let search = UserListQuery { q: Some("POND".into()), ..Default::default() };
    let found = ctx.db.list_users(&search, 100).await.unwrap();
    assert_eq!(found.count, 1);
    assert_eq!(found.results[0].email, "amy@example.com");

    let admins = UserListQuery { is_admin: Some(true), ..Default::default() };
    let found = ctx.db.list_users(&admins, 100).await.unwrap();
    assert_eq!(found.results.len(), 1);
    assert_eq!(found.results[0].email, "boss@example.com");

    let paged = ctx.db.list_users(&UserListQuery { p: Some(2), ..Default::default() }, 2).await.unwrap();
    assert_eq!(paged.num_pages, 2);
    assert_eq!(paged.results.len(), 1);
    assert_eq!(paged.results[0].email, "zed@example.com");

    let beyond = ctx.db.list_users(&UserListQuery { p: Some(9), ..Default::default() }, 2).await;
    assert!(matches!(beyond, Err(AppError::BadRequest(_))));
    println!("[/] Test passed.");
}

#[tokio::test]
async fn test_delete_user() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let user = client.create_test_user("gone@example.com", UserExtra::default()).await.unwrap();
    ctx.db.delete_user(user.id).await.unwrap();

    assert!(matches!(ctx.db.get_user_by_id(&user.id).await, Err(AppError::NotFound)));
    assert!(matches!(ctx.db.delete_user(user.id).await, Err(AppError::NotFound)));
}
