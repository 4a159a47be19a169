//! Postgres store tests.
//!
//! These run against a live database when `GATEKEEP_TEST_DSN` is set and are
//! skipped otherwise.

use anyhow::{bail, Result};
use gatekeep::api::{InsertOutcome, NewUser, PgUserStore, UserStore};
use std::env;
use uuid::Uuid;

async fn store() -> Result<Option<PgUserStore>> {
    let Ok(dsn) = env::var("GATEKEEP_TEST_DSN") else {
        eprintln!("Skipping integration test: GATEKEEP_TEST_DSN is not set");
        return Ok(None);
    };
    let store = PgUserStore::connect(&dsn).await?;
    store.ensure_schema().await?;
    Ok(Some(store))
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholderpl".to_string(),
    }
}

#[tokio::test]
async fn insert_then_lookup() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };
    store.ping().await?;

    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user_{suffix}");
    let email = format!("{suffix}@gatekeep.test");

    let InsertOutcome::Created(user) = store.insert(new_user(&username, &email)).await? else {
        bail!("first insert must succeed");
    };
    assert_eq!(user.username, username);
    assert_eq!(user.email, email);

    let found = store.find_by_username(&username).await?;
    assert_eq!(found.map(|found| found.id), Some(user.id));

    let found = store
        .find_by_username_or_email("nobody", &email)
        .await?;
    assert_eq!(found.map(|found| found.id), Some(user.id));

    assert!(store.find_by_username(&format!("missing_{suffix}")).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_insert_is_a_conflict() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };

    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("dup_{suffix}");
    let email = format!("dup_{suffix}@gatekeep.test");

    assert!(matches!(
        store.insert(new_user(&username, &email)).await?,
        InsertOutcome::Created(_)
    ));
    assert!(matches!(
        store
            .insert(new_user(&username, &format!("other_{suffix}@gatekeep.test")))
            .await?,
        InsertOutcome::Conflict
    ));
    assert!(matches!(
        store
            .insert(new_user(&format!("other_{suffix}"), &email))
            .await?,
        InsertOutcome::Conflict
    ));

    Ok(())
}

#[tokio::test]
async fn username_match_wins_over_email_match() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };

    let suffix = Uuid::new_v4().simple().to_string();
    let by_email = new_user(&format!("a_{suffix}"), &format!("shared_{suffix}@gatekeep.test"));
    let by_name = new_user(&format!("b_{suffix}"), &format!("b_{suffix}@gatekeep.test"));

    let InsertOutcome::Created(_) = store.insert(by_email.clone()).await? else {
        bail!("insert must succeed");
    };
    let InsertOutcome::Created(named) = store.insert(by_name.clone()).await? else {
        bail!("insert must succeed");
    };

    let found = store
        .find_by_username_or_email(&by_name.username, &by_email.email)
        .await?;
    assert_eq!(found.map(|found| found.id), Some(named.id));

    Ok(())
}
