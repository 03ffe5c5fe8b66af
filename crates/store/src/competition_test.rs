//! Tests for teams, guesses and bots

use pacsocial_auth::password::passcode_tag;
use pacsocial_auth::{TeamAuthenticator, TeamDirectory};
use std::sync::Arc;

use crate::db::Archive;
use crate::error::StoreError;
use crate::models::NewTeam;

async fn with_team(name: &str, passcode: &str) -> (Archive, i64) {
    let archive = Archive::in_memory().await.unwrap();
    let team = archive
        .teams()
        .create(&NewTeam {
            name: name.to_string(),
            passcode: passcode.to_string(),
        })
        .await
        .unwrap();
    (archive, team.id)
}

#[tokio::test]
async fn test_passcode_stored_hashed() {
    let (archive, _) = with_team("red", "s3cret").await;
    let creds = archive
        .team_credentials(&passcode_tag("s3cret").unwrap())
        .await
        .unwrap();
    assert_eq!(creds.len(), 1);
    assert_ne!(creds[0].passcode_hash, "s3cret");
    assert!(creds[0].passcode_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_credentials_filtered_by_tag() {
    let (archive, _) = with_team("red", "s3cret").await;
    archive
        .teams()
        .create(&NewTeam {
            name: "blue".to_string(),
            passcode: "hunter2".to_string(),
        })
        .await
        .unwrap();

    let tag = passcode_tag("hunter2").unwrap();
    let creds = archive.team_credentials(&tag).await.unwrap();
    assert!(creds.iter().all(|c| c.passcode_tag == tag));
    assert!(creds.iter().any(|c| c.team_id == 2));
    assert!(archive.teams().credentials("zzzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_authenticate_against_archive() {
    let (archive, team_id) = with_team("red", "s3cret").await;
    let auth = TeamAuthenticator::new(Arc::new(archive));
    assert_eq!(auth.authenticate(Some("Bearer s3cret")).await.unwrap(), team_id);
    assert!(auth.authenticate(Some("Bearer nope")).await.is_err());
}

#[tokio::test]
async fn test_duplicate_team_name() {
    let (archive, _) = with_team("red", "a").await;
    let err = archive
        .teams()
        .create(&NewTeam {
            name: "red".to_string(),
            passcode: "b".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists { .. }));
}

#[tokio::test]
async fn test_guess_round_trip_keeps_order() {
    let (archive, team_id) = with_team("red", "a").await;
    let guesses = archive.guesses();
    let first = guesses.record(team_id, 1_000, true, &[30, 10, 20]).await.unwrap();
    guesses.record(team_id, 2_000, false, &[10, 10]).await.unwrap();

    let stored = guesses.get_for_team(team_id, first.id).await.unwrap().unwrap();
    assert_eq!(stored, first);
    assert_eq!(stored.user_ids, vec![30, 10, 20]);

    let all = guesses.list_for_team(team_id).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].user_ids, vec![10, 10]);
    assert!(!all[1].beta);
}

#[tokio::test]
async fn test_other_teams_guess_invisible() {
    let (archive, red) = with_team("red", "a").await;
    let blue = archive
        .teams()
        .create(&NewTeam {
            name: "blue".to_string(),
            passcode: "b".to_string(),
        })
        .await
        .unwrap()
        .id;
    let guess = archive.guesses().record(red, 1, true, &[1]).await.unwrap();

    assert!(archive.guesses().get_for_team(blue, guess.id).await.unwrap().is_none());
    assert!(archive.guesses().list_for_team(blue).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_guess_rejected() {
    let (archive, team_id) = with_team("red", "a").await;
    let err = archive.guesses().record(team_id, 1, true, &[]).await.unwrap_err();
    assert!(matches!(err, StoreError::Invalid { .. }));
}

#[tokio::test]
async fn test_guess_rows_are_immutable() {
    let (archive, team_id) = with_team("red", "a").await;
    archive.guesses().record(team_id, 1, true, &[5]).await.unwrap();

    let update = sqlx::query("UPDATE guess_users SET user_id = 6")
        .execute(archive.pool())
        .await;
    assert!(update.is_err());
    let delete = sqlx::query("DELETE FROM guesses").execute(archive.pool()).await;
    assert!(delete.is_err());
}

#[tokio::test]
async fn test_bots() {
    let archive = Archive::in_memory().await.unwrap();
    archive.bots().add(7, None).await.unwrap();
    archive.bots().add(8, Some(100)).await.unwrap();
    archive.bots().add(7, Some(200)).await.unwrap();

    let ids = archive.bots().ids().await.unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&7) && ids.contains(&8));
}
