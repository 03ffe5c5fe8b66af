//! Tests for user observations, scans and mention resolution

use pacsocial_search::ScreenNameResolver;
use pacsocial_timeline::{ScanBounds, ScanType};

use crate::db::Archive;
use crate::error::StoreError;
use crate::models::{NewScan, NewUser};

async fn seeded() -> Archive {
    let archive = Archive::in_memory().await.unwrap();
    let users = archive.users();
    // surrogate ids 1..=5
    users.insert(&NewUser::new(100, "alice", true)).await.unwrap();
    users.insert(&NewUser::new(200, "bob", false)).await.unwrap();
    users.insert(&NewUser::new(100, "alice_v2", true)).await.unwrap();
    users.insert(&NewUser::new(300, "carol", true)).await.unwrap();
    users.insert(&NewUser::new(100, "alice_v3", true)).await.unwrap();
    archive
}

fn unbounded() -> ScanBounds {
    ScanBounds::from_scan(0, 0, None, None)
}

#[tokio::test]
async fn test_list_latest_per_user() {
    let archive = seeded().await;
    let users = archive
        .users()
        .list_latest(&unbounded(), true, 0, 10)
        .await
        .unwrap();

    let ids: Vec<(i64, i64)> = users.iter().map(|u| (u.id, u.user_id)).collect();
    assert_eq!(ids, vec![(5, 100), (4, 300)]);
}

#[tokio::test]
async fn test_list_respects_scan_bounds_and_paging() {
    let archive = seeded().await;
    let bounds = ScanBounds::from_scan(0, 0, Some(1), Some(4));
    let users = archive.users().list_latest(&bounds, true, 0, 10).await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![4, 3]);

    let page = archive.users().list_latest(&bounds, true, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, 3);
}

#[tokio::test]
async fn test_nothing_bounds_hide_everyone() {
    let archive = seeded().await;
    let users = archive
        .users()
        .list_latest(&ScanBounds::nothing(), true, 0, 10)
        .await
        .unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_beta_partition() {
    let archive = seeded().await;
    let beta = archive.users().list_latest(&unbounded(), true, 0, 10).await.unwrap();
    let after = archive.users().list_latest(&unbounded(), false, 0, 10).await.unwrap();

    assert_eq!(after.len(), 1);
    assert_eq!(after[0].user_id, 200);
    assert!(beta.iter().all(|b| after.iter().all(|a| a.user_id != b.user_id)));
}

#[tokio::test]
async fn test_latest_single_user() {
    let archive = seeded().await;
    let bounds = ScanBounds::from_scan(0, 0, None, Some(3));
    let user = archive.users().latest(100, &bounds, true).await.unwrap().unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.screen_name, "alice_v2");

    assert!(archive.users().latest(100, &bounds, false).await.unwrap().is_none());
}

#[tokio::test]
async fn test_screen_name_resolution_is_gated() {
    let archive = seeded().await;
    assert_eq!(
        archive.screen_names(true).resolve_screen_name("carol").await.unwrap(),
        Some(300)
    );
    assert_eq!(
        archive.screen_names(false).resolve_screen_name("carol").await.unwrap(),
        None
    );
    assert_eq!(
        archive.screen_names(false).resolve_screen_name("bob").await.unwrap(),
        Some(200)
    );
}

#[tokio::test]
async fn test_nearest_scan() {
    let archive = Archive::in_memory().await.unwrap();
    let scans = archive.scans();
    for (start, end, lo, hi) in [(0, 100, 1, 10), (100, 200, 5, 50), (200, 300, 7, 70)] {
        scans
            .insert(&NewScan {
                scan_type: ScanType::UserInfo,
                start,
                end,
                ref_start: Some(lo),
                ref_end: Some(hi),
            })
            .await
            .unwrap();
    }
    scans
        .insert(&NewScan {
            scan_type: ScanType::Followers,
            start: 0,
            end: 150,
            ref_start: None,
            ref_end: Some(9),
        })
        .await
        .unwrap();

    let bounds = scans.bounds(ScanType::UserInfo, 250).await.unwrap();
    assert_eq!((bounds.min_id, bounds.max_id), (Some(5), Some(50)));
    assert_eq!(bounds.observed, Some((100, 200)));

    let bounds = scans.bounds(ScanType::Followers, 150).await.unwrap();
    assert_eq!((bounds.min_id, bounds.max_id), (None, Some(9)));

    // Nothing ended by then
    let bounds = scans.bounds(ScanType::UserInfo, 99).await.unwrap();
    assert!(bounds.is_nothing());
    assert_eq!((bounds.min_id, bounds.max_id), (Some(0), Some(0)));
}

#[tokio::test]
async fn test_scan_ref_order_enforced() {
    let archive = Archive::in_memory().await.unwrap();
    let err = archive
        .scans()
        .insert(&NewScan {
            scan_type: ScanType::UserInfo,
            start: 0,
            end: 1,
            ref_start: Some(10),
            ref_end: Some(5),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Invalid { .. }));
}
