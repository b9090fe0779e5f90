//! Rating ledger invariants: the one-row-per-(user, store) guarantee,
//! range validation, and derived aggregates.

#![allow(clippy::unwrap_used)]

mod common;

use std::time::Duration;

use rateboard_core::{Role, StoreId};
use rateboard_server::db::ratings::RatingRepository;
use rateboard_server::error::AppError;
use rateboard_server::services::RatingService;

use common::{identity_of, seed_store, seed_user, test_pool};

#[tokio::test]
async fn submit_then_overwrite_keeps_single_row() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let store = seed_store(&pool, "Corner Shop", owner.id).await;
    let rater = seed_user(&pool, "Nina Normal", "nina@example.com", Role::Normal).await;
    let caller = identity_of(&rater);

    let service = RatingService::new(&pool);

    let first = service.submit(&caller, store.id, 4).await.unwrap();
    assert!(first.created);
    assert_eq!(first.rating.value.get(), 4);

    tokio::time::sleep(Duration::from_millis(5)).await;

    let second = service.submit(&caller, store.id, 2).await.unwrap();
    assert!(!second.created);
    assert_eq!(second.rating.value.get(), 2);

    // created_at is immutable, updated_at strictly increases
    assert_eq!(second.rating.created_at, first.rating.created_at);
    assert!(second.rating.updated_at > first.rating.updated_at);

    // exactly one row for the pair
    assert_eq!(RatingRepository::new(&pool).count().await.unwrap(), 1);
}

#[tokio::test]
async fn resubmitting_same_value_is_a_genuine_write() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let store = seed_store(&pool, "Corner Shop", owner.id).await;
    let rater = seed_user(&pool, "Nina Normal", "nina@example.com", Role::Normal).await;
    let caller = identity_of(&rater);

    let service = RatingService::new(&pool);
    let first = service.submit(&caller, store.id, 3).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let second = service.submit(&caller, store.id, 3).await.unwrap();
    assert!(!second.created);
    assert!(second.rating.updated_at > first.rating.updated_at);
}

#[tokio::test]
async fn out_of_range_values_never_mutate_state() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let store = seed_store(&pool, "Corner Shop", owner.id).await;
    let rater = seed_user(&pool, "Nina Normal", "nina@example.com", Role::Normal).await;
    let caller = identity_of(&rater);

    let service = RatingService::new(&pool);

    for bad in [0, 6, -1, 100] {
        let err = service.submit(&caller, store.id, bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "value {bad}");
    }

    assert_eq!(RatingRepository::new(&pool).count().await.unwrap(), 0);
}

#[tokio::test]
async fn rating_a_missing_store_is_not_found() {
    let pool = test_pool().await;
    let rater = seed_user(&pool, "Nina Normal", "nina@example.com", Role::Normal).await;
    let caller = identity_of(&rater);

    let err = RatingService::new(&pool)
        .submit(&caller, StoreId::new(999), 4)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn store_aggregate_reflects_ratings_immediately() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let store = seed_store(&pool, "Corner Shop", owner.id).await;
    let a = seed_user(&pool, "A", "a@example.com", Role::Normal).await;
    let b = seed_user(&pool, "B", "b@example.com", Role::Normal).await;

    let service = RatingService::new(&pool);

    // zero ratings: average is 0.0, not null
    let empty = service.store_aggregate(store.id).await.unwrap();
    assert!((empty.avg_rating - 0.0).abs() < f64::EPSILON);
    assert_eq!(empty.rating_count, 0);

    service.submit(&identity_of(&a), store.id, 4).await.unwrap();
    service.submit(&identity_of(&b), store.id, 5).await.unwrap();

    let aggregate = service.store_aggregate(store.id).await.unwrap();
    assert!((aggregate.avg_rating - 4.5).abs() < f64::EPSILON);
    assert_eq!(aggregate.rating_count, 2);
}

#[tokio::test]
async fn owner_aggregate_spans_owned_stores() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let shop = seed_store(&pool, "Corner Shop", owner.id).await;
    let cafe = seed_store(&pool, "Side Cafe", owner.id).await;
    let rater = seed_user(&pool, "Nina Normal", "nina@example.com", Role::Normal).await;
    let caller = identity_of(&rater);

    let service = RatingService::new(&pool);
    service.submit(&caller, shop.id, 2).await.unwrap();
    service.submit(&caller, cafe.id, 4).await.unwrap();

    let aggregate = service
        .owner_aggregate(&identity_of(&owner), owner.id)
        .await
        .unwrap();
    assert!((aggregate.avg_rating - 3.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn owner_aggregate_is_zero_without_ratings() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    seed_store(&pool, "Corner Shop", owner.id).await;

    let aggregate = RatingService::new(&pool)
        .owner_aggregate(&identity_of(&owner), owner.id)
        .await
        .unwrap();
    assert!((aggregate.avg_rating - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn owner_aggregate_is_gated_to_admin_or_self() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let other = seed_user(&pool, "Oscar Owner", "oscar@example.com", Role::Owner).await;
    let admin = seed_user(&pool, "Ada Admin", "ada@example.com", Role::Admin).await;

    let service = RatingService::new(&pool);

    assert!(service
        .owner_aggregate(&identity_of(&admin), owner.id)
        .await
        .is_ok());
    assert!(service
        .owner_aggregate(&identity_of(&owner), owner.id)
        .await
        .is_ok());

    let err = service
        .owner_aggregate(&identity_of(&other), owner.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn concurrent_submissions_produce_one_row() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let store = seed_store(&pool, "Corner Shop", owner.id).await;
    let rater = seed_user(&pool, "Nina Normal", "nina@example.com", Role::Normal).await;
    let caller = identity_of(&rater);
    let store_id = store.id;

    let pool_a = pool.clone();
    let pool_b = pool.clone();
    let a = tokio::spawn(async move {
        RatingService::new(&pool_a).submit(&caller, store_id, 2).await
    });
    let b = tokio::spawn(async move {
        RatingService::new(&pool_b).submit(&caller, store_id, 5).await
    });

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // no duplicate rows, and the final value is one of the two writes
    assert_eq!(RatingRepository::new(&pool).count().await.unwrap(), 1);
    let (avg, count) = RatingRepository::new(&pool)
        .store_aggregate(store_id)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert!(avg == 2.0 || avg == 5.0, "unexpected final value {avg}");
}

#[tokio::test]
async fn rater_detail_is_owner_scoped() {
    let pool = test_pool().await;
    let owner = seed_user(&pool, "Olive Owner", "olive@example.com", Role::Owner).await;
    let other = seed_user(&pool, "Oscar Owner", "oscar@example.com", Role::Owner).await;
    let admin = seed_user(&pool, "Ada Admin", "ada@example.com", Role::Admin).await;
    let rater = seed_user(&pool, "Nina Normal", "nina@example.com", Role::Normal).await;
    let store = seed_store(&pool, "Corner Shop", owner.id).await;

    let service = RatingService::new(&pool);
    service
        .submit(&identity_of(&rater), store.id, 5)
        .await
        .unwrap();

    // owning owner and admin may read
    let raters = service
        .store_raters(&identity_of(&owner), store.id)
        .await
        .unwrap();
    assert_eq!(raters.len(), 1);
    assert_eq!(raters[0].user_id, rater.id);
    assert!(service
        .store_raters(&identity_of(&admin), store.id)
        .await
        .is_ok());

    // a different owner is denied with Forbidden, not NotFound:
    // the store's existence is not hidden
    let err = service
        .store_raters(&identity_of(&other), store.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // normal users are denied outright
    let err = service
        .store_raters(&identity_of(&rater), store.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // an owner cannot probe store existence through this read: a
    // missing store is Forbidden for owners, NotFound only for admins
    let err = service
        .store_raters(&identity_of(&other), StoreId::new(999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = service
        .store_raters(&identity_of(&admin), StoreId::new(999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
