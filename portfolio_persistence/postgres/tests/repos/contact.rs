use chrono::{TimeZone, Utc};
use portfolio_demo::{
    contact::{ALICE, ALL_CONTACTS, BOB_1, BOB_2, CAROL},
    UUID1,
};
use portfolio_models::contact::ContactRecord;
use portfolio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use portfolio_persistence_postgres::contact::PostgresContactRepository;
use pretty_assertions::assert_eq;

use crate::{common::setup, make_slice, sliced};

const REPO: PostgresContactRepository = PostgresContactRepository;

#[tokio::test]
async fn count() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO.count(&mut txn).await.unwrap();
    assert_eq!(result, ALL_CONTACTS.len() as u64);
}

#[tokio::test]
async fn list_newest_first() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO.list(&mut txn, make_slice(100, 0)).await.unwrap();
    assert_eq!(
        result,
        [&*CAROL, &*BOB_2, &*BOB_1, &*ALICE].map(Clone::clone)
    );
}

#[tokio::test]
async fn list_slices() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    for limit in 1..=5 {
        for offset in 0..=5 {
            let slice = make_slice(limit, offset);
            let result = REPO.list(&mut txn, slice).await.unwrap();
            let expected = sliced(&ALL_CONTACTS, slice)
                .iter()
                .map(|&c| c.clone())
                .collect::<Vec<_>>();
            assert_eq!(result, expected, "limit={limit} offset={offset}");
        }
    }
}

#[tokio::test]
async fn create() {
    let db = setup().await;
    let record = ContactRecord {
        id: UUID1.into(),
        name: "New Person".try_into().unwrap(),
        email: "new@example.com".try_into().unwrap(),
        phone: "98765432".try_into().unwrap(),
        message: "Hello there".try_into().unwrap(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    };

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.create(&mut txn, &record).await.unwrap();
    txn.commit().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(
        REPO.count(&mut txn).await.unwrap(),
        ALL_CONTACTS.len() as u64 + 1
    );
    let result = REPO.list(&mut txn, make_slice(1, 0)).await.unwrap();
    assert_eq!(result, [record]);
}

#[tokio::test]
async fn create_rolled_back() {
    let db = setup().await;
    let mut record = ALICE.clone();
    record.id = UUID1.into();

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.create(&mut txn, &record).await.unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(
        REPO.count(&mut txn).await.unwrap(),
        ALL_CONTACTS.len() as u64
    );
}

#[tokio::test]
async fn create_duplicate_id() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO.create(&mut txn, &ALICE).await;
    assert!(result.is_err());
}
