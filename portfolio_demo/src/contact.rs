use std::sync::LazyLock;

use chrono::{TimeZone, Utc};
use portfolio_models::contact::ContactRecord;
use portfolio_persistence_contracts::contact::ContactRepository;
use uuid::uuid;

/// All demo contacts, newest first.
pub static ALL_CONTACTS: LazyLock<Vec<&ContactRecord>> =
    LazyLock::new(|| vec![&CAROL, &BOB_2, &BOB_1, &ALICE]);

pub static ALICE: LazyLock<ContactRecord> = LazyLock::new(|| ContactRecord {
    id: uuid!("a3f4c2e1-7b0d-4c9e-8f21-5d6a7b8c9d01").into(),
    name: "Alice Example".try_into().unwrap(),
    email: "alice@example.com".try_into().unwrap(),
    phone: "0123456789".try_into().unwrap(),
    message: "Hi! I would love to talk about a freelance project.".try_into().unwrap(),
    created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
});

pub static BOB_1: LazyLock<ContactRecord> = LazyLock::new(|| ContactRecord {
    id: uuid!("0c1d2e3f-4a5b-4c6d-9e7f-8a9b0c1d2e3f").into(),
    name: "Bob".try_into().unwrap(),
    email: "bob@example.org".try_into().unwrap(),
    phone: "4915112345678".try_into().unwrap(),
    message: "Are you available for a short call next week?".try_into().unwrap(),
    created_at: Utc.with_ymd_and_hms(2024, 3, 14, 13, 37, 42).unwrap(),
});

/// Shares its timestamp with [`BOB_1`] and sorts before it by id.
pub static BOB_2: LazyLock<ContactRecord> = LazyLock::new(|| ContactRecord {
    id: uuid!("f6e5d4c3-b2a1-4f0e-9d8c-7b6a5f4e3d2c").into(),
    name: "Bob".try_into().unwrap(),
    email: "bob@example.org".try_into().unwrap(),
    phone: "4915112345678".try_into().unwrap(),
    message: "Forgot to mention: mornings work best for me.".try_into().unwrap(),
    created_at: Utc.with_ymd_and_hms(2024, 3, 14, 13, 37, 42).unwrap(),
});

pub static CAROL: LazyLock<ContactRecord> = LazyLock::new(|| ContactRecord {
    id: uuid!("5b6c7d8e-9f0a-4b1c-8d2e-3f4a5b6c7d8e").into(),
    name: "Carol Danvers".try_into().unwrap(),
    email: "carol@example.net".try_into().unwrap(),
    phone: "12345678".try_into().unwrap(),
    message: "Loved your portfolio.".try_into().unwrap(),
    created_at: Utc.with_ymd_and_hms(2024, 6, 28, 3, 14, 15).unwrap(),
});

pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    repo: impl ContactRepository<Txn>,
) -> anyhow::Result<()> {
    for &contact in &*ALL_CONTACTS {
        repo.create(txn, contact).await?;
    }
    Ok(())
}
