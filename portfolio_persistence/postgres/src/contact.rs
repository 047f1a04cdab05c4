use anyhow::Context;
use bb8_postgres::tokio_postgres::Row;
use portfolio_di::Build;
use portfolio_models::{
    contact::{ContactId, ContactRecord},
    pagination::PaginationSlice,
};
use portfolio_persistence_contracts::contact::ContactRepository;
use uuid::Uuid;

use crate::{arg_indices, columns, PostgresTransaction};

#[derive(Debug, Clone, Build)]
pub struct PostgresContactRepository;

columns!(contact as "c": "id", "name", "email", "phone", "message", "created_at");

impl ContactRepository<PostgresTransaction> for PostgresContactRepository {
    async fn count(&self, txn: &mut PostgresTransaction) -> anyhow::Result<u64> {
        txn.txn()?
            .query_one("select count(*) from contacts", &[])
            .await
            .map_err(Into::into)
            .map(|row| row.get::<_, i64>(0) as u64)
    }

    async fn list(
        &self,
        txn: &mut PostgresTransaction,
        PaginationSlice { limit, offset }: PaginationSlice,
    ) -> anyhow::Result<Vec<ContactRecord>> {
        txn.txn()?
            .query(
                &format!(
                    "select {CONTACT_COLS} from contacts c order by c.created_at desc, c.id desc \
                     limit $1 offset $2"
                ),
                &[&(*limit as i64), &i64::try_from(offset).unwrap_or(i64::MAX)],
            )
            .await
            .map_err(Into::into)
            .and_then(|rows| {
                rows.into_iter()
                    .map(|row| decode_contact(&row, &mut 0))
                    .collect()
            })
    }

    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        record: &ContactRecord,
    ) -> anyhow::Result<()> {
        txn.txn()?
            .execute(
                &format!(
                    "insert into contacts ({CONTACT_COL_NAMES}) values ({})",
                    arg_indices(1..=CONTACT_CNT)
                ),
                &[
                    &*record.id,
                    &record.name.as_str(),
                    &record.email.as_str(),
                    &record.phone.as_str(),
                    &record.message.as_str(),
                    &record.created_at,
                ],
            )
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}

fn decode_contact(row: &Row, offset: &mut usize) -> anyhow::Result<ContactRecord> {
    let mut idx = || {
        *offset += 1;
        *offset - 1
    };

    let id: ContactId = row.get::<_, Uuid>(idx()).into();

    Ok(ContactRecord {
        id,
        name: decode_field(row.get(idx()), id, "name")?,
        email: decode_field(row.get(idx()), id, "email")?,
        phone: decode_field(row.get(idx()), id, "phone")?,
        message: decode_field(row.get(idx()), id, "message")?,
        created_at: row.get(idx()),
    })
}

fn decode_field<T>(value: String, id: ContactId, field: &str) -> anyhow::Result<T>
where
    T: TryFrom<String>,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    T::try_from(value).with_context(|| format!("Stored contact {id} has an invalid {field}"))
}
