use crate::conf::Conf;
use crate::model::{LocationRecord, Operator};
use crate::{Error, Result};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::info;
use url::Url;

// Rows per upsert request, keeps request bodies well under payload limits
const BATCH_SIZE: usize = 200;

pub struct StoreClient {
    http: reqwest::Client,
    base_url: Url,
    service_key: String,
    dry_run: bool,
}

impl StoreClient {
    pub fn new(conf: &Conf) -> Result<StoreClient> {
        Ok(StoreClient {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()?,
            base_url: Url::parse(&conf.supabase_url)?,
            service_key: conf.service_key.clone(),
            dry_run: conf.dry_run,
        })
    }

    /// All operators eligible for import, meaning the ones with a wikidata_id.
    /// A single attempt, the caller treats failure as fatal.
    pub async fn select_operators(&self) -> Result<Vec<Operator>> {
        let url = self.base_url.join("/rest/v1/operators")?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("wikidata_id", "not.is.null"),
                ("select", "id,name,wikidata_id"),
            ])
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::StoreApi(format!(
                "Failed to select operators: HTTP {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    /// Writes records in chunks of [`BATCH_SIZE`], merging on conflicting id
    /// so re-runs converge instead of duplicating rows. Returns the number of
    /// rows written, or the number that would have been written in dry-run.
    pub async fn upsert(&self, table: &str, records: &[LocationRecord]) -> Result<usize> {
        for chunk in batches(records) {
            if self.dry_run {
                info!(table, rows = chunk.len(), "Dry run, skipping upsert");
                continue;
            }
            let url = self.base_url.join(&format!("/rest/v1/{table}"))?;
            let response = self
                .http
                .post(url)
                .header("apikey", &self.service_key)
                .header("Authorization", format!("Bearer {}", self.service_key))
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&chunk)
                .send()
                .await?;
            let status = response.status();
            if status != StatusCode::OK && status != StatusCode::CREATED {
                return Err(Error::StoreApi(format!(
                    "Failed to upsert into {table}: HTTP {status}"
                )));
            }
        }
        Ok(records.len())
    }
}

/// [`StoreClient::upsert`] issues exactly one write request per batch
/// yielded here.
fn batches(records: &[LocationRecord]) -> std::slice::Chunks<'_, LocationRecord> {
    records.chunks(BATCH_SIZE)
}

#[cfg(test)]
mod test {
    use super::{batches, StoreClient};
    use crate::conf::Conf;
    use crate::model::LocationRecord;
    use crate::Result;

    fn mock_records(count: i64) -> Vec<LocationRecord> {
        (0..count).map(LocationRecord::mock).collect()
    }

    #[test]
    fn upsert_issues_one_write_per_200_records() {
        let records = mock_records(450);
        let batch_sizes: Vec<usize> = batches(&records).map(|it| it.len()).collect();
        assert_eq!(vec![200, 200, 50], batch_sizes);
    }

    #[tokio::test]
    async fn dry_run_counts_without_writing() -> Result<()> {
        // No server is listening on the mock base URL, a real write attempt
        // would error out rather than count
        let store = StoreClient::new(&Conf::mock(true))?;
        let rows = store.upsert("locations", &mock_records(450)).await?;
        assert_eq!(450, rows);
        Ok(())
    }

    #[tokio::test]
    async fn dry_run_upsert_of_nothing_is_a_noop() -> Result<()> {
        let store = StoreClient::new(&Conf::mock(true))?;
        assert_eq!(0, store.upsert("locations", &[]).await?);
        Ok(())
    }
}
