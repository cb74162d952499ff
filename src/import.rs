use crate::conf::Conf;
use crate::model::{LocationRecord, Operator, OverpassElement};
use crate::service::overpass;
use crate::service::store::StoreClient;
use crate::Result;
use std::future::Future;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{error, info, warn};

static LOCATIONS_TABLE: &str = "locations";

// Overpass fair use policy asks clients to pause between queries
const QUERY_DELAY: Duration = Duration::from_secs(3);

pub async fn run(conf: &Conf) -> Result<()> {
    run_paced(conf, QUERY_DELAY).await
}

async fn run_paced(conf: &Conf, delay: Duration) -> Result<()> {
    let store = StoreClient::new(conf)?;

    info!("Fetching operators with a wikidata_id");
    let operators = store.select_operators().await?;

    if operators.is_empty() {
        warn!("No operators with a wikidata_id found, nothing to import");
        return Ok(());
    }

    info!(operators = operators.len(), "Found operators to import");
    for operator in &operators {
        info!(
            id = operator.id.as_str(),
            name = operator.name.as_str(),
            wikidata_id = operator.wikidata_id.as_str(),
            "Queued for import"
        );
    }

    let total_rows = import_operators(&store, &operators, delay, |wikidata_id: String| async move {
        overpass::query_brand_locations(&wikidata_id).await
    })
    .await?;

    info!(
        operators = operators.len(),
        total_rows, "Import run finished"
    );
    if conf.dry_run {
        info!("Dry run, nothing was written to the store");
    }

    Ok(())
}

/// One linear pass over the given operators. A failed element fetch only
/// skips that operator, a failed batch write aborts the run. The delay
/// applies between fetches, not before the first one and not after the
/// last one.
async fn import_operators<F, Fut>(
    store: &StoreClient,
    operators: &[Operator],
    delay: Duration,
    fetch: F,
) -> Result<usize>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<OverpassElement>>>,
{
    let added = OffsetDateTime::now_utc().date();
    let mut total_rows = 0;

    for (i, operator) in operators.iter().enumerate() {
        match fetch(operator.wikidata_id.clone()).await {
            Ok(elements) => {
                let records: Vec<LocationRecord> = elements
                    .iter()
                    .filter_map(|it| {
                        LocationRecord::from_overpass(it, &operator.id, &operator.name, added)
                    })
                    .collect();
                info!(
                    operator = operator.id.as_str(),
                    elements = elements.len(),
                    locations = records.len(),
                    "Normalized elements"
                );
                if !records.is_empty() {
                    let rows = store.upsert(LOCATIONS_TABLE, &records).await?;
                    total_rows += rows;
                    info!(operator = operator.id.as_str(), rows, "Upserted rows");
                }
            }
            Err(e) => {
                error!(
                    operator = operator.id.as_str(),
                    error = e.to_string(),
                    "Overpass query failed, skipping operator"
                );
            }
        }

        if i + 1 < operators.len() {
            info!(delay_s = delay.as_secs(), "Waiting before the next query");
            tokio::time::sleep(delay).await;
        }
    }

    Ok(total_rows)
}
