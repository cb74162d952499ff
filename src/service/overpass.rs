use crate::model::OverpassElement;
use crate::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

static API_URL: &str = "https://overpass-api.de/api/interpreter";

static USER_AGENT: &str = "osm-location-import/0.1";

#[derive(Deserialize)]
struct Response {
    elements: Vec<OverpassElement>,
}

/// One country-scoped query per brand, all three geometry kinds, centroids
/// computed server-side so ways and relations come back with a usable point.
fn brand_query(wikidata_id: &str) -> String {
    format!(
        r#"
[out:json][timeout:90];
area["ISO3166-1"="GB"][admin_level=2]->.uk;
(
  node["brand:wikidata"="{wikidata_id}"](area.uk);
  way["brand:wikidata"="{wikidata_id}"](area.uk);
  relation["brand:wikidata"="{wikidata_id}"](area.uk);
);
out center tags;
"#
    )
}

pub async fn query_brand_locations(wikidata_id: &str) -> Result<Vec<OverpassElement>> {
    info!(wikidata_id, "Querying Overpass, it could take a while...");

    let response = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?
        .post(API_URL)
        .header("User-Agent", USER_AGENT)
        .form(&[("data", brand_query(wikidata_id))])
        .send()
        .await?;

    info!(http_status_code = ?response.status(), "Got Overpass response");

    if !response.status().is_success() {
        return Err(Error::OverpassApi(format!(
            "Overpass query failed: HTTP {}",
            response.status()
        )));
    }

    let response = response.json::<Response>().await?;

    info!(
        wikidata_id,
        elements = response.elements.len(),
        "Fetched elements"
    );

    Ok(response.elements)
}
