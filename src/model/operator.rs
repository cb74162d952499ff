use serde::Deserialize;

/// A chain eligible for import. Rows are owned by an external admin process,
/// this program only ever reads them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub wikidata_id: String,
}

#[cfg(test)]
impl Operator {
    pub fn mock() -> Operator {
        Operator {
            id: "tesco".into(),
            name: "Tesco".into(),
            wikidata_id: "Q193582".into(),
        }
    }
}
