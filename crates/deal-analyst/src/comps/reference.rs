use super::domain::PropertyRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceTableError {
    #[error("failed to read reference comps: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference comps CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Read-only address table used when no remote source answers.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCompsTable {
    records: Vec<PropertyRecord>,
}

impl ReferenceCompsTable {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self { records }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<ReferenceRow>() {
            records.push(row?.into_record());
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive substring match on the address column, in table order.
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<PropertyRecord> {
        let needle = keyword.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.address.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    address: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    beds: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    baths: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sqft: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    list_date: Option<String>,
}

impl ReferenceRow {
    fn into_record(self) -> PropertyRecord {
        PropertyRecord {
            address: self.address,
            city: self.city,
            state: self.state,
            beds: self.beds.as_deref().and_then(parse_number),
            baths: self.baths.as_deref().and_then(parse_number),
            sqft: self.sqft.as_deref().and_then(parse_number),
            price: self.price.as_deref().and_then(parse_number),
            list_date: self.list_date,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts plain numbers as well as `$350,000`-style currency strings.
fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_'))
        .collect();
    cleaned.parse::<f64>().ok().filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CSV: &str = "address,city,state,beds,baths,sqft,price,list_date\n\
1184 Lavaca Dr,Forney,TX,4,2.5,2150,349900,2024-03-02\n\
210 Brazos St,Austin,TX,3,2,1600,,\n\
88 Forney Ranch Rd,Forney,TX,,,,\"$412,500\",2024-05-19\n";

    #[test]
    fn parse_number_handles_currency_and_garbage() {
        assert_eq!(parse_number("349900"), Some(349_900.0));
        assert_eq!(parse_number("$412,500"), Some(412_500.0));
        assert_eq!(parse_number("2.5"), Some(2.5));
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn loads_rows_with_missing_values() {
        let table = ReferenceCompsTable::from_reader(Cursor::new(CSV)).expect("table loads");
        assert_eq!(table.len(), 3);

        let austin = &table.records()[1];
        assert_eq!(austin.city, "Austin");
        assert_eq!(austin.beds, Some(3.0));
        assert!(austin.price.is_none());
        assert!(austin.list_date.is_none());

        let ranch = &table.records()[2];
        assert_eq!(ranch.price, Some(412_500.0));
        assert!(ranch.sqft.is_none());
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let table = ReferenceCompsTable::from_reader(Cursor::new(CSV)).expect("table loads");

        let matches = table.search("FORNEY", 10);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].address, "88 Forney Ranch Rd");

        let matches = table.search("r", 1);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].address, "1184 Lavaca Dr");

        assert!(table.search("zzz", 5).is_empty());
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ReferenceCompsTable::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            ReferenceTableError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
