use getset::Getters;
use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::options::{DecodeOptions, FormatPairing};
use crate::reader::RecordStore;
use crate::record::VcfRecord;
use crate::table::Table;

/// FORMAT name to ENCODING value, for just the names a record lists itself.
pub type SampleRow = IndexMap<String, String>;

/// Every FORMAT name used anywhere in `records`, first-seen order, without duplicates.
pub fn format_universe<'a, I>(records: I) -> IndexSet<String>
where
    I: IntoIterator<Item = &'a VcfRecord>,
{
    records
        .into_iter()
        .flat_map(|r| r.format_names())
        .map(str::to_owned)
        .collect()
}

/// Pairs names with values by position.
pub fn pair_sample(
    names: &[&str],
    values: &[&str],
    pairing: FormatPairing,
    record: &str,
) -> Result<SampleRow> {
    if names.len() != values.len() {
        match pairing {
            FormatPairing::Truncate => debug!(
                "Truncating {} FORMAT names / {} ENCODING values at {}",
                names.len(),
                values.len(),
                record
            ),
            FormatPairing::Strict => {
                return Err(Error::EncodingLengthMismatch {
                    record: record.to_owned(),
                    names: names.len(),
                    values: values.len(),
                })
            }
        }
    }
    Ok(names
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}

/// Decoded per-sample columns, one sparse row per record in file order.
#[derive(Debug, Clone, Default, Getters)]
#[getset(get = "pub")]
pub struct FormatTable {
    universe: IndexSet<String>,
    rows: Vec<SampleRow>,
}

impl FormatTable {
    pub fn decode(store: &RecordStore, options: &DecodeOptions) -> Result<Self> {
        info!("Parsing the encoding");
        let universe = format_universe(store.records());
        debug!("FORMAT universe has {} fields", universe.len());
        let rows = store
            .records()
            .map(|r| {
                pair_sample(
                    &r.format_names(),
                    &r.encoding_values(),
                    options.format_pairing,
                    &r.key(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FormatTable { universe, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        self.rows.get(row)?.get(name).map(String::as_str)
    }

    /// Widens every row to the full universe, leaving absent names unset.
    pub fn to_table(&self) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                self.universe
                    .iter()
                    .map(|name| row.get(name).cloned())
                    .collect()
            })
            .collect();
        Table::with_rows(self.universe.iter().cloned().collect(), rows)
    }
}
