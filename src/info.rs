use std::collections::HashMap;
use std::fmt;

use getset::Getters;
use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::options::{DecodeOptions, UnknownInfoPolicy};
use crate::reader::RecordStore;
use crate::table::{Cell, Table};
use crate::types::Header;

pub(crate) const INFO_DECLARATION: &str = "##INFO=<ID=";
const INFO_SEPARATOR: char = ';';
const MISSING_INFO: &str = ".";
/// Value stored for a flag field, i.e. a key present without `=VALUE`.
pub const FLAG_VALUE: &str = "1";

/// The INFO field identifiers declared in the header, in declaration order.
///
/// Duplicated declarations keep their duplicate slot, but lookups always resolve to the
/// first one, so the later slot is never filled by decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoSchema {
    ids: Vec<String>,
    index: HashMap<String, usize>,
}

impl InfoSchema {
    pub fn new(ids: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            index.entry(id.clone()).or_insert(i);
        }
        InfoSchema { ids, index }
    }

    pub fn from_header(header: &Header) -> Self {
        Self::from_lines(header.lines())
    }

    /// Takes, for every line starting with `##INFO=<ID=`, the text between that prefix
    /// and the next comma.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let ids: Vec<String> = lines
            .iter()
            .filter_map(|line| line.as_ref().strip_prefix(INFO_DECLARATION))
            .map(|rest| rest.split(',').next().unwrap_or(rest).to_owned())
            .collect();
        debug!("INFO schema has {} fields", ids.len());
        Self::new(ids)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    Flag,
    Value(String),
}

impl InfoValue {
    pub fn as_str(&self) -> &str {
        match self {
            InfoValue::Flag => FLAG_VALUE,
            InfoValue::Value(v) => v,
        }
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot per schema field; `None` where the record does not carry the field.
pub type InfoRow = Vec<Option<InfoValue>>;

/// Decodes one raw INFO string against `schema`.
pub fn decode_info(
    raw: &str,
    schema: &InfoSchema,
    policy: UnknownInfoPolicy,
    record: &str,
) -> Result<InfoRow> {
    let mut row: InfoRow = vec![None; schema.len()];
    if raw == MISSING_INFO {
        return Ok(row);
    }
    for token in raw.split(INFO_SEPARATOR).filter(|t| !t.is_empty()) {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key, InfoValue::Value(value.to_owned())),
            None => (token, InfoValue::Flag),
        };
        match (schema.index_of(key), policy) {
            (Some(i), _) => row[i] = Some(value),
            (None, UnknownInfoPolicy::Skip) => {
                warn!("Skipping undeclared INFO field {} at {}", key, record)
            }
            (None, UnknownInfoPolicy::Fail) => {
                return Err(Error::UnknownInfoField {
                    key: key.to_owned(),
                    record: record.to_owned(),
                })
            }
        }
    }
    Ok(row)
}

/// Decoded INFO columns, one row per record in file order.
#[derive(Debug, Clone, Default, Getters)]
#[getset(get = "pub")]
pub struct InfoTable {
    schema: InfoSchema,
    rows: Vec<InfoRow>,
}

impl InfoTable {
    pub fn decode(
        store: &RecordStore,
        schema: &InfoSchema,
        options: &DecodeOptions,
    ) -> Result<Self> {
        info!("Parsing the INFO column");
        let rows = store
            .records()
            .map(|r| decode_info(r.info(), schema, options.unknown_info, &r.key()))
            .collect::<Result<Vec<_>>>()?;
        Ok(InfoTable {
            schema: schema.clone(),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, key: &str) -> Option<&InfoValue> {
        let i = self.schema.index_of(key)?;
        self.rows.get(row)?.get(i)?.as_ref()
    }

    pub fn to_table(&self) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.as_ref().map(|v| v.as_str().to_owned()))
                    .collect::<Vec<Cell>>()
            })
            .collect();
        Table::with_rows(self.schema.ids().to_vec(), rows)
    }
}
