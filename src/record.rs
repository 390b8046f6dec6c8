use getset::{Getters, Setters};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// CHROM through INFO are mandatory; FORMAT and ENCODING are not (sites-only files).
pub const MIN_FIELDS: usize = 8;

pub(crate) const FORMAT_SEPARATOR: char = ':';

/// The leading columns of a VCF data line, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum BaseColumn {
    Chrom,
    Pos,
    Id,
    Ref,
    Alt,
    Qual,
    Filter,
    Info,
    Format,
    Encoding,
}

/// One data line. All values are kept as the raw strings read from the file; POS is
/// never interpreted as a number.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct VcfRecord {
    chrom: String,
    pos: String,
    id: String,
    ref_allele: String,
    alt_allele: String,
    qual: String,
    filter: String,
    info: String,
    format: Option<String>,
    encoding: Option<String>,
    /// Columns after ENCODING, e.g. further samples. Written back out but not decoded.
    additional: Vec<String>,
}

impl VcfRecord {
    /// Builds a record from the tab-split fields of data line number `line`.
    pub fn from_fields<'a, I>(fields: I, line: u64) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        if fields.len() < MIN_FIELDS {
            return Err(Error::MalformedRecord {
                line,
                expected: MIN_FIELDS,
                found: fields.len(),
            });
        }
        let optional = |i: usize| fields.get(i).map(|s| s.to_string());
        Ok(VcfRecord {
            chrom: fields[0].into(),
            pos: fields[1].into(),
            id: fields[2].into(),
            ref_allele: fields[3].into(),
            alt_allele: fields[4].into(),
            qual: fields[5].into(),
            filter: fields[6].into(),
            info: fields[7].into(),
            format: optional(8),
            encoding: optional(9),
            additional: fields.iter().skip(10).map(|s| s.to_string()).collect(),
        })
    }

    /// The `chromosome:position` key this record is stored under.
    pub fn key(&self) -> String {
        format!("{}:{}", self.chrom, self.pos)
    }

    pub fn get(&self, column: BaseColumn) -> Option<&str> {
        match column {
            BaseColumn::Chrom => Some(self.chrom.as_str()),
            BaseColumn::Pos => Some(self.pos.as_str()),
            BaseColumn::Id => Some(self.id.as_str()),
            BaseColumn::Ref => Some(self.ref_allele.as_str()),
            BaseColumn::Alt => Some(self.alt_allele.as_str()),
            BaseColumn::Qual => Some(self.qual.as_str()),
            BaseColumn::Filter => Some(self.filter.as_str()),
            BaseColumn::Info => Some(self.info.as_str()),
            BaseColumn::Format => self.format.as_deref(),
            BaseColumn::Encoding => self.encoding.as_deref(),
        }
    }

    pub fn format_names(&self) -> Vec<&str> {
        split_colons(self.format.as_deref())
    }

    pub fn encoding_values(&self) -> Vec<&str> {
        split_colons(self.encoding.as_deref())
    }

    /// All fields in output order: the mandatory eight, FORMAT and ENCODING when present,
    /// then any additional columns.
    pub fn fields(&self) -> Vec<&str> {
        let mandatory = [
            &self.chrom,
            &self.pos,
            &self.id,
            &self.ref_allele,
            &self.alt_allele,
            &self.qual,
            &self.filter,
            &self.info,
        ];
        mandatory
            .into_iter()
            .map(String::as_str)
            .chain(self.format.as_deref())
            .chain(self.encoding.as_deref())
            .chain(self.additional.iter().map(String::as_str))
            .collect()
    }
}

fn split_colons(value: Option<&str>) -> Vec<&str> {
    value
        .map(|v| v.split(FORMAT_SEPARATOR).collect())
        .unwrap_or_default()
}
