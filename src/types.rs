use std::collections::HashMap;
use std::str::FromStr;

use getset::Getters;
use log::debug;
use multimap::MultiMap;
use strum::EnumString;

use crate::parser;

pub type HeaderKey<'a> = &'a str;
pub type Sample = String;

/// Prefix shared by all meta-information lines.
pub(crate) const META_PREFIX: &str = "##";
/// Index of the first sample column on the column-name line.
const FIRST_SAMPLE_COLUMN: usize = 9;

#[derive(Debug, Clone, Eq, PartialEq, EnumString)]
pub enum InfoType {
    Integer,
    Float,
    Flag,
    Character,
    String,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum InfoNumber {
    Count(usize),
    Alleles,
    AlternateAlleles,
    Genotypes,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    String(String),
    Info(HeaderInfo),
    Filter(HeaderFilter),
    Format(HeaderFormat),
    Contig(HeaderContig),
}

/// The VCF header block.
///
/// `lines` holds every header line exactly as read, in file order; it is what gets written
/// back out. `meta` is a structured view of the `##key=value` lines, parsed on a best-effort
/// basis: a line that does not parse is still kept verbatim in `lines`.
#[derive(Debug, Clone, Default, Getters)]
#[getset(get = "pub")]
pub struct Header {
    lines: Vec<String>,
    meta: MultiMap<String, HeaderValue>,
    samples: Vec<Sample>,
}

impl Header {
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut meta = MultiMap::new();
        for line in lines.iter().filter(|l| l.starts_with(META_PREFIX)) {
            match parser::header_entry(line) {
                Ok((_, (key, value))) => meta.insert(key.to_owned(), value),
                Err(e) => debug!("Keeping header line unparsed ({}): {}", e, line),
            }
        }
        let samples = lines
            .iter()
            .rev()
            .find(|l| is_column_line(l))
            .map(|l| {
                l.split('\t')
                    .skip(FIRST_SAMPLE_COLUMN)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        Header {
            lines,
            meta,
            samples,
        }
    }

    /// Fields of the final header line, the `#CHROM ...` column-name line.
    pub fn column_names(&self) -> Option<Vec<&str>> {
        self.lines
            .last()
            .filter(|l| is_column_line(l))
            .map(|l| l.split('\t').collect())
    }

    pub fn info(&self, id: &str) -> Option<&HeaderInfo> {
        self.meta.get_vec("INFO")?.iter().find_map(|v| match v {
            HeaderValue::Info(info) if info.id == id => Some(info),
            _ => None,
        })
    }

    pub fn format(&self, id: &str) -> Option<&HeaderFormat> {
        self.meta.get_vec("FORMAT")?.iter().find_map(|v| match v {
            HeaderValue::Format(format) if format.id == id => Some(format),
            _ => None,
        })
    }

    pub fn contigs(&self) -> Vec<&HeaderContig> {
        self.meta
            .get_vec("contig")
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| match v {
                        HeaderValue::Contig(c) => Some(c),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn is_column_line(line: &str) -> bool {
    line.starts_with('#') && !line.starts_with(META_PREFIX)
}

/// Why a structured header declaration could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

type Fields<'a> = Vec<(&'a str, String)>;

fn take(h: &mut HashMap<&str, String>, key: &'static str) -> Result<String, DeclarationError> {
    h.remove(key).ok_or(DeclarationError::Missing(key))
}

fn number(value: &str) -> Result<InfoNumber, DeclarationError> {
    match parser::info_number(value) {
        Ok(("", number)) => Ok(number),
        _ => Err(DeclarationError::Invalid("Number", value.to_owned())),
    }
}

fn kind(value: &str) -> Result<InfoType, DeclarationError> {
    InfoType::from_str(value).map_err(|_| DeclarationError::Invalid("Type", value.to_owned()))
}

#[derive(Debug, Getters, Clone, PartialEq)]
#[getset(get = "pub")]
pub struct HeaderInfo {
    pub(crate) id: String,
    number: InfoNumber,
    kind: InfoType,
    description: String,
    // may be empty
    source: String,
    // may be empty
    version: String,
    additional: HashMap<String, String>,
}

impl<'a> TryFrom<Fields<'a>> for HeaderInfo {
    type Error = DeclarationError;

    fn try_from(data: Fields<'a>) -> Result<Self, Self::Error> {
        let mut h: HashMap<_, _> = data.into_iter().collect();
        Ok(HeaderInfo {
            id: take(&mut h, "ID")?,
            number: number(&take(&mut h, "Number")?)?,
            kind: kind(&take(&mut h, "Type")?)?,
            description: take(&mut h, "Description")?,
            source: h.remove("Source").unwrap_or_default(),
            version: h.remove("Version").unwrap_or_default(),
            additional: h.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }
}

#[derive(Debug, Getters, Clone, PartialEq)]
#[getset(get = "pub")]
pub struct HeaderFormat {
    pub(crate) id: String,
    number: InfoNumber,
    kind: InfoType,
    description: String,
}

impl<'a> TryFrom<Fields<'a>> for HeaderFormat {
    type Error = DeclarationError;

    fn try_from(data: Fields<'a>) -> Result<Self, Self::Error> {
        let mut h: HashMap<_, _> = data.into_iter().collect();
        Ok(HeaderFormat {
            id: take(&mut h, "ID")?,
            number: number(&take(&mut h, "Number")?)?,
            kind: kind(&take(&mut h, "Type")?)?,
            description: take(&mut h, "Description")?,
        })
    }
}

#[derive(Debug, Getters, Clone, PartialEq)]
#[getset(get = "pub")]
pub struct HeaderContig {
    pub(crate) id: String,
    length: Option<usize>,
    additional: HashMap<String, String>,
}

impl<'a> TryFrom<Fields<'a>> for HeaderContig {
    type Error = DeclarationError;

    fn try_from(data: Fields<'a>) -> Result<Self, Self::Error> {
        let mut h: HashMap<_, _> = data.into_iter().collect();
        Ok(HeaderContig {
            id: take(&mut h, "ID")?,
            length: h.remove("length").and_then(|s| s.parse().ok()),
            additional: h.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }
}

#[derive(Debug, Getters, Clone, PartialEq)]
#[getset(get = "pub")]
pub struct HeaderFilter {
    pub(crate) id: String,
    description: String,
}

impl<'a> TryFrom<Fields<'a>> for HeaderFilter {
    type Error = DeclarationError;

    fn try_from(data: Fields<'a>) -> Result<Self, Self::Error> {
        let mut h: HashMap<_, _> = data.into_iter().collect();
        Ok(HeaderFilter {
            id: take(&mut h, "ID")?,
            description: h.remove("Description").unwrap_or_default(),
        })
    }
}
