use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::error::Result;
use crate::record::VcfRecord;
use crate::types::Header;

/// A fully loaded VCF file: the header block plus the data lines keyed by
/// `chromosome:position`, iterated in file order.
///
/// A key seen twice keeps the slot of its first occurrence but takes the values of the
/// later line.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    header: Header,
    records: IndexMap<String, VcfRecord>,
}

impl RecordStore {
    /// Loads a VCF file, transparently decompressing gzip input.
    ///
    /// Files too short to carry a compression magic number are read as plain text, so an
    /// empty file loads as an empty store.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading VCF file {}", path.display());
        let reader: Box<dyn Read> = match niffler::from_path(path) {
            Ok((reader, format)) => {
                debug!("Detected compression format {:?}", format);
                reader
            }
            Err(niffler::Error::FileTooShort) => {
                debug!("File too short to sniff, reading as plain text");
                Box::new(File::open(path)?)
            }
            Err(e) => return Err(e.into()),
        };
        Self::new(reader)
    }

    pub fn new<R: Read>(reader: R) -> Result<Self> {
        info!("Processing the VCF");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut header_lines = Vec::new();
        let mut store = RecordStore::default();
        let mut fields = csv::StringRecord::new();
        while reader.read_record(&mut fields)? {
            match fields.get(0) {
                Some(first) if first.starts_with('#') => {
                    header_lines.push(fields.iter().join("\t"));
                    continue;
                }
                Some("") if fields.len() == 1 => continue,
                None => continue,
                _ => {}
            }
            let line = fields.position().map(|p| p.line()).unwrap_or_default();
            store.insert(VcfRecord::from_fields(fields.iter(), line)?);
        }
        store.header = Header::from_lines(header_lines);
        debug!(
            "Read {} header lines and {} records",
            store.header.lines().len(),
            store.records.len()
        );
        Ok(store)
    }

    pub fn from_parts(header: Header, records: Vec<VcfRecord>) -> Self {
        let mut store = RecordStore {
            header,
            records: IndexMap::with_capacity(records.len()),
        };
        records.into_iter().for_each(|r| {
            store.insert(r);
        });
        store
    }

    /// Stores `record` under its key, returning the record it replaced.
    pub fn insert(&mut self, record: VcfRecord) -> Option<VcfRecord> {
        let key = record.key();
        let previous = self.records.insert(key, record);
        if let Some(previous) = &previous {
            warn!(
                "Duplicate record at {}, keeping the later line",
                previous.key()
            );
        }
        previous
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&VcfRecord> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut VcfRecord> {
        self.records.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records in file order.
    pub fn records(&self) -> impl Iterator<Item = &VcfRecord> {
        self.records.values()
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut VcfRecord> {
        self.records.values_mut()
    }

    /// Relabels every record on contig `from` as `to`. Keys keep their load-time value.
    pub fn rename_chromosome(&mut self, from: &str, to: &str) -> usize {
        let mut renamed = 0;
        for record in self.records_mut().filter(|r| r.chrom() == from) {
            record.set_chrom(to.to_owned());
            renamed += 1;
        }
        debug!("Renamed {} records from {} to {}", renamed, from, to);
        renamed
    }
}
