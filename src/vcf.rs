use std::path::Path;

use getset::{Getters, MutGetters};

use crate::error::Result;
use crate::format::FormatTable;
use crate::info::{InfoSchema, InfoTable};
use crate::options::DecodeOptions;
use crate::reader::RecordStore;
use crate::table::{self, Table};
use crate::writer;

/// A loaded VCF file together with its decoded INFO and FORMAT tables.
#[derive(Debug, Clone, Getters, MutGetters)]
pub struct ParsedVcf {
    #[getset(get = "pub", get_mut = "pub")]
    store: RecordStore,
    #[getset(get = "pub")]
    info: InfoTable,
    #[getset(get = "pub")]
    format: FormatTable,
}

impl ParsedVcf {
    pub fn from_path<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        Self::from_store(RecordStore::from_path(path)?, options)
    }

    pub fn from_store(store: RecordStore, options: &DecodeOptions) -> Result<Self> {
        let schema = InfoSchema::from_header(store.header());
        let info = InfoTable::decode(&store, &schema, options)?;
        let format = FormatTable::decode(&store, options)?;
        Ok(ParsedVcf {
            store,
            info,
            format,
        })
    }

    pub fn schema(&self) -> &InfoSchema {
        self.info.schema()
    }

    /// Base columns, then INFO schema columns, then FORMAT universe columns.
    pub fn composite(&self) -> Result<Table> {
        table::assemble(
            Table::from_store(&self.store),
            self.info.to_table(),
            self.format.to_table(),
        )
    }

    /// Writes the header and the current base records to `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        writer::write_vcf(&self.store, path)
    }
}
