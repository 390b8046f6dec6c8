//! Decompose the INFO and FORMAT/ENCODING columns of a VCF file into tables, and write the
//! (possibly edited) records back out as VCF.
//!
//! ```no_run
//! use vcf_table::{DecodeOptions, ParsedVcf};
//!
//! let vcf = ParsedVcf::from_path("calls.vcf.gz", &DecodeOptions::default())?;
//! let table = vcf.composite()?;
//! println!("{} records, {} columns", table.n_rows(), table.n_columns());
//! vcf.write("calls.rewritten.vcf")?;
//! # Ok::<(), vcf_table::Error>(())
//! ```
pub mod error;
pub mod format;
pub mod info;
pub mod options;
pub(crate) mod parser;
pub mod reader;
pub mod record;
pub mod table;
pub mod types;
pub mod vcf;
pub mod writer;

pub use error::{Error, Result};
pub use format::{FormatTable, SampleRow};
pub use info::{InfoSchema, InfoTable, InfoValue};
pub use options::{DecodeOptions, FormatPairing, UnknownInfoPolicy};
pub use reader::RecordStore;
pub use record::{BaseColumn, VcfRecord};
pub use table::Table;
pub use vcf::ParsedVcf;
pub use writer::{write_vcf, VcfWriter};

#[cfg(test)]
mod test {

    use super::reader::RecordStore;

    #[test]
    fn test_samples() {
        let records = RecordStore::from_path("resources/example.vcf.gz").unwrap();
        assert_eq!(records.header().samples(), &vec!["NA00001".to_string()]);
    }
}
