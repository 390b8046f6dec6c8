use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use log::info;

use crate::error::Result;
use crate::reader::RecordStore;
use crate::types::Header;

/// Serializes a header block and the base record table as VCF text.
///
/// Only the base columns are written; edits made to decoded INFO or FORMAT tables are not
/// folded back into the INFO/FORMAT/ENCODING strings.
pub struct VcfWriter<W: Write> {
    inner: W,
}

impl<W: Write> VcfWriter<W> {
    pub fn new(inner: W) -> Self {
        VcfWriter { inner }
    }

    /// Writes every header line followed by a newline. The final line is the column-name
    /// line and is rejoined from its tab-separated fields.
    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        let lines = header.lines();
        if let Some((last, rest)) = lines.split_last() {
            for line in rest {
                writeln!(self.inner, "{}", line)?;
            }
            writeln!(self.inner, "{}", last.split('\t').join("\t"))?;
        }
        Ok(())
    }

    /// Writes the records tab-delimited, without a column-name row and without quoting.
    /// Records may differ in width: sites-only lines sit next to lines with sample columns.
    pub fn write_records(&mut self, store: &RecordStore) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(&mut self.inner);
        for record in store.records() {
            writer.write_record(record.fields())?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Writes `store` to `path`: the header first, then the body appended to the same file.
pub fn write_vcf<P: AsRef<Path>>(store: &RecordStore, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Writing new VCF file {}", path.display());
    {
        let mut writer = VcfWriter::new(BufWriter::new(File::create(path)?));
        writer.write_header(store.header())?;
        writer.into_inner().flush()?;
    }
    let mut writer = VcfWriter::new(BufWriter::new(
        OpenOptions::new().append(true).open(path)?,
    ));
    writer.write_records(store)?;
    writer.into_inner().flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::VcfRecord;
    use tempfile::tempdir;

    #[test]
    fn test_unmodified_round_trip_is_byte_identical() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.vcf");
        let store = RecordStore::from_path("resources/example.vcf").unwrap();
        write_vcf(&store, &out).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            std::fs::read_to_string("resources/example.vcf").unwrap()
        );
    }

    #[test]
    fn test_gzip_input_is_written_as_text() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.vcf");
        let store = RecordStore::from_path("resources/example.vcf.gz").unwrap();
        write_vcf(&store, &out).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            std::fs::read_to_string("resources/example.vcf").unwrap()
        );
    }

    #[test]
    fn test_edits_to_base_table_are_written() {
        let mut store = RecordStore::from_path("resources/example.vcf").unwrap();
        store.rename_chromosome("chrX", "X");
        store
            .get_mut("chr1:200")
            .unwrap()
            .set_filter("PASS".into());

        let mut writer = VcfWriter::new(Vec::new());
        writer.write_records(&store).unwrap();
        let body = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("chr1\t200\t.\tT\tC\t3\tPASS\t"));
        assert_eq!(lines[4], "X\t500\t.\tA\tAT\t29\tPASS\tAF=0.25\tGT:DP:AD\t0/1:30");
    }

    #[test]
    fn test_values_are_never_quoted() {
        let record = VcfRecord::from_fields(
            "chr1\t1\t.\tA\tG\t.\tPASS\tNOTE=\"x y\",z".split('\t'),
            1,
        )
        .unwrap();
        let store = RecordStore::from_parts(Header::default(), vec![record]);
        let mut writer = VcfWriter::new(Vec::new());
        writer.write_header(store.header()).unwrap();
        writer.write_records(&store).unwrap();
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            "chr1\t1\t.\tA\tG\t.\tPASS\tNOTE=\"x y\",z\n"
        );
    }

    #[test]
    fn test_mixed_record_widths_round_trip() {
        let data = "##fileformat=VCFv4.2\n\
                    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\n\
                    chr1\t100\t.\tA\tG\t50\tPASS\t.\tGT\t0/1\t1/1\n\
                    chr1\t200\t.\tT\tC\t3\tPASS\t.\n\
                    chr1\t300\t.\tG\tA\t.\tPASS\t.\tGT:DP\t0/0:7\n";
        let store = RecordStore::new(data.as_bytes()).unwrap();
        assert_eq!(store.len(), 3);

        let mut writer = VcfWriter::new(Vec::new());
        writer.write_header(store.header()).unwrap();
        writer.write_records(&store).unwrap();
        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), data);
    }

    #[test]
    fn test_duplicate_coordinates_write_once() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.vcf");
        let store = RecordStore::from_path("resources/duplicate.vcf").unwrap();
        write_vcf(&store, &out).unwrap();
        let reloaded = RecordStore::from_path(&out).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("chr1:100").unwrap().id(), "rs999");
        assert_eq!(reloaded.header().lines(), store.header().lines());
    }
}
