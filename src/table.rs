use std::io::Write;

use itertools::Itertools;
use log::info;
use strum::IntoEnumIterator;

use crate::error::{Error, Result};
use crate::record::BaseColumn;
use crate::reader::RecordStore;

pub type Cell = Option<String>;

/// A rectangular table of optional string cells with named columns.
///
/// Column names need not be unique (an INFO and a FORMAT field may share a name);
/// lookups by name resolve to the leftmost column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Table::new(columns);
        rows.into_iter().for_each(|row| table.push_row(row));
        table
    }

    /// The base columns (CHROM through ENCODING) of every record, in file order.
    pub fn from_store(store: &RecordStore) -> Self {
        let columns = BaseColumn::iter().collect_vec();
        let rows = store
            .records()
            .map(|record| {
                columns
                    .iter()
                    .map(|&c| record.get(c).map(str::to_owned))
                    .collect()
            })
            .collect();
        Table::with_rows(columns.iter().map(ToString::to_string).collect(), rows)
    }

    /// Appends a row, padding it with unset cells or cutting it to the table width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> Option<&[Cell]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let j = self.column_index(column)?;
        self.rows.get(row)?.get(j)?.as_deref()
    }

    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let j = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[j].as_deref()).collect())
    }

    /// Places the columns of `other` to the right of this table, matching rows by position.
    pub fn hconcat(mut self, other: Table, name: &str) -> Result<Table> {
        if self.n_rows() != other.n_rows() {
            return Err(Error::RowCountMismatch {
                table: name.to_owned(),
                expected: self.n_rows(),
                found: other.n_rows(),
            });
        }
        self.columns.extend(other.columns);
        for (row, extra) in self.rows.iter_mut().zip(other.rows) {
            row.extend(extra);
        }
        Ok(self)
    }

    /// Writes a tab-delimited rendition with a column-name row, never quoting values.
    pub fn write_tsv<W: Write>(&self, writer: W, missing: &str) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or(missing)))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Joins base, INFO and FORMAT tables side by side, in that column order.
pub fn assemble(base: Table, info: Table, format: Table) -> Result<Table> {
    info!("Adding the parsed info and encoding sections");
    base.hconcat(info, "INFO")?.hconcat(format, "FORMAT")
}

#[cfg(test)]
mod test {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Cell> {
        values.iter().map(|v| v.map(str::to_owned)).collect()
    }

    #[test]
    fn test_hconcat_keeps_row_order() {
        let left = Table::with_rows(
            vec!["CHROM".into(), "POS".into()],
            vec![cells(&[Some("chr2"), Some("5")]), cells(&[Some("chr1"), Some("9")])],
        );
        let right = Table::with_rows(
            vec!["DP".into()],
            vec![cells(&[Some("7")]), cells(&[None])],
        );
        let joined = left.hconcat(right, "INFO").unwrap();
        assert_eq!(joined.columns(), &["CHROM", "POS", "DP"]);
        assert_eq!(joined.get(0, "DP"), Some("7"));
        assert_eq!(joined.get(1, "CHROM"), Some("chr1"));
        assert_eq!(joined.get(1, "DP"), None);
    }

    #[test]
    fn test_hconcat_row_count_mismatch() {
        let left = Table::with_rows(vec!["A".into()], vec![cells(&[Some("1")])]);
        let right = Table::new(vec!["B".into()]);
        match left.hconcat(right, "FORMAT") {
            Err(Error::RowCountMismatch {
                table,
                expected,
                found,
            }) => {
                assert_eq!(table, "FORMAT");
                assert_eq!((expected, found), (1, 0));
            }
            other => panic!("expected a row count mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_push_row_pads_to_width() {
        let mut table = Table::new(vec!["A".into(), "B".into()]);
        table.push_row(cells(&[Some("1")]));
        assert_eq!(table.row(0).unwrap(), &[Some("1".to_string()), None]);
        assert_eq!(table.column("B"), Some(vec![None]));
        assert_eq!(table.column("C"), None);
    }

    #[test]
    fn test_duplicate_column_names_resolve_leftmost() {
        let table = Table::with_rows(
            vec!["DP".into(), "DP".into()],
            vec![cells(&[Some("info"), Some("format")])],
        );
        assert_eq!(table.get(0, "DP"), Some("info"));
        assert_eq!(table.row(0).unwrap()[1].as_deref(), Some("format"));
    }

    #[test]
    fn test_write_tsv() {
        let table = Table::with_rows(
            vec!["CHROM".into(), "NOTE".into(), "DP".into()],
            vec![cells(&[Some("chr1"), Some("\"a b\""), None])],
        );
        let mut out = Vec::new();
        table.write_tsv(&mut out, ".").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "CHROM\tNOTE\tDP\nchr1\t\"a b\"\t.\n"
        );
    }

    #[test]
    fn test_from_store() {
        let store = RecordStore::from_path("resources/example.vcf").unwrap();
        let base = Table::from_store(&store);
        assert_eq!(base.n_rows(), 5);
        assert_eq!(base.n_columns(), 10);
        assert_eq!(base.columns()[9], "ENCODING");
        assert_eq!(base.get(2, "POS"), Some("300"));
        assert_eq!(base.get(1, "ENCODING"), Some("0|1:49:3:58,50"));
    }
}
