use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use vcf_table::{
    write_vcf, DecodeOptions, FormatPairing, ParsedVcf, RecordStore, UnknownInfoPolicy,
};

/// Decompose VCF INFO and FORMAT columns into tables
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the composite table (base, INFO and FORMAT columns) as TSV
    Decode(DecodeArgs),
    /// Print the INFO schema and the FORMAT field universe
    Schema(SchemaArgs),
    /// Load a VCF, apply edits to the base columns and write it back out
    Rewrite(RewriteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DecodingOptions {
    /// What to do with INFO keys the header does not declare (fail, skip)
    #[arg(long = "unknown-info", default_value_t = UnknownInfoPolicy::Fail)]
    pub unknown_info: UnknownInfoPolicy,

    /// How to pair FORMAT names and ENCODING values of different length (truncate, strict)
    #[arg(long = "format-pairing", default_value_t = FormatPairing::Truncate)]
    pub format_pairing: FormatPairing,
}

impl From<&DecodingOptions> for DecodeOptions {
    fn from(args: &DecodingOptions) -> Self {
        DecodeOptions {
            unknown_info: args.unknown_info,
            format_pairing: args.format_pairing,
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input VCF, optionally gzip-compressed
    #[arg(required = true)]
    pub vcf: PathBuf,

    /// Output TSV path (stdout when omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Text written for unset cells
    #[arg(long = "missing", default_value = "")]
    pub missing: String,

    #[command(flatten)]
    pub decoding: DecodingOptions,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Input VCF, optionally gzip-compressed
    #[arg(required = true)]
    pub vcf: PathBuf,

    #[command(flatten)]
    pub decoding: DecodingOptions,
}

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Input VCF, optionally gzip-compressed
    #[arg(required = true)]
    pub vcf: PathBuf,

    /// Output VCF path (always written uncompressed)
    #[arg(short = 'o', long = "output", required = true)]
    pub output: PathBuf,

    /// Relabel a contig, as OLD=NEW. May be repeated
    #[arg(long = "rename-chrom", value_parser = parse_rename)]
    pub rename_chrom: Vec<(String, String)>,
}

fn parse_rename(s: &str) -> Result<(String, String)> {
    let (from, to) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected OLD=NEW, got '{}'", s))?;
    if from.is_empty() || to.is_empty() {
        return Err(anyhow!("expected OLD=NEW, got '{}'", s));
    }
    Ok((from.to_owned(), to.to_owned()))
}

fn output_writer(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Couldn't create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

impl DecodeArgs {
    pub fn run(self) -> Result<()> {
        let vcf = ParsedVcf::from_path(&self.vcf, &(&self.decoding).into())
            .with_context(|| format!("Failed to decode {}", self.vcf.display()))?;
        let table = vcf.composite()?;
        info!(
            "Writing {} rows and {} columns",
            table.n_rows(),
            table.n_columns()
        );
        let mut out = output_writer(self.output.as_ref())?;
        table.write_tsv(&mut out, &self.missing)?;
        out.flush()?;
        Ok(())
    }
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let vcf = ParsedVcf::from_path(&self.vcf, &(&self.decoding).into())
            .with_context(|| format!("Failed to decode {}", self.vcf.display()))?;
        let header = vcf.store().header();
        let mut out = BufWriter::new(io::stdout());
        for id in vcf.schema().ids() {
            match header.info(id) {
                Some(decl) => writeln!(
                    out,
                    "INFO\t{}\t{:?}\t{:?}\t{}",
                    id,
                    decl.number(),
                    decl.kind(),
                    decl.description()
                )?,
                None => writeln!(out, "INFO\t{}", id)?,
            }
        }
        for name in vcf.format().universe() {
            match header.format(name) {
                Some(decl) => writeln!(
                    out,
                    "FORMAT\t{}\t{:?}\t{:?}\t{}",
                    name,
                    decl.number(),
                    decl.kind(),
                    decl.description()
                )?,
                None => writeln!(out, "FORMAT\t{}", name)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

impl RewriteArgs {
    pub fn run(self) -> Result<()> {
        let mut store = RecordStore::from_path(&self.vcf)
            .with_context(|| format!("Failed to read {}", self.vcf.display()))?;
        for (from, to) in &self.rename_chrom {
            let renamed = store.rename_chromosome(from, to);
            info!("Renamed {} records from {} to {}", renamed, from, to);
        }
        write_vcf(&store, &self.output)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;
        Ok(())
    }
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(args) => args.run(),
        Commands::Schema(args) => args.run(),
        Commands::Rewrite(args) => args.run(),
    }
}
