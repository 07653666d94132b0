use crate::cnf::EncodingMode;
use crate::io::HaplotypeWriter;

/// Options of the encode, solve and decode pipeline.
#[derive(Clone, Debug)]
pub struct ZrhcOptions {
    /// Whether parity equations are expanded into clauses or kept as XOR-clauses.
    pub encoding: EncodingMode,
    /// Comment lines written at the top of the DIMACS instance.
    pub notes: Vec<String>,
    /// Separator between the fields of a haplotype row.
    pub outer_separator: String,
    /// Separator between the paternal and the maternal allele of a locus.
    pub inner_separator: String,
    /// Whether the decoded configuration is checked independently of the encoding.
    pub validate: bool,
}

impl Default for ZrhcOptions {
    fn default() -> Self {
        ZrhcOptions {
            encoding: EncodingMode::Plain,
            notes: vec!["SAT instance".to_owned()],
            outer_separator: "\t".to_owned(),
            inner_separator: "|".to_owned(),
            validate: true,
        }
    }
}

impl ZrhcOptions {
    pub fn haplotype_writer(&self) -> HaplotypeWriter {
        HaplotypeWriter::new(&*self.outer_separator, &*self.inner_separator)
    }
}
