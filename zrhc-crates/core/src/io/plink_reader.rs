use std::io::BufRead;

use log::debug;
use log::info;
use log::warn;

use crate::basic_types::Gender;
use crate::basic_types::Genotype;
use crate::basic_types::HaplotypeAllele;
use crate::error::PedigreeError;
use crate::error::ReadError;
use crate::pedigree::MultifamilyPedigree;

/// A line of the input which has been discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based.
    pub line_number: usize,
    pub reason: ReadError,
}

/// The families read from a PLINK pedigree file, together with the lines which were discarded.
#[derive(Clone, Debug, Default)]
pub struct ParsedPedigree {
    pub pedigree: MultifamilyPedigree,
    pub skipped_lines: Vec<SkippedLine>,
}

/// A syntactically valid row of a pedigree file.
#[derive(Clone, Debug)]
struct PlinkRow<'a> {
    family_id: &'a str,
    id: &'a str,
    parents: Option<(&'a str, &'a str)>,
    gender: Gender,
    phenotype: &'a str,
    genotypes: Vec<Genotype>,
}

/// Reads a pedigree in the PLINK format.
///
/// Each row holds whitespace-separated fields: family id, individual id, father id, mother id,
/// sex code (`0` unknown, `1` male, `2` female), phenotype, and then two allele codes (`1`, `2`,
/// or `0` when missing) per locus. Empty lines and lines starting with `#` are ignored. A row
/// whose family id differs from the one of the previous row starts a new family.
///
/// Invalid rows are logged and reported in [`ParsedPedigree::skipped_lines`]; only I/O errors
/// abort the reading.
pub fn read_pedigree(source: impl BufRead) -> std::io::Result<ParsedPedigree> {
    let mut parsed = ParsedPedigree::default();
    let mut current_family: Option<String> = None;

    for (index, line) in source.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = parse_row(line)
            .and_then(|row| add_row(&mut parsed.pedigree, &mut current_family, row));
        if let Err(reason) = result {
            warn!("Skipping line {} of the pedigree: {reason}", index + 1);
            parsed.skipped_lines.push(SkippedLine {
                line_number: index + 1,
                reason,
            });
        }
    }

    info!(
        "Read {} families with genotypes of length {}",
        parsed.pedigree.families().len(),
        parsed.pedigree.genotype_length()
    );
    Ok(parsed)
}

fn parse_row(line: &str) -> Result<PlinkRow<'_>, ReadError> {
    let mut fields = line.split_whitespace();
    let mut next_field =
        |name: &'static str| fields.next().ok_or(ReadError::MissingField(name));

    let family_id = next_field("family id")?;
    let id = next_field("individual id")?;
    let father = next_field("father id")?;
    let mother = next_field("mother id")?;
    let gender_code = next_field("sex")?;
    let phenotype = next_field("phenotype")?;

    let parents = match (father, mother) {
        ("0", "0") => None,
        ("0", _) | (_, "0") => return Err(ReadError::HalfMissingParents),
        (father, mother) => Some((father, mother)),
    };
    let gender = Gender::from_code(gender_code)
        .ok_or_else(|| ReadError::InvalidGender(gender_code.to_owned()))?;

    let alleles = fields
        .map(|code| {
            HaplotypeAllele::from_code(code).ok_or_else(|| ReadError::InvalidAllele(code.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if alleles.is_empty() {
        return Err(ReadError::EmptyGenotype);
    }
    if alleles.len() % 2 != 0 {
        return Err(ReadError::OddAlleleCount);
    }
    let genotypes = alleles
        .chunks_exact(2)
        .enumerate()
        .map(|(locus, pair)| {
            Genotype::from_alleles(pair[0], pair[1]).ok_or(ReadError::HalfMissingGenotype(locus))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PlinkRow {
        family_id,
        id,
        parents,
        gender,
        phenotype,
        genotypes,
    })
}

fn add_row(
    pedigree: &mut MultifamilyPedigree,
    current_family: &mut Option<String>,
    row: PlinkRow<'_>,
) -> Result<(), ReadError> {
    pedigree.set_genotype_length(row.genotypes.len())?;

    if current_family.as_deref() != Some(row.family_id) {
        debug!("Starting family '{}'", row.family_id);
        *current_family = Some(row.family_id.to_owned());
        let _ = pedigree.add_family(row.family_id);
    }
    let family = pedigree
        .last_family_mut()
        .ok_or(ReadError::Pedigree(PedigreeError::NoFamily))?;

    let child = family.get_by_id_or_create(row.id)?;
    if let Some((father, mother)) = row.parents {
        let father = family.get_by_id_or_create(father)?;
        let mother = family.get_by_id_or_create(mother)?;
        family.add_trio(father, mother, child)?;
    }
    if row.gender.is_specified() {
        family.set_gender(child, row.gender)?;
    }

    let individual = family.individual_mut(child);
    individual.set_phenotype(row.phenotype);
    individual.genotypes_mut().copy_from_slice(&row.genotypes);

    Ok(())
}
