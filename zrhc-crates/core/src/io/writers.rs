use std::io::Write;

use crate::pedigree::Individual;
use crate::pedigree::IndividualId;
use crate::pedigree::MultifamilyPedigree;
use crate::pedigree::Pedigree;

/// Writes the haplotypes of every individual, one row per individual.
///
/// Rows follow [`Pedigree::topological_order`] and start with the family id, the individual id,
/// the ids of the father and the mother (`0` when unknown), the sex code and the phenotype. Then
/// comes the pair `<paternal><inner separator><maternal>` of every locus.
#[derive(Clone, Debug)]
pub struct HaplotypeWriter {
    pub outer_separator: String,
    pub inner_separator: String,
}

impl Default for HaplotypeWriter {
    fn default() -> Self {
        HaplotypeWriter {
            outer_separator: "\t".to_owned(),
            inner_separator: "|".to_owned(),
        }
    }
}

impl HaplotypeWriter {
    pub fn new(outer_separator: impl Into<String>, inner_separator: impl Into<String>) -> Self {
        HaplotypeWriter {
            outer_separator: outer_separator.into(),
            inner_separator: inner_separator.into(),
        }
    }

    pub fn write_pedigree(&self, pedigree: &Pedigree, out: &mut impl Write) -> std::io::Result<()> {
        for index in topological_order(pedigree)? {
            let individual = pedigree.individual(index);
            let mut fields = row_prefix(pedigree, individual);
            fields.extend(
                individual
                    .paternal_haplotypes()
                    .iter()
                    .zip(individual.maternal_haplotypes())
                    .map(|(paternal, maternal)| {
                        format!("{paternal}{}{maternal}", self.inner_separator)
                    }),
            );
            writeln!(out, "{}", fields.join(self.outer_separator.as_str()))?;
        }
        Ok(())
    }

    pub fn write_families(
        &self,
        pedigree: &MultifamilyPedigree,
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        for family in pedigree.families() {
            self.write_pedigree(family, out)?;
        }
        Ok(())
    }
}

/// Writes the genotypes of every individual in the PLINK format, with imputed genotypes in place
/// of the missing ones once the pedigree has been decoded.
#[derive(Clone, Debug)]
pub struct GenotypeWriter {
    pub separator: String,
}

impl Default for GenotypeWriter {
    fn default() -> Self {
        GenotypeWriter {
            separator: "\t".to_owned(),
        }
    }
}

impl GenotypeWriter {
    pub fn new(separator: impl Into<String>) -> Self {
        GenotypeWriter {
            separator: separator.into(),
        }
    }

    pub fn write_pedigree(&self, pedigree: &Pedigree, out: &mut impl Write) -> std::io::Result<()> {
        for index in topological_order(pedigree)? {
            let individual = pedigree.individual(index);
            let mut fields = row_prefix(pedigree, individual);
            fields.extend(individual.genotypes().iter().map(|genotype| {
                let (first, second) = genotype.allele_codes();
                format!("{first} {second}")
            }));
            writeln!(out, "{}", fields.join(self.separator.as_str()))?;
        }
        Ok(())
    }

    pub fn write_families(
        &self,
        pedigree: &MultifamilyPedigree,
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        for family in pedigree.families() {
            self.write_pedigree(family, out)?;
        }
        Ok(())
    }
}

fn topological_order(pedigree: &Pedigree) -> std::io::Result<Vec<IndividualId>> {
    pedigree
        .topological_order()
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))
}

fn row_prefix(pedigree: &Pedigree, individual: &Individual) -> Vec<String> {
    let parent_id = |parent: Option<IndividualId>| {
        parent.map_or_else(
            || "0".to_owned(),
            |parent| external_id(pedigree.individual(parent)),
        )
    };

    vec![
        pedigree.family_id().to_owned(),
        external_id(individual),
        parent_id(individual.father()),
        parent_id(individual.mother()),
        individual.gender().code().to_string(),
        individual.phenotype().to_owned(),
    ]
}

/// Individuals created without an id are named by their index.
fn external_id(individual: &Individual) -> String {
    individual
        .id()
        .map_or_else(|| individual.index().to_string(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Genotype;
    use crate::basic_types::HaplotypeAllele::Allele1;
    use crate::basic_types::HaplotypeAllele::Allele2;

    fn trio() -> Pedigree {
        let mut pedigree = Pedigree::with_genotype_length("fam", 2).unwrap();
        let child = pedigree.get_by_id_or_create("c").unwrap();
        let father = pedigree.get_by_id_or_create("f").unwrap();
        let mother = pedigree.get_by_id_or_create("m").unwrap();
        pedigree.add_trio(father, mother, child).unwrap();
        pedigree.individual_mut(child).set_phenotype("affected");
        pedigree.individual_mut(father).set_phenotype("-9");
        pedigree.individual_mut(mother).set_phenotype("-9");

        pedigree.individual_mut(father).set_haplotypes(0, Allele1, Allele2);
        pedigree.individual_mut(father).set_haplotypes(1, Allele2, Allele2);
        pedigree.individual_mut(mother).set_haplotypes(0, Allele1, Allele1);
        pedigree.individual_mut(mother).set_haplotypes(1, Allele1, Allele2);
        pedigree.individual_mut(child).set_haplotypes(0, Allele2, Allele1);
        pedigree.individual_mut(child).set_haplotypes(1, Allele2, Allele1);
        pedigree
            .individual_mut(child)
            .set_genotype(0, Genotype::Heter);
        pedigree
            .individual_mut(father)
            .set_genotype(1, Genotype::Homo2);
        pedigree
    }

    #[test]
    fn haplotypes_are_written_parents_first() {
        let mut out = Vec::new();

        HaplotypeWriter::default()
            .write_pedigree(&trio(), &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "fam\tm\t0\t0\t2\t-9\t1|1\t1|2\n\
             fam\tf\t0\t0\t1\t-9\t1|2\t2|2\n\
             fam\tc\tf\tm\t0\taffected\t2|1\t2|1\n"
        );
    }

    #[test]
    fn separators_are_configurable() {
        let mut out = Vec::new();

        HaplotypeWriter::new(" ", "/")
            .write_pedigree(&trio(), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().last(), Some("fam c f m 0 affected 2/1 2/1"));
    }

    #[test]
    fn genotypes_are_written_as_allele_pairs() {
        let mut out = Vec::new();

        GenotypeWriter::default()
            .write_pedigree(&trio(), &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "fam\tm\t0\t0\t2\t-9\t0 0\t0 0\n\
             fam\tf\t0\t0\t1\t-9\t0 0\t2 2\n\
             fam\tc\tf\tm\t0\taffected\t1 2\t0 0\n"
        );
    }

    #[test]
    fn cyclic_ancestry_is_reported_instead_of_written() {
        let mut pedigree = trio();
        let father = pedigree.get_by_id("f").unwrap();
        let child = pedigree.get_by_id("c").unwrap();
        pedigree
            .individual_mut(father)
            .set_parent(crate::pedigree::ParentRole::Mother, child);
        let mut out = Vec::new();

        let error = HaplotypeWriter::default()
            .write_pedigree(&pedigree, &mut out)
            .unwrap_err();

        assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
        assert!(out.is_empty());
    }

    #[test]
    fn families_are_written_in_order() {
        let mut pedigree = MultifamilyPedigree::new();
        pedigree.set_genotype_length(1).unwrap();
        for family_id in ["b", "a"] {
            let family = pedigree.add_family(family_id);
            let _ = family.add_individual().unwrap();
        }
        let mut out = Vec::new();

        HaplotypeWriter::default()
            .write_families(&pedigree, &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "b\t0\t0\t0\t0\t\t0|0\na\t0\t0\t0\t0\t\t0|0\n"
        );
    }
}
