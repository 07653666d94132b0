//! Checks of a haplotype configuration which do not depend on how it was computed.
use super::ParentEdge;
use super::Pedigree;
use crate::basic_types::haplotype_genotype_consistent;
use crate::basic_types::HaplotypeAllele;
use crate::error::ValidationError;

impl Pedigree {
    /// Returns true if no haplotype allele of any individual is missing.
    pub fn is_completely_haplotyped(&self) -> bool {
        self.individuals().all(|individual| {
            individual
                .paternal_haplotypes()
                .iter()
                .chain(individual.maternal_haplotypes())
                .all(|allele| !allele.is_missing())
        })
    }

    /// Returns true if every haplotype pair may explain the genotype of its individual.
    pub fn is_consistent(&self) -> bool {
        self.individuals().all(|individual| {
            (0..self.genotype_length()).all(|locus| {
                haplotype_genotype_consistent(
                    individual.paternal_haplotype(locus),
                    individual.maternal_haplotype(locus),
                    individual.genotype(locus),
                )
            })
        })
    }

    /// Returns true if every child inherits one whole strand of each parent.
    ///
    /// Missing alleles match anything.
    pub fn is_zero_recombinant(&self) -> bool {
        self.parent_edges()
            .all(|edge| self.is_edge_zero_recombinant(edge))
    }

    /// Runs every check, reporting the first which fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_completely_haplotyped() {
            return Err(ValidationError::Incomplete);
        }
        if !self.is_consistent() {
            return Err(ValidationError::Inconsistent);
        }
        if !self.is_zero_recombinant() {
            return Err(ValidationError::Recombinant);
        }
        Ok(())
    }

    fn is_edge_zero_recombinant(&self, edge: ParentEdge) -> bool {
        let parent = self.individual(edge.parent);
        let inherited = self.individual(edge.child).inherited_haplotypes(edge.role);

        [parent.paternal_haplotypes(), parent.maternal_haplotypes()]
            .into_iter()
            .any(|strand| strands_compatible(strand, inherited))
    }
}

fn strands_compatible(parent: &[HaplotypeAllele], child: &[HaplotypeAllele]) -> bool {
    parent
        .iter()
        .zip(child)
        .all(|(&p, &c)| p.is_missing() || c.is_missing() || p == c)
}

#[cfg(test)]
mod tests {
    use crate::basic_types::Genotype;
    use crate::basic_types::HaplotypeAllele;
    use crate::basic_types::HaplotypeAllele::Allele1;
    use crate::basic_types::HaplotypeAllele::Allele2;
    use crate::error::ValidationError;
    use crate::pedigree::IndividualId;
    use crate::pedigree::Pedigree;

    fn set_row(
        pedigree: &mut Pedigree,
        individual: IndividualId,
        haplotypes: &[(HaplotypeAllele, HaplotypeAllele)],
    ) {
        for (locus, &(paternal, maternal)) in haplotypes.iter().enumerate() {
            let individual = pedigree.individual_mut(individual);
            individual.set_haplotypes(locus, paternal, maternal);
            individual.set_genotype(locus, Genotype::from_alleles(paternal, maternal).unwrap());
        }
    }

    fn trio(
        father: &[(HaplotypeAllele, HaplotypeAllele)],
        mother: &[(HaplotypeAllele, HaplotypeAllele)],
        child: &[(HaplotypeAllele, HaplotypeAllele)],
    ) -> Pedigree {
        let mut pedigree = Pedigree::with_genotype_length("0", father.len()).unwrap();
        let f = pedigree.get_by_id_or_create("1").unwrap();
        let m = pedigree.get_by_id_or_create("2").unwrap();
        let c = pedigree.get_by_id_or_create("3").unwrap();
        pedigree.add_trio(f, m, c).unwrap();
        set_row(&mut pedigree, f, father);
        set_row(&mut pedigree, m, mother);
        set_row(&mut pedigree, c, child);
        pedigree
    }

    #[test]
    fn fresh_pedigree_is_not_completely_haplotyped() {
        let mut pedigree = Pedigree::with_genotype_length("0", 2).unwrap();
        let _ = pedigree.add_individual().unwrap();

        assert!(!pedigree.is_completely_haplotyped());
        assert!(pedigree.is_consistent());
        assert_eq!(pedigree.validate(), Err(ValidationError::Incomplete));
    }

    #[test]
    fn inherited_strands_are_zero_recombinant() {
        let pedigree = trio(
            &[(Allele1, Allele2), (Allele2, Allele1)],
            &[(Allele1, Allele1), (Allele2, Allele2)],
            &[(Allele2, Allele1), (Allele1, Allele2)],
        );

        assert!(pedigree.is_zero_recombinant());
        assert_eq!(pedigree.validate(), Ok(()));
    }

    #[test]
    fn switching_strands_is_a_recombination() {
        let pedigree = trio(
            &[(Allele1, Allele2), (Allele1, Allele2)],
            &[(Allele1, Allele1), (Allele1, Allele1)],
            &[(Allele1, Allele1), (Allele2, Allele1)],
        );

        assert!(pedigree.is_consistent());
        assert!(!pedigree.is_zero_recombinant());
        assert_eq!(pedigree.validate(), Err(ValidationError::Recombinant));
    }

    #[test]
    fn haplotypes_contradicting_genotypes_are_inconsistent() {
        let mut pedigree = trio(
            &[(Allele1, Allele1)],
            &[(Allele1, Allele1)],
            &[(Allele1, Allele1)],
        );
        let child = pedigree.get_by_id("3").unwrap();
        pedigree.individual_mut(child).set_genotype(0, Genotype::Heter);

        assert!(!pedigree.is_consistent());
        assert_eq!(pedigree.validate(), Err(ValidationError::Inconsistent));
    }
}
