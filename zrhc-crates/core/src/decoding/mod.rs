//! Reconstruction of the haplotype configuration from the values stored in a [`PedCnf`].
use log::debug;
use log::trace;

use crate::basic_types::Genotype;
use crate::basic_types::HaplotypeAllele;
use crate::cnf::PedCnf;
use crate::pedigree::Pedigree;

/// Assigns a haplotype pair to every individual and locus of `pedigree`, reading the phase and
/// zygosity variables of `cnf`.
///
/// Missing genotypes are imputed first: a false `w` yields a homozygous genotype whose allele is
/// chosen by `h`, a true `w` a heterozygous one. Then a homozygous genotype gives the same allele
/// to both strands, while a heterozygous one gives `(1, 2)` when `h` is false and `(2, 1)`
/// otherwise. Variables which were never allocated read as false.
pub fn compute_zrhc(pedigree: &mut Pedigree, cnf: &PedCnf) {
    let genotype_length = pedigree.genotype_length();

    for individual in pedigree.individuals_mut() {
        let index = individual.index();
        for locus in 0..genotype_length {
            let phase = cnf.h_value(index, locus);

            if !individual.genotype(locus).is_genotyped() {
                let imputed = match (cnf.w_value(index, locus), phase) {
                    (true, _) => Genotype::Heter,
                    (false, false) => Genotype::Homo1,
                    (false, true) => Genotype::Homo2,
                };
                debug!("Imputed genotype {imputed} to individual {index} at locus {locus}");
                individual.set_genotype(locus, imputed);
            }

            let (paternal, maternal) = match individual.genotype(locus).homozygous_allele() {
                Some(allele) => (allele, allele),
                None if phase => (HaplotypeAllele::Allele2, HaplotypeAllele::Allele1),
                None => (HaplotypeAllele::Allele1, HaplotypeAllele::Allele2),
            };
            trace!("Individual {index}, locus {locus}: {paternal}|{maternal}");
            individual.set_haplotypes(locus, paternal, maternal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Assignment;
    use crate::cnf::PedCnf;
    use crate::encoding::encode_pedigree;
    use crate::pedigree::IndividualId;

    fn single(genotypes: &[Genotype]) -> (Pedigree, IndividualId) {
        let mut pedigree = Pedigree::with_genotype_length("0", genotypes.len()).unwrap();
        let individual = pedigree.get_by_id_or_create("1").unwrap();
        for (locus, &genotype) in genotypes.iter().enumerate() {
            pedigree.individual_mut(individual).set_genotype(locus, genotype);
        }
        (pedigree, individual)
    }

    #[test]
    fn unallocated_variables_decode_as_false() {
        let (mut pedigree, individual) =
            single(&[Genotype::Homo2, Genotype::Heter, Genotype::Missing]);

        compute_zrhc(&mut pedigree, &PedCnf::default());

        let individual = pedigree.individual(individual);
        assert_eq!(
            individual.paternal_haplotypes(),
            [
                HaplotypeAllele::Allele2,
                HaplotypeAllele::Allele1,
                HaplotypeAllele::Allele1
            ]
        );
        assert_eq!(
            individual.maternal_haplotypes(),
            [
                HaplotypeAllele::Allele2,
                HaplotypeAllele::Allele2,
                HaplotypeAllele::Allele1
            ]
        );
        assert_eq!(individual.genotype(2), Genotype::Homo1);
        assert!(pedigree.is_completely_haplotyped());
    }

    #[test]
    fn phase_swaps_heterozygous_strands() {
        let (mut pedigree, individual) = single(&[Genotype::Heter]);
        let mut cnf = PedCnf::default();
        let h = cnf.get_h(individual, 0);
        cnf.apply_assignment(&Assignment::from_literals(vec![h as i32]))
            .unwrap();

        compute_zrhc(&mut pedigree, &cnf);

        let individual = pedigree.individual(individual);
        assert_eq!(individual.paternal_haplotype(0), HaplotypeAllele::Allele2);
        assert_eq!(individual.maternal_haplotype(0), HaplotypeAllele::Allele1);
    }

    #[test]
    fn missing_genotypes_are_imputed_from_zygosity_and_phase() {
        let (mut pedigree, individual) =
            single(&[Genotype::Missing, Genotype::Missing, Genotype::Missing]);
        let mut cnf = PedCnf::default();
        let h0 = cnf.get_h(individual, 0) as i32;
        let w0 = cnf.get_w(individual, 0) as i32;
        let h1 = cnf.get_h(individual, 1) as i32;
        let w1 = cnf.get_w(individual, 1) as i32;
        let h2 = cnf.get_h(individual, 2) as i32;
        let w2 = cnf.get_w(individual, 2) as i32;
        cnf.apply_assignment(&Assignment::from_literals(vec![
            h0, -w0, -h1, -w1, h2, w2,
        ]))
        .unwrap();

        compute_zrhc(&mut pedigree, &cnf);

        let individual = pedigree.individual(individual);
        assert_eq!(
            individual.genotypes(),
            [Genotype::Homo2, Genotype::Homo1, Genotype::Heter]
        );
        assert_eq!(individual.paternal_haplotype(2), HaplotypeAllele::Allele2);
        assert_eq!(individual.maternal_haplotype(2), HaplotypeAllele::Allele1);
    }

    #[test]
    fn decoding_a_satisfying_assignment_gives_a_valid_configuration() {
        let mut pedigree = Pedigree::with_genotype_length("0", 2).unwrap();
        let father = pedigree.get_by_id_or_create("1").unwrap();
        let mother = pedigree.get_by_id_or_create("2").unwrap();
        let child = pedigree.get_by_id_or_create("3").unwrap();
        pedigree.add_trio(father, mother, child).unwrap();
        for (individual, genotypes) in [
            (father, [Genotype::Heter, Genotype::Heter]),
            (mother, [Genotype::Homo1, Genotype::Homo1]),
            (child, [Genotype::Homo1, Genotype::Heter]),
        ] {
            for (locus, genotype) in genotypes.into_iter().enumerate() {
                pedigree.individual_mut(individual).set_genotype(locus, genotype);
            }
        }
        let mut cnf = PedCnf::default();
        encode_pedigree(&pedigree, &mut cnf).unwrap();

        // The child received the father's strand carrying allele 1 at locus 0 and allele 2 at
        // locus 1, so the father's phases differ.
        let h_father_0 = cnf.get_h(father, 0) as i32;
        let h_father_1 = cnf.get_h(father, 1) as i32;
        let s_father = cnf.get_s(father, child) as i32;
        let h_child_1 = cnf.get_h(child, 1) as i32;
        cnf.apply_assignment(&Assignment::from_literals(vec![
            -h_father_0,
            h_father_1,
            -s_father,
            h_child_1,
        ]))
        .unwrap();
        assert!(cnf.is_satisfying_assignment());

        compute_zrhc(&mut pedigree, &cnf);

        assert_eq!(pedigree.validate(), Ok(()));
        let child = pedigree.individual(child);
        assert_eq!(
            child.paternal_haplotypes(),
            [HaplotypeAllele::Allele1, HaplotypeAllele::Allele2]
        );
    }
}
