use std::fmt::Display;
use std::fmt::Formatter;

/// The observed (or imputed) genotype of an individual at a single biallelic locus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Genotype {
    Homo1,
    Homo2,
    Heter,
    #[default]
    Missing,
}

/// The allele carried by one haplotype strand at a single locus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HaplotypeAllele {
    Allele1,
    Allele2,
    #[default]
    Missing,
}

impl Genotype {
    /// Builds the genotype described by an unordered pair of alleles.
    ///
    /// Returns [`None`] when exactly one of the alleles is missing, since such a pair does not
    /// describe a biallelic genotype.
    pub fn from_alleles(first: HaplotypeAllele, second: HaplotypeAllele) -> Option<Genotype> {
        match (first, second) {
            (HaplotypeAllele::Missing, HaplotypeAllele::Missing) => Some(Genotype::Missing),
            (HaplotypeAllele::Missing, _) | (_, HaplotypeAllele::Missing) => None,
            (HaplotypeAllele::Allele1, HaplotypeAllele::Allele1) => Some(Genotype::Homo1),
            (HaplotypeAllele::Allele2, HaplotypeAllele::Allele2) => Some(Genotype::Homo2),
            _ => Some(Genotype::Heter),
        }
    }

    pub fn is_genotyped(self) -> bool {
        self != Genotype::Missing
    }

    pub fn is_homozygous(self) -> bool {
        matches!(self, Genotype::Homo1 | Genotype::Homo2)
    }

    pub fn is_heterozygous(self) -> bool {
        self == Genotype::Heter
    }

    /// The allele both strands carry if the genotype is homozygous.
    pub fn homozygous_allele(self) -> Option<HaplotypeAllele> {
        match self {
            Genotype::Homo1 => Some(HaplotypeAllele::Allele1),
            Genotype::Homo2 => Some(HaplotypeAllele::Allele2),
            Genotype::Heter | Genotype::Missing => None,
        }
    }

    /// The constant a homozygous genotype contributes to a parity equation.
    pub(crate) fn homozygous_parity(self) -> Option<u8> {
        match self {
            Genotype::Homo1 => Some(0),
            Genotype::Homo2 => Some(1),
            Genotype::Heter | Genotype::Missing => None,
        }
    }

    /// The allele codes written for this genotype.
    pub fn allele_codes(self) -> (u8, u8) {
        match self {
            Genotype::Homo1 => (1, 1),
            Genotype::Homo2 => (2, 2),
            Genotype::Heter => (1, 2),
            Genotype::Missing => (0, 0),
        }
    }
}

impl HaplotypeAllele {
    /// Parses an allele code: `1`, `2`, or `0` for a missing allele.
    pub fn from_code(code: &str) -> Option<HaplotypeAllele> {
        match code {
            "0" => Some(HaplotypeAllele::Missing),
            "1" => Some(HaplotypeAllele::Allele1),
            "2" => Some(HaplotypeAllele::Allele2),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            HaplotypeAllele::Allele1 => 1,
            HaplotypeAllele::Allele2 => 2,
            HaplotypeAllele::Missing => 0,
        }
    }

    pub fn is_missing(self) -> bool {
        self == HaplotypeAllele::Missing
    }
}

impl Display for Genotype {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Genotype::Homo1 => write!(f, "HOMO1"),
            Genotype::Homo2 => write!(f, "HOMO2"),
            Genotype::Heter => write!(f, "HETER"),
            Genotype::Missing => write!(f, "MISS"),
        }
    }
}

impl Display for HaplotypeAllele {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Checks whether the haplotype pair `(first, second)` may explain `genotype`.
///
/// Missing alleles and missing genotypes do not constrain the pair.
pub fn haplotype_genotype_consistent(
    first: HaplotypeAllele,
    second: HaplotypeAllele,
    genotype: Genotype,
) -> bool {
    if first.is_missing() && second.is_missing() {
        return true;
    }

    match genotype {
        Genotype::Missing => true,
        Genotype::Homo1 | Genotype::Homo2 => {
            let allele = genotype.homozygous_allele();
            [first, second]
                .into_iter()
                .filter(|haplotype| !haplotype.is_missing())
                .all(|haplotype| Some(haplotype) == allele)
        }
        Genotype::Heter => first.is_missing() || second.is_missing() || first != second,
    }
}

/// As [`haplotype_genotype_consistent`], but a missing allele is never consistent.
pub fn strict_haplotype_genotype_consistent(
    first: HaplotypeAllele,
    second: HaplotypeAllele,
    genotype: Genotype,
) -> bool {
    !first.is_missing()
        && !second.is_missing()
        && haplotype_genotype_consistent(first, second, genotype)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLELES: [HaplotypeAllele; 3] = [
        HaplotypeAllele::Allele1,
        HaplotypeAllele::Allele2,
        HaplotypeAllele::Missing,
    ];

    #[test]
    fn alleles_are_combined_into_genotypes() {
        use HaplotypeAllele::*;

        assert_eq!(Genotype::from_alleles(Allele1, Allele1), Some(Genotype::Homo1));
        assert_eq!(Genotype::from_alleles(Allele2, Allele2), Some(Genotype::Homo2));
        assert_eq!(Genotype::from_alleles(Allele1, Allele2), Some(Genotype::Heter));
        assert_eq!(Genotype::from_alleles(Allele2, Allele1), Some(Genotype::Heter));
        assert_eq!(Genotype::from_alleles(Missing, Missing), Some(Genotype::Missing));
        assert_eq!(Genotype::from_alleles(Missing, Allele2), None);
        assert_eq!(Genotype::from_alleles(Allele1, Missing), None);
    }

    #[test]
    fn homozygous_genotypes_fix_the_allele() {
        assert_eq!(
            Genotype::Homo1.homozygous_allele(),
            Some(HaplotypeAllele::Allele1)
        );
        assert_eq!(
            Genotype::Homo2.homozygous_allele(),
            Some(HaplotypeAllele::Allele2)
        );
        assert_eq!(Genotype::Heter.homozygous_allele(), None);
        assert_eq!(Genotype::Missing.homozygous_allele(), None);
    }

    #[test]
    fn missing_haplotypes_are_consistent_with_everything() {
        for genotype in [
            Genotype::Homo1,
            Genotype::Homo2,
            Genotype::Heter,
            Genotype::Missing,
        ] {
            assert!(haplotype_genotype_consistent(
                HaplotypeAllele::Missing,
                HaplotypeAllele::Missing,
                genotype
            ));
            assert!(!strict_haplotype_genotype_consistent(
                HaplotypeAllele::Missing,
                HaplotypeAllele::Allele1,
                genotype
            ));
        }
    }

    #[test]
    fn complete_pairs_are_consistent_exactly_with_their_genotype() {
        for first in ALLELES.into_iter().filter(|allele| !allele.is_missing()) {
            for second in ALLELES.into_iter().filter(|allele| !allele.is_missing()) {
                let derived = Genotype::from_alleles(first, second).unwrap();

                for genotype in [Genotype::Homo1, Genotype::Homo2, Genotype::Heter] {
                    assert_eq!(
                        strict_haplotype_genotype_consistent(first, second, genotype),
                        genotype == derived,
                        "{first}|{second} against {genotype}"
                    );
                }
            }
        }
    }

    #[test]
    fn half_missing_pairs_are_checked_against_the_known_allele() {
        use HaplotypeAllele::*;

        assert!(haplotype_genotype_consistent(Allele1, Missing, Genotype::Homo1));
        assert!(!haplotype_genotype_consistent(Allele2, Missing, Genotype::Homo1));
        assert!(haplotype_genotype_consistent(Missing, Allele2, Genotype::Heter));
        assert!(haplotype_genotype_consistent(Allele1, Missing, Genotype::Heter));
    }
}
