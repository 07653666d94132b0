use super::Pedigree;
use crate::error::PedigreeError;

/// An ordered list of independent families which share one genotype length.
#[derive(Clone, Debug, Default)]
pub struct MultifamilyPedigree {
    genotype_length: Option<usize>,
    families: Vec<Pedigree>,
}

impl MultifamilyPedigree {
    pub fn new() -> MultifamilyPedigree {
        MultifamilyPedigree::default()
    }

    pub fn families(&self) -> &[Pedigree] {
        &self.families
    }

    pub fn families_mut(&mut self) -> &mut [Pedigree] {
        &mut self.families
    }

    /// The number of loci shared by all the families, or zero if it is not known yet.
    pub fn genotype_length(&self) -> usize {
        self.genotype_length.unwrap_or(0)
    }

    /// Fixes the genotype length of every family, present and future.
    pub fn set_genotype_length(&mut self, genotype_length: usize) -> Result<(), PedigreeError> {
        if genotype_length == 0 {
            return Err(PedigreeError::ZeroGenotypeLength);
        }
        if let Some(expected) = self.genotype_length {
            if expected != genotype_length {
                return Err(PedigreeError::GenotypeLengthMismatch {
                    expected,
                    actual: genotype_length,
                });
            }
        }

        for family in self.families.iter_mut() {
            family.set_genotype_length(genotype_length)?;
        }
        self.genotype_length = Some(genotype_length);
        Ok(())
    }

    /// Appends a new, empty family and returns it.
    pub fn add_family(&mut self, family_id: impl Into<String>) -> &mut Pedigree {
        let mut family = Pedigree::new(family_id);
        if let Some(genotype_length) = self.genotype_length {
            // The length was validated when it was set on the multifamily pedigree.
            let _ = family.set_genotype_length(genotype_length);
        }
        self.families.push(family);

        let last = self.families.len() - 1;
        &mut self.families[last]
    }

    pub fn last_family_mut(&mut self) -> Option<&mut Pedigree> {
        self.families.last_mut()
    }

    /// Extracts the only family of the pedigree.
    ///
    /// Fails when the pedigree has no family or more than one family.
    pub fn into_single_family(self) -> Result<Pedigree, PedigreeError> {
        match self.families.len() {
            0 => Err(PedigreeError::NoFamily),
            1 => Ok(self.families.into_iter().next().ok_or(PedigreeError::NoFamily)?),
            count => Err(PedigreeError::MoreThanOneFamily(count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pedigree_has_no_single_family() {
        let pedigree = MultifamilyPedigree::new();

        assert_eq!(
            pedigree.into_single_family().unwrap_err(),
            PedigreeError::NoFamily
        );
    }

    #[test]
    fn multiple_families_are_rejected() {
        let mut pedigree = MultifamilyPedigree::new();
        let _ = pedigree.add_family("A");
        let _ = pedigree.add_family("B");

        let error = pedigree.into_single_family().unwrap_err();

        assert_eq!(error, PedigreeError::MoreThanOneFamily(2));
        assert_eq!(
            error.to_string(),
            "The pedigree has more than one family (2 families)."
        );
    }

    #[test]
    fn single_family_is_extracted() {
        let mut pedigree = MultifamilyPedigree::new();
        let _ = pedigree.add_family("A");

        let family = pedigree.into_single_family().unwrap();

        assert_eq!(family.family_id(), "A");
    }

    #[test]
    fn genotype_length_is_shared_by_families() {
        let mut pedigree = MultifamilyPedigree::new();
        let _ = pedigree.add_family("A");
        pedigree.set_genotype_length(3).unwrap();
        let family = pedigree.add_family("B");

        assert_eq!(family.genotype_length(), 3);
        assert!(pedigree.set_genotype_length(4).is_err());
        assert!(pedigree
            .families()
            .iter()
            .all(|family| family.genotype_length() == 3));
    }
}
