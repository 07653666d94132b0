use std::fmt::Display;
use std::fmt::Formatter;

use crate::basic_types::Gender;
use crate::basic_types::Genotype;
use crate::basic_types::HaplotypeAllele;
use crate::containers::StorageKey;

/// The dense, zero-based index of an individual inside its [`crate::pedigree::Pedigree`].
///
/// Indices are assigned in creation order and are used to name the SAT variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(u32);

impl StorageKey for IndividualId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        IndividualId(index as u32)
    }
}

impl Display for IndividualId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which parent of a child a link refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParentRole {
    Father,
    Mother,
}

impl Display for ParentRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParentRole::Father => write!(f, "father"),
            ParentRole::Mother => write!(f, "mother"),
        }
    }
}

/// A member of a pedigree.
///
/// The genotype and both haplotype vectors always have the genotype length of the pedigree.
/// Parent and child links are indices into the owning pedigree.
#[derive(Clone, Debug)]
pub struct Individual {
    index: IndividualId,
    id: Option<String>,
    gender: Gender,
    phenotype: String,
    genotypes: Vec<Genotype>,
    paternal: Vec<HaplotypeAllele>,
    maternal: Vec<HaplotypeAllele>,
    father: Option<IndividualId>,
    mother: Option<IndividualId>,
    children: Vec<IndividualId>,
}

impl Individual {
    pub(crate) fn new(index: IndividualId, genotype_length: usize) -> Individual {
        Individual {
            index,
            id: None,
            gender: Gender::Unspecified,
            phenotype: String::new(),
            genotypes: vec![Genotype::Missing; genotype_length],
            paternal: vec![HaplotypeAllele::Missing; genotype_length],
            maternal: vec![HaplotypeAllele::Missing; genotype_length],
            father: None,
            mother: None,
            children: Vec::new(),
        }
    }

    pub fn index(&self) -> IndividualId {
        self.index
    }

    /// The external id, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn phenotype(&self) -> &str {
        &self.phenotype
    }

    pub fn set_phenotype(&mut self, phenotype: impl Into<String>) {
        self.phenotype = phenotype.into();
    }

    pub fn genotype(&self, locus: usize) -> Genotype {
        self.genotypes[locus]
    }

    pub fn genotypes(&self) -> &[Genotype] {
        &self.genotypes
    }

    pub fn set_genotype(&mut self, locus: usize, genotype: Genotype) {
        self.genotypes[locus] = genotype;
    }

    pub fn paternal_haplotype(&self, locus: usize) -> HaplotypeAllele {
        self.paternal[locus]
    }

    pub fn maternal_haplotype(&self, locus: usize) -> HaplotypeAllele {
        self.maternal[locus]
    }

    pub fn paternal_haplotypes(&self) -> &[HaplotypeAllele] {
        &self.paternal
    }

    pub fn maternal_haplotypes(&self) -> &[HaplotypeAllele] {
        &self.maternal
    }

    /// The strand this individual received from the parent with the given role.
    pub fn inherited_haplotypes(&self, role: ParentRole) -> &[HaplotypeAllele] {
        match role {
            ParentRole::Father => &self.paternal,
            ParentRole::Mother => &self.maternal,
        }
    }

    pub fn set_haplotypes(
        &mut self,
        locus: usize,
        paternal: HaplotypeAllele,
        maternal: HaplotypeAllele,
    ) {
        self.paternal[locus] = paternal;
        self.maternal[locus] = maternal;
    }

    pub fn father(&self) -> Option<IndividualId> {
        self.father
    }

    pub fn mother(&self) -> Option<IndividualId> {
        self.mother
    }

    pub fn parent(&self, role: ParentRole) -> Option<IndividualId> {
        match role {
            ParentRole::Father => self.father,
            ParentRole::Mother => self.mother,
        }
    }

    pub fn children(&self) -> &[IndividualId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub(crate) fn set_gender_unchecked(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub(crate) fn set_parent(&mut self, role: ParentRole, parent: IndividualId) {
        match role {
            ParentRole::Father => self.father = Some(parent),
            ParentRole::Mother => self.mother = Some(parent),
        }
    }

    pub(crate) fn add_child(&mut self, child: IndividualId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn genotypes_mut(&mut self) -> &mut [Genotype] {
        &mut self.genotypes
    }
}
