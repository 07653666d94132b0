use log::trace;

use super::Individual;
use super::IndividualId;
use super::ParentRole;
use crate::basic_types::Gender;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::error::PedigreeError;
use crate::zrhc_assert_advanced;

/// A directed parent-to-child link of a pedigree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParentEdge {
    pub parent: IndividualId,
    pub child: IndividualId,
    pub role: ParentRole,
}

/// A single family: the individuals in creation order and a lookup from external ids.
///
/// The pedigree owns every [`Individual`]; individuals refer to their parents and children
/// through [`IndividualId`]s.
#[derive(Clone, Debug, Default)]
pub struct Pedigree {
    family_id: String,
    genotype_length: Option<usize>,
    individuals: KeyedVec<IndividualId, Individual>,
    ids: HashMap<String, IndividualId>,
}

impl Pedigree {
    pub fn new(family_id: impl Into<String>) -> Pedigree {
        Pedigree {
            family_id: family_id.into(),
            ..Default::default()
        }
    }

    /// Creates an empty family whose individuals have `genotype_length` loci.
    pub fn with_genotype_length(
        family_id: impl Into<String>,
        genotype_length: usize,
    ) -> Result<Pedigree, PedigreeError> {
        let mut pedigree = Pedigree::new(family_id);
        pedigree.set_genotype_length(genotype_length)?;
        Ok(pedigree)
    }

    pub fn family_id(&self) -> &str {
        &self.family_id
    }

    /// The number of loci, or zero if it has not been set yet.
    pub fn genotype_length(&self) -> usize {
        self.genotype_length.unwrap_or(0)
    }

    /// Fixes the number of loci. The length can be set only once; setting the same length again
    /// is allowed.
    pub fn set_genotype_length(&mut self, genotype_length: usize) -> Result<(), PedigreeError> {
        if genotype_length == 0 {
            return Err(PedigreeError::ZeroGenotypeLength);
        }

        match self.genotype_length {
            Some(expected) if expected != genotype_length => {
                Err(PedigreeError::GenotypeLengthMismatch {
                    expected,
                    actual: genotype_length,
                })
            }
            _ => {
                self.genotype_length = Some(genotype_length);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Appends a new individual with every genotype and haplotype missing.
    pub fn add_individual(&mut self) -> Result<IndividualId, PedigreeError> {
        let genotype_length = self
            .genotype_length
            .ok_or(PedigreeError::UnsetGenotypeLength)?;

        let index = IndividualId::create_from_index(self.individuals.len());
        Ok(self.individuals.push(Individual::new(index, genotype_length)))
    }

    /// Assigns the external id of `individual`, releasing the id it had before.
    ///
    /// `None` only releases the current id.
    pub fn set_id(
        &mut self,
        individual: IndividualId,
        id: Option<String>,
    ) -> Result<(), PedigreeError> {
        if let Some(id) = id.as_ref() {
            match self.ids.get(id) {
                Some(&owner) if owner == individual => return Ok(()),
                Some(_) => return Err(PedigreeError::DuplicateId(id.clone())),
                None => {}
            }
        }

        if let Some(previous) = self.individuals[individual].id() {
            let _ = self.ids.remove(previous);
        }
        if let Some(id) = id.as_ref() {
            let _ = self.ids.insert(id.clone(), individual);
        }
        self.individuals[individual].set_id(id);

        Ok(())
    }

    /// Changes the gender of `individual`. The gender of an individual with children cannot
    /// change.
    pub fn set_gender(
        &mut self,
        individual: IndividualId,
        gender: Gender,
    ) -> Result<(), PedigreeError> {
        let current = self.individuals[individual].gender();
        if current != gender && self.individuals[individual].has_children() {
            return Err(PedigreeError::GenderConflict {
                individual,
                current,
                requested: gender,
            });
        }

        self.individuals[individual].set_gender_unchecked(gender);
        Ok(())
    }

    /// Registers `child` as the child of `father` and `mother`.
    ///
    /// The father becomes male and the mother female. Nothing is modified when the trio
    /// conflicts with the genders or the parents recorded so far.
    pub fn add_trio(
        &mut self,
        father: IndividualId,
        mother: IndividualId,
        child: IndividualId,
    ) -> Result<(), PedigreeError> {
        self.check_parent_gender(father, Gender::Male)?;
        self.check_parent_gender(mother, Gender::Female)?;
        if father == mother {
            return Err(PedigreeError::GenderConflict {
                individual: mother,
                current: Gender::Male,
                requested: Gender::Female,
            });
        }
        self.check_parent(child, ParentRole::Father, father)?;
        self.check_parent(child, ParentRole::Mother, mother)?;
        if self.is_ancestor(child, father) || self.is_ancestor(child, mother) {
            return Err(PedigreeError::AncestryCycle(child));
        }

        trace!("Adding trio: father {father}, mother {mother}, child {child}");
        self.individuals[father].set_gender_unchecked(Gender::Male);
        self.individuals[mother].set_gender_unchecked(Gender::Female);
        self.individuals[father].add_child(child);
        self.individuals[mother].add_child(child);
        self.individuals[child].set_parent(ParentRole::Father, father);
        self.individuals[child].set_parent(ParentRole::Mother, mother);

        Ok(())
    }

    /// As [`Pedigree::add_trio`], with every individual given by its external id.
    pub fn add_trio_by_id(
        &mut self,
        father: &str,
        mother: &str,
        child: &str,
    ) -> Result<(), PedigreeError> {
        let father = self.get_by_id(father)?;
        let mother = self.get_by_id(mother)?;
        let child = self.get_by_id(child)?;
        self.add_trio(father, mother, child)
    }

    pub fn get_by_id(&self, id: &str) -> Result<IndividualId, PedigreeError> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| PedigreeError::IdNotFound(id.to_owned()))
    }

    /// Looks up the individual with the given external id, creating it if it does not exist.
    pub fn get_by_id_or_create(&mut self, id: &str) -> Result<IndividualId, PedigreeError> {
        if let Some(&individual) = self.ids.get(id) {
            return Ok(individual);
        }

        let individual = self.add_individual()?;
        self.set_id(individual, Some(id.to_owned()))?;
        Ok(individual)
    }

    pub fn individual(&self, individual: IndividualId) -> &Individual {
        &self.individuals[individual]
    }

    pub fn individual_mut(&mut self, individual: IndividualId) -> &mut Individual {
        &mut self.individuals[individual]
    }

    /// The individuals in creation order.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    pub(crate) fn individuals_mut(&mut self) -> impl Iterator<Item = &mut Individual> {
        self.individuals.iter_mut()
    }

    /// Every parent-to-child link, by child in creation order, with the father link before the
    /// mother link.
    pub fn parent_edges(&self) -> impl Iterator<Item = ParentEdge> + '_ {
        self.individuals.iter().flat_map(|individual| {
            [ParentRole::Father, ParentRole::Mother]
                .into_iter()
                .filter_map(move |role| {
                    individual.parent(role).map(|parent| ParentEdge {
                        parent,
                        child: individual.index(),
                        role,
                    })
                })
        })
    }

    /// Orders the individuals so that parents come before their children.
    ///
    /// Individuals are considered in creation order; the unvisited ancestors of an individual
    /// are emitted first, mother before father. Fails if an individual is its own ancestor.
    pub fn topological_order(&self) -> Result<Vec<IndividualId>, PedigreeError> {
        let mut visited = vec![false; self.len()];
        // Entered but not yet emitted: exactly the individuals on the current ancestry path.
        let mut entered = vec![false; self.len()];
        let mut order = Vec::with_capacity(self.len());
        let mut stack = Vec::new();

        for root in self.individuals.keys() {
            if !visited[root.index()] {
                stack.push(root);
            }

            while let Some(current) = stack.pop() {
                if visited[current.index()] {
                    continue;
                }
                entered[current.index()] = true;

                let individual = &self.individuals[current];
                let unvisited_parent = [individual.mother(), individual.father()]
                    .into_iter()
                    .flatten()
                    .find(|parent| !visited[parent.index()]);

                match unvisited_parent {
                    Some(parent) if entered[parent.index()] => {
                        return Err(PedigreeError::AncestryCycle(parent));
                    }
                    Some(parent) => {
                        stack.push(current);
                        stack.push(parent);
                    }
                    None => {
                        visited[current.index()] = true;
                        order.push(current);
                    }
                }
            }
        }

        zrhc_assert_advanced!(order.len() == self.len());
        Ok(order)
    }

    /// Returns true if `ancestor` is `individual` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: IndividualId, individual: IndividualId) -> bool {
        let mut visited = vec![false; self.len()];
        let mut stack = vec![individual];

        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if visited[current.index()] {
                continue;
            }
            visited[current.index()] = true;

            let current = &self.individuals[current];
            stack.extend([current.father(), current.mother()].into_iter().flatten());
        }

        false
    }

    fn check_parent_gender(
        &self,
        parent: IndividualId,
        required: Gender,
    ) -> Result<(), PedigreeError> {
        let current = self.individuals[parent].gender();
        if current.is_specified() && current != required {
            return Err(PedigreeError::GenderConflict {
                individual: parent,
                current,
                requested: required,
            });
        }
        Ok(())
    }

    fn check_parent(
        &self,
        child: IndividualId,
        role: ParentRole,
        parent: IndividualId,
    ) -> Result<(), PedigreeError> {
        match self.individuals[child].parent(role) {
            Some(existing) if existing != parent => Err(PedigreeError::ParentConflict {
                child,
                role,
                existing,
            }),
            _ => Ok(()),
        }
    }
}
