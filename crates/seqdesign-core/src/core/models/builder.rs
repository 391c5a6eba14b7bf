use super::atom::Atom;
use super::residue::ResidueKey;
use super::structure::{Model, ParsedStructure};

/// Incrementally assembles a [`ParsedStructure`] from a stream of atom records.
pub struct StructureBuilder {
    structure: ParsedStructure,

    // --- Builder-specific state ---
    current_model: Option<usize>,
    skipped_alternates: usize,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            structure: ParsedStructure::default(),
            current_model: None,
            skipped_alternates: 0,
        }
    }

    /// Opens a new model; subsequent atoms are added to it.
    pub fn start_model(&mut self) -> &mut Self {
        self.structure.models.push(Model::new());
        self.current_model = Some(self.structure.models.len() - 1);
        self
    }

    /// Closes the current model. The next atom opens a fresh one.
    pub fn end_model(&mut self) -> &mut Self {
        self.current_model = None;
        self
    }

    pub fn add_atom(
        &mut self,
        chain_id: char,
        residue_key: ResidueKey,
        residue_name: &str,
        atom: Atom,
    ) -> &mut Self {
        let model_idx = match self.current_model {
            Some(idx) => idx,
            None => {
                self.start_model();
                self.structure.models.len() - 1
            }
        };

        let added = self.structure.models[model_idx]
            .chain_entry(chain_id)
            .residue_entry(residue_key, residue_name)
            .add_atom(atom);
        if !added {
            self.skipped_alternates += 1;
        }
        self
    }

    /// Number of atoms dropped because their residue already held an atom of the same name.
    pub fn skipped_alternates(&self) -> usize {
        self.skipped_alternates
    }

    pub fn build(mut self) -> ParsedStructure {
        self.structure.models.retain(|m| !m.is_empty());
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::ResidueKind;
    use nalgebra::Point3;

    fn std_key(number: isize) -> ResidueKey {
        ResidueKey {
            kind: ResidueKind::Standard,
            number,
            insertion_code: None,
        }
    }

    fn atom(name: &str) -> Atom {
        Atom::new(name, None, Point3::origin())
    }

    #[test]
    fn atoms_without_model_record_go_into_implicit_model() {
        let mut builder = StructureBuilder::new();
        builder.add_atom('A', std_key(1), "ALA", atom("CA"));
        let structure = builder.build();
        assert_eq!(structure.models().len(), 1);
        assert_eq!(structure.standard_residue_count('A'), Some(1));
    }

    #[test]
    fn model_records_split_coordinate_sets() {
        let mut builder = StructureBuilder::new();
        builder.start_model();
        builder.add_atom('A', std_key(1), "ALA", atom("CA"));
        builder.end_model();
        builder.start_model();
        builder.add_atom('A', std_key(1), "ALA", atom("CA"));
        builder.add_atom('B', std_key(1), "GLY", atom("CA"));
        builder.end_model();

        let structure = builder.build();
        assert_eq!(structure.models().len(), 2);
        assert_eq!(structure.first_model().unwrap().chains().len(), 1);
        assert_eq!(structure.model(1).unwrap().chains().len(), 2);
        assert!(structure.chain('B').is_none());
    }

    #[test]
    fn empty_models_are_dropped() {
        let mut builder = StructureBuilder::new();
        builder.start_model();
        builder.end_model();
        builder.start_model();
        builder.add_atom('A', std_key(1), "ALA", atom("CA"));
        let structure = builder.build();
        assert_eq!(structure.models().len(), 1);
    }

    #[test]
    fn duplicate_atom_names_are_counted_as_alternates() {
        let mut builder = StructureBuilder::new();
        builder.add_atom('A', std_key(1), "SER", atom("OG"));
        builder.add_atom('A', std_key(1), "SER", atom("OG"));
        assert_eq!(builder.skipped_alternates(), 1);
        assert_eq!(builder.build().atom_count(), 1);
    }
}
