use super::residue::{Residue, ResidueKey};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: char,                              // Chain identifier (e.g., 'A', 'B')
    pub(crate) residues: Vec<Residue>,         // Residues in order of first appearance
    residue_index: HashMap<ResidueKey, usize>, // Map from residue key to its position
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            residues: Vec::new(),
            residue_index: HashMap::new(),
        }
    }

    /// Returns the residue for `key`, creating it at the end of the chain if needed.
    pub(crate) fn residue_entry(&mut self, key: ResidueKey, name: &str) -> &mut Residue {
        let idx = *self.residue_index.entry(key).or_insert_with(|| {
            self.residues.push(Residue::new(key, name));
            self.residues.len() - 1
        });
        &mut self.residues[idx]
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue(&self, key: &ResidueKey) -> Option<&Residue> {
        self.residue_index.get(key).map(|&idx| &self.residues[idx])
    }

    pub fn standard_residues(&self) -> impl Iterator<Item = &Residue> {
        self.residues.iter().filter(|r| r.is_standard())
    }

    pub fn standard_residue_count(&self) -> usize {
        self.standard_residues().count()
    }

    /// Counts standard residues that carry an alpha-carbon atom.
    pub fn backbone_atom_count(&self) -> usize {
        self.standard_residues()
            .filter(|r| r.has_backbone_atom())
            .count()
    }
}
