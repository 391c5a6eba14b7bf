use super::chain::Chain;
use std::collections::HashMap;

/// A single model (coordinate set) of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(crate) chains: Vec<Chain>,
    chain_index: HashMap<char, usize>,
}

impl Model {
    pub(crate) fn new() -> Self {
        Self {
            chains: Vec::new(),
            chain_index: HashMap::new(),
        }
    }

    pub(crate) fn chain_entry(&mut self, id: char) -> &mut Chain {
        let idx = *self.chain_index.entry(id).or_insert_with(|| {
            self.chains.push(Chain::new(id));
            self.chains.len() - 1
        });
        &mut self.chains[idx]
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.chain_index.get(&id).map(|&idx| &self.chains[idx])
    }

    /// Chain identifiers in order of first appearance.
    pub fn chain_ids(&self) -> impl Iterator<Item = char> + '_ {
        self.chains.iter().map(|c| c.id)
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// The parsed, read-only hierarchy of a structure file.
///
/// Built once per file by [`StructureBuilder`](super::builder::StructureBuilder)
/// and afterwards only exposed through shared references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedStructure {
    pub(crate) models: Vec<Model>,
}

impl ParsedStructure {
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model(&self, index: usize) -> Option<&Model> {
        self.models.get(index)
    }

    /// The model that all chain-level checks and counts refer to.
    pub fn first_model(&self) -> Option<&Model> {
        self.models.first()
    }

    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.first_model().and_then(|m| m.chain(id))
    }

    /// Number of standard residues in chain `id` of the first model.
    pub fn standard_residue_count(&self, id: char) -> Option<usize> {
        self.chain(id).map(Chain::standard_residue_count)
    }

    pub fn atom_count(&self) -> usize {
        self.models
            .iter()
            .flat_map(|m| m.chains())
            .flat_map(|c| c.residues())
            .map(|r| r.atoms().len())
            .sum()
    }
}
