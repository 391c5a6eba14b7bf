use super::atom::Atom;
use std::fmt;

const WATER_RESIDUE_NAMES: [&str; 2] = ["HOH", "WAT"];

/// Classifies a residue by the record type it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResidueKind {
    /// A polymer residue read from `ATOM` records.
    Standard,
    /// A water molecule read from `HETATM` records.
    Water,
    /// Any other heteroatom group (ligands, ions, modified residues).
    Ligand,
}

impl ResidueKind {
    /// Determines the residue kind from the record type and residue name.
    pub fn classify(is_hetero_record: bool, residue_name: &str) -> Self {
        if !is_hetero_record {
            ResidueKind::Standard
        } else if WATER_RESIDUE_NAMES.contains(&residue_name) {
            ResidueKind::Water
        } else {
            ResidueKind::Ligand
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, ResidueKind::Standard)
    }

    pub fn is_hetero(&self) -> bool {
        !self.is_standard()
    }
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResidueKind::Standard => "Standard",
                ResidueKind::Water => "Water",
                ResidueKind::Ligand => "Ligand",
            }
        )
    }
}

/// Identifies a residue within its chain.
///
/// Two records belong to the same residue when kind, sequence number and
/// insertion code all match, so a ligand and a polymer residue may share a
/// sequence number without being merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub kind: ResidueKind,
    pub number: isize,
    pub insertion_code: Option<char>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: String,                 // Residue name (e.g., "ALA", "HOH")
    pub number: isize,                // Sequence number from the source file
    pub insertion_code: Option<char>, // Insertion code, if any
    pub kind: ResidueKind,
    pub(crate) atoms: Vec<Atom>, // Atoms in file order
}

impl Residue {
    pub(crate) fn new(key: ResidueKey, name: &str) -> Self {
        Self {
            name: name.to_string(),
            number: key.number,
            insertion_code: key.insertion_code,
            kind: key.kind,
            atoms: Vec::new(),
        }
    }

    /// Adds an atom unless one with the same name is already present.
    ///
    /// Returns `false` when the atom was dropped as an alternate location.
    pub(crate) fn add_atom(&mut self, atom: Atom) -> bool {
        if self.atom(&atom.name).is_some() {
            return false;
        }
        self.atoms.push(atom);
        true
    }

    pub fn key(&self) -> ResidueKey {
        ResidueKey {
            kind: self.kind,
            number: self.number,
            insertion_code: self.insertion_code,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|atom| atom.name == name)
    }

    pub fn is_standard(&self) -> bool {
        self.kind.is_standard()
    }

    /// Whether the residue carries an alpha-carbon backbone atom.
    pub fn has_backbone_atom(&self) -> bool {
        self.atoms.iter().any(Atom::is_backbone_alpha_carbon)
    }
}
