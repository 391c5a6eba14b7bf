use nalgebra::Point3;

/// Name of the alpha-carbon atom used as the backbone-completeness proxy.
pub const BACKBONE_ATOM_NAME: &str = "CA";

/// Represents a single atom record read from a structure file.
///
/// Atoms are owned by their parent [`Residue`](super::residue::Residue) and are
/// never mutated once the structure has been built.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name with surrounding whitespace removed (e.g., "CA", "N", "OG1").
    pub name: String,
    /// The atom serial number, when the serial column could be read.
    pub serial: Option<usize>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The element symbol from columns 77-78, if present.
    pub element: Option<String>,
}

impl Atom {
    /// Creates a new `Atom` without element information.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `serial` - The serial number from the source record, if any.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, serial: Option<usize>, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            serial,
            position,
            element: None,
        }
    }

    /// Attaches an element symbol to the atom.
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn is_backbone_alpha_carbon(&self) -> bool {
        self.name == BACKBONE_ATOM_NAME
    }
}
