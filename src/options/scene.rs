use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Ball-and-stick geometry and material parameters.
pub struct SceneOptions {
    /// Multiplier on each element's CPK radius.
    pub atom_scale: f32,
    /// Self-illumination strength of atom spheres.
    pub atom_emissive: f32,
    /// Radius of a single-bond cylinder.
    pub bond_radius: f32,
    /// Centre-to-centre distance between the two cylinders of a double bond.
    pub double_spacing: f32,
    /// Offset of each outer cylinder of a triple bond from the axis.
    pub triple_spacing: f32,
    /// Bond cylinder colour, `0xRRGGBB`.
    pub bond_color: u32,
    /// Ambient light strength.
    pub ambient: f32,
    /// Clear colour, linear RGB.
    pub background: [f32; 3],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            atom_scale: 0.5,
            atom_emissive: 0.2,
            bond_radius: 0.08,
            double_spacing: 0.2,
            triple_spacing: 0.25,
            bond_color: 0x4A_5568,
            ambient: 0.4,
            background: [0.01, 0.01, 0.03],
        }
    }
}
