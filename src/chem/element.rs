//! Static element tables: atomic number → symbol, and CPK display styles.
//!
//! Both tables are plain immutable data; nothing here is mutated at runtime.

/// Symbol used for atomic numbers outside the periodic table.
pub const UNKNOWN_SYMBOL: &str = "X";

/// Element symbols indexed by `atomic_number - 1`.
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al",
    "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe",
    "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr",
    "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm",
    "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W",
    "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf",
    "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Map an atomic number to its chemical symbol.
///
/// Numbers outside `1..=118` resolve to [`UNKNOWN_SYMBOL`].
#[must_use]
pub fn symbol_for_atomic_number(atomic_number: u32) -> &'static str {
    atomic_number
        .checked_sub(1)
        .and_then(|i| SYMBOLS.get(i as usize))
        .copied()
        .unwrap_or(UNKNOWN_SYMBOL)
}

/// Display style for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    /// Packed `0xRRGGBB` color.
    pub color: u32,
    /// Covalent radius in angstrom.
    pub radius: f32,
}

impl ElementStyle {
    const fn new(color: u32, radius: f32) -> Self {
        Self { color, radius }
    }

    /// Color as linear-ish `[r, g, b]` in `0.0..=1.0`.
    #[must_use]
    pub fn rgb(&self) -> [f32; 3] {
        unpack_rgb(self.color)
    }
}

/// Unpack a `0xRRGGBB` color into float channels.
#[must_use]
pub fn unpack_rgb(color: u32) -> [f32; 3] {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

/// Style for any symbol missing from the CPK table (hot pink).
pub const DEFAULT_ELEMENT_STYLE: ElementStyle =
    ElementStyle::new(0xFF69B4, 1.0);

/// CPK color and radius for the given element symbol.
#[must_use]
pub fn element_style(symbol: &str) -> ElementStyle {
    match symbol {
        "H" => ElementStyle::new(0xFFFFFF, 0.31),
        "C" => ElementStyle::new(0x909090, 0.77),
        "N" => ElementStyle::new(0x3050F8, 0.71),
        "O" => ElementStyle::new(0xFF0D0D, 0.66),
        // Halogens
        "F" => ElementStyle::new(0x90E050, 0.64),
        "Cl" => ElementStyle::new(0x1FF01F, 0.99),
        "Br" => ElementStyle::new(0xA62929, 1.14),
        "I" => ElementStyle::new(0x940094, 1.33),
        "P" => ElementStyle::new(0xFF8000, 1.07),
        "S" => ElementStyle::new(0xFFFF30, 1.05),
        "B" => ElementStyle::new(0xFFB5B5, 0.87),
        "Si" => ElementStyle::new(0xF0C8A0, 1.11),
        // Transition metals
        "Fe" => ElementStyle::new(0xE06633, 1.26),
        "Cu" => ElementStyle::new(0xC88033, 1.28),
        "Zn" => ElementStyle::new(0x7D80B0, 1.34),
        // Alkali and alkaline earth metals
        "Li" => ElementStyle::new(0xCC80FF, 1.34),
        "Na" => ElementStyle::new(0xAB5CF2, 1.66),
        "K" => ElementStyle::new(0x8F40D4, 2.03),
        "Mg" => ElementStyle::new(0x8AFF00, 1.41),
        "Ca" => ElementStyle::new(0x3DFF00, 1.76),
        _ => DEFAULT_ELEMENT_STYLE,
    }
}
