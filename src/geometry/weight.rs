use crate::domain::SteelGrade;

use super::PlateGeometry;

/// Plate volume in mm³
pub fn calculate_volume(width: f64, length: f64, thickness: f64) -> f64 {
    width * length * thickness
}

/// Mass in grams for a volume in mm³ and a density in g/cm³
pub fn calculate_weight(volume_mm3: f64, density_g_per_cm3: f64) -> f64 {
    // 1 cm³ = 1000 mm³
    let volume_cm3 = volume_mm3 / 1000.0;
    volume_cm3 * density_g_per_cm3
}

/// Volume and mass of a plate in a given grade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightResult {
    pub volume_mm3: f64,
    pub mass_g: f64,
    pub mass_kg: f64,
}

impl WeightResult {
    pub fn compute(geometry: &PlateGeometry, grade: SteelGrade) -> Self {
        let volume_mm3 =
            calculate_volume(geometry.width(), geometry.length(), geometry.thickness());
        let mass_g = calculate_weight(volume_mm3, grade.density_g_per_cm3());
        Self {
            volume_mm3,
            mass_g,
            mass_kg: mass_g / 1000.0,
        }
    }
}
