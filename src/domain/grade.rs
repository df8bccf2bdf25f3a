use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::PlateError;

/// Steel grades offered for weight calculation
///
/// Densities are nominal values in g/cm³. The table is fixed; variants are
/// listed in display order and the first one is the default selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SteelGrade {
    #[default]
    Sae1020,
    Sae1045,
    AstmA36,
    Sae4140,
    Sae8620,
    Aisi304,
    Aisi316,
    Sae4340,
    Sae1212,
    Aisi420,
}

impl SteelGrade {
    /// All grades in display order
    pub const ALL: [SteelGrade; 10] = [
        SteelGrade::Sae1020,
        SteelGrade::Sae1045,
        SteelGrade::AstmA36,
        SteelGrade::Sae4140,
        SteelGrade::Sae8620,
        SteelGrade::Aisi304,
        SteelGrade::Aisi316,
        SteelGrade::Sae4340,
        SteelGrade::Sae1212,
        SteelGrade::Aisi420,
    ];

    /// Catalogue name, e.g. "AISI 304"
    pub fn name(self) -> &'static str {
        match self {
            SteelGrade::Sae1020 => "SAE 1020",
            SteelGrade::Sae1045 => "SAE 1045",
            SteelGrade::AstmA36 => "ASTM A36",
            SteelGrade::Sae4140 => "SAE 4140",
            SteelGrade::Sae8620 => "SAE 8620",
            SteelGrade::Aisi304 => "AISI 304",
            SteelGrade::Aisi316 => "AISI 316",
            SteelGrade::Sae4340 => "SAE 4340",
            SteelGrade::Sae1212 => "SAE 1212",
            SteelGrade::Aisi420 => "AISI 420",
        }
    }

    /// Density in g/cm³
    pub fn density_g_per_cm3(self) -> f64 {
        match self {
            SteelGrade::Aisi304 => 8.00,
            SteelGrade::Aisi316 => 7.98,
            SteelGrade::Aisi420 => 7.70,
            SteelGrade::Sae1020
            | SteelGrade::Sae1045
            | SteelGrade::AstmA36
            | SteelGrade::Sae4140
            | SteelGrade::Sae8620
            | SteelGrade::Sae4340
            | SteelGrade::Sae1212 => 7.85,
        }
    }

    /// Look up a grade by name
    ///
    /// Matching ignores ASCII case and treats `-` and `_` as spaces, so
    /// "AISI 304", "aisi-304" and "AISI_304" all resolve to the same grade.
    pub fn from_name(name: &str) -> Option<SteelGrade> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|grade| normalize(grade.name()) == wanted)
    }

    /// Comma-separated list of every grade name, for error messages
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|g| g.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_uppercase(),
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SteelGrade {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SteelGrade::from_name(s).ok_or_else(|| PlateError::UnknownGrade(s.to_string()))
    }
}

impl TryFrom<String> for SteelGrade {
    type Error = PlateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
