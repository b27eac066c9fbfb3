//! The fourteen municipalities of the Recife metropolitan region (RMR), keyed by
//! their six-digit IBGE codes.

use serde::Serialize;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use chuvas::LatLon;
///
/// let recife = LatLon(-8.058, -34.884);
/// assert_eq!(recife.0, -8.058); // Latitude
/// assert_eq!(recife.1, -34.884); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);

/// A member of the region of interest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Municipality {
    /// Six-digit IBGE code (the seventh, check digit, is dropped).
    pub ibge_code: &'static str,
    /// Canonical spelling, used as the join key against rain stations.
    pub name: &'static str,
    /// Marker position for map renderers.
    pub location: LatLon,
}

/// Region members in the order reports list them.
pub const RMR_MUNICIPALITIES: [Municipality; 14] = [
    Municipality {
        ibge_code: "261160",
        name: "Recife",
        location: LatLon(-8.058, -34.884),
    },
    Municipality {
        ibge_code: "260680",
        name: "Igarassu",
        location: LatLon(-7.834, -34.918),
    },
    Municipality {
        ibge_code: "260345",
        name: "Camaragibe",
        location: LatLon(-8.031, -34.992),
    },
    Municipality {
        ibge_code: "260105",
        name: "Araçoiaba",
        location: LatLon(-7.876, -35.039),
    },
    Municipality {
        ibge_code: "260290",
        name: "Cabo de Santo Agostinho",
        location: LatLon(-8.293, -35.035),
    },
    Municipality {
        ibge_code: "261370",
        name: "São Lourenço da Mata",
        location: LatLon(-8.005, -35.048),
    },
    Municipality {
        ibge_code: "260760",
        name: "Itamaracá",
        location: LatLon(-7.755, -34.821),
    },
    Municipality {
        ibge_code: "260790",
        name: "Jaboatão dos Guararapes",
        location: LatLon(-8.106, -35.006),
    },
    Municipality {
        ibge_code: "261070",
        name: "Paulista",
        location: LatLon(-7.947, -34.887),
    },
    Municipality {
        ibge_code: "260720",
        name: "Ipojuca",
        location: LatLon(-8.397, -35.061),
    },
    Municipality {
        ibge_code: "260940",
        name: "Moreno",
        location: LatLon(-8.140, -35.093),
    },
    Municipality {
        ibge_code: "260960",
        name: "Olinda",
        location: LatLon(-8.010, -34.855),
    },
    Municipality {
        ibge_code: "260005",
        name: "Abreu e Lima",
        location: LatLon(-7.915, -34.908),
    },
    Municipality {
        ibge_code: "260775",
        name: "Itapissuma",
        location: LatLon(-7.747, -34.912),
    },
];

/// Read-only lookups over [`RMR_MUNICIPALITIES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MunicipalityCatalog;

impl MunicipalityCatalog {
    pub fn all(&self) -> &'static [Municipality] {
        &RMR_MUNICIPALITIES
    }

    /// Looks up a six-digit code. Longer codes are not truncated here.
    pub fn by_code(&self, ibge_code: &str) -> Option<&'static Municipality> {
        RMR_MUNICIPALITIES.iter().find(|m| m.ibge_code == ibge_code)
    }

    /// Case-insensitive match against canonical names only; resolve aliases first.
    pub fn by_name(&self, name: &str) -> Option<&'static Municipality> {
        let wanted = name.trim().to_lowercase();
        RMR_MUNICIPALITIES
            .iter()
            .find(|m| m.name.to_lowercase() == wanted)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        RMR_MUNICIPALITIES.iter().any(|m| m.name == name)
    }
}
