use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WaveError;

const NEUMANN: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const MOORE: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

/// Which adjacent cells count as neighbours during expansion and
/// reconstruction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    /// up, down, left and right
    #[serde(alias = "neiman")]
    Neumann,
    /// the four orthogonal cells plus the diagonals
    #[default]
    Moore,
}

impl Neighborhood {
    /// The offsets to visit, in the order used to break ties
    pub fn offsets(&self) -> &'static [(i64, i64)] {
        match self {
            Neighborhood::Neumann => &NEUMANN,
            Neighborhood::Moore => &MOORE,
        }
    }
}

impl Display for Neighborhood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Neighborhood::Neumann => "neumann",
                Neighborhood::Moore => "moore",
            }
        )
    }
}

impl FromStr for Neighborhood {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neumann" | "neiman" => Ok(Neighborhood::Neumann),
            "moore" => Ok(Neighborhood::Moore),
            _ => Err(WaveError::UnknownNeighborhood(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Moore".parse::<Neighborhood>().unwrap(), Neighborhood::Moore);
        assert_eq!(
            "NEUMANN".parse::<Neighborhood>().unwrap(),
            Neighborhood::Neumann
        );
        assert_eq!(
            "neiman".parse::<Neighborhood>().unwrap(),
            Neighborhood::Neumann
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "hex".parse::<Neighborhood>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, WaveError::UnknownNeighborhood(s) if s == "hex"));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Neighborhood::Neumann.offsets().len(), 4);
        assert_eq!(Neighborhood::Moore.offsets().len(), 8);
        // the moore neighborhood extends the neumann one, so tie-breaking agrees on the first four
        assert_eq!(
            &Neighborhood::Moore.offsets()[..4],
            Neighborhood::Neumann.offsets()
        );
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Neighborhood::Neumann).unwrap(),
            "\"neumann\""
        );
        let n: Neighborhood = serde_json::from_str("\"moore\"").unwrap();
        assert_eq!(n, Neighborhood::Moore);
    }
}
