use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Water,
    Weight,
    Meditation,
}

impl Metric {
    pub fn all() -> Vec<Metric> {
        vec![Metric::Water, Metric::Weight, Metric::Meditation]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Water => "water",
            Metric::Weight => "weight",
            Metric::Meditation => "meditation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Water => "Water",
            Metric::Weight => "Weight",
            Metric::Meditation => "Meditation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Water => "ml",
            Metric::Weight => "kg",
            Metric::Meditation => "min",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "water" | "hydration" => Ok(Metric::Water),
            "weight" => Ok(Metric::Weight),
            "meditation" | "meditate" | "med" => Ok(Metric::Meditation),
            _ => Err(anyhow::anyhow!("Unknown metric: {}", s)),
        }
    }
}
