use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl MenuDay {
    pub fn all() -> Vec<MenuDay> {
        vec![
            MenuDay::Monday,
            MenuDay::Tuesday,
            MenuDay::Wednesday,
            MenuDay::Thursday,
            MenuDay::Friday,
            MenuDay::Saturday,
            MenuDay::Sunday,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuDay::Monday => "monday",
            MenuDay::Tuesday => "tuesday",
            MenuDay::Wednesday => "wednesday",
            MenuDay::Thursday => "thursday",
            MenuDay::Friday => "friday",
            MenuDay::Saturday => "saturday",
            MenuDay::Sunday => "sunday",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MenuDay::Monday => "Monday",
            MenuDay::Tuesday => "Tuesday",
            MenuDay::Wednesday => "Wednesday",
            MenuDay::Thursday => "Thursday",
            MenuDay::Friday => "Friday",
            MenuDay::Saturday => "Saturday",
            MenuDay::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for MenuDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for MenuDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Ok(MenuDay::Monday),
            "tuesday" | "tue" => Ok(MenuDay::Tuesday),
            "wednesday" | "wed" => Ok(MenuDay::Wednesday),
            "thursday" | "thu" => Ok(MenuDay::Thursday),
            "friday" | "fri" => Ok(MenuDay::Friday),
            "saturday" | "sat" => Ok(MenuDay::Saturday),
            "sunday" | "sun" => Ok(MenuDay::Sunday),
            _ => Err(anyhow::anyhow!("Unknown day: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub fn all() -> Vec<MealSlot> {
        vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for MealSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            _ => Err(anyhow::anyhow!("Unknown meal slot: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: Option<i64>,
    pub day: MenuDay,
    pub slot: MealSlot,
    pub dish: String,
}
