use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One row of the token-exchange snapshot as served by the 메애기 API.
/// `name` carries the grade label; `date` is displayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeRecord {
    pub world: String,
    pub name: String,
    pub price: u64,
    pub date: String,
}

/// Server partition of the in-game economy. Parsing is exact-match on the
/// Korean label, so `"일반".parse::<World>()` succeeds and anything else
/// (including differently-cased romanizations) does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum World {
    #[strum(to_string = "일반")]
    Normal,
    #[strum(to_string = "리부트")]
    Reboot,
}

impl World {
    /// Slug used for the world icon file name.
    pub fn icon_slug(&self) -> &'static str {
        match self {
            World::Normal => "normal",
            World::Reboot => "reboot",
        }
    }
}

/// Tier of the exchangeable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Grade {
    #[strum(to_string = "브론즈")]
    Bronze,
    #[strum(to_string = "실버")]
    Silver,
    #[strum(to_string = "골드")]
    Gold,
    #[strum(to_string = "다이아")]
    Diamond,
}

impl Grade {
    /// Slug used for the grade icon file name.
    pub fn icon_slug(&self) -> &'static str {
        match self {
            Grade::Bronze => "bronze",
            Grade::Silver => "silver",
            Grade::Gold => "gold",
            Grade::Diamond => "diamond",
        }
    }
}

/// All records of one world, in snapshot order. The snapshot labels are
/// compared case-insensitively, unlike the allow-list parsing above.
pub fn records_for_world<'a>(records: &'a [ExchangeRecord], world: World) -> Vec<&'a ExchangeRecord> {
    let world_label = world.to_string().to_lowercase();

    records
        .iter()
        .filter(|record| record.world.to_lowercase() == world_label)
        .collect()
}

/// First record matching both world and grade, if any. Duplicate
/// (world, grade) pairs in the snapshot are tolerated; the earliest wins.
pub fn find_record<'a>(records: &'a [ExchangeRecord], world: World, grade: Grade) -> Option<&'a ExchangeRecord> {
    let world_label = world.to_string().to_lowercase();
    let grade_label = grade.to_string().to_lowercase();

    records
        .iter()
        .find(|record| record.world.to_lowercase() == world_label && record.name.to_lowercase() == grade_label)
}
