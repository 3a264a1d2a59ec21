//! Vendor icon code classification.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::LazyLock,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Canonical weather conditions understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "clear-night")]
    ClearNight,
    #[serde(rename = "cloudy")]
    Cloudy,
    #[serde(rename = "exceptional")]
    Exceptional,
    #[serde(rename = "fog")]
    Fog,
    #[serde(rename = "hail")]
    Hail,
    #[serde(rename = "lightning")]
    Lightning,
    #[serde(rename = "lightning-rainy")]
    LightningRainy,
    #[serde(rename = "partlycloudy")]
    PartlyCloudy,
    #[serde(rename = "pouring")]
    Pouring,
    #[serde(rename = "rainy")]
    Rainy,
    #[serde(rename = "snowy")]
    Snowy,
    #[serde(rename = "snowy-rainy")]
    SnowyRainy,
    #[serde(rename = "sunny")]
    Sunny,
    #[serde(rename = "windy")]
    Windy,
    #[serde(rename = "windy-variant")]
    WindyVariant,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::ClearNight => "clear-night",
            Condition::Cloudy => "cloudy",
            Condition::Exceptional => "exceptional",
            Condition::Fog => "fog",
            Condition::Hail => "hail",
            Condition::Lightning => "lightning",
            Condition::LightningRainy => "lightning-rainy",
            Condition::PartlyCloudy => "partlycloudy",
            Condition::Pouring => "pouring",
            Condition::Rainy => "rainy",
            Condition::Snowy => "snowy",
            Condition::SnowyRainy => "snowy-rainy",
            Condition::Sunny => "sunny",
            Condition::Windy => "windy",
            Condition::WindyVariant => "windy-variant",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AccuWeather icon codes grouped by canonical condition, in lookup order.
const ACCUWEATHER_CLASSES: &[(Condition, &[u32])] = &[
    (Condition::ClearNight, &[33, 34, 37]),
    (Condition::Cloudy, &[7, 8, 38]),
    (Condition::Exceptional, &[24, 30, 31]),
    (Condition::Fog, &[11]),
    (Condition::Hail, &[25]),
    (Condition::Lightning, &[15]),
    (Condition::LightningRainy, &[16, 17, 41, 42]),
    (Condition::PartlyCloudy, &[3, 4, 6, 35, 36]),
    (Condition::Pouring, &[18]),
    (Condition::Rainy, &[12, 13, 14, 26, 39, 40]),
    (Condition::Snowy, &[19, 20, 21, 22, 23, 43, 44]),
    (Condition::SnowyRainy, &[29]),
    (Condition::Sunny, &[1, 2, 5]),
    (Condition::Windy, &[32]),
];

static ACCUWEATHER: LazyLock<ConditionTable> = LazyLock::new(|| {
    ConditionTable::new(
        ACCUWEATHER_CLASSES
            .iter()
            .map(|(condition, codes)| (*condition, codes.iter().copied())),
    )
});

/// Ordered mapping from canonical condition to vendor icon codes.
///
/// Declaration order decides ties: if a code appears under several
/// conditions, the first one declared is returned. The code index is built
/// once in [`ConditionTable::new`] with that rule applied.
#[derive(Debug, Clone)]
pub struct ConditionTable {
    entries: Vec<(Condition, Vec<u32>)>,
    index: HashMap<u32, Condition>,
}

impl ConditionTable {
    pub fn new<I, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Condition, C)>,
        C: IntoIterator<Item = u32>,
    {
        let entries: Vec<(Condition, Vec<u32>)> = entries
            .into_iter()
            .map(|(condition, codes)| (condition, codes.into_iter().collect()))
            .collect();

        let mut index = HashMap::new();
        for (condition, codes) in &entries {
            for &code in codes {
                match index.entry(code) {
                    Entry::Vacant(slot) => {
                        slot.insert(*condition);
                    }
                    Entry::Occupied(kept) => {
                        debug!(
                            code,
                            kept = %kept.get(),
                            shadowed = %condition,
                            "Icon code listed under more than one condition"
                        );
                    }
                }
            }
        }

        Self { entries, index }
    }

    /// The built-in AccuWeather table.
    pub fn accuweather() -> &'static ConditionTable {
        &ACCUWEATHER
    }

    /// Resolve a vendor icon code. Unknown codes give `None`.
    pub fn classify(&self, icon: u32) -> Option<Condition> {
        self.index.get(&icon).copied()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Condition, &[u32])> {
        self.entries
            .iter()
            .map(|(condition, codes)| (*condition, codes.as_slice()))
    }
}

impl Default for ConditionTable {
    fn default() -> Self {
        ConditionTable::accuweather().clone()
    }
}
