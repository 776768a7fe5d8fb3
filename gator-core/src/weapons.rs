//! Weapon range profiles.
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::state::{AttackContext, WeaponBrackets};

const DEFAULT_WEAPONS_DATA: &str = include_str!("../data/weapons.json");

/// Range profile of one weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,
    #[serde(default)]
    pub min_range: u32,
    pub short_max: u32,
    pub medium_max: u32,
    pub long_max: u32,
}

impl WeaponProfile {
    #[must_use]
    pub const fn brackets(&self) -> WeaponBrackets {
        WeaponBrackets {
            short_max: self.short_max,
            medium_max: self.medium_max,
            long_max: self.long_max,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("weapon '{name}' has non-increasing range brackets {short}/{medium}/{long}")]
    Brackets {
        name: String,
        short: u32,
        medium: u32,
        long: u32,
    },
    #[error("weapon '{0}' is listed more than once")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<WeaponProfile>,
}

impl WeaponCatalog {
    /// Parse and validate a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any weapon fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Catalog bundled with the crate; empty if the embedded data is invalid.
    #[must_use]
    pub fn load_default() -> Self {
        Self::from_json(DEFAULT_WEAPONS_DATA).unwrap_or_else(|err| {
            log::warn!("Bundled weapon catalog rejected: {err}");
            Self::default()
        })
    }

    /// Brackets must be positive and strictly increasing; names unique
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns the first offending weapon.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for weapon in &self.weapons {
            let increasing = weapon.short_max > 0
                && weapon.short_max < weapon.medium_max
                && weapon.medium_max < weapon.long_max;
            if !increasing {
                return Err(CatalogError::Brackets {
                    name: weapon.name.clone(),
                    short: weapon.short_max,
                    medium: weapon.medium_max,
                    long: weapon.long_max,
                });
            }
            if !seen.insert(weapon.name.to_lowercase()) {
                return Err(CatalogError::Duplicate(weapon.name.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&WeaponProfile> {
        self.weapons
            .iter()
            .find(|weapon| weapon.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.iter().map(|weapon| weapon.name.as_str())
    }
}

/// Shared bundled catalog.
#[must_use]
pub fn catalog() -> &'static WeaponCatalog {
    static CATALOG: OnceLock<WeaponCatalog> = OnceLock::new();
    CATALOG.get_or_init(WeaponCatalog::load_default)
}

impl AttackContext {
    /// Arm the attack with a weapon, keeping the current range.
    #[must_use]
    pub fn with_weapon(mut self, weapon: &WeaponProfile) -> Self {
        self.weapon_name.clone_from(&weapon.name);
        self.weapon_brackets = weapon.brackets();
        self.weapon_min_range = weapon.min_range;
        self
    }
}
