//! Centralized rule tables and thresholds for GATOR scoring.
//!
//! Every number that feeds the target-number math lives here so the rules
//! can only change through reviewed code, never through runtime data.

// Attacker ------------------------------------------------------------------
pub(crate) const ATTACKER_PRONE_MOD: i32 = 2;

// Target movement -----------------------------------------------------------
pub(crate) const TARGET_IMMOBILE_MOD: i32 = -4;
pub(crate) const TARGET_JUMPED_MOD: i32 = 1;
pub(crate) const TARGET_PRONE_ADJACENT_MOD: i32 = -2;
pub(crate) const TARGET_PRONE_NON_ADJACENT_MOD: i32 = 1;

/// `(max hexes moved, modifier)` pairs; anything beyond the last row uses
/// [`TMM_BEYOND_TABLE`].
pub(crate) const TMM_BREAKPOINTS: [(u32, i32); 6] =
    [(2, 0), (4, 1), (6, 2), (9, 3), (17, 4), (24, 5)];
pub(crate) const TMM_BEYOND_TABLE: i32 = 6;

// Other modifiers -----------------------------------------------------------
pub(crate) const LIGHT_WOODS_MOD: i32 = 1;
pub(crate) const HEAVY_WOODS_MOD: i32 = 2;
pub(crate) const INTERVENING_LIGHT_WOODS_PER_HEX: i32 = 1;
pub(crate) const INTERVENING_HEAVY_WOODS_PER_HEX: i32 = 2;
/// Woods points along the line of fire above this value block LOS.
pub(crate) const WOODS_LOS_LIMIT: i32 = 2;
pub(crate) const PARTIAL_COVER_MOD: i32 = 1;

/// `(min heat, modifier)` pairs, checked from hottest down.
pub(crate) const HEAT_BREAKPOINTS: [(u32, i32); 4] = [(24, 4), (17, 3), (13, 2), (8, 1)];

pub(crate) const SENSOR_HIT_MOD: i32 = 2;
pub(crate) const SHOULDER_HIT_MOD: i32 = 4;
pub(crate) const SECONDARY_FORWARD_MOD: i32 = 1;
pub(crate) const SECONDARY_SIDE_REAR_MOD: i32 = 2;
pub(crate) const INDIRECT_FIRE_MOD: i32 = 1;
pub(crate) const SPOTTER_ATTACKED_MOD: i32 = 1;
pub(crate) const SPOTTING_MOD: i32 = 1;
pub(crate) const HEAD_AIM_MOD: i32 = 3;

// Range ---------------------------------------------------------------------
pub(crate) const SHORT_RANGE_MOD: i32 = 0;
pub(crate) const MEDIUM_RANGE_MOD: i32 = 2;
pub(crate) const LONG_RANGE_MOD: i32 = 4;
/// Upper bound on the "inside minimum range" offsets offered to the user.
pub(crate) const MAX_INSIDE_MIN_RANGE_OFFSET: u32 = 5;

// Verdict -------------------------------------------------------------------
/// Highest target number that hits without a roll.
pub const AUTO_HIT_MAX_TN: i32 = 2;
/// Target numbers above this miss without a roll.
pub const AUTO_MISS_ABOVE_TN: i32 = 12;

// Status banding ------------------------------------------------------------
pub(crate) const STATUS_GOOD_MAX_TN: i32 = 4;
pub(crate) const STATUS_WARNING_MAX_TN: i32 = 8;

// Storage -------------------------------------------------------------------
/// Key the browser front end persists score history under.
pub const HISTORY_STORAGE_KEY: &str = "gator-history";

// Defaults ------------------------------------------------------------------
pub(crate) const DEFAULT_GUNNERY: u8 = 4;
pub(crate) const DEFAULT_WEAPON_NAME: &str = "PPC";
pub(crate) const DEFAULT_RANGE_HEXES: u32 = 10;
pub(crate) const DEFAULT_SHORT_MAX: u32 = 6;
pub(crate) const DEFAULT_MEDIUM_MAX: u32 = 12;
pub(crate) const DEFAULT_LONG_MAX: u32 = 18;
pub(crate) const DEFAULT_MIN_RANGE: u32 = 3;
