//! Effective patch configuration: the typed settings the game reads.
//!
//! Each product has its own schema struct ([`RedAlertConfig`],
//! [`TiberianDawnConfig`]).  A schema value is built in layers:
//!
//! 1. Built-in defaults (`PatchSchema::builtin`).
//! 2. The shipped default document (`PatchSchema::populate`).
//! 3. The user document (`PatchSchema::populate` again).
//!
//! Each layer only overwrites fields whose key is present and numeric in that
//! document.  After every layer the schema is clamped, so the value handed to
//! the game always satisfies its range invariants no matter what the files say.
//!
//! Feature toggles are stored as integers in the INI file; any non-zero value
//! enables the feature.

use std::fmt;
use std::ops::RangeInclusive;

use super::document::Document;
use super::product::Product;

/// Section holding on/off feature toggles.
pub const FEATURES: &str = "FEATURES";

/// Section holding integer tunables.
pub const SETTINGS: &str = "SETTINGS";

/// Legal range for the wall build length: at least one segment so walls can be
/// placed at all, at most ten to stay within the placement buffer.
pub const WALL_BUILD_LENGTH_RANGE: RangeInclusive<i32> = 1..=10;

/// Clamps a raw wall build length into [`WALL_BUILD_LENGTH_RANGE`].
pub fn clamp_wall_build_length(value: i32) -> i32 {
    value.clamp(*WALL_BUILD_LENGTH_RANGE.start(), *WALL_BUILD_LENGTH_RANGE.end())
}

/// A product-specific settings schema.
///
/// `Default` supplies the compiled-in values used when no file provides a key.
pub trait PatchSchema: Default + Clone + PartialEq + fmt::Debug {
    /// The product this schema belongs to.
    const PRODUCT: Product;

    /// Overwrites every field whose key is present and numeric in `document`.
    fn overlay(&mut self, document: &Document);

    /// Forces every field into its legal range.
    fn clamp(&mut self);

    /// Built-in defaults, already clamped.
    fn builtin() -> Self {
        let mut config = Self::default();
        config.clamp();
        config
    }

    /// Applies one population step: overlay `document`, then clamp.
    fn populate(&mut self, document: &Document) {
        self.overlay(document);
        self.clamp();
    }
}

/// Reads keys from a document into typed fields, leaving a field untouched
/// when its key is missing or unparsable.
struct Overlay<'a> {
    document: &'a Document,
}

impl Overlay<'_> {
    fn int(&self, target: &mut i32, section: &str, key: &str) {
        if let Some(value) = self.document.get_int(section, key) {
            *target = value;
        }
    }

    fn flag(&self, target: &mut bool, section: &str, key: &str) {
        if let Some(value) = self.document.get_bool(section, key) {
            *target = value;
        }
    }
}

// ── Red Alert ─────────────────────────────────────────────────────────────────

/// Effective settings for Red Alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedAlertConfig {
    /// `FEATURES/ASTAR_PATHING`
    pub enable_astar_pathing: bool,
    /// `FEATURES/OOM_REPAIR`
    pub enable_oom_repair: bool,
    /// `FEATURES/RALLY_POINTS`
    pub enable_rally_points: bool,
    /// `FEATURES/HARVY_QUEUE_JUMP`
    pub enable_harvy_queue_jump: bool,
    /// `FEATURES/INSTANT_CAPTURE`
    pub enable_instant_capture: bool,
    /// `SETTINGS/QUEUE_JUMP_CUTOFF`
    pub harvy_queue_jump_cutoff: i32,
    /// `SETTINGS/ORE_GROWTH_SCALE`, in percent.
    pub ore_growth_scale: i32,
    /// `SETTINGS/WALL_BUILD_LENGTH`, clamped to [`WALL_BUILD_LENGTH_RANGE`].
    pub wall_build_length: i32,
    /// `SETTINGS/BUILDING_GAP_OFFSET`
    pub building_gap_offset: i32,
}

impl Default for RedAlertConfig {
    fn default() -> Self {
        Self {
            enable_astar_pathing: false,
            enable_oom_repair: false,
            enable_rally_points: false,
            enable_harvy_queue_jump: false,
            enable_instant_capture: false,
            harvy_queue_jump_cutoff: 0,
            ore_growth_scale: 100,
            wall_build_length: 1,
            building_gap_offset: 0,
        }
    }
}

impl PatchSchema for RedAlertConfig {
    const PRODUCT: Product = Product::RedAlert;

    fn overlay(&mut self, document: &Document) {
        let o = Overlay { document };

        o.flag(&mut self.enable_astar_pathing, FEATURES, "ASTAR_PATHING");
        o.flag(&mut self.enable_oom_repair, FEATURES, "OOM_REPAIR");
        o.flag(&mut self.enable_rally_points, FEATURES, "RALLY_POINTS");
        o.flag(&mut self.enable_harvy_queue_jump, FEATURES, "HARVY_QUEUE_JUMP");
        o.flag(&mut self.enable_instant_capture, FEATURES, "INSTANT_CAPTURE");

        o.int(&mut self.harvy_queue_jump_cutoff, SETTINGS, "QUEUE_JUMP_CUTOFF");
        o.int(&mut self.ore_growth_scale, SETTINGS, "ORE_GROWTH_SCALE");
        o.int(&mut self.wall_build_length, SETTINGS, "WALL_BUILD_LENGTH");
        o.int(&mut self.building_gap_offset, SETTINGS, "BUILDING_GAP_OFFSET");
    }

    fn clamp(&mut self) {
        self.wall_build_length = clamp_wall_build_length(self.wall_build_length);
    }
}

// ── Tiberian Dawn ─────────────────────────────────────────────────────────────

/// Effective settings for Tiberian Dawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiberianDawnConfig {
    pub enable_rally_points: bool,
    pub enable_astar_pathing: bool,
    pub enable_oom_repair: bool,
    pub enable_harvy_queue_jump: bool,
    pub enable_repair_queue: bool,
    pub enable_harvy_self_repair: bool,
    pub disable_commando_airstrikes: bool,
    pub enable_attack_move: bool,
    pub enable_commando_guard: bool,
    pub building_gap: i32,
    pub harvy_queue_jump_cutoff: i32,
    /// Tiberium growth, in percent.
    pub tib_growth_scale: i32,
    pub wall_build_length: i32,
    pub walls_have_full_cost: bool,
}

impl Default for TiberianDawnConfig {
    fn default() -> Self {
        Self {
            enable_rally_points: false,
            enable_astar_pathing: false,
            enable_oom_repair: false,
            enable_harvy_queue_jump: false,
            enable_repair_queue: false,
            enable_harvy_self_repair: false,
            disable_commando_airstrikes: false,
            enable_attack_move: false,
            enable_commando_guard: false,
            building_gap: 0,
            harvy_queue_jump_cutoff: 0,
            tib_growth_scale: 100,
            wall_build_length: 1,
            walls_have_full_cost: false,
        }
    }
}

impl PatchSchema for TiberianDawnConfig {
    const PRODUCT: Product = Product::TiberianDawn;

    fn overlay(&mut self, document: &Document) {
        let o = Overlay { document };

        o.flag(&mut self.enable_rally_points, FEATURES, "RALLY_POINTS");
        o.flag(&mut self.enable_astar_pathing, FEATURES, "ASTAR_PATHING");
        o.flag(&mut self.enable_oom_repair, FEATURES, "OOM_REPAIR");
        o.flag(&mut self.enable_harvy_queue_jump, FEATURES, "HARVY_QUEUE_JUMP");
        o.flag(&mut self.enable_repair_queue, FEATURES, "REPAIR_QUEUE");
        o.flag(&mut self.enable_harvy_self_repair, FEATURES, "HARVY_SELF_REPAIR");
        o.flag(&mut self.disable_commando_airstrikes, FEATURES, "DISABLE_COMMANDO_AIRSTRIKES");
        o.flag(&mut self.enable_attack_move, FEATURES, "ATTACK_MOVE");
        o.flag(&mut self.enable_commando_guard, FEATURES, "COMMANDO_GUARD");

        o.int(&mut self.building_gap, SETTINGS, "BUILDING_GAP");
        o.int(&mut self.harvy_queue_jump_cutoff, SETTINGS, "QUEUE_JUMP_CUTOFF");
        o.int(&mut self.tib_growth_scale, SETTINGS, "TIB_GROWTH_SCALE");
        o.int(&mut self.wall_build_length, SETTINGS, "WALL_BUILD_LENGTH");
        o.flag(&mut self.walls_have_full_cost, SETTINGS, "WALLS_HAVE_FULL_COST");
    }

    fn clamp(&mut self) {
        self.wall_build_length = clamp_wall_build_length(self.wall_build_length);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
