// Dungeon generation
pub const DEFAULT_DUNGEON_SIZE: usize = 8;
pub const DEFAULT_MONSTER_COUNT: usize = 5;
pub const WALL_CHANCE: f64 = 0.15;
pub const SPAWN_POSITION: (usize, usize) = (0, 0);

// Fog of war: Chebyshev radius revealed around the character after a move
pub const REVEAL_RADIUS: usize = 1;

// Monster scaling: multiplier = 1 + (level - 1) * MONSTER_LEVEL_SCALING
pub const MONSTER_LEVEL_SCALING: f64 = 0.3;

// Loot rolled at monster creation
pub const POTION_DROP_CHANCE: f64 = 0.3;
pub const EQUIPMENT_DROP_CHANCE: f64 = 0.1;

// Combat
pub const MIN_DAMAGE: u32 = 1;
pub const COMBAT_RESOLUTION_DELAY_SECONDS: f64 = 2.0;
pub const COMBAT_LOG_CAPACITY: usize = 20;

// Character creation
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_XP_TO_NEXT_LEVEL: u32 = 100;
pub const STARTING_GOLD: u32 = 100;
pub const STARTING_WEAPON_ID: &str = "sword_1";
pub const BASE_DAMAGE_BONUS: u32 = 5;
pub const MAX_NAME_LENGTH: usize = 20;

// Level-up
// Thresholds stay well inside u32 up to this level
pub const MAX_LEVEL: u32 = 40;
pub const XP_CURVE_MULTIPLIER: f64 = 1.5;
pub const LEVEL_UP_STAT_GAIN: u32 = 2;
pub const LEVEL_UP_MAX_HEALTH_GAIN: u32 = 20;
pub const LEVEL_UP_MAX_MANA_GAIN: u32 = 10;
pub const LEVEL_UP_DAMAGE_GAIN: u32 = 3;
pub const LEVEL_UP_DEFENSE_GAIN: u32 = 2;

// Potions
pub const HEALTH_POTION_ID: &str = "potion_health";
pub const MANA_POTION_ID: &str = "potion_mana";
pub const HEALTH_POTION_RESTORE: u32 = 50;
pub const MANA_POTION_RESTORE: u32 = 30;

// Save system
pub const SAVE_SLOT: &str = "legacy_save";
pub const SAVE_FORMAT_VERSION: u32 = 1;
pub const SAVE_VERSION_MAGIC: u64 = 0x4C45474143590001; // "LEGACY" + format 1
