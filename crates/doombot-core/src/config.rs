//! Scenario configuration.
//!
//! A scenario is a YAML document naming the rooms, their monsters and
//! rewards, the players and their starting kit, and optional overrides of
//! the monster catalog. [`ScenarioConfig::build`] turns it into a ready
//! [`GameBot`].
//!
//! ```yaml
//! name: knee-deep
//! catalog:
//!   imp: { required_weapon: chainsaw, ammo_to_kill: 2, exposure_damage: 1 }
//! rooms:
//!   - name: hangar
//!     monsters:
//!       - kind: imp
//!         count: 3
//!       - kind: demon
//!         protector: imp
//!     rewards:
//!       weapons: [pistol]
//!       ammo: { pistol: 4 }
//!       health: 10
//! players:
//!   - name: flynn
//!     health: 100
//!     weapons: [chainsaw]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use doombot_agents::{Player, PlayerError};
use doombot_types::{IdAllocator, MonsterCatalog, MonsterType, Weapon};
use doombot_world::{Monster, Rewards, Room, WorldError};
use serde::Deserialize;

use crate::bot::GameBot;
use crate::error::CoreError;

/// Errors that can occur when loading or building a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the scenario file from disk.
    #[error("failed to read scenario file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The scenario parsed but describes an impossible setup.
    #[error("invalid scenario: {reason}")]
    Invalid {
        /// What is wrong with it.
        reason: String,
    },

    /// A room could not be built.
    #[error("room setup failed: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A player's starting kit could not be applied.
    #[error("player setup failed: {source}")]
    Player {
        /// The underlying player error.
        #[from]
        source: PlayerError,
    },

    /// The bot rejected the rooms or players.
    #[error("bot setup failed: {source}")]
    Core {
        /// The underlying core error.
        #[from]
        source: CoreError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level scenario configuration.
///
/// [`ScenarioConfig::default`] is a small built-in demo scenario. Fields
/// missing from a YAML document are empty, not taken from the demo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioConfig {
    /// Human-readable scenario name.
    #[serde(default = "default_scenario_name")]
    pub name: String,

    /// Per-type overrides of the monster catalog.
    #[serde(default)]
    pub catalog: MonsterCatalog,

    /// Rooms, in declaration order.
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,

    /// Players, in roster order.
    #[serde(default)]
    pub players: Vec<PlayerConfig>,
}

/// One room in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomConfig {
    /// Display name.
    pub name: String,

    /// Monster groups in the room.
    #[serde(default)]
    pub monsters: Vec<MonsterConfig>,

    /// What the player who clears the room receives.
    #[serde(default)]
    pub rewards: Rewards,
}

/// A group of identical monsters in a room.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonsterConfig {
    /// Monster type.
    pub kind: MonsterType,

    /// How many instances to place.
    #[serde(default = "default_count")]
    pub count: u32,

    /// Replace the type's default protector with this one.
    #[serde(default)]
    pub protector: Option<MonsterType>,

    /// Place the monsters with no protector at all.
    #[serde(default)]
    pub unprotected: bool,
}

/// One player in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    /// Unique name.
    pub name: String,

    /// Starting health.
    #[serde(default = "default_health")]
    pub health: i32,

    /// Weapons owned at the start, each with the usual stipend.
    #[serde(default)]
    pub weapons: BTreeSet<Weapon>,

    /// Extra rounds on top of any stipend.
    #[serde(default)]
    pub ammo: BTreeMap<Weapon, u32>,
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not a valid scenario.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not a valid scenario.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Check the scenario for setups the engine cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a monster group sets both
    /// `protector` and `unprotected`, or two players share a name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for room in &self.rooms {
            for group in &room.monsters {
                if group.unprotected && group.protector.is_some() {
                    return Err(ConfigError::Invalid {
                        reason: format!(
                            "{} group in room {:?} sets both protector and unprotected",
                            group.kind, room.name
                        ),
                    });
                }
            }
        }
        let mut names = BTreeSet::new();
        for player in &self.players {
            if !names.insert(player.name.as_str()) {
                return Err(ConfigError::Invalid {
                    reason: format!("duplicate player name {:?}", player.name),
                });
            }
        }
        Ok(())
    }

    /// Validate the scenario and build the bot it describes.
    ///
    /// Monster and room IDs are handed out in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] from [`ScenarioConfig::validate`], or
    /// the error of whichever room, player, or bot failed to build.
    pub fn build(&self) -> Result<GameBot, ConfigError> {
        self.validate()?;

        let mut ids = IdAllocator::new();
        let rooms = self
            .rooms
            .iter()
            .map(|room| room.build(&mut ids, &self.catalog))
            .collect::<Result<Vec<_>, _>>()?;
        let players = self
            .players
            .iter()
            .map(PlayerConfig::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GameBot::new(rooms, players)?)
    }
}

impl RoomConfig {
    fn build(&self, ids: &mut IdAllocator, catalog: &MonsterCatalog) -> Result<Room, ConfigError> {
        let room_id = ids.room();
        let mut monsters = Vec::new();
        for group in &self.monsters {
            for _ in 0..group.count {
                let id = ids.monster();
                let monster = if group.unprotected {
                    Monster::with_protector(id, group.kind, None, catalog)
                } else if let Some(protector) = group.protector {
                    Monster::with_protector(id, group.kind, Some(protector), catalog)
                } else {
                    Monster::new(id, group.kind, catalog)
                };
                monsters.push(monster);
            }
        }
        Ok(Room::new(room_id, self.name.clone(), monsters, self.rewards.clone())?)
    }
}

impl PlayerConfig {
    fn build(&self) -> Result<Player, ConfigError> {
        let mut player = Player::new(self.name.clone(), self.health);
        for &weapon in &self.weapons {
            player.add_weapon(weapon)?;
        }
        for (&weapon, &rounds) in &self.ammo {
            player.add_ammunition(weapon, rounds)?;
        }
        Ok(player)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: default_scenario_name(),
            catalog: MonsterCatalog::new(),
            rooms: vec![
                demo_room(
                    "hangar",
                    &[(MonsterType::Imp, 3), (MonsterType::Demon, 1)],
                    Rewards::none().weapon(Weapon::Chainsaw).health(10),
                ),
                demo_room(
                    "nukage processing",
                    &[(MonsterType::Demon, 2), (MonsterType::Spectre, 1)],
                    Rewards::none().weapon(Weapon::Pistol).ammo(Weapon::Pistol, 6),
                ),
                demo_room(
                    "computer station",
                    &[(MonsterType::LostSoul, 2), (MonsterType::Cacodemon, 1)],
                    Rewards::none()
                        .weapon(Weapon::Shotgun)
                        .ammo(Weapon::Shotgun, 10)
                        .health(20),
                ),
                demo_room(
                    "phobos anomaly",
                    &[
                        (MonsterType::LostSoul, 1),
                        (MonsterType::Cacodemon, 1),
                        (MonsterType::HellKnight, 1),
                        (MonsterType::BaronOfHell, 1),
                    ],
                    Rewards::none().health(50),
                ),
            ],
            players: vec![
                PlayerConfig {
                    name: "flynn".to_owned(),
                    health: default_health(),
                    weapons: BTreeSet::new(),
                    ammo: BTreeMap::new(),
                },
                PlayerConfig {
                    name: "kane".to_owned(),
                    health: 80,
                    weapons: BTreeSet::from([Weapon::Pistol]),
                    ammo: BTreeMap::from([(Weapon::Pistol, 4)]),
                },
            ],
        }
    }
}

fn demo_room(name: &str, groups: &[(MonsterType, u32)], rewards: Rewards) -> RoomConfig {
    RoomConfig {
        name: name.to_owned(),
        monsters: groups
            .iter()
            .map(|&(kind, count)| MonsterConfig {
                kind,
                count,
                protector: None,
                unprotected: false,
            })
            .collect(),
        rewards,
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_scenario_name() -> String {
    "demo".to_owned()
}

const fn default_count() -> u32 {
    1
}

const fn default_health() -> i32 {
    100
}
