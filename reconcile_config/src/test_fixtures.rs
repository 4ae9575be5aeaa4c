//! Shared spec trees and bindings for unit tests.

use serde::{Deserialize, Serialize};

use crate::{Element, Leaf, Scope, Section, SpecTree, ValueType};

/// Game settings used throughout the unit tests.
///
/// Sync-eligible: `volume`, `fov`, `difficulty`, `network.servers`.
/// Reloadable: the advanced toggle, `volume`, `difficulty`,
/// `graphics.vsync`.
pub(crate) fn game_spec() -> SpecTree {
    SpecTree::builder(Scope::Common)
        .comment("Game settings")
        .leaf(
            Leaf::float("volume", 0.5)
                .range(0.0, 1.0)
                .reloadable(true)
                .comment("Master volume"),
        )
        .leaf(Leaf::float("fov", 90.0).range(30.0, 120.0).comment("Field of view"))
        .leaf(Leaf::enumeration("difficulty", ["easy", "normal", "hard"], "normal").reloadable(true))
        .section(
            Section::new("graphics")
                .scope(Scope::Client)
                .leaf(Leaf::boolean("vsync", true).reloadable(true))
                .leaf(Leaf::integer("max_fps", 144).advanced()),
        )
        .section(
            Section::new("network")
                .leaf(Leaf::list("servers", ValueType::String, vec![Element::from("eu")]))
                .leaf(Leaf::string("motd", "welcome").synchronized(false)),
        )
        .build()
        .expect("game spec is consistent")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Graphics {
    pub(crate) vsync: bool,
    pub(crate) max_fps: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Network {
    pub(crate) servers: Vec<String>,
    pub(crate) motd: String,
}

/// Live settings bound to [`game_spec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSettings {
    pub(crate) enable_advanced_config: bool,
    pub(crate) volume: f64,
    pub(crate) fov: f64,
    pub(crate) difficulty: String,
    pub(crate) graphics: Graphics,
    pub(crate) network: Network,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            enable_advanced_config: false,
            volume: 0.5,
            fov: 90.0,
            difficulty: String::from("normal"),
            graphics: Graphics {
                vsync: true,
                max_fps: 144,
            },
            network: Network {
                servers: vec![String::from("eu")],
                motd: String::from("welcome"),
            },
        }
    }
}
