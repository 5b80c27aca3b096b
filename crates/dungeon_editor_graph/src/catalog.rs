// SPDX-License-Identifier: MIT OR Apache-2.0
//! Room type catalog.
//!
//! Room types are a closed set of tags. The catalog maps each tag to its
//! attributes and answers the role queries the editor needs ("which type is
//! the entrance", "which type is the placeholder").

use crate::error::{EditorError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Room type tag attached to every node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Unassigned placeholder room
    None,
    /// Level entrance
    Entrance,
    /// Corridor of either orientation
    Corridor,
    /// North-south corridor
    CorridorNS,
    /// East-west corridor
    CorridorEW,
    /// Small room
    SmallRoom,
    /// Medium room
    MediumRoom,
    /// Large room
    LargeRoom,
    /// Room holding a chest
    ChestRoom,
    /// Boss room
    BossRoom,
}

/// Attributes of a room type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeInfo {
    /// Tag this entry describes
    pub room_type: RoomType,
    /// Name shown on nodes and in type pickers
    pub display_name: String,
    /// Whether the type appears in the editor's type picker
    pub displayed_in_editor: bool,
    /// Level entrance
    pub is_entrance: bool,
    /// Unassigned placeholder
    pub is_none: bool,
    /// Any corridor
    pub is_corridor: bool,
    /// Boss room
    pub is_boss_room: bool,
}

impl RoomTypeInfo {
    /// Create an entry with every role flag cleared
    pub fn new(room_type: RoomType, display_name: impl Into<String>) -> Self {
        Self {
            room_type,
            display_name: display_name.into(),
            displayed_in_editor: true,
            is_entrance: false,
            is_none: false,
            is_corridor: false,
            is_boss_room: false,
        }
    }

    /// Mark as the level entrance
    pub fn entrance(mut self) -> Self {
        self.is_entrance = true;
        self
    }

    /// Mark as the unassigned placeholder
    pub fn none(mut self) -> Self {
        self.is_none = true;
        self
    }

    /// Mark as a corridor
    pub fn corridor(mut self) -> Self {
        self.is_corridor = true;
        self
    }

    /// Mark as a boss room
    pub fn boss(mut self) -> Self {
        self.is_boss_room = true;
        self
    }

    /// Leave out of the editor's type picker
    pub fn hidden(mut self) -> Self {
        self.displayed_in_editor = false;
        self
    }
}

/// Lookup table of room types
#[derive(Debug, Clone)]
pub struct RoomTypeCatalog {
    types: IndexMap<RoomType, RoomTypeInfo>,
}

impl RoomTypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Catalog of the standard dungeon room types
    pub fn dungeon() -> Self {
        let mut catalog = Self::new();
        catalog.register(RoomTypeInfo::new(RoomType::None, "None").none());
        catalog.register(RoomTypeInfo::new(RoomType::Entrance, "Entrance").entrance());
        catalog.register(RoomTypeInfo::new(RoomType::Corridor, "Corridor").corridor());
        catalog.register(RoomTypeInfo::new(RoomType::CorridorNS, "Corridor NS").corridor().hidden());
        catalog.register(RoomTypeInfo::new(RoomType::CorridorEW, "Corridor EW").corridor().hidden());
        catalog.register(RoomTypeInfo::new(RoomType::SmallRoom, "Small Room"));
        catalog.register(RoomTypeInfo::new(RoomType::MediumRoom, "Medium Room"));
        catalog.register(RoomTypeInfo::new(RoomType::LargeRoom, "Large Room"));
        catalog.register(RoomTypeInfo::new(RoomType::ChestRoom, "Chest Room"));
        catalog.register(RoomTypeInfo::new(RoomType::BossRoom, "Boss Room").boss());
        catalog
    }

    /// Register a room type, replacing any previous entry for the tag
    pub fn register(&mut self, info: RoomTypeInfo) {
        self.types.insert(info.room_type, info);
    }

    /// Get the attributes of a room type
    pub fn get(&self, room_type: RoomType) -> Option<&RoomTypeInfo> {
        self.types.get(&room_type)
    }

    /// Types offered in the editor's type picker
    pub fn editor_types(&self) -> impl Iterator<Item = &RoomTypeInfo> {
        self.types.values().filter(|t| t.displayed_in_editor)
    }

    /// First registered type matching a predicate
    pub fn find(&self, predicate: impl Fn(&RoomTypeInfo) -> bool) -> Option<&RoomTypeInfo> {
        self.types.values().find(|t| predicate(t))
    }

    /// The type used for the level entrance
    pub fn entrance_type(&self) -> Result<RoomType> {
        self.find(|t| t.is_entrance)
            .map(|t| t.room_type)
            .ok_or(EditorError::MissingRoomType("entrance"))
    }

    /// The placeholder type given to newly created rooms
    pub fn none_type(&self) -> Result<RoomType> {
        self.find(|t| t.is_none)
            .map(|t| t.room_type)
            .ok_or(EditorError::MissingRoomType("none"))
    }

    /// Whether a type carries the entrance role
    pub fn is_entrance(&self, room_type: RoomType) -> bool {
        self.get(room_type).is_some_and(|t| t.is_entrance)
    }

    /// Display name for a type, falling back to the tag's debug name
    pub fn display_name(&self, room_type: RoomType) -> String {
        self.get(room_type)
            .map_or_else(|| format!("{room_type:?}"), |t| t.display_name.clone())
    }
}

impl Default for RoomTypeCatalog {
    fn default() -> Self {
        Self::dungeon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dungeon_catalog_roles() {
        let catalog = RoomTypeCatalog::dungeon();
        assert_eq!(catalog.entrance_type().unwrap(), RoomType::Entrance);
        assert_eq!(catalog.none_type().unwrap(), RoomType::None);
        assert!(catalog.is_entrance(RoomType::Entrance));
        assert!(!catalog.is_entrance(RoomType::BossRoom));
    }

    #[test]
    fn test_missing_roles_are_errors() {
        let mut catalog = RoomTypeCatalog::new();
        catalog.register(RoomTypeInfo::new(RoomType::SmallRoom, "Small Room"));
        assert!(matches!(
            catalog.entrance_type(),
            Err(EditorError::MissingRoomType("entrance"))
        ));
        assert!(matches!(
            catalog.none_type(),
            Err(EditorError::MissingRoomType("none"))
        ));
    }

    #[test]
    fn test_editor_types_hide_oriented_corridors() {
        let catalog = RoomTypeCatalog::dungeon();
        let shown: Vec<_> = catalog.editor_types().map(|t| t.room_type).collect();
        assert!(shown.contains(&RoomType::Corridor));
        assert!(!shown.contains(&RoomType::CorridorNS));
        assert!(!shown.contains(&RoomType::CorridorEW));
    }

    #[test]
    fn test_custom_catalog_from_builders() {
        let mut catalog = RoomTypeCatalog::new();
        catalog.register(RoomTypeInfo::new(RoomType::None, "Empty").none());
        catalog.register(RoomTypeInfo::new(RoomType::LargeRoom, "Start").entrance());
        catalog.register(RoomTypeInfo::new(RoomType::CorridorNS, "Hall").corridor().hidden());
        catalog.register(RoomTypeInfo::new(RoomType::BossRoom, "Lair").boss());

        assert_eq!(catalog.none_type().unwrap(), RoomType::None);
        assert_eq!(catalog.entrance_type().unwrap(), RoomType::LargeRoom);
        assert!(catalog.get(RoomType::CorridorNS).unwrap().is_corridor);
        assert!(catalog.get(RoomType::BossRoom).unwrap().is_boss_room);
        assert_eq!(catalog.editor_types().count(), 3);
    }

    #[test]
    fn test_display_name_fallback() {
        let catalog = RoomTypeCatalog::new();
        assert_eq!(catalog.display_name(RoomType::ChestRoom), "ChestRoom");
        assert_eq!(RoomTypeCatalog::dungeon().display_name(RoomType::ChestRoom), "Chest Room");
    }
}
