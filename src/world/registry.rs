use std::collections::HashMap;

use super::block::{BlockId, BlockProperties, BASIC_BLOCKS};

/// Block registration data
#[derive(Debug, Clone)]
pub struct BlockRegistration {
    pub id: BlockId,
    pub name: String,
    pub properties: BlockProperties,
}

/// Registry mapping block ids to material properties and names to ids.
///
/// Built once during host startup and shared read-only with the search
/// service; the configured hazard set is resolved against it.
pub struct BlockRegistry {
    /// Map from BlockId to properties
    blocks: HashMap<BlockId, BlockProperties>,
    /// Map from name to BlockId
    name_to_id: HashMap<String, BlockId>,
    /// All registered blocks
    registrations: Vec<BlockRegistration>,
    next_id: u16,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            name_to_id: HashMap::new(),
            registrations: Vec::new(),
            // Ids below 100 are reserved for the built-in table.
            next_id: 100,
        }
    }

    /// Registry pre-populated with the built-in material table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_basic_blocks(&mut registry);
        registry
    }

    /// Register a block under a fixed id. Used for the built-in table.
    pub fn register_fixed(&mut self, id: BlockId, name: &str, properties: BlockProperties) {
        self.blocks.insert(id, properties);
        self.name_to_id.insert(name.to_string(), id);
        self.registrations.push(BlockRegistration {
            id,
            name: name.to_string(),
            properties,
        });
    }

    /// Register a new block type with properties, assigning the next free
    /// id. Game blocks (with a mod prefix like "somemod:") land here.
    pub fn register_block(&mut self, name: &str, properties: BlockProperties) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;

        self.blocks.insert(id, properties);
        self.name_to_id.insert(name.to_string(), id);
        self.registrations.push(BlockRegistration {
            id,
            name: name.to_string(),
            properties,
        });

        log::info!("Registered block '{}' with ID {}", name, id.0);
        id
    }

    /// Get block properties by ID
    pub fn get_properties(&self, id: BlockId) -> Option<&BlockProperties> {
        self.blocks.get(&id)
    }

    /// Get a block ID by name
    pub fn get_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Get all registered blocks
    pub fn get_registrations(&self) -> &[BlockRegistration] {
        &self.registrations
    }

    /// Check if a block ID is registered
    pub fn is_registered(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Install the built-in material table.
pub fn register_basic_blocks(registry: &mut BlockRegistry) {
    for (id, name, properties) in BASIC_BLOCKS {
        registry.register_fixed(*id, name, *properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let registry = BlockRegistry::with_defaults();
        assert!(registry.is_registered(BlockId::AIR));
        assert!(registry.is_registered(BlockId::LAVA));
        assert_eq!(registry.get_id("lava"), Some(BlockId::LAVA));
        assert!(registry
            .get_properties(BlockId::WATER)
            .is_some_and(|p| p.liquid));
    }

    #[test]
    fn test_register_game_block() {
        let mut registry = BlockRegistry::with_defaults();
        let id = registry.register_block("somemod:slime", BlockProperties::SOLID);
        assert!(id.0 >= 100);
        assert_eq!(registry.get_id("somemod:slime"), Some(id));
        assert!(registry.is_registered(id));
    }

    #[test]
    fn test_unknown_lookups() {
        let registry = BlockRegistry::with_defaults();
        assert_eq!(registry.get_id("not_a_block"), None);
        assert!(!registry.is_registered(BlockId(999)));
    }
}
