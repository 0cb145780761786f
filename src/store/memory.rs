use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::model::{Block, BlockFields, District, DistrictFields, Id};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{BlockStore, DistrictStore};

#[derive(Debug, Default)]
struct Tables {
    districts: BTreeMap<Id, District>,
    blocks: BTreeMap<Id, Block>,
    last_district_id: Id,
    last_block_id: Id,
}

impl Tables {
    fn district_name_taken(&self, name: &str, except: Option<Id>) -> bool {
        self.districts
            .values()
            .any(|d| d.name == name && Some(d.id) != except)
    }

    fn block_name_taken(&self, district_id: Id, name: &str, except: Option<Id>) -> bool {
        self.blocks
            .values()
            .any(|b| b.district_id == district_id && b.name == name && Some(b.id) != except)
    }

    fn joined(&self, block: &Block) -> Option<Block> {
        let district = self.districts.get(&block.district_id)?;
        Some(Block {
            district_name: Some(district.name.clone()),
            ..block.clone()
        })
    }
}

/// In-process store with the same ordering, join, uniqueness and cascade
/// rules as the PostgreSQL schema. Used by the router tests and for running
/// the server without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DistrictStore for MemoryStore {
    async fn list_districts(&self) -> StoreResult<Vec<District>> {
        let tables = self.tables.read();
        let mut districts: Vec<District> = tables.districts.values().cloned().collect();
        districts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(districts)
    }

    async fn get_district(&self, id: Id) -> StoreResult<Option<District>> {
        Ok(self.tables.read().districts.get(&id).cloned())
    }

    async fn insert_district(&self, fields: &DistrictFields) -> StoreResult<Id> {
        let mut tables = self.tables.write();
        if tables.district_name_taken(&fields.name, None) {
            return Err(StoreError::UniqueViolation("districts_name_key".to_string()));
        }

        tables.last_district_id += 1;
        let id = tables.last_district_id;
        tables.districts.insert(id, fields.clone().into_district(id));
        Ok(id)
    }

    async fn update_district(&self, id: Id, fields: &DistrictFields) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        if !tables.districts.contains_key(&id) {
            return Ok(0);
        }
        if tables.district_name_taken(&fields.name, Some(id)) {
            return Err(StoreError::UniqueViolation("districts_name_key".to_string()));
        }

        tables.districts.insert(id, fields.clone().into_district(id));
        Ok(1)
    }

    async fn delete_district(&self, id: Id) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        if tables.districts.remove(&id).is_none() {
            return Ok(0);
        }

        // ON DELETE CASCADE
        tables.blocks.retain(|_, block| block.district_id != id);
        Ok(1)
    }

    async fn list_blocks_in_district(&self, district_id: Id) -> StoreResult<Vec<Block>> {
        let tables = self.tables.read();
        let mut blocks: Vec<Block> = tables
            .blocks
            .values()
            .filter(|b| b.district_id == district_id)
            .cloned()
            .collect();
        blocks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(blocks)
    }
}

#[async_trait::async_trait]
impl BlockStore for MemoryStore {
    async fn list_blocks(&self) -> StoreResult<Vec<Block>> {
        let tables = self.tables.read();
        let mut blocks: Vec<Block> = tables
            .blocks
            .values()
            .filter_map(|b| tables.joined(b))
            .collect();
        blocks.sort_by(|a, b| {
            a.district_name
                .cmp(&b.district_name)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(blocks)
    }

    async fn get_block(&self, id: Id) -> StoreResult<Option<Block>> {
        let tables = self.tables.read();
        Ok(tables.blocks.get(&id).and_then(|b| tables.joined(b)))
    }

    async fn find_block(&self, id: Id) -> StoreResult<Option<Block>> {
        Ok(self.tables.read().blocks.get(&id).cloned())
    }

    async fn insert_block(&self, fields: &BlockFields) -> StoreResult<Id> {
        let mut tables = self.tables.write();
        if !tables.districts.contains_key(&fields.district_id) {
            return Err(StoreError::ForeignKeyViolation(
                "blocks_district_id_fkey".to_string(),
            ));
        }
        if tables.block_name_taken(fields.district_id, &fields.name, None) {
            return Err(StoreError::UniqueViolation(
                "blocks_district_id_name_key".to_string(),
            ));
        }

        tables.last_block_id += 1;
        let id = tables.last_block_id;
        tables.blocks.insert(id, fields.clone().into_block(id));
        Ok(id)
    }

    async fn update_block(&self, id: Id, fields: &BlockFields) -> StoreResult<u64> {
        let mut tables = self.tables.write();
        if !tables.blocks.contains_key(&id) {
            return Ok(0);
        }
        if !tables.districts.contains_key(&fields.district_id) {
            return Err(StoreError::ForeignKeyViolation(
                "blocks_district_id_fkey".to_string(),
            ));
        }
        if tables.block_name_taken(fields.district_id, &fields.name, Some(id)) {
            return Err(StoreError::UniqueViolation(
                "blocks_district_id_name_key".to_string(),
            ));
        }

        tables.blocks.insert(id, fields.clone().into_block(id));
        Ok(1)
    }

    async fn delete_block(&self, id: Id) -> StoreResult<u64> {
        let removed = self.tables.write().blocks.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
