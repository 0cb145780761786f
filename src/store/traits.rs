use crate::model::{Block, BlockFields, District, DistrictFields, Id};
use crate::store::error::StoreResult;

#[async_trait::async_trait]
pub trait DistrictStore: Send + Sync {
    /// All districts ordered by name
    async fn list_districts(&self) -> StoreResult<Vec<District>>;
    async fn get_district(&self, id: Id) -> StoreResult<Option<District>>;
    /// Insert a district and return its generated id
    async fn insert_district(&self, fields: &DistrictFields) -> StoreResult<Id>;
    /// Overwrite every column of a district, returning the affected row count
    async fn update_district(&self, id: Id, fields: &DistrictFields) -> StoreResult<u64>;
    async fn delete_district(&self, id: Id) -> StoreResult<u64>;
    /// Raw block rows belonging to a district, ordered by block name
    async fn list_blocks_in_district(&self, district_id: Id) -> StoreResult<Vec<Block>>;
}

#[async_trait::async_trait]
pub trait BlockStore: Send + Sync {
    /// All blocks joined with their district, ordered by district name then block name
    async fn list_blocks(&self) -> StoreResult<Vec<Block>>;
    /// A block joined with its district name
    async fn get_block(&self, id: Id) -> StoreResult<Option<Block>>;
    /// A raw block row, without the district join
    async fn find_block(&self, id: Id) -> StoreResult<Option<Block>>;
    async fn insert_block(&self, fields: &BlockFields) -> StoreResult<Id>;
    async fn update_block(&self, id: Id, fields: &BlockFields) -> StoreResult<u64>;
    async fn delete_block(&self, id: Id) -> StoreResult<u64>;
}

pub trait Store: DistrictStore + BlockStore + Send + Sync {}
impl<T: DistrictStore + BlockStore + Send + Sync> Store for T {}
