use crate::model::common::{present, present_or, truthy_id_or, truthy_or, Id};
use serde::{Deserialize, Serialize};

/// A block row. `district_name` is filled by the joined reads and left out
/// of raw table reads such as the per-district listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Block {
    pub id: Id,
    pub name: String,
    pub district_id: Id,
    pub population: Option<i64>,
    pub headquarters: Option<String>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_name: Option<String>,
}

/// Column values written by an insert or an update
#[derive(Debug, Clone, PartialEq)]
pub struct BlockFields {
    pub name: String,
    pub district_id: Id,
    pub population: Option<i64>,
    pub headquarters: Option<String>,
}

impl BlockFields {
    pub fn into_block(self, id: Id) -> Block {
        Block {
            id,
            name: self.name,
            district_id: self.district_id,
            population: self.population,
            headquarters: self.headquarters,
            district_name: None,
        }
    }
}

/// Body of `POST /blocks`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlock {
    pub name: Option<String>,
    pub district_id: Option<Id>,
    pub population: Option<i64>,
    pub headquarters: Option<String>,
}

impl NewBlock {
    /// Returns `None` unless both a non-empty name and a non-zero
    /// district id were sent.
    pub fn into_fields(self) -> Option<BlockFields> {
        let name = self.name.filter(|name| !name.is_empty())?;
        let district_id = self.district_id.filter(|id| *id != 0)?;
        // Optional values are stored as sent: 0 and "" stay, only absent or null become NULL
        Some(BlockFields {
            name,
            district_id,
            population: self.population,
            headquarters: self.headquarters,
        })
    }
}

/// Body of `PUT /blocks/:id`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockUpdate {
    pub name: Option<String>,
    pub district_id: Option<Id>,
    #[serde(default, deserialize_with = "present")]
    pub population: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub headquarters: Option<Option<String>>,
}

impl BlockUpdate {
    /// The district the block is being moved to, if the request names one.
    pub fn target_district(&self) -> Option<Id> {
        self.district_id.filter(|id| *id != 0)
    }

    pub fn merge_onto(&self, stored: &Block) -> BlockFields {
        BlockFields {
            name: truthy_or(self.name.as_deref(), &stored.name),
            district_id: truthy_id_or(self.district_id, stored.district_id),
            population: present_or(&self.population, &stored.population),
            headquarters: present_or(&self.headquarters, &stored.headquarters),
        }
    }
}
