use crate::model::common::{present, present_or, truthy_or, Id};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct District {
    pub id: Id,
    pub name: String,
    pub population: Option<i64>,
    pub area: Option<f64>,
    pub headquarters: Option<String>,
}

/// Column values written by an insert or an update
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictFields {
    pub name: String,
    pub population: Option<i64>,
    pub area: Option<f64>,
    pub headquarters: Option<String>,
}

impl DistrictFields {
    pub fn into_district(self, id: Id) -> District {
        District {
            id,
            name: self.name,
            population: self.population,
            area: self.area,
            headquarters: self.headquarters,
        }
    }
}

/// Body of `POST /districts`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDistrict {
    pub name: Option<String>,
    pub population: Option<i64>,
    pub area: Option<f64>,
    pub headquarters: Option<String>,
}

impl NewDistrict {
    /// Returns `None` when the required name is missing or empty.
    pub fn into_fields(self) -> Option<DistrictFields> {
        let name = self.name.filter(|name| !name.is_empty())?;
        // Optional values are stored as sent: 0 and "" stay, only absent or null become NULL
        Some(DistrictFields {
            name,
            population: self.population,
            area: self.area,
            headquarters: self.headquarters,
        })
    }
}

/// Body of `PUT /districts/:id`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistrictUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub population: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub area: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub headquarters: Option<Option<String>>,
}

impl DistrictUpdate {
    /// Coalesce the request with the stored row. `name` keeps the stored
    /// value for empty input; the optional columns keep it only when the key
    /// was left out entirely.
    pub fn merge_onto(&self, stored: &District) -> DistrictFields {
        DistrictFields {
            name: truthy_or(self.name.as_deref(), &stored.name),
            population: present_or(&self.population, &stored.population),
            area: present_or(&self.area, &stored.area),
            headquarters: present_or(&self.headquarters, &stored.headquarters),
        }
    }
}
