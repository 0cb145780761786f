use serde::Serialize;

use crate::model::{Block, District};

const SUCCESS: &str = "success";
const ERROR: &str = "error";

/// Success envelope shared by every endpoint. Which optional members are
/// present depends on the operation.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: SUCCESS,
            message: None,
            results: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::data(data)
        }
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            results: Some(items.len()),
            ..Self::data(items)
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: Some(message.into()),
            results: None,
            data: None,
        }
    }
}

/// `GET /districts/:id/blocks`
#[derive(Debug, Serialize)]
pub struct DistrictBlocksEnvelope {
    pub status: &'static str,
    pub district: District,
    pub results: usize,
    pub data: Vec<Block>,
}

impl DistrictBlocksEnvelope {
    pub fn new(district: District, blocks: Vec<Block>) -> Self {
        Self {
            status: SUCCESS,
            district,
            results: blocks.len(),
            data: blocks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
        }
    }
}
