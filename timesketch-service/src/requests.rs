use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewRequest {
    #[serde(rename = "Resolution")]
    pub resolution: f64,
    #[serde(rename = "MaxTime")]
    pub max_time: i64,
    #[serde(rename = "Keys")]
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Kvs")]
    pub kvs: BTreeMap<String, String>,
    #[serde(rename = "Time")]
    pub time: i64,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Count")]
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct QuantilesRequest {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Kvs")]
    pub kvs: BTreeMap<String, String>,
    #[serde(rename = "Time")]
    pub time: i64,
    #[serde(rename = "Quants")]
    pub quants: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "ID")]
    pub id: String,
}
