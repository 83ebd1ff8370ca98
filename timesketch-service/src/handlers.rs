use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::{info, warn};

use timesketch::Config;

use crate::error::ServiceError;
use crate::registry::Registry;
use crate::requests::{AddRequest, DeleteRequest, NewRequest, QuantilesRequest};

pub async fn new_sketch(State(registry): State<Arc<Registry>>, Json(req): Json<NewRequest>) -> String {
    let keys = req.keys.clone();
    match Config::new(req.resolution, req.max_time, req.keys).map_err(ServiceError::from) {
        Ok(config) => {
            let id = registry.create(&config);
            info!(id = %id, keys = ?keys, "created sketch");
            id
        }
        Err(err) => {
            warn!(error = %err, "rejected /new request");
            err.to_string()
        }
    }
}

pub async fn add(State(registry): State<Arc<Registry>>, Json(req): Json<AddRequest>) -> String {
    if registry.add(&req.id, &req.kvs, req.time, req.value, req.count) {
        info!(id = %req.id, time = req.time, "added to sketch");
        "ok".to_string()
    } else {
        warn!(id = %req.id, "add: id not found");
        ServiceError::NotFound.to_string()
    }
}

pub async fn quantiles(
    State(registry): State<Arc<Registry>>,
    Json(req): Json<QuantilesRequest>,
) -> String {
    match registry.quantiles(&req.id, &req.kvs, req.time, &req.quants) {
        Some(values) => {
            info!(id = %req.id, time = req.time, "computed quantiles");
            format!("{values:?}")
        }
        None => {
            warn!(id = %req.id, "quantiles: id not found");
            ServiceError::NotFound.to_string()
        }
    }
}

pub async fn delete(State(registry): State<Arc<Registry>>, Json(req): Json<DeleteRequest>) -> String {
    if registry.delete(&req.id) {
        info!(id = %req.id, "deleted sketch");
        "ok".to_string()
    } else {
        warn!(id = %req.id, "delete: id not found");
        ServiceError::NotFound.to_string()
    }
}
