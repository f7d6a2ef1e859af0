//! Coordinate and address insertion.
//!
//! A save is two independent inserts, one per table, with no spanning
//! transaction. Partial persistence (coordinate saved, address insert
//! failed) is possible; the outcome reports the failure but the batch
//! continues either way.

use async_trait::async_trait;
use log::{error, info};
use sqlx::PgPool;

use crate::models::{CoordinateRecord, StructuredAddress};

/// Result of one save attempt. No variant is fatal to the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Both rows inserted.
    Saved,
    /// A uniqueness constraint rejected an insert; the pair (or part of it)
    /// already exists.
    Conflict,
    /// Any other persistence error.
    StoreFailure,
}

/// Persists a resolved (coordinate, address) pair.
#[async_trait]
pub trait StoreRecords {
    /// Saves the pair, reporting conflicts and failures as outcomes rather
    /// than raising them out of the batch.
    async fn save(
        &self,
        coordinate: &CoordinateRecord,
        address: &StructuredAddress,
    ) -> SaveOutcome;
}

/// PostgreSQL-backed record store over the `coordinate_points` and
/// `addresses` tables.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Creates a store writing through the given pool.
    pub fn new(pool: PgPool) -> PgRecordStore {
        PgRecordStore { pool }
    }
}

#[async_trait]
impl StoreRecords for PgRecordStore {
    async fn save(
        &self,
        coordinate: &CoordinateRecord,
        address: &StructuredAddress,
    ) -> SaveOutcome {
        if let Err(e) = insert_coordinate(&self.pool, coordinate).await {
            return report_insert_error("coordinate_points", coordinate, &e);
        }
        if let Err(e) = insert_address(&self.pool, address).await {
            return report_insert_error("addresses", coordinate, &e);
        }
        info!("Address saved to database: {address:?}");
        SaveOutcome::Saved
    }
}

async fn insert_coordinate(pool: &PgPool, coordinate: &CoordinateRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO coordinate_points (latitude, longitude, distance_km, bearing_degrees)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(coordinate.latitude)
    .bind(coordinate.longitude)
    .bind(coordinate.distance_km)
    .bind(coordinate.bearing_degrees)
    .execute(pool)
    .await?;
    Ok(())
}

async fn insert_address(pool: &PgPool, address: &StructuredAddress) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO addresses (street_number, street_name, neighborhood, city, state,
                                country, postal_code, latitude, longitude)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&address.street_number)
    .bind(&address.street_name)
    .bind(&address.neighborhood)
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.country)
    .bind(&address.postal_code)
    .bind(address.latitude)
    .bind(address.longitude)
    .execute(pool)
    .await?;
    Ok(())
}

fn report_insert_error(
    table: &str,
    coordinate: &CoordinateRecord,
    e: &sqlx::Error,
) -> SaveOutcome {
    let is_conflict = e
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if is_conflict {
        error!(
            "Duplicate record in {table} for ({}, {}): {e}",
            coordinate.latitude, coordinate.longitude
        );
        SaveOutcome::Conflict
    } else {
        error!(
            "Failed to insert into {table} for ({}, {}): {e}",
            coordinate.latitude, coordinate.longitude
        );
        SaveOutcome::StoreFailure
    }
}
