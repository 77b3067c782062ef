//! Database repository for CRUD operations.
//!
//! Every operation is a single statement, so each one is atomic on its own.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{new_id, CreateProfileRequest, CreateTankRequest, Profile, Tank, TankUpdate};

/// Hard cap on the number of tanks a listing returns.
pub const MAX_TANKS: i64 = 1000;

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== PROFILE OPERATIONS ====================

    /// Insert the profile unless one already exists.
    pub async fn create_profile(&self, request: &CreateProfileRequest) -> Result<Profile, AppError> {
        let row = sqlx::query(
            r#"INSERT INTO Profile (id, slot, last_updated, username, color, role)
               VALUES (?, 1, ?, ?, ?, ?)
               ON CONFLICT(slot) DO NOTHING
               RETURNING id, last_updated, username, color, role"#,
        )
        .bind(new_id())
        .bind(request.last_updated)
        .bind(&request.username)
        .bind(&request.color)
        .bind(&request.role)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(profile_from_row(&row)?),
            None => Err(AppError::SingletonConflict),
        }
    }

    /// Get the profile, if it has been created.
    pub async fn get_profile(&self) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query(
            "SELECT id, last_updated, username, color, role FROM Profile ORDER BY rowid LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(profile_from_row).transpose()?)
    }

    /// Count stored profiles. Never more than one.
    pub async fn count_profiles(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM Profile")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    // ==================== TANK OPERATIONS ====================

    /// List up to `limit` tanks in insertion order.
    pub async fn list_tanks(&self, limit: i64) -> Result<Vec<Tank>, AppError> {
        let rows = sqlx::query(
            "SELECT id, last_updated, location, lat, long FROM Tank ORDER BY rowid LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(tank_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Count stored tanks.
    pub async fn count_tanks(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM Tank")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    /// Get a tank by ID.
    pub async fn get_tank(&self, id: &str) -> Result<Option<Tank>, AppError> {
        let row =
            sqlx::query("SELECT id, last_updated, location, lat, long FROM Tank WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.as_ref().map(tank_from_row).transpose()?)
    }

    /// Create a new tank.
    pub async fn create_tank(&self, request: &CreateTankRequest) -> Result<Tank, AppError> {
        let row = sqlx::query(
            r#"INSERT INTO Tank (id, last_updated, location, lat, long)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id, last_updated, location, lat, long"#,
        )
        .bind(new_id())
        .bind(request.last_updated)
        .bind(&request.location)
        .bind(request.lat)
        .bind(request.long)
        .fetch_one(&self.pool)
        .await?;

        Ok(tank_from_row(&row)?)
    }

    /// Apply the fields present in `update`, bump `Last_Updated` and return
    /// the resulting document, all in one statement.
    pub async fn update_tank(&self, id: &str, update: &TankUpdate) -> Result<Tank, AppError> {
        let row = sqlx::query(
            r#"UPDATE Tank SET
                   location = COALESCE(?, location),
                   lat = COALESCE(?, lat),
                   long = COALESCE(?, long),
                   last_updated = ?
               WHERE id = ?
               RETURNING id, last_updated, location, lat, long"#,
        )
        .bind(&update.location)
        .bind(update.lat)
        .bind(update.long)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(tank_from_row(&row)?),
            None => Err(AppError::tank_not_found()),
        }
    }

    /// Delete a tank.
    pub async fn delete_tank(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM Tank WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::tank_not_found());
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn profile_from_row(row: &SqliteRow) -> Result<Profile, sqlx::Error> {
    Ok(Profile {
        id: row.try_get("id")?,
        last_updated: row.try_get("last_updated")?,
        username: row.try_get("username")?,
        color: row.try_get("color")?,
        role: row.try_get("role")?,
    })
}

fn tank_from_row(row: &SqliteRow) -> Result<Tank, sqlx::Error> {
    Ok(Tank {
        id: row.try_get("id")?,
        last_updated: row.try_get("last_updated")?,
        location: row.try_get("location")?,
        lat: row.try_get("lat")?,
        long: row.try_get("long")?,
    })
}
