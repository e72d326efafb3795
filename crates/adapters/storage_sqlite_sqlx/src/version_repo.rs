//! `SQLite` implementation of [`VersionRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use dosehub_app::ports::VersionRepository;
use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::DoseHubError;
use dosehub_domain::id::VersionId;
use dosehub_domain::version::DeviceVersion;

use crate::error::{StorageError, insert_error};

/// Wrapper for converting database rows into domain [`DeviceVersion`].
struct Wrapper(DeviceVersion);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_type: String = row.try_get("device_type")?;
        let version: String = row.try_get("version")?;

        let id = VersionId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let device_type =
            DeviceType::new(device_type).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(DeviceVersion {
            id,
            device_type,
            version,
        }))
    }
}

const INSERT: &str = "INSERT INTO device_versions (id, device_type, version) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, device_type, version FROM device_versions WHERE id = ?";
const SELECT_BY_LABEL: &str =
    "SELECT id, device_type, version FROM device_versions WHERE device_type = ? AND version = ?";
const SELECT_ALL: &str = "SELECT id, device_type, version FROM device_versions ORDER BY rowid";

/// `SQLite`-backed version repository.
pub struct SqliteVersionRepository {
    pool: SqlitePool,
}

impl SqliteVersionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl VersionRepository for SqliteVersionRepository {
    fn create(
        &self,
        version: DeviceVersion,
    ) -> impl Future<Output = Result<DeviceVersion, DoseHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(version.id.to_string())
                .bind(version.device_type.as_str())
                .bind(&version.version)
                .execute(&pool)
                .await
                .map_err(|err| insert_error(err, "DeviceVersion", version.to_string()))?;

            Ok(version)
        }
    }

    fn get_by_id(
        &self,
        id: VersionId,
    ) -> impl Future<Output = Result<Option<DeviceVersion>, DoseHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_by_label(
        &self,
        device_type: &DeviceType,
        version: &str,
    ) -> impl Future<Output = Result<Option<DeviceVersion>, DoseHubError>> + Send {
        let pool = self.pool.clone();
        let device_type = device_type.to_string();
        let version = version.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_LABEL)
                .bind(device_type)
                .bind(version)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceVersion>, DoseHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
