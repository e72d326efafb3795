//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use dosehub_app::ports::DeviceRepository;
use dosehub_domain::device::Device;
use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::DoseHubError;
use dosehub_domain::id::{DeviceId, VersionId};

use crate::error::{StorageError, insert_error};

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_type: String = row.try_get("device_type")?;
        let version_id: Option<String> = row.try_get("version_id")?;
        let serial_number: String = row.try_get("serial_number")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let device_type =
            DeviceType::new(device_type).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let version_id = version_id
            .map(|s| VersionId::from_str(&s))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            id,
            device_type,
            version_id,
            serial_number,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, device_type, version_id, serial_number) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str =
    "SELECT id, device_type, version_id, serial_number FROM devices WHERE id = ?";
const SELECT_BY_SERIAL: &str = "SELECT id, device_type, version_id, serial_number FROM devices \
     WHERE device_type = ? AND version_id IS ? AND serial_number = ?";
const SELECT_ALL: &str =
    "SELECT id, device_type, version_id, serial_number FROM devices ORDER BY rowid";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DoseHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(device.id.to_string())
                .bind(device.device_type.as_str())
                .bind(device.version_id.map(|id| id.to_string()))
                .bind(&device.serial_number)
                .execute(&pool)
                .await
                .map_err(|err| insert_error(err, "Device", device.unique_key()))?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DoseHubError>> + Send {
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

    fn find_by_serial(
        &self,
        device_type: &DeviceType,
        version_id: Option<VersionId>,
        serial_number: &str,
    ) -> impl Future<Output = Result<Option<Device>, DoseHubError>> + Send {
        let pool = self.pool.clone();
        let device_type = device_type.to_string();
        let serial_number = serial_number.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_SERIAL)
                .bind(device_type)
                .bind(version_id.map(|id| id.to_string()))
                .bind(serial_number)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DoseHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DoseHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use crate::version_repo::SqliteVersionRepository;
    use dosehub_app::ports::VersionRepository;
    use dosehub_app::services::device_service::DeviceService;
    use dosehub_domain::version::DeviceVersion;

    async fn setup() -> (SqliteDeviceRepository, SqliteVersionRepository) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        (
            SqliteDeviceRepository::new(db.pool().clone()),
            SqliteVersionRepository::new(db.pool().clone()),
        )
    }

    async fn stored_version(repo: &SqliteVersionRepository) -> DeviceVersion {
        repo.create(
            DeviceVersion::builder()
                .device_type("Hawk")
                .version("2.1")
                .build()
                .unwrap(),
        )
        .await
        .unwrap()
    }

    fn hawk(version: Option<VersionId>, serial: &str) -> Device {
        let mut builder = Device::builder().device_type("Hawk").serial_number(serial);
        if let Some(id) = version {
            builder = builder.version_id(id);
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_device_with_version() {
        let (devices, versions) = setup().await;
        let version = stored_version(&versions).await;
        let created = devices.create(hawk(Some(version.id), "0007")).await.unwrap();

        let fetched = devices.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let (devices, _) = setup().await;
        assert!(devices.get_by_id(DeviceId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_find_device_by_serial_with_and_without_version() {
        let (devices, versions) = setup().await;
        let version = stored_version(&versions).await;
        let with_version = devices.create(hawk(Some(version.id), "0007")).await.unwrap();
        let without = devices.create(hawk(None, "0007")).await.unwrap();
        let kind = DeviceType::new("Hawk").unwrap();

        let found = devices
            .find_by_serial(&kind, Some(version.id), "0007")
            .await
            .unwrap();
        assert_eq!(found.map(|d| d.id), Some(with_version.id));

        let found = devices.find_by_serial(&kind, None, "0007").await.unwrap();
        assert_eq!(found.map(|d| d.id), Some(without.id));

        assert!(
            devices
                .find_by_serial(&kind, None, "0008")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn should_list_devices_in_insertion_order() {
        let (devices, _) = setup().await;
        for serial in ["b", "a", "c"] {
            devices.create(hawk(None, serial)).await.unwrap();
        }

        let serials: Vec<String> = devices
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.serial_number)
            .collect();
        assert_eq!(serials, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn should_delete_device_when_exists() {
        let (devices, _) = setup().await;
        let created = devices.create(hawk(None, "x")).await.unwrap();

        devices.delete(created.id).await.unwrap();

        assert!(devices.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_duplicate_device_with_version() {
        let (devices, versions) = setup().await;
        let version = stored_version(&versions).await;
        devices.create(hawk(Some(version.id), "0007")).await.unwrap();

        let err = devices
            .create(hawk(Some(version.id), "0007"))
            .await
            .unwrap_err();
        assert!(matches!(err, DoseHubError::Conflict(_)));
    }

    #[tokio::test]
    async fn should_reject_duplicate_device_without_version() {
        let (devices, _) = setup().await;
        devices.create(hawk(None, "0007")).await.unwrap();

        let err = devices.create(hawk(None, "0007")).await.unwrap_err();
        assert!(matches!(err, DoseHubError::Conflict(_)));
        assert_eq!(devices.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_keep_one_device_when_added_concurrently() {
        let (devices, versions) = setup().await;
        let version = stored_version(&versions).await;
        let service = DeviceService::new(devices, versions);

        let (first, second) = tokio::join!(
            service.add_device(hawk(Some(version.id), "0007")),
            service.add_device(hawk(Some(version.id), "0007")),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(DoseHubError::Conflict(_))))
        );
        assert_eq!(service.list_devices().await.unwrap().len(), 1);
    }
}
