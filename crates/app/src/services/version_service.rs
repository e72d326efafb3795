//! Version service — use-cases for device versions and the version map.

use dosehub_domain::device_type::DeviceType;
use dosehub_domain::error::{ConflictError, DoseHubError, NotFoundError};
use dosehub_domain::id::VersionId;
use dosehub_domain::version::DeviceVersion;
use dosehub_domain::version_map::VersionMap;

use crate::ports::VersionRepository;

/// Application service for device versions.
pub struct VersionService<R> {
    repo: R,
    catalog: Vec<DeviceType>,
}

impl<R: VersionRepository> VersionService<R> {
    /// Create a new service accepting any device type.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            catalog: Vec::new(),
        }
    }

    /// Restrict accepted device types to `catalog` (empty accepts all).
    #[must_use]
    pub fn with_catalog(mut self, catalog: Vec<DeviceType>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Known device types, in configuration order.
    pub fn catalog(&self) -> &[DeviceType] {
        &self.catalog
    }

    /// Register a version, refusing duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::Validation`] if invariants fail or the type is
    /// not in the catalog, [`DoseHubError::Conflict`] when the pair already
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self, version), fields(label = %version))]
    pub async fn add_version(&self, version: DeviceVersion) -> Result<DeviceVersion, DoseHubError> {
        version.validate()?;
        version.device_type.ensure_known(&self.catalog)?;

        if self
            .repo
            .find_by_label(&version.device_type, &version.version)
            .await?
            .is_some()
        {
            return Err(ConflictError {
                entity: "DeviceVersion",
                key: version.to_string(),
            }
            .into());
        }
        self.repo.create(version).await
    }

    /// Look up a version by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DoseHubError::NotFound`] when no version with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_version(&self, id: VersionId) -> Result<DeviceVersion, DoseHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "DeviceVersion",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all versions in registration order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_versions(&self) -> Result<Vec<DeviceVersion>, DoseHubError> {
        self.repo.get_all().await
    }

    /// Snapshot every stored version as a [`VersionMap`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn version_map(&self) -> Result<VersionMap, DoseHubError> {
        let versions = self.repo.get_all().await?;
        Ok(VersionMap::from_versions(&versions))
    }
}
