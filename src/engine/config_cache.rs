// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config Cache (§4.1): maps a `(projectPath, toolsVersion, globalProperties)`
//! identity to a stable [`ConfigurationId`], and holds the lazily-attached
//! evaluated [`ProjectInstance`] for each one.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::Mutex;

use crate::core::request::{BuildRequestConfiguration, ConfigurationId};
use crate::project::ProjectInstance;

type IdentityKey = (String, String, Vec<(String, String)>);

struct Inner {
    by_identity: HashMap<IdentityKey, ConfigurationId>,
    by_id: HashMap<ConfigurationId, BuildRequestConfiguration>,
}

/// Registers build configurations and hands out stable ids for them.
///
/// Two configurations with the same identity key always resolve to the same
/// id; [`ConfigCache::rewrite_id`] lets a node-assigned id be replaced by a
/// canonical one without dropping whatever project instance or pending
/// attachment the old id had accumulated.
pub struct ConfigCache {
    next_id: AtomicU32,
    inner: Mutex<Inner>,
}

impl ConfigCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU32::new(1),
            inner: Mutex::new(Inner {
                by_identity: HashMap::new(),
                by_id: HashMap::new(),
            }),
        }
    }

    /// Returns the existing id for `config`'s identity, or registers it and
    /// allocates a fresh one.
    pub async fn add_or_get(&self, config: BuildRequestConfiguration) -> ConfigurationId {
        let key = config.identity_key();
        let mut inner = self.inner.lock().await;
        if let Some(&id) = inner.by_identity.get(&key) {
            return id;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut config = config;
        config.configuration_id = id;
        inner.by_identity.insert(key, id);
        inner.by_id.insert(id, config);
        id
    }

    /// Like [`ConfigCache::add_or_get`], but marks the configuration as
    /// locally generated (§4.1): a node calls this to get a usable id before
    /// a canonical one is known, then later reconciles via
    /// [`ConfigCache::rewrite_id`].
    pub async fn assign_id(&self, mut config: BuildRequestConfiguration) -> ConfigurationId {
        config.was_generated_by_node = true;
        self.add_or_get(config).await
    }

    /// Looks up the configuration registered under `id`.
    pub async fn resolve(&self, id: ConfigurationId) -> Option<BuildRequestConfiguration> {
        self.inner.lock().await.by_id.get(&id).cloned()
    }

    /// Attaches an evaluated project instance to `id`, so future `resolve`
    /// calls return it without re-evaluating.
    pub async fn attach_project(&self, id: ConfigurationId, project: Arc<ProjectInstance>) {
        let mut inner = self.inner.lock().await;
        if let Some(config) = inner.by_id.get_mut(&id) {
            config.project = Some(project);
        }
    }

    /// Moves the configuration registered under `old_id` to `new_id`,
    /// carrying its attached project instance across and clearing
    /// `was_generated_by_node`. A no-op if `old_id` isn't registered.
    pub async fn rewrite_id(&self, old_id: ConfigurationId, new_id: ConfigurationId) {
        let mut inner = self.inner.lock().await;
        let Some(mut config) = inner.by_id.remove(&old_id) else {
            return;
        };
        let key = config.identity_key();
        config.configuration_id = new_id;
        config.was_generated_by_node = false;
        inner.by_id.insert(new_id, config);
        inner.by_identity.insert(key, new_id);
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}
