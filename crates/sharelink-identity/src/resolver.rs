//! Identity name resolution against the remote account cache.
//!
//! The remote system exposes no name→id index: each id has a cache file
//! of `key=value` lines under `<account_cache_dir>/<uid|gid>/<id>`, and
//! name search is a best-effort recursive grep over that directory. A
//! match is only as trustworthy as the remote filesystem's cache
//! consistency.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use sharelink_core::AppResult;
use sharelink_entity::{Identity, IdentityKind};
use sharelink_remote::{RemoteExecutor, elevated};

/// Key prefix of the display-name line inside an account cache file.
const NSS_NAME_KEY: &str = "nss_name=";

/// Resolves numeric identity ids to display names, caching results for
/// the lifetime of the resolver. Constructed once per session and passed
/// by handle to all consumers; entries are only purged by an explicit
/// [`IdentityResolver::invalidate_all`].
pub struct IdentityResolver {
    executor: Arc<dyn RemoteExecutor>,
    account_cache_dir: String,
    users: DashMap<String, String>,
    groups: DashMap<String, String>,
}

impl IdentityResolver {
    /// Create a resolver over the given executor and account-cache root.
    pub fn new(executor: Arc<dyn RemoteExecutor>, account_cache_dir: impl Into<String>) -> Self {
        Self {
            executor,
            account_cache_dir: account_cache_dir.into(),
            users: DashMap::new(),
            groups: DashMap::new(),
        }
    }

    fn cache(&self, kind: IdentityKind) -> &DashMap<String, String> {
        match kind {
            IdentityKind::User => &self.users,
            IdentityKind::Group => &self.groups,
        }
    }

    fn id_file_path(&self, kind: IdentityKind, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.account_cache_dir,
            kind.cache_dir_name(),
            id
        )
    }

    /// Resolve an id to its display name.
    ///
    /// Cache hits return without any remote call. On a miss the per-id
    /// cache file is read; an absent file or a failed remote call is a
    /// lookup miss (`None`), never an error.
    pub async fn resolve_name(&self, kind: IdentityKind, id: &str) -> Option<String> {
        if let Some(name) = self.cache(kind).get(id) {
            return Some(name.clone());
        }

        let command = elevated(&format!("cat '{}'", self.id_file_path(kind, id)));
        let output = match self.executor.execute(&command).await {
            Ok(output) => output,
            Err(e) => {
                debug!(%kind, id, error = %e, "Identity lookup failed");
                return None;
            }
        };

        let name = parse_nss_name(&output.stdout)?;
        self.cache(kind).insert(id.to_string(), name.clone());
        Some(name)
    }

    /// Search identities whose display name contains `fragment`,
    /// case-insensitively.
    ///
    /// The in-memory cache is scanned first; only when that yields nothing
    /// is a remote recursive grep over the kind's cache directory issued.
    /// Every distinct matching file is read to extract the display name,
    /// populating the cache as a side effect. Results are deduplicated by
    /// id. A failed remote search is logged and yields an empty list.
    pub async fn search_by_fragment(
        &self,
        kind: IdentityKind,
        fragment: &str,
    ) -> AppResult<Vec<Identity>> {
        let needle = fragment.to_lowercase();

        let mut found: Vec<Identity> = self
            .cache(kind)
            .iter()
            .filter(|entry| entry.value().to_lowercase().contains(&needle))
            .map(|entry| Identity {
                kind,
                id: entry.key().clone(),
                display_name: entry.value().clone(),
            })
            .collect();

        if !found.is_empty() {
            found.sort_by(|a, b| a.id.cmp(&b.id));
            return Ok(found);
        }

        let dir = format!("{}/{}/", self.account_cache_dir, kind.cache_dir_name());
        let command = elevated(&format!(
            "grep -r -i \"{NSS_NAME_KEY}.*{fragment}.*\" {dir} 2>/dev/null"
        ));

        let output = match self.executor.execute(&command).await {
            Ok(output) => output,
            Err(e) => {
                warn!(%kind, fragment, error = %e, "Identity search failed");
                return Ok(Vec::new());
            }
        };

        let mut seen: HashSet<String> = HashSet::new();
        for line in output.stdout.lines() {
            let Some((file_path, _)) = line.split_once(':') else {
                continue;
            };
            let Some(id) = file_path.rsplit('/').next().filter(|s| !s.is_empty()) else {
                continue;
            };
            if !seen.insert(id.to_string()) {
                continue;
            }

            let display_name = self
                .resolve_name(kind, id)
                .await
                .unwrap_or_else(|| "unknown".to_string());
            found.push(Identity {
                kind,
                id: id.to_string(),
                display_name,
            });
        }

        Ok(found)
    }

    /// Clear both caches; subsequent resolutions re-fetch from the remote
    /// host.
    pub fn invalidate_all(&self) {
        self.users.clear();
        self.groups.clear();
        info!("Identity caches cleared");
    }
}

/// Extract the display name from account cache file content.
///
/// The first `nss_name=` line wins; when the value contains a domain
/// separator the name is everything after it.
fn parse_nss_name(content: &str) -> Option<String> {
    let line = content.lines().find(|l| l.starts_with(NSS_NAME_KEY))?;
    let value = line.split_once('=')?.1.trim();
    let name = match value.split_once('\\') {
        Some((_, local)) => local,
        None => value,
    };
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nss_name_with_domain_separator() {
        let content = "uid=1026\nnss_name=NASDOM\\finance\nexpire=0";
        assert_eq!(parse_nss_name(content), Some("finance".to_string()));
    }

    #[test]
    fn nss_name_without_domain_separator() {
        let content = "nss_name=admin";
        assert_eq!(parse_nss_name(content), Some("admin".to_string()));
    }

    #[test]
    fn missing_nss_name_line_is_a_miss() {
        assert_eq!(parse_nss_name("uid=1026\nexpire=0"), None);
        assert_eq!(parse_nss_name(""), None);
    }
}
