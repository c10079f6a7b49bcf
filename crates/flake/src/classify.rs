//! Mapping of walked inputs to dependency records
//!
//! Dispatch is on `locked.type`, the authoritative provider. `original`
//! supplies the loose reference and the owner/repo/host/url used to build
//! the remote. Every provider resolves through [`GIT_REFS_DATASOURCE`]; only
//! `package_name` differs.

use crate::config::ExtractConfig;
use crate::dependency::{GIT_REFS_DATASOURCE, PackageDependency};
use crate::lock::InputType;
use crate::observer::{EventKind, ExtractEvent, ExtractObserver};
use crate::walker::WalkedInput;
use regex::Regex;
use std::sync::LazyLock;

/// `https://<domain>/<owner>/<repo>/archive/<rev>.tar.gz`
#[allow(clippy::expect_used)] // literal pattern, covered by unit tests
static TARBALL_ARCHIVE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://(?<domain>[^/]+)/(?<owner>[^/]+)/(?<repo>[^/]+)/archive/(?<rev>.+)\.tar\.gz$",
    )
    .expect("tarball archive pattern is valid")
});

/// Host used for a forge input when `original.host` is absent or ignored
#[must_use]
pub const fn canonical_host(input_type: InputType) -> Option<&'static str> {
    match input_type {
        InputType::Github => Some("github.com"),
        InputType::Gitlab => Some("gitlab.com"),
        InputType::Sourcehut => Some("git.sr.ht"),
        InputType::Git | InputType::Indirect | InputType::Tarball => None,
    }
}

/// Rewrite a tarball archive URL to the repository it was cut from.
///
/// Returns `None` when the URL does not follow the archive pattern.
#[must_use]
pub fn tarball_repository_url(url: &str) -> Option<String> {
    let captures = TARBALL_ARCHIVE_URL.captures(url)?;
    Some(format!(
        "https://{}/{}/{}",
        &captures["domain"], &captures["owner"], &captures["repo"]
    ))
}

/// Classify one input, or report why it cannot be updated and return `None`.
pub fn classify(
    input: &WalkedInput<'_>,
    config: &ExtractConfig,
    observer: &dyn ExtractObserver,
) -> Option<PackageDependency> {
    let WalkedInput {
        name,
        locked,
        original,
    } = *input;

    let (package_name, current_value) = match locked.input_type {
        forge @ (InputType::Github | InputType::Gitlab | InputType::Sourcehut) => {
            let default_host = canonical_host(forge)?;
            let host = if config.allow_custom_host {
                original.host.as_deref().unwrap_or(default_host)
            } else {
                default_host
            };
            let (Some(owner), Some(repo)) = (original.owner.as_deref(), original.repo.as_deref())
            else {
                observer.observe(ExtractEvent::node(
                    EventKind::IncompleteInput,
                    name,
                    format!("{forge} input '{name}' has no original owner/repo"),
                ));
                return None;
            };
            (
                format!("https://{host}/{owner}/{repo}"),
                original.reference.clone(),
            )
        }
        InputType::Git => {
            let Some(url) = original.url.clone() else {
                observer.observe(ExtractEvent::node(
                    EventKind::IncompleteInput,
                    name,
                    format!("git input '{name}' has no original url"),
                ));
                return None;
            };
            (url, original.reference.clone())
        }
        InputType::Tarball if config.allow_custom_host => {
            let rewritten = original.url.as_deref().and_then(tarball_repository_url);
            let Some(url) = rewritten else {
                observer.observe(ExtractEvent::node(
                    EventKind::UnrecognizedTarballUrl,
                    name,
                    format!(
                        "tarball input '{name}' url {:?} is not a repository archive",
                        original.url.as_deref().unwrap_or_default()
                    ),
                ));
                return None;
            };
            (url, locked.reference.clone())
        }
        other @ (InputType::Tarball | InputType::Indirect) => {
            observer.observe(ExtractEvent::node(
                EventKind::UnsupportedType,
                name,
                format!("unsupported flake.lock type \"{other}\" for input '{name}'"),
            ));
            return None;
        }
    };

    Some(PackageDependency {
        dep_name: name.to_string(),
        current_value,
        current_digest: locked.rev.clone(),
        replace_string: locked.rev.clone(),
        datasource: GIT_REFS_DATASOURCE.to_string(),
        package_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::{LockedInput, OriginalInput};
    use crate::observer::CollectingObserver;

    fn locked(input_type: InputType) -> LockedInput {
        LockedInput {
            input_type,
            rev: "abc123".to_string(),
            nar_hash: "sha256-AAAA".to_string(),
            rev_count: 1,
            last_modified: 1_700_000_000,
            host: None,
            owner: None,
            repo: None,
            reference: None,
            url: None,
        }
    }

    fn original(input_type: InputType) -> OriginalInput {
        OriginalInput {
            input_type,
            host: None,
            owner: Some("foo".to_string()),
            repo: Some("bar".to_string()),
            reference: Some("main".to_string()),
            url: None,
        }
    }

    fn run(
        locked: &LockedInput,
        original: &OriginalInput,
        config: ExtractConfig,
    ) -> (Option<PackageDependency>, CollectingObserver) {
        let observer = CollectingObserver::new();
        let input = WalkedInput {
            name: "dep",
            locked,
            original,
        };
        (classify(&input, &config, &observer), observer)
    }

    #[test]
    fn test_github_round_trip() {
        let (dep, _) = run(
            &locked(InputType::Github),
            &original(InputType::Github),
            ExtractConfig::sibling_file(),
        );
        assert_eq!(
            dep,
            Some(PackageDependency {
                dep_name: "dep".to_string(),
                current_value: Some("main".to_string()),
                current_digest: "abc123".to_string(),
                replace_string: "abc123".to_string(),
                datasource: "git-refs".to_string(),
                package_name: "https://github.com/foo/bar".to_string(),
            })
        );
    }

    #[test]
    fn test_default_hosts() {
        for (input_type, expected) in [
            (InputType::Github, "https://github.com/foo/bar"),
            (InputType::Gitlab, "https://gitlab.com/foo/bar"),
            (InputType::Sourcehut, "https://git.sr.ht/foo/bar"),
        ] {
            let (dep, _) = run(
                &locked(input_type),
                &original(input_type),
                ExtractConfig::sibling_file(),
            );
            assert_eq!(dep.unwrap().package_name, expected);
        }
    }

    #[test]
    fn test_custom_host_honoured_only_when_allowed() {
        let mut orig = original(InputType::Gitlab);
        orig.host = Some("gitlab.gnome.org".to_string());

        let (dep, _) = run(
            &locked(InputType::Gitlab),
            &orig,
            ExtractConfig::sibling_file(),
        );
        assert_eq!(dep.unwrap().package_name, "https://gitlab.gnome.org/foo/bar");

        let (dep, _) = run(&locked(InputType::Gitlab), &orig, ExtractConfig::inline());
        assert_eq!(dep.unwrap().package_name, "https://gitlab.com/foo/bar");
    }

    #[test]
    fn test_dispatch_uses_locked_type() {
        let mut orig = original(InputType::Github);
        orig.url = Some("https://git.example.org/x.git".to_string());

        let (dep, _) = run(&locked(InputType::Git), &orig, ExtractConfig::sibling_file());
        assert_eq!(dep.unwrap().package_name, "https://git.example.org/x.git");
    }

    #[test]
    fn test_git_requires_url() {
        let (dep, observer) = run(
            &locked(InputType::Git),
            &original(InputType::Git),
            ExtractConfig::sibling_file(),
        );
        assert!(dep.is_none());
        assert_eq!(observer.of_kind(EventKind::IncompleteInput).len(), 1);
    }

    #[test]
    fn test_forge_without_owner_is_skipped() {
        let mut orig = original(InputType::Github);
        orig.owner = None;
        let (dep, observer) = run(
            &locked(InputType::Github),
            &orig,
            ExtractConfig::sibling_file(),
        );
        assert!(dep.is_none());
        assert_eq!(observer.of_kind(EventKind::IncompleteInput).len(), 1);
    }

    #[test]
    fn test_tarball_rewrite_and_locked_ref() {
        let mut lock = locked(InputType::Tarball);
        lock.reference = Some("v1.0".to_string());
        let orig = OriginalInput {
            input_type: InputType::Tarball,
            host: None,
            owner: None,
            repo: None,
            reference: Some("ignored".to_string()),
            url: Some("https://example.org/o/r/archive/deadbeef.tar.gz".to_string()),
        };

        let (dep, _) = run(&lock, &orig, ExtractConfig::sibling_file());
        let dep = dep.unwrap();
        assert_eq!(dep.package_name, "https://example.org/o/r");
        assert_eq!(dep.current_value.as_deref(), Some("v1.0"));
        assert_eq!(dep.current_digest, "abc123");
    }

    #[test]
    fn test_tarball_unmatched_url_is_rejected() {
        let orig = OriginalInput {
            input_type: InputType::Tarball,
            host: None,
            owner: None,
            repo: None,
            reference: None,
            url: Some("https://releases.nixos.org/nixos/unstable/nixexprs.tar.xz".to_string()),
        };

        let (dep, observer) = run(
            &locked(InputType::Tarball),
            &orig,
            ExtractConfig::sibling_file(),
        );
        assert!(dep.is_none());
        assert_eq!(observer.of_kind(EventKind::UnrecognizedTarballUrl).len(), 1);
    }

    #[test]
    fn test_tarball_unsupported_without_custom_host() {
        let orig = OriginalInput {
            input_type: InputType::Tarball,
            host: None,
            owner: None,
            repo: None,
            reference: None,
            url: Some("https://example.org/o/r/archive/deadbeef.tar.gz".to_string()),
        };
        let (dep, observer) = run(&locked(InputType::Tarball), &orig, ExtractConfig::inline());
        assert!(dep.is_none());
        assert_eq!(observer.of_kind(EventKind::UnsupportedType).len(), 1);
    }

    #[test]
    fn test_locked_indirect_is_unsupported() {
        let (dep, observer) = run(
            &locked(InputType::Indirect),
            &original(InputType::Github),
            ExtractConfig::sibling_file(),
        );
        assert!(dep.is_none());
        assert_eq!(observer.of_kind(EventKind::UnsupportedType).len(), 1);
    }

    #[test]
    fn test_tarball_repository_url() {
        assert_eq!(
            tarball_repository_url("https://github.com/NixOS/nixpkgs/archive/abc.tar.gz")
                .as_deref(),
            Some("https://github.com/NixOS/nixpkgs")
        );
        assert_eq!(
            tarball_repository_url("http://github.com/NixOS/nixpkgs/archive/abc.tar.gz"),
            None
        );
        assert_eq!(
            tarball_repository_url("https://github.com/NixOS/archive/abc.tar.gz"),
            None
        );
    }
}
