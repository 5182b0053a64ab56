//! Naming conventions shared by `mount` and `create`: repository URLs, local
//! development URLs, project slugs, and shell quoting for scaffold commands.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ProjectType;

/// Organisation-wide conventions, supplied by the CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// SSH host of the source-hosting service.
    pub git_host: String,
    /// Account that owns every project repository.
    pub git_organization: String,
    /// TLD of local development virtual hosts (`http://<folder>.<suffix>`).
    pub domain_suffix: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            git_host: "bitbucket.org".into(),
            git_organization: "digitalmeatdev".into(),
            domain_suffix: "dev".into(),
        }
    }
}

impl Conventions {
    /// `git@<host>:<org>/<project>.git`
    pub fn clone_url(&self, project_code: &str) -> String {
        format!(
            "git@{}:{}/{}.git",
            self.git_host, self.git_organization, project_code
        )
    }

    /// `http://<folder>.<suffix>` without the trailing slash.
    pub fn local_url(&self, folder_name: &str) -> String {
        format!("http://{}.{}", folder_name, self.domain_suffix)
    }

    /// Extract the project code from a remote URL owned by the organisation.
    ///
    /// Accepts both `git@host:org/code.git` and `https://host/org/code.git`.
    pub fn project_code_from_remote(&self, remote: &str) -> Option<String> {
        let remote = remote.trim();
        let (_, rest) = remote.split_once(self.git_organization.as_str())?;
        let rest = rest.strip_prefix(['/', ':'])?;
        let code = rest.strip_suffix(".git").unwrap_or(rest).trim_end_matches('/');
        (!code.is_empty()).then(|| code.to_string())
    }
}

/// Quote a string for POSIX shells: wrap in single quotes and escape any
/// embedded single quote as `'\''`.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Shell command that installs the base scaffolding into `folder`.
pub fn scaffold_command(project_type: ProjectType, folder: &Path) -> String {
    let folder = shell_quote(&folder.display().to_string());
    match project_type {
        ProjectType::Themosis => {
            format!("composer create-project digitalmeat/themosis:dev-master {folder}")
        }
        ProjectType::Laravel => format!(
            "laravel new {folder} > /dev/null 2>&1 || composer create-project --prefer-dist laravel/laravel {folder}"
        ),
        ProjectType::Blank => format!("mkdir {folder}"),
    }
}

/// Lower-case, dash-separated slug used as the default project code.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn clone_url_follows_org_convention() {
        let conventions = Conventions::default();
        assert_eq!(
            conventions.clone_url("myproject"),
            "git@bitbucket.org:digitalmeatdev/myproject.git"
        );
    }

    #[test]
    fn project_code_from_ssh_remote() {
        let conventions = Conventions::default();
        assert_eq!(
            conventions
                .project_code_from_remote("git@bitbucket.org:digitalmeatdev/acme-web.git\n")
                .as_deref(),
            Some("acme-web")
        );
    }

    #[test]
    fn project_code_from_https_remote() {
        let conventions = Conventions::default();
        assert_eq!(
            conventions
                .project_code_from_remote("https://bitbucket.org/digitalmeatdev/acme")
                .as_deref(),
            Some("acme")
        );
    }

    #[test]
    fn foreign_remote_has_no_project_code() {
        let conventions = Conventions::default();
        assert!(conventions
            .project_code_from_remote("git@github.com:someone/else.git")
            .is_none());
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn scaffold_command_quotes_folder_and_stays_in_its_lane() {
        let folder = PathBuf::from("/work/my app");
        let keywords = [
            (ProjectType::Themosis, "themosis"),
            (ProjectType::Laravel, "laravel"),
            (ProjectType::Blank, "mkdir"),
        ];

        for (project_type, own) in keywords {
            let command = scaffold_command(project_type, &folder);
            assert!(command.contains("'/work/my app'"), "{command}");
            assert!(command.contains(own), "{command}");
            for (other, keyword) in keywords {
                if other != project_type {
                    assert!(!command.contains(keyword), "{command} mentions {keyword}");
                }
            }
        }
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("My  Great Project!"), "my-great-project");
        assert_eq!(slugify("--Acme__Web--"), "acme-web");
        assert_eq!(slugify("   "), "");
    }
}
