//! Identity directory consulted by value converters.
//!
//! The host system owns users, teams and project membership. Converters only
//! need two read-only lookups, expressed by the [`Directory`] trait.
//! [`MemoryDirectory`] is a snapshot implementation used by the CLI and tests.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};
use crate::models::{Project, Team, User};

/// Read-only team and user lookups scoped to a set of projects.
///
/// Implementations must be safe for concurrent reads; converters never
/// mutate the directory.
pub trait Directory: Send + Sync {
    /// Finds a team by slug within the organizations owning `projects`.
    fn find_team_by_slug(&self, slug: &str, projects: &[Project]) -> Option<Team>;

    /// Finds a user by username among identities with access to `projects`.
    fn find_user_by_username(&self, username: &str, projects: &[Project]) -> Option<User>;
}

/// In-memory directory snapshot.
///
/// Deserializes from JSON of the form
/// `{"users": [...], "teams": [...], "projects": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDirectory {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    teams: Vec<Team>,
    #[serde(default)]
    projects: Vec<Project>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Parses a JSON snapshot.
    pub fn from_json_str(content: &str) -> SearchResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| SearchError::config(format!("failed to parse directory: {}", e)))
    }

    /// Reads a JSON snapshot from disk.
    pub fn load(path: &Path) -> SearchResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SearchError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Finds a project by slug or numeric id.
    pub fn find_project(&self, slug_or_id: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.slug == slug_or_id || p.id.to_string() == slug_or_id)
    }

    /// Finds an active user by username or email, ignoring project scope.
    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.is_active && user_matches(u, username))
    }

    /// Returns true if the user belongs to a team attached to any of the projects.
    fn has_access(&self, user: &User, projects: &[Project]) -> bool {
        projects.iter().any(|project| {
            self.teams
                .iter()
                .any(|team| project.team_ids.contains(&team.id) && team.has_member(user.id))
        })
    }
}

fn user_matches(user: &User, username: &str) -> bool {
    user.username.eq_ignore_ascii_case(username)
        || user
            .email
            .as_deref()
            .is_some_and(|email| email.eq_ignore_ascii_case(username))
}

impl Directory for MemoryDirectory {
    fn find_team_by_slug(&self, slug: &str, projects: &[Project]) -> Option<Team> {
        self.teams
            .iter()
            .find(|team| {
                team.slug.eq_ignore_ascii_case(slug)
                    && projects
                        .iter()
                        .any(|p| p.organization_id == team.organization_id)
            })
            .cloned()
    }

    fn find_user_by_username(&self, username: &str, projects: &[Project]) -> Option<User> {
        self.users
            .iter()
            .find(|user| {
                user.is_active && user_matches(user, username) && self.has_access(user, projects)
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (MemoryDirectory, Project) {
        let project = Project::new(10, "web", 1).with_teams([100]);
        let directory = MemoryDirectory::new()
            .with_user(User::new(1, "alice").with_email("alice@example.com"))
            .with_user(User::new(2, "bob"))
            .with_team(Team::new(100, "frontend", 1).with_members([1]))
            .with_team(Team::new(200, "backend", 1).with_members([2]))
            .with_team(Team::new(300, "frontend", 2))
            .with_project(project.clone());
        (directory, project)
    }

    #[test]
    fn test_find_team_in_project_organization() {
        let (directory, project) = fixture();
        let team = directory.find_team_by_slug("backend", &[project]).unwrap();
        assert_eq!(team.id, 200);
    }

    #[test]
    fn test_find_team_is_case_insensitive_and_scoped() {
        let (directory, project) = fixture();
        let team = directory.find_team_by_slug("FrontEnd", &[project]).unwrap();
        assert_eq!(team.organization_id, 1);
        assert_eq!(team.id, 100);
    }

    #[test]
    fn test_find_team_without_projects() {
        let (directory, _) = fixture();
        assert_eq!(directory.find_team_by_slug("frontend", &[]), None);
    }

    #[test]
    fn test_find_user_by_username_or_email() {
        let (directory, project) = fixture();
        let projects = [project];
        assert_eq!(
            directory.find_user_by_username("ALICE", &projects).unwrap().id,
            1
        );
        assert_eq!(
            directory
                .find_user_by_username("alice@example.com", &projects)
                .unwrap()
                .id,
            1
        );
    }

    #[test]
    fn test_find_user_requires_project_access() {
        let (directory, project) = fixture();
        // bob is only on the backend team, which is not attached to the project
        assert_eq!(directory.find_user_by_username("bob", &[project]), None);
        assert_eq!(directory.find_user_by_username("alice", &[]), None);
    }

    #[test]
    fn test_find_user_skips_inactive() {
        let mut inactive = User::new(3, "carol");
        inactive.is_active = false;
        let project = Project::new(10, "web", 1).with_teams([100]);
        let directory = MemoryDirectory::new()
            .with_user(inactive)
            .with_team(Team::new(100, "frontend", 1).with_members([3]));
        assert_eq!(directory.find_user_by_username("carol", &[project]), None);
        assert_eq!(directory.find_user("carol"), None);
    }

    #[test]
    fn test_find_project_by_slug_or_id() {
        let (directory, _) = fixture();
        assert_eq!(directory.find_project("web").unwrap().id, 10);
        assert_eq!(directory.find_project("10").unwrap().slug, "web");
        assert!(directory.find_project("api").is_none());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "users": [{"id": 1, "username": "alice"}],
            "teams": [{"id": 5, "slug": "ops", "organization_id": 1, "member_ids": [1]}],
            "projects": [{"id": 9, "slug": "api", "organization_id": 1, "team_ids": [5]}]
        }"#;
        let directory = MemoryDirectory::from_json_str(json).unwrap();
        let projects = directory.projects().to_vec();
        assert_eq!(
            directory.find_user_by_username("alice", &projects).unwrap().id,
            1
        );
        assert_eq!(directory.find_team_by_slug("ops", &projects).unwrap().id, 5);
    }

    #[test]
    fn test_from_json_str_invalid() {
        let err = MemoryDirectory::from_json_str("{not json").unwrap_err();
        assert!(err.to_string().contains("failed to parse directory"));
    }
}
