//! Identity and scope records consumed by value converters.
//!
//! These mirror the host system's user, team and project rows closely enough
//! for search value resolution. An id of `0` is reserved for the sentinel
//! records returned when a referenced user or team cannot be found; no real
//! record ever has that id, so filters carrying a sentinel match nothing.

use serde::{Deserialize, Serialize};

/// Id reserved for sentinel records.
pub const SENTINEL_ID: u64 = 0;

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Creates an active user with the given id and username.
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            name: None,
            is_active: true,
        }
    }

    /// Returns the "impossible" user used when a lookup misses.
    pub fn sentinel() -> Self {
        Self {
            id: SENTINEL_ID,
            username: String::new(),
            email: None,
            name: None,
            is_active: false,
        }
    }

    /// Returns true if this is the sentinel user.
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A team of users within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    pub organization_id: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<u64>,
}

impl Team {
    /// Creates a team with no members.
    pub fn new(id: u64, slug: impl Into<String>, organization_id: u64) -> Self {
        let slug = slug.into();
        Self {
            id,
            name: slug.clone(),
            slug,
            organization_id,
            member_ids: Vec::new(),
        }
    }

    /// Returns the "impossible" team used when a lookup misses.
    pub fn sentinel() -> Self {
        Self {
            id: SENTINEL_ID,
            slug: String::new(),
            name: String::new(),
            organization_id: SENTINEL_ID,
            member_ids: Vec::new(),
        }
    }

    /// Returns true if this is the sentinel team.
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }

    /// Adds members to the team.
    pub fn with_members(mut self, member_ids: impl IntoIterator<Item = u64>) -> Self {
        self.member_ids.extend(member_ids);
        self
    }

    /// Returns true if the user is a member of this team.
    pub fn has_member(&self, user_id: u64) -> bool {
        self.member_ids.contains(&user_id)
    }
}

/// A project the acting identity may search within.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub slug: String,
    pub organization_id: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team_ids: Vec<u64>,
}

impl Project {
    /// Creates a project with no teams attached.
    pub fn new(id: u64, slug: impl Into<String>, organization_id: u64) -> Self {
        Self {
            id,
            slug: slug.into(),
            organization_id,
            team_ids: Vec::new(),
        }
    }

    /// Attaches teams to the project.
    pub fn with_teams(mut self, team_ids: impl IntoIterator<Item = u64>) -> Self {
        self.team_ids.extend(team_ids);
        self
    }
}

/// Either a user or a team, as referenced by `assigned_to`.
///
/// Teams are written with a `#` prefix in queries (`assigned:#backend`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Actor {
    User(User),
    Team(Team),
}

impl Actor {
    /// Returns the id of the underlying user or team.
    pub fn id(&self) -> u64 {
        match self {
            Actor::User(user) => user.id,
            Actor::Team(team) => team.id,
        }
    }

    /// Returns true if the actor is a sentinel record.
    pub fn is_sentinel(&self) -> bool {
        self.id() == SENTINEL_ID
    }
}

impl PartialEq<Team> for Actor {
    fn eq(&self, other: &Team) -> bool {
        matches!(self, Actor::Team(team) if team == other)
    }
}

impl PartialEq<User> for Actor {
    fn eq(&self, other: &User) -> bool {
        matches!(self, Actor::User(user) if user == other)
    }
}
