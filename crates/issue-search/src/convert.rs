//! Value converters: resolve filter values that depend on who is searching.
//!
//! After parsing, `assigned_to:me` still carries the text `"me"`. Converters
//! replace such values with concrete records (the acting user, a team found by
//! slug, a user found by username). Lookups that miss resolve to the sentinel
//! records from [`crate::models`] instead of failing, so a query naming an
//! unknown user returns no results rather than an error.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::directory::Directory;
use crate::models::{Actor, Project, Team, User};
use crate::query::{RawValue, SearchFilter};

/// Value that resolves to the acting identity.
pub const ME: &str = "me";

static BUILTIN: LazyLock<ConverterRegistry> = LazyLock::new(ConverterRegistry::default);

/// Inputs shared by every converter call.
#[derive(Clone, Copy)]
pub struct ConversionContext<'a> {
    /// Projects the acting identity may search within.
    pub projects: &'a [Project],
    /// The acting identity, or `None` when anonymous.
    pub user: Option<&'a User>,
    /// Where users and teams are looked up.
    pub directory: &'a dyn Directory,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        projects: &'a [Project],
        user: Option<&'a User>,
        directory: &'a dyn Directory,
    ) -> Self {
        Self {
            projects,
            user,
            directory,
        }
    }
}

/// Resolves a raw text value for one canonical key.
pub type ValueConverter = fn(&str, &ConversionContext<'_>) -> RawValue;

/// Resolves a user reference: `me` or a username.
///
/// Unknown usernames, and `me` without an acting identity, resolve to
/// [`User::sentinel`].
pub fn convert_user_value(
    value: &str,
    projects: &[Project],
    user: Option<&User>,
    directory: &dyn Directory,
) -> User {
    if value == ME {
        return match user {
            Some(user) => user.clone(),
            None => {
                tracing::debug!("anonymous search for \"me\", using sentinel user");
                User::sentinel()
            }
        };
    }

    directory
        .find_user_by_username(value, projects)
        .unwrap_or_else(|| {
            tracing::debug!(username = value, "user not found, using sentinel");
            User::sentinel()
        })
}

/// Resolves an actor reference: `#team-slug`, `me` or a username.
///
/// Unknown teams resolve to [`Team::sentinel`].
pub fn convert_actor_value(
    value: &str,
    projects: &[Project],
    user: Option<&User>,
    directory: &dyn Directory,
) -> Actor {
    match value.strip_prefix('#') {
        Some(slug) => Actor::Team(directory.find_team_by_slug(slug, projects).unwrap_or_else(
            || {
                tracing::debug!(slug, "team not found, using sentinel");
                Team::sentinel()
            },
        )),
        None => Actor::User(convert_user_value(value, projects, user, directory)),
    }
}

fn actor_converter(value: &str, ctx: &ConversionContext<'_>) -> RawValue {
    convert_actor_value(value, ctx.projects, ctx.user, ctx.directory).into()
}

fn user_converter(value: &str, ctx: &ConversionContext<'_>) -> RawValue {
    convert_user_value(value, ctx.projects, ctx.user, ctx.directory).into()
}

/// Mapping from canonical key to the converter applied to its values.
///
/// Built once and shared read-only. The built-in registry converts
/// `assigned_to` (actor), `bookmarked_by` and `subscribed_by` (user).
#[derive(Clone)]
pub struct ConverterRegistry {
    converters: BTreeMap<String, ValueConverter>,
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::empty()
            .with_converter("assigned_to", actor_converter)
            .with_converter("bookmarked_by", user_converter)
            .with_converter("subscribed_by", user_converter)
    }
}

impl ConverterRegistry {
    /// Returns the shared built-in registry.
    pub fn builtin() -> &'static ConverterRegistry {
        &BUILTIN
    }

    /// Creates a registry with no converters.
    pub fn empty() -> Self {
        Self {
            converters: BTreeMap::new(),
        }
    }

    /// Registers a converter for a canonical key, replacing any existing one.
    pub fn with_converter(mut self, key: impl Into<String>, converter: ValueConverter) -> Self {
        self.converters.insert(key.into(), converter);
        self
    }

    pub fn get(&self, key: &str) -> Option<ValueConverter> {
        self.converters.get(key).copied()
    }

    /// Iterates over the convertible keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    /// Converts a single filter.
    ///
    /// Filters without a registered converter, or whose value is not text,
    /// are returned unchanged.
    pub fn convert_filter(&self, filter: SearchFilter, ctx: &ConversionContext<'_>) -> SearchFilter {
        let Some(converter) = self.get(filter.key().name()) else {
            return filter;
        };
        let Some(text) = filter.value().raw_value().as_text() else {
            return filter;
        };
        let value = filter.value().replace_raw(converter(text, ctx));
        filter.with_value(value)
    }

    /// Converts every filter, preserving order.
    pub fn convert(
        &self,
        filters: Vec<SearchFilter>,
        ctx: &ConversionContext<'_>,
    ) -> Vec<SearchFilter> {
        filters
            .into_iter()
            .map(|filter| self.convert_filter(filter, ctx))
            .collect()
    }
}

/// Applies the built-in converters to a filter list.
pub fn convert_query_values(
    filters: Vec<SearchFilter>,
    projects: &[Project],
    user: Option<&User>,
    directory: &dyn Directory,
) -> Vec<SearchFilter> {
    let ctx = ConversionContext::new(projects, user, directory);
    ConverterRegistry::builtin().convert(filters, &ctx)
}
