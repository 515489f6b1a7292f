//
//  bitbucket-rest-client
//  api/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request URL Construction
//!
//! Resource clients build request paths from a fixed template, the caller's
//! path segments and a query string. Path segments are inserted as given;
//! query values are form-url-encoded.
//!
//! [`PullRequestQuery`] holds the filters of the pull request listing and
//! validates them before any URL is built.

use url::form_urlencoded::Serializer;

use super::common::{ApiError, Range, Result};
use super::server::{PullRequestRole, PullRequestState};

/// Maximum number of participant filters the server accepts.
///
/// Filters past this count are dropped from the request.
pub const MAX_PARTICIPANT_PARAMS: usize = 10;

/// Builds a request path with an encoded query string.
///
/// # Example
///
/// ```rust
/// use bitbucket_rest_client::api::query::UrlBuilder;
///
/// let url = UrlBuilder::new("/rest/api/1.0/projects")
///     .param("name", "My Project")
///     .build();
/// assert_eq!(url, "/rest/api/1.0/projects?name=My+Project");
/// ```
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    path: String,
    pairs: Vec<(String, String)>,
}

impl UrlBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            pairs: Vec::new(),
        }
    }

    /// Appends the `start` and `limit` pagination parameters.
    pub fn range(self, range: Range) -> Self {
        self.param("start", range.start())
            .param("limit", range.limit())
    }

    /// Appends one query parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.pairs.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter when a value is present.
    pub fn param_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Returns the path, followed by `?` and the query when there is one.
    pub fn build(self) -> String {
        if self.pairs.is_empty() {
            return self.path;
        }

        let query = Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// Filters for listing the pull requests of a repository.
///
/// The defaults list pull requests in every state, incoming to the
/// repository, newest first.
///
/// Participant filters are parallel lists: entry `i` of `roles` and
/// `approved` constrains user `i` of `users`.
///
/// # Example
///
/// ```rust
/// use bitbucket_rest_client::api::query::PullRequestQuery;
/// use bitbucket_rest_client::api::server::{PullRequestRole, PullRequestState};
///
/// let query = PullRequestQuery::new()
///     .state(PullRequestState::Open)
///     .users(["jdoe"])
///     .roles([PullRequestRole::Reviewer]);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestQuery {
    /// State filter; `None` lists every state ("ALL").
    pub state: Option<PullRequestState>,
    /// INCOMING when true, OUTGOING otherwise.
    pub incoming: bool,
    /// Restrict to pull requests touching this ref, e.g. "refs/heads/main".
    pub branch_id: Option<String>,
    /// NEWEST when true, OLDEST otherwise.
    pub newest_first: bool,
    pub users: Option<Vec<String>>,
    pub roles: Option<Vec<PullRequestRole>>,
    pub approved: Option<Vec<bool>>,
}

impl Default for PullRequestQuery {
    fn default() -> Self {
        Self {
            state: None,
            incoming: true,
            branch_id: None,
            newest_first: true,
            users: None,
            roles: None,
            approved: None,
        }
    }
}

impl PullRequestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(mut self, state: PullRequestState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn outgoing(mut self) -> Self {
        self.incoming = false;
        self
    }

    pub fn at(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    pub fn users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users = Some(users.into_iter().map(Into::into).collect());
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = PullRequestRole>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    pub fn approved(mut self, approved: impl IntoIterator<Item = bool>) -> Self {
        self.approved = Some(approved.into_iter().collect());
        self
    }

    /// Checks that the participant filters line up.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidArgument`] when `roles` or `approved` is given
    /// without `users`, or when either differs in length from `users`.
    pub fn validate(&self) -> Result<()> {
        let users = match &self.users {
            Some(users) => users,
            None if self.roles.is_some() || self.approved.is_some() => {
                return Err(ApiError::InvalidArgument(
                    "participant roles or approval filters require users".to_string(),
                ));
            }
            None => return Ok(()),
        };

        if let Some(roles) = &self.roles {
            if roles.len() != users.len() {
                return Err(ApiError::InvalidArgument(format!(
                    "{} users but {} roles",
                    users.len(),
                    roles.len()
                )));
            }
        }

        if let Some(approved) = &self.approved {
            if approved.len() != users.len() {
                return Err(ApiError::InvalidArgument(format!(
                    "{} users but {} approval filters",
                    users.len(),
                    approved.len()
                )));
            }
        }

        Ok(())
    }

    /// Validates the filters and appends them to `url`.
    pub fn apply(&self, url: UrlBuilder) -> Result<UrlBuilder> {
        self.validate()?;

        let state = self.state.map_or("ALL", |s| s.as_str());
        let direction = if self.incoming { "INCOMING" } else { "OUTGOING" };
        let order = if self.newest_first { "NEWEST" } else { "OLDEST" };

        let mut url = url
            .param("state", state)
            .param("direction", direction)
            .param_opt("at", self.branch_id.as_deref())
            .param("order", order);

        url = indexed(url, "username", self.users.iter().flatten());
        url = indexed(url, "role", self.roles.iter().flatten());
        url = indexed(url, "approved", self.approved.iter().flatten());

        Ok(url)
    }
}

fn indexed<T: ToString>(
    mut url: UrlBuilder,
    name: &str,
    values: impl Iterator<Item = T>,
) -> UrlBuilder {
    for (i, value) in values.take(MAX_PARTICIPANT_PARAMS).enumerate() {
        url = url.param(&format!("{}.{}", name, i + 1), value);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/rest/api/1.0/projects/PRJ/repos/repo/pull-requests";

    fn build(query: &PullRequestQuery) -> Result<String> {
        let range = Range::new(0, 25)?;
        Ok(query.apply(UrlBuilder::new(PATH).range(range))?.build())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            build(&PullRequestQuery::new()).unwrap(),
            format!("{}?start=0&limit=25&state=ALL&direction=INCOMING&order=NEWEST", PATH)
        );
    }

    #[test]
    fn test_all_filters() {
        let query = PullRequestQuery::new()
            .state(PullRequestState::Merged)
            .outgoing()
            .at("refs/heads/main")
            .oldest_first()
            .users(["jdoe", "asmith"])
            .roles([PullRequestRole::Author, PullRequestRole::Reviewer])
            .approved([false, true]);

        assert_eq!(
            build(&query).unwrap(),
            format!(
                "{}?start=0&limit=25&state=MERGED&direction=OUTGOING&at=refs%2Fheads%2Fmain\
                 &order=OLDEST&username.1=jdoe&username.2=asmith&role.1=AUTHOR\
                 &role.2=REVIEWER&approved.1=false&approved.2=true",
                PATH
            )
        );
    }

    #[test]
    fn test_participants_past_the_cap_are_dropped() {
        let users: Vec<String> = (1..=11).map(|i| format!("user{}", i)).collect();
        let url = build(&PullRequestQuery::new().users(users)).unwrap();

        assert!(url.contains("username.10=user10"));
        assert!(!url.contains("username.11"));
        assert!(!url.contains("user11"));
    }

    #[test]
    fn test_roles_length_mismatch() {
        let query = PullRequestQuery::new()
            .users(["a", "b"])
            .roles([PullRequestRole::Author]);

        assert!(matches!(build(&query), Err(ApiError::InvalidArgument(_))));
    }

    #[test]
    fn test_approved_without_users() {
        let query = PullRequestQuery::new().approved([true]);
        assert!(matches!(query.validate(), Err(ApiError::InvalidArgument(_))));

        let query = PullRequestQuery::new().roles([PullRequestRole::Participant]);
        assert!(matches!(query.validate(), Err(ApiError::InvalidArgument(_))));
    }

    #[test]
    fn test_approved_length_mismatch() {
        let query = PullRequestQuery::new().users(["a"]).approved([true, false]);
        assert!(matches!(query.validate(), Err(ApiError::InvalidArgument(_))));
    }

    #[test]
    fn test_builder_without_query() {
        assert_eq!(UrlBuilder::new("/rest/api/1.0/users").build(), "/rest/api/1.0/users");
        assert_eq!(
            UrlBuilder::new("/x").param_opt("filterText", None::<&str>).build(),
            "/x"
        );
    }
}
