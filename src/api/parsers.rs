//
//  bitbucket-rest-client
//  api/parsers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Parsers
//!
//! Pure functions turning the JSON tree returned by the HTTP executor into
//! typed domain objects.
//!
//! Every parser reads the wire key names exactly (`isLastPage`,
//! `displayId`, `scmId`, ...). Input that does not match the expected shape
//! (a missing required key, or a value of the wrong JSON type) fails with
//! [`ApiError::Parse`].
//!
//! ## Parsers
//!
//! | Function | Produces |
//! |----------|----------|
//! | [`parse_page`] | [`Page<T>`] given an element parser |
//! | [`parse_project`], [`parse_repository`], [`parse_branch`], ... | One domain object |
//! | [`parse_build_stats`] | [`BuildStatsSummary`] for one commit |
//! | [`parse_build_summaries`] | Commit id → [`BuildStatsSummary`] |
//! | [`parse_application_properties`] | String → string map |

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::common::{ApiError, Page, Result};
use super::server::{
    AccessKey, Branch, BuildStatsSummary, BuildStatus, Project, PullRequest, PullRequestActivity,
    PullRequestChange, Repository, SshKey, Task, User,
};

/// Deserializes one domain object from a JSON tree.
pub fn parse<T: DeserializeOwned>(json: &Value) -> Result<T> {
    T::deserialize(json).map_err(ApiError::from)
}

pub fn parse_project(json: &Value) -> Result<Project> {
    parse(json)
}

pub fn parse_repository(json: &Value) -> Result<Repository> {
    parse(json)
}

/// Parses a branch. The owning project and repository are left unset.
pub fn parse_branch(json: &Value) -> Result<Branch> {
    parse(json)
}

pub fn parse_pull_request(json: &Value) -> Result<PullRequest> {
    parse(json)
}

pub fn parse_change(json: &Value) -> Result<PullRequestChange> {
    parse(json)
}

pub fn parse_user(json: &Value) -> Result<User> {
    parse(json)
}

pub fn parse_task(json: &Value) -> Result<Task> {
    parse(json)
}

pub fn parse_build_status(json: &Value) -> Result<BuildStatus> {
    parse(json)
}

pub fn parse_ssh_key(json: &Value) -> Result<SshKey> {
    parse(json)
}

pub fn parse_access_key(json: &Value) -> Result<AccessKey> {
    parse(json)
}

/// Returns a parser for the activities of pull request `pull_request_id`.
///
/// Activity entries do not carry the id of their pull request, so the
/// parser records it on every entry.
pub fn activity_parser(pull_request_id: u64) -> impl Fn(&Value) -> Result<PullRequestActivity> {
    move |json| {
        let mut activity: PullRequestActivity = parse(json)?;
        activity.pull_request_id = pull_request_id;
        Ok(activity)
    }
}

/// Parses a page envelope, applying `element` to every entry of `values`.
///
/// `isLastPage` and `values` are required. `start` and `limit` default to 0
/// and `size` to the number of values when the server omits them.
/// `nextPageStart` is required unless the page is the last one, in which
/// case it is ignored and stored as 0.
///
/// # Errors
///
/// Fails with [`ApiError::Parse`] if the envelope is malformed or any
/// element fails to parse. The element order is preserved.
pub fn parse_page<T, F>(json: &Value, element: F) -> Result<Page<T>>
where
    F: Fn(&Value) -> Result<T>,
{
    let object = json
        .as_object()
        .ok_or_else(|| ApiError::Parse(format!("expected a page object, got {}", kind(json))))?;

    let is_last_page = match object.get("isLastPage") {
        Some(Value::Bool(b)) => *b,
        Some(other) => return Err(wrong_type("isLastPage", "a boolean", other)),
        None => return Err(missing("isLastPage")),
    };

    let values = match object.get("values") {
        Some(Value::Array(items)) => items.iter().map(&element).collect::<Result<Vec<T>>>()?,
        Some(other) => return Err(wrong_type("values", "an array", other)),
        None => return Err(missing("values")),
    };

    let start = optional_u32(json, "start")?.unwrap_or(0);
    let limit = optional_u32(json, "limit")?.unwrap_or(0);
    let size = match optional_u32(json, "size")? {
        Some(size) => size,
        None => u32::try_from(values.len())
            .map_err(|_| ApiError::Parse("page holds too many values".to_string()))?,
    };

    let next_page_start = if is_last_page {
        0
    } else {
        optional_u32(json, "nextPageStart")?.ok_or_else(|| missing("nextPageStart"))?
    };

    Ok(Page {
        start,
        limit,
        is_last_page,
        size,
        next_page_start,
        values,
    })
}

/// Parses the build counts of a single commit.
///
/// `failed`, `inProgress` and `successful` are captured when present; an
/// absent key (or an explicit `null`) stays unset. Other keys are ignored.
pub fn parse_build_stats(json: &Value) -> Result<BuildStatsSummary> {
    if !json.is_object() {
        return Err(ApiError::Parse(format!(
            "expected build statistics object, got {}",
            kind(json)
        )));
    }

    Ok(BuildStatsSummary {
        failed: optional_u64(json, "failed")?,
        in_progress: optional_u64(json, "inProgress")?,
        successful: optional_u64(json, "successful")?,
    })
}

/// Parses the response of the bulk build statistics endpoint, which maps
/// commit ids to their counts.
pub fn parse_build_summaries(json: &Value) -> Result<BTreeMap<String, BuildStatsSummary>> {
    let object = json.as_object().ok_or_else(|| {
        ApiError::Parse(format!("expected build summaries object, got {}", kind(json)))
    })?;

    object
        .iter()
        .map(|(commit, stats)| Ok((commit.clone(), parse_build_stats(stats)?)))
        .collect()
}

/// Parses the application properties object into a string map.
///
/// Numbers and booleans are kept in their JSON text form; nested values
/// are rejected.
pub fn parse_application_properties(json: &Value) -> Result<BTreeMap<String, String>> {
    let object = json.as_object().ok_or_else(|| {
        ApiError::Parse(format!(
            "expected application properties object, got {}",
            kind(json)
        ))
    })?;

    object
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => return Err(wrong_type(key, "a scalar", other)),
            };
            Ok((key.clone(), text))
        })
        .collect()
}

fn optional_u64(json: &Value, key: &str) -> Result<Option<u64>> {
    match json.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Option::<u64>::deserialize(value)
            .map_err(|_| wrong_type(key, "a non-negative integer", value)),
    }
}

fn optional_u32(json: &Value, key: &str) -> Result<Option<u32>> {
    match json.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Option::<u32>::deserialize(value)
            .map_err(|_| wrong_type(key, "a non-negative integer", value)),
    }
}

fn missing(key: &str) -> ApiError {
    ApiError::Parse(format!("missing required key `{}`", key))
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> ApiError {
    ApiError::Parse(format!(
        "expected `{}` to be {}, got {}",
        key,
        expected,
        kind(found)
    ))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
