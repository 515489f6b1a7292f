//
//  bitbucket-rest-client
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! In-memory [`HttpExecutor`] for resource client tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::client::{HttpExecutor, HttpMethod};
use super::common::{ApiError, Result};

/// Canned response for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    NotFound,
    Status(u16),
}

/// A request seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Serves canned replies keyed by method and full path (query included)
/// and records every request it receives.
#[derive(Default)]
pub struct FakeExecutor {
    replies: Mutex<HashMap<(HttpMethod, String), Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: HttpMethod, path: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), reply);
        self
    }

    pub fn on_get(self, path: &str, json: Value) -> Self {
        self.on(HttpMethod::Get, path, Reply::Json(json))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }
}

#[async_trait]
impl HttpExecutor for FakeExecutor {
    async fn execute(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&(method, path.to_string()))
            .cloned();

        match reply {
            Some(Reply::Json(json)) => Ok(json),
            Some(Reply::NotFound) => Err(ApiError::NotFound(path.to_string())),
            Some(Reply::Status(code)) => {
                let status = StatusCode::from_u16(code).unwrap();
                Err(ApiError::from_status(status, ""))
            }
            None => Err(ApiError::Http {
                status: 500,
                message: format!("no reply registered for {} {}", method, path),
            }),
        }
    }
}
