//! Blocking client for the HTTP/JSON front-end

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Serialize;

use super::{AccountClient, ClientError, ClientResult};
use crate::domain::{
    ChangeAccountRequest, CreateAccountRequest, DeleteAccountRequest, GetAccountResponse,
    PatchAccountRequest,
};

pub struct HttpAccountClient {
    base_url: String,
    client: Client,
}

impl HttpAccountClient {
    /// `base_url` like `http://127.0.0.1:7777`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::builder().build()?,
        })
    }

    pub fn for_host(host: &str, port: u16) -> ClientResult<Self> {
        Self::new(format!("http://{}:{}", host, port))
    }

    fn post<T: Serialize>(&self, path: &str, body: &T, expected: StatusCode) -> ClientResult<()> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()?;
        expect_status(response, expected).map(|_| ())
    }
}

/// Turn any status other than `expected` into `ClientError::Server`
fn expect_status(response: Response, expected: StatusCode) -> ClientResult<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

impl AccountClient for HttpAccountClient {
    fn create(&self, name: &str, amount: i64) -> ClientResult<()> {
        self.post(
            "/account/create",
            &CreateAccountRequest::new(name, amount),
            StatusCode::CREATED,
        )
    }

    fn get(&self, name: &str) -> ClientResult<GetAccountResponse> {
        let response = self
            .client
            .get(format!("{}/account", self.base_url))
            .query(&[("name", name)])
            .send()?;
        let response = expect_status(response, StatusCode::OK)?;
        response
            .json::<GetAccountResponse>()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn delete(&self, name: &str) -> ClientResult<()> {
        self.post(
            "/account/delete",
            &DeleteAccountRequest::new(name),
            StatusCode::OK,
        )
    }

    fn change_amount(&self, name: &str, amount: i64) -> ClientResult<()> {
        self.post(
            "/account/change_amount",
            &PatchAccountRequest::new(name, amount),
            StatusCode::OK,
        )
    }

    fn change_name(&self, name: &str, new_name: &str) -> ClientResult<()> {
        self.post(
            "/account/change_name",
            &ChangeAccountRequest::new(name, new_name),
            StatusCode::OK,
        )
    }
}
