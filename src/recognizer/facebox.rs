//! Blocking HTTP client for a Facebox-compatible recognition service.

use log::debug;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::types::{RecognizedFace, ServiceInfo};
use crate::{CoalescerError, Result};

use super::Recognizer;

#[derive(Debug, Default, Deserialize)]
struct CheckResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default, rename = "facesCount")]
    faces_count: usize,
    #[serde(default)]
    faces: Vec<RecognizedFace>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Facebox endpoints under one base URL. Cheap to share; the inner client pools connections.
pub struct FaceboxClient {
    base: String,
    http: Client,
}

impl FaceboxClient {
    /// `base_url` like `http://localhost:8080`. `timeout` bounds every request.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let url = reqwest::Url::parse(base_url)
            .map_err(|e| CoalescerError::Config(format!("facebox url {base_url}: {e}")))?;
        if url.host_str().is_none() {
            return Err(CoalescerError::Config(format!(
                "facebox url {base_url} has no host"
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoalescerError::Config(format!("http client: {e}")))?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

fn service_error(context: &str, err: reqwest::Error) -> CoalescerError {
    if err.is_timeout() {
        CoalescerError::Service(format!("{context}: request timed out"))
    } else {
        CoalescerError::Service(format!("{context}: {err}"))
    }
}

/// Turn a non-2xx response into the service's `error` text, or the status line.
fn error_from_response(context: &str, res: Response) -> CoalescerError {
    let status = res.status();
    let body = res.text().unwrap_or_default();
    let msg = serde_json::from_str::<StatusResponse>(&body)
        .ok()
        .and_then(|r| r.error)
        .unwrap_or_else(|| status.to_string());
    CoalescerError::Service(format!("{context}: {msg}"))
}

fn image_part(image: &[u8], filename: &str) -> Part {
    Part::bytes(image.to_vec()).file_name(filename.to_string())
}

impl Recognizer for FaceboxClient {
    fn info(&self) -> Result<ServiceInfo> {
        let res = self
            .http
            .get(self.endpoint("info"))
            .send()
            .map_err(|e| CoalescerError::ServiceUnavailable(format!("{}: {e}", self.base)))?;
        if !res.status().is_success() {
            return Err(CoalescerError::ServiceUnavailable(format!(
                "{} answered {}",
                self.base,
                res.status()
            )));
        }
        res.json::<ServiceInfo>()
            .map_err(|e| CoalescerError::ServiceUnavailable(format!("decode info: {e}")))
    }

    fn teach(&self, image: &[u8], filename: &str, name: &str) -> Result<()> {
        let form = Form::new()
            .part("file", image_part(image, filename))
            .text("name", name.to_string())
            .text("id", filename.to_string());
        let context = format!("teach {filename}");
        let res = self
            .http
            .post(self.endpoint("facebox/teach"))
            .multipart(form)
            .send()
            .map_err(|e| service_error(&context, e))?;
        if !res.status().is_success() {
            return Err(error_from_response(&context, res));
        }
        let body = res
            .json::<StatusResponse>()
            .map_err(|e| service_error(&context, e))?;
        if !body.success {
            return Err(CoalescerError::Service(format!(
                "{context}: {}",
                body.error.unwrap_or_else(|| "unsuccessful".to_string())
            )));
        }
        Ok(())
    }

    fn check(&self, image: &[u8]) -> Result<Vec<RecognizedFace>> {
        let form = Form::new().part("file", image_part(image, "image"));
        let res = self
            .http
            .post(self.endpoint("facebox/check"))
            .header(reqwest::header::ACCEPT, "application/json; charset=utf-8")
            .multipart(form)
            .send()
            .map_err(|e| service_error("check", e))?;
        if !res.status().is_success() {
            return Err(error_from_response("check", res));
        }
        let body = res
            .json::<CheckResponse>()
            .map_err(|e| service_error("check", e))?;
        faces_from_check(body)
    }
}

fn faces_from_check(body: CheckResponse) -> Result<Vec<RecognizedFace>> {
    if !body.success {
        return Err(CoalescerError::Service(format!(
            "check: {}",
            body.error.unwrap_or_else(|| "unsuccessful".to_string())
        )));
    }
    debug!("check: {} faces", body.faces_count);
    Ok(body.faces)
}
