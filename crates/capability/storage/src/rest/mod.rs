//! REST 后端实现
//!
//! 通过 HTTP/JSON 访问后端：
//! - `GET /{kind}/` 列表，`GET /{kind}/{key}` 单条
//! - `POST /{kind}/` 创建，`PUT /{kind}/{key}` 部分更新，`DELETE /{kind}/{key}` 删除
//! - `GET /cameras/scan?max_devices=N` 本地设备扫描
//! - `GET /roi/?camera_id=N` 按摄像头过滤的命名区域
//!
//! 404 映射为 `None` / `false`，其他非 2xx 映射为 `StorageError::Status`，
//! 每个请求携带 `x-request-id`。超时由传输层负责，本层不做重试。

mod entities;

use crate::error::StorageError;
use api_contract::{DeleteAck, EntityKind, ErrorBody};
use nvc_telemetry::new_request_id;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// REST 后端存储，同时实现全部实体存储接口
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base_url: Url,
}

impl RestStore {
    /// 创建 REST 后端；`timeout` 为空时使用客户端默认行为
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, StorageError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| StorageError::invalid(format!("invalid api url {base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::invalid(format!(
                "api url cannot be a base: {base_url}"
            )));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 集合路径 `/{kind}/`
    fn collection_url(&self, kind: EntityKind) -> Url {
        self.url(&[kind.path(), ""])
    }

    /// 资源路径 `/{kind}/{key}`，key 按路径段编码
    fn item_url(&self, kind: EntityKind, key: &str) -> Url {
        self.url(&[kind.path(), key])
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// 发送请求；404 返回 `None`
    async fn send(&self, request: RequestBuilder) -> Result<Option<Response>, StorageError> {
        let request_id = new_request_id();
        let response = request.header("x-request-id", &request_id).send().await?;
        let status = response.status();
        debug!(
            target: "nvc.storage",
            request_id = %request_id,
            url = %response.url(),
            status = status.as_u16(),
            "backend_response"
        );
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(status, response).await);
        }
        Ok(Some(response))
    }

    async fn get_one<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, StorageError> {
        match self.send(self.http.get(url)).await? {
            Some(response) => Ok(Some(response.json().await?)),
            None => Ok(None),
        }
    }

    async fn get_list<T, Q>(&self, url: Url, query: &Q) -> Result<Vec<T>, StorageError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.http.get(url.clone()).query(query))
            .await?
            .ok_or_else(|| missing_route(&url))?;
        Ok(response.json().await?)
    }

    async fn post<B, T>(&self, url: Url, body: &B) -> Result<T, StorageError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.post(url.clone()).json(body))
            .await?
            .ok_or_else(|| missing_route(&url))?;
        Ok(response.json().await?)
    }

    async fn put<B, T>(&self, url: Url, body: &B) -> Result<Option<T>, StorageError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match self.send(self.http.put(url).json(body)).await? {
            Some(response) => Ok(Some(response.json().await?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, url: Url) -> Result<bool, StorageError> {
        match self.send(self.http.delete(url)).await? {
            Some(response) => {
                // 确认体可能为空
                match response.json::<DeleteAck>().await {
                    Ok(ack) => {
                        debug!(target: "nvc.storage", message = %ack.message, "delete_acknowledged");
                    }
                    Err(err) => {
                        debug!(target: "nvc.storage", error = %err, "delete_ack_undecodable");
                    }
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

async fn status_error(status: StatusCode, response: Response) -> StorageError {
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    StorageError::Status {
        status: status.as_u16(),
        message,
    }
}

fn missing_route(url: &Url) -> StorageError {
    StorageError::Status {
        status: StatusCode::NOT_FOUND.as_u16(),
        message: format!("not found: {}", url.path()),
    }
}
