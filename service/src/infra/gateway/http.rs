//! REST [`Gateway`] implementation.

use std::{fmt, io, sync::Arc, time::Duration};

use common::operations::{By, Delete, Insert, Select, Update, Upload};
use derive_more::{Debug, Display, Error as StdError, From};
use futures::stream;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    multipart, Body, RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        upload::{self, Media},
        Entity, EntityDraft,
    },
    infra::gateway::{self, Gateway},
};

/// Size of a chunk an uploaded file is streamed by.
const CHUNK_SIZE: usize = 64 * 1024;

/// Callback notified about the progress of an upload, receiving the file
/// name and the sent percentage.
pub type Progress = Arc<dyn Fn(&str, u8) + Send + Sync>;

/// [`Http`] gateway configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the REST API, like `http://localhost:8080/api`.
    pub base_url: String,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Gateway`] talking to a REST API.
#[derive(Clone, Debug)]
pub struct Http {
    /// Base URL of the REST API, without a trailing slash.
    base_url: String,

    /// Client performing the requests.
    client: reqwest::Client,

    /// Upload [`Progress`] callback, if any.
    #[debug(skip)]
    progress: Option<Progress>,
}

impl Http {
    /// Creates a new [`Http`] gateway with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the HTTP client.
    pub fn new(conf: &Config) -> Result<Self, Traced<Error>> {
        let mut headers = HeaderMap::new();
        drop(headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ));
        drop(headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json"),
        ));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        Ok(Self {
            base_url: conf.base_url.trim_end_matches('/').to_owned(),
            client,
            progress: None,
        })
    }

    /// Sets the [`Progress`] callback notified while uploading files.
    #[must_use]
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Builds a URL of the provided `path` relative to the base URL.
    fn url(&self, path: fmt::Arguments<'_>) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Sends the provided request and unwraps its [`Envelope`].
    async fn send<T>(
        &self,
        req: RequestBuilder,
    ) -> Result<Option<T>, Traced<Error>>
    where
        T: DeserializeOwned,
    {
        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(tracerr::new!(Error::Status(status)));
        }

        let Envelope {
            code,
            message,
            data,
        } = resp
            .json::<Envelope<T>>()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        if code != 200 {
            return Err(tracerr::new!(Error::Api {
                code,
                message: message.unwrap_or_else(|| "Request failed".into()),
            }));
        }

        Ok(data)
    }

    /// Builds a [`multipart::Part`] streaming the provided [`upload::File`]
    /// by chunks, reporting the [`Progress`].
    fn part(
        &self,
        file: upload::File,
    ) -> Result<multipart::Part, Traced<Error>> {
        let upload::File {
            name,
            content_type,
            bytes,
        } = file;
        let total = bytes.len();

        let chunks = bytes
            .chunks(CHUNK_SIZE)
            .map(<[u8]>::to_vec)
            .collect::<Vec<_>>();
        let progress = self.progress.clone();
        let file_name = name.clone();
        let mut sent = 0;
        let body = stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len();
            if let Some(report) = &progress {
                report(&file_name, percentage(sent, total));
            }
            Ok::<_, io::Error>(chunk)
        }));

        multipart::Part::stream_with_length(
            Body::wrap_stream(body),
            total as u64,
        )
        .file_name(name)
        .mime_str(&content_type)
        .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

/// Indicates whether the provided [`Error`] is an HTTP 404 response.
fn is_not_found(err: &Traced<Error>) -> bool {
    let err: &Error = err.as_ref();
    matches!(err, Error::Status(StatusCode::NOT_FOUND))
}

/// Calculates the sent percentage, rounded down.
fn percentage(sent: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    u8::try_from(sent.min(total) * 100 / total).unwrap_or(100)
}

/// Envelope every REST API response is wrapped into.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    /// Application-level status code, `200` on success.
    code: i64,

    /// Message describing a failure.
    #[serde(alias = "msg", default)]
    message: Option<String>,

    /// Payload of the response.
    data: Option<T>,
}

impl<E: Entity> Gateway<Select<By<Vec<E>, ()>>> for Http {
    type Ok = Vec<E>;
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(skip_all, fields(collection = E::COLLECTION))]
    async fn execute(
        &self,
        _: Select<By<Vec<E>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.client.get(self.url(format_args!("{}", E::COLLECTION)));
        self.send(req)
            .await
            .map(Option::unwrap_or_default)
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

impl<E: Entity> Gateway<Select<By<Option<E>, E::Id>>> for Http {
    type Ok = Option<E>;
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(skip_all, fields(collection = E::COLLECTION))]
    async fn execute(
        &self,
        Select(by): Select<By<Option<E>, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self
            .client
            .get(self.url(format_args!("{}/{id}", E::COLLECTION)));
        match self.send(req).await {
            Err(e) if is_not_found(&e) => {
                log::debug!("no `{}` entry with ID {id}", E::COLLECTION);
                Ok(None)
            }
            res => res.map_err(tracerr::map_from_and_wrap!(=> gateway::Error)),
        }
    }
}

impl<D: EntityDraft> Gateway<Insert<D>> for Http {
    type Ok = D::Entity;
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(
        skip_all,
        fields(collection = <D::Entity as Entity>::COLLECTION),
    )]
    async fn execute(
        &self,
        Insert(draft): Insert<D>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .client
            .post(self.url(format_args!(
                "{}",
                <D::Entity as Entity>::COLLECTION,
            )))
            .json(&draft);
        self.send(req)
            .await
            .and_then(|data| data.ok_or_else(|| tracerr::new!(Error::NoData)))
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

impl<D: EntityDraft> Gateway<Update<(<D::Entity as Entity>::Id, D)>> for Http {
    type Ok = D::Entity;
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(
        skip_all,
        fields(collection = <D::Entity as Entity>::COLLECTION),
    )]
    async fn execute(
        &self,
        Update((id, draft)): Update<(<D::Entity as Entity>::Id, D)>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .client
            .put(self.url(format_args!(
                "{}/{id}",
                <D::Entity as Entity>::COLLECTION,
            )))
            .json(&draft);
        self.send(req)
            .await
            .and_then(|data| data.ok_or_else(|| tracerr::new!(Error::NoData)))
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

impl<E: Entity> Gateway<Delete<By<E, E::Id>>> for Http {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(skip_all, fields(collection = E::COLLECTION))]
    async fn execute(
        &self,
        Delete(by): Delete<By<E, E::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self
            .client
            .delete(self.url(format_args!("{}/{id}", E::COLLECTION)));
        self.send::<serde::de::IgnoredAny>(req)
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

impl Gateway<Upload<Media>> for Http {
    type Ok = upload::Url;
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(skip_all)]
    async fn execute(
        &self,
        Upload(media): Upload<Media>,
    ) -> Result<Self::Ok, Self::Err> {
        let Media { kind, file } = media;
        log::debug!("uploading {kind} `{}`", file.name);
        let form = multipart::Form::new().part(
            "file",
            self.part(file)
                .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?,
        );
        let req = self
            .client
            .post(self.url(format_args!("upload/{kind}")))
            .multipart(form);
        self.send(req)
            .await
            .and_then(|data| data.ok_or_else(|| tracerr::new!(Error::NoData)))
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

impl Gateway<Upload<Vec<upload::File>>> for Http {
    type Ok = Vec<upload::Url>;
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(skip_all)]
    async fn execute(
        &self,
        Upload(files): Upload<Vec<upload::File>>,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!("uploading {} images", files.len());
        let mut form = multipart::Form::new();
        for file in files {
            form = form.part(
                "files",
                self.part(file)
                    .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?,
            );
        }
        let req = self
            .client
            .post(self.url(format_args!("upload/images")))
            .multipart(form);
        self.send(req)
            .await
            .map(Option::unwrap_or_default)
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

impl Gateway<Delete<upload::Url>> for Http {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(skip_all)]
    async fn execute(
        &self,
        Delete(url): Delete<upload::Url>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .client
            .delete(self.url(format_args!("upload/file")))
            .query(&[("fileUrl", url.to_string())]);
        self.send::<serde::de::IgnoredAny>(req)
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))
    }
}

/// [`Http`] gateway error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request couldn't be performed.
    #[display("Network error: {_0}")]
    Network(reqwest::Error),

    /// Server responded with a non-success HTTP status.
    #[display("Network error: server responded with {_0}")]
    #[from(ignore)]
    Status(#[error(not(source))] StatusCode),

    /// Server rejected the request.
    #[display("API error {code}: {message}")]
    #[from(ignore)]
    Api {
        /// Application-level status code.
        code: i64,

        /// Message describing the failure.
        message: String,
    },

    /// Successful response has no data.
    #[display("API response has no data")]
    #[from(ignore)]
    NoData,
}
