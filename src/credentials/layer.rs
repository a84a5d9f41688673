use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::AUTHORIZATION;
use http::{Request, Response};
use tower::{Layer, Service};

use super::timeout::grpc_timeout;
use super::{CredentialFetchError, PerRpcCredentials};
use crate::prelude::debug;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Tower layer that attaches [`PerRpcCredentials`] to every outbound call.
#[derive(Clone, Debug)]
pub struct CredentialsLayer {
    credentials: Arc<PerRpcCredentials>,
}

impl CredentialsLayer {
    /// Creates a layer sharing `credentials` across all wrapped services.
    pub fn new(credentials: PerRpcCredentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

impl<S> Layer<S> for CredentialsLayer {
    type Service = CredentialsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CredentialsService::new(inner, Arc::clone(&self.credentials))
    }
}

/// Tower service that fetches request metadata before forwarding the call.
///
/// The token fetch is bounded by the call's `grpc-timeout`. A failed fetch fails the call
/// with an `UNAUTHENTICATED` status (or `DEADLINE_EXCEEDED`) before anything is sent.
///
/// Created by [`CredentialsLayer`].
#[derive(Clone)]
pub struct CredentialsService<S> {
    inner: S,
    credentials: Arc<PerRpcCredentials>,
}

impl<S> CredentialsService<S> {
    pub(crate) fn new(inner: S, credentials: Arc<PerRpcCredentials>) -> Self {
        Self { inner, credentials }
    }

    /// The credentials attached by this service.
    pub fn credentials(&self) -> &PerRpcCredentials {
        &self.credentials
    }

    /// The wrapped service.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S: fmt::Debug> fmt::Debug for CredentialsService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsService")
            .field("inner", &self.inner)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl<S, B, ResBody> Service<Request<B>> for CredentialsService<S>
where
    S: Service<Request<B>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Into<BoxError>,
    B: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Response<ResBody>, BoxError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let credentials = Arc::clone(&self.credentials);

        // Clone-swap pattern (Tower Service contract).
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let uri = req.uri().clone();
            let fetch = credentials.request_metadata(&uri);
            let metadata = match grpc_timeout(req.headers()) {
                Some(limit) => tokio::time::timeout(limit, fetch)
                    .await
                    .map_err(|_| CredentialFetchError::DeadlineExceeded)
                    .and_then(|res| res),
                None => fetch.await,
            };

            match metadata {
                Ok(Some(value)) => {
                    req.headers_mut().insert(AUTHORIZATION, value);
                }
                Ok(None) => {}
                Err(err) => {
                    debug!("rejecting call to {}: {err}", uri.path());
                    return Err(Box::new(tonic::Status::from(err)) as BoxError);
                }
            }

            inner.call(req).await.map_err(Into::into)
        })
    }
}
