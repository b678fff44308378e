use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use eka_domain::Result;

use crate::http::interceptor::{HttpRequest, HttpResponse, Interceptor, Next};
use crate::observability::{MetricsRecorder, RequestOutcome, RequestSample};

/// Reports one [`RequestSample`] per exchange to a [`MetricsRecorder`].
///
/// Registered outside the retry interceptor, so a retried call counts once
/// with its total duration.
#[derive(Clone)]
pub struct MetricsInterceptor {
    recorder: Arc<dyn MetricsRecorder>,
}

impl MetricsInterceptor {
    pub fn new(recorder: Arc<dyn MetricsRecorder>) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl Interceptor for MetricsInterceptor {
    async fn intercept(&self, request: HttpRequest, next: Next<'_>) -> Result<HttpResponse> {
        let method = request.method.to_string();
        let path = request.path().to_string();
        let started = Instant::now();

        let result = next.run(request).await;

        let (status, outcome) = match &result {
            Ok(response) if response.is_success() => (Some(response.status), RequestOutcome::Success),
            Ok(response) => (Some(response.status), RequestOutcome::HttpError),
            Err(_) => (None, RequestOutcome::Failure),
        };
        self.recorder.record_request(&RequestSample {
            method,
            path,
            status,
            outcome,
            duration: started.elapsed(),
        });

        result
    }
}
