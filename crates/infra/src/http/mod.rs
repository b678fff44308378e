//! HTTP transport
//!
//! [`ApiRequest`] describes a call, [`HttpTransport`] runs it through the
//! interceptor chain and the [`HttpSender`], and classifies the answer.

pub mod interceptor;
pub mod interceptors;
pub mod request;
pub mod sender;
pub mod transport;

pub use interceptor::{HttpRequest, HttpResponse, HttpSender, Interceptor, Next};
pub use interceptors::{
    AuthCheckInterceptor, LoggingInterceptor, MetricsInterceptor, RetryInterceptor,
};
pub use request::ApiRequest;
pub use sender::ReqwestSender;
pub use transport::HttpTransport;
