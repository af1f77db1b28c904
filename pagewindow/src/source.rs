use core::future::Future;

use serde_json::Value;

use crate::QueryParams;
use crate::error::TransportError;

/// A `[start, end)` range request sent to the data source.
///
/// `start` is signed: a backward load near the head of the dataset asks for a range that begins
/// before index 0, and the source is expected to clamp it.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest {
    pub start: i64,
    pub end: i64,
    /// Caller query parameters. Never contains `start` or `end`.
    pub params: QueryParams,
}

impl PageRequest {
    /// Builds a request for `[start, end)`.
    ///
    /// `start`/`end` keys in `params` are dropped: the computed range always wins.
    pub fn new(start: i64, end: i64, params: &QueryParams) -> Self {
        let params = params
            .iter()
            .filter(|(k, _)| k.as_str() != "start" && k.as_str() != "end")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { start, end, params }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start).max(0) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// `{...params, "start": start, "end": end}`, the object form of the request.
    pub fn to_json(&self) -> Value {
        let mut object = self.params.clone();
        object.insert("start".to_owned(), Value::from(self.start));
        object.insert("end".to_owned(), Value::from(self.end));
        Value::Object(object)
    }
}

/// The asynchronous fetch function a window loads pages from.
///
/// A response must be a JSON object shaped as
/// `{"boundaries": {"start", "end"}, "flags": {"endOfResults"}, "queryResults": [...]}`; it is
/// checked by [`crate::validate_response`] before being merged. Errors are passed through to the
/// caller unchanged.
///
/// Any `Fn(PageRequest) -> impl Future<Output = Result<Value, TransportError>>` is a source.
pub trait PageSource {
    fn fetch(&self, request: PageRequest) -> impl Future<Output = Result<Value, TransportError>>;
}

impl<F, Fut> PageSource for F
where
    F: Fn(PageRequest) -> Fut,
    Fut: Future<Output = Result<Value, TransportError>>,
{
    fn fetch(&self, request: PageRequest) -> impl Future<Output = Result<Value, TransportError>> {
        self(request)
    }
}
