use std::fmt;
use std::sync::Arc;

use pagewindow::{Entry, Error, LoadOptions, LoadThreshold, PartialState, QueryParams};
use serde_json::Value;

/// Called with every load error. Without one, errors are logged at error level.
pub type ErrorHandler = Arc<dyn Fn(&Error) + Send + Sync>;

/// Called with the raw response payload after a successful load has been applied.
pub type PostLoadAction = Arc<dyn Fn(&Value) + Send + Sync>;

/// Configuration for a [`crate::Controller`].
///
/// `source` is the only required field; everything else has a default.
pub struct ControllerOptions<S, E = Entry> {
    pub source: S,
    /// Seeds the initial window. Fields left unset keep their defaults.
    pub initial: Option<PartialState<E>>,
    /// Forwarded to the source with every request, next to the computed range.
    pub query_params: QueryParams,
    /// Skips the first load on [`crate::Controller::launch`]; the window stays empty until a
    /// search or an explicit load.
    pub defer_launch: bool,
    pub error_handler: Option<ErrorHandler>,
    pub load: LoadOptions,
    pub load_threshold: LoadThreshold,
    pub post_load_action: Option<PostLoadAction>,
    /// Runs [`pagewindow::validate_setup`] when the controller is built.
    pub strict_validation: bool,
}

impl<S, E> ControllerOptions<S, E> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            initial: None,
            query_params: QueryParams::new(),
            defer_launch: false,
            error_handler: None,
            load: LoadOptions::default(),
            load_threshold: LoadThreshold::default(),
            post_load_action: None,
            strict_validation: cfg!(debug_assertions),
        }
    }

    pub fn with_initial(mut self, initial: PartialState<E>) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn with_query_params(mut self, query_params: QueryParams) -> Self {
        self.query_params = query_params;
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn with_defer_launch(mut self, defer_launch: bool) -> Self {
        self.defer_launch = defer_launch;
        self
    }

    pub fn with_error_handler(mut self, handler: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    pub fn with_load(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    pub fn with_load_threshold(mut self, load_threshold: LoadThreshold) -> Self {
        self.load_threshold = load_threshold;
        self
    }

    pub fn with_post_load_action(
        mut self,
        action: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Self {
        self.post_load_action = Some(Arc::new(action));
        self
    }

    pub fn with_strict_validation(mut self, strict_validation: bool) -> Self {
        self.strict_validation = strict_validation;
        self
    }
}

impl<S, E: fmt::Debug> fmt::Debug for ControllerOptions<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("initial", &self.initial)
            .field("query_params", &self.query_params)
            .field("defer_launch", &self.defer_launch)
            .field("error_handler", &self.error_handler.is_some())
            .field("load", &self.load)
            .field("load_threshold", &self.load_threshold)
            .field("post_load_action", &self.post_load_action.is_some())
            .field("strict_validation", &self.strict_validation)
            .finish_non_exhaustive()
    }
}
