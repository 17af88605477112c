use std::cell::RefCell;
use std::rc::Rc;

use hashnav_core::{
    FragmentDescriptor, Handler, Navigator, NavigatorConfig, PollHandle, Scheduler, Tick,
    parse_uri,
};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::WebHost;
use crate::error::{WebError, js_message};
use crate::timer::{DocumentReady, WindowTimer};

/// Builder for [`WebNavigator`].
#[derive(Debug, Default, Clone)]
pub struct WebNavigatorBuilder {
    config: NavigatorConfig,
    console_logging: bool,
}

impl WebNavigatorBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: NavigatorConfig::new(),
            console_logging: true,
        }
    }

    /// Replaces the polling configuration.
    #[must_use]
    pub const fn with_config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Controls whether tracing output and panics are forwarded to the console.
    #[must_use]
    pub const fn console_logging(mut self, enabled: bool) -> Self {
        self.console_logging = enabled;
        self
    }

    /// Finalises the builder and creates a [`WebNavigator`].
    ///
    /// # Errors
    ///
    /// Returns an error if the window or document is not available.
    pub fn build(self) -> Result<WebNavigator, WebError> {
        WebNavigator::new_with_options(self)
    }
}

/// A JavaScript function bound to an event, with the handler wrapping it.
#[derive(Debug)]
struct JsBinding {
    event: String,
    function: js_sys::Function,
    handler: Handler<Element>,
}

/// Fragment navigator for the current browser page.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebNavigator {
    navigator: Rc<Navigator<WebHost>>,
    scheduler: Scheduler<WindowTimer>,
    bindings: RefCell<Vec<JsBinding>>,
}

impl WebNavigator {
    fn new_with_options(builder: WebNavigatorBuilder) -> Result<Self, WebError> {
        if builder.console_logging {
            crate::logging::install_console_forwarder();
        }

        let host = WebHost::new()?;
        let scheduler =
            Scheduler::new(WindowTimer::new(host.window().clone())).with_config(builder.config);
        Ok(Self {
            navigator: Rc::new(Navigator::new(host)),
            scheduler,
            bindings: RefCell::new(Vec::new()),
        })
    }

    /// The navigator driving this page, for Rust-side handlers.
    #[must_use]
    pub fn navigator(&self) -> &Rc<Navigator<WebHost>> {
        &self.navigator
    }

    /// Starts polling once the document is ready.
    ///
    /// # Errors
    ///
    /// Returns an error if the ready listener cannot be installed.
    pub fn start_polling(&self) -> Result<PollHandle, WebError> {
        let ready = DocumentReady::new(self.navigator.host().document().clone());
        Ok(self.scheduler.start(Rc::clone(&self.navigator), &ready)?)
    }

    /// Runs one tick and reports what happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be accessed or a handler fails.
    pub fn tick(&self) -> Result<Tick, WebError> {
        Ok(self.navigator.check_uri()?)
    }

    fn handler_for(&self, event: &str, function: &js_sys::Function) -> Option<Handler<Element>> {
        self.bindings
            .borrow()
            .iter()
            .find(|binding| binding.event == event && same_function(&binding.function, function))
            .map(|binding| binding.handler.clone())
    }
}

fn same_function(a: &js_sys::Function, b: &js_sys::Function) -> bool {
    let a: &JsValue = a;
    let b: &JsValue = b;
    a == b
}

fn js_handler(function: js_sys::Function) -> Handler<Element> {
    Handler::new(move |context: &Element, params| {
        let args: js_sys::Array = params.iter().map(|param| JsValue::from_str(param)).collect();
        function
            .apply(context.as_ref(), &args)
            .map(drop)
            .map_err(|thrown| anyhow::anyhow!(js_message(&thrown)))
    })
}

fn descriptor_to_js(descriptor: &FragmentDescriptor) -> Result<JsValue, WebError> {
    let json = serde_json::to_string(descriptor)?;
    Ok(js_sys::JSON::parse(&json)?)
}

fn descriptor_from_js(value: &JsValue) -> Result<FragmentDescriptor, WebError> {
    let json: String = js_sys::JSON::stringify(value)?.into();
    Ok(serde_json::from_str(&json)?)
}

#[wasm_bindgen]
impl WebNavigator {
    /// Creates a new [`WebNavigator`] using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the window or document is not available.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Self, WebError> {
        Self::new_with_options(WebNavigatorBuilder::new())
    }

    /// Begins polling once the document is ready. Each call starts another chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the ready listener cannot be installed.
    #[wasm_bindgen]
    pub fn start(&self) -> Result<WebPollHandle, WebError> {
        self.start_polling().map(|handle| WebPollHandle { handle })
    }

    /// Parses `uri` into `{anchor, event, params}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be converted to a JavaScript object.
    #[wasm_bindgen(js_name = parseUri)]
    pub fn parse_uri(&self, uri: &str) -> Result<JsValue, WebError> {
        descriptor_to_js(&parse_uri(uri))
    }

    /// Runs one tick manually.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be accessed or a handler throws.
    #[wasm_bindgen(js_name = checkUri)]
    pub fn check_uri(&self) -> Result<(), WebError> {
        self.tick().map(drop)
    }

    /// Binds `handler` to `event`. It is called with the context element as
    /// `this` and the fragment parameters as arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if `event` is empty.
    #[wasm_bindgen]
    pub fn bind(&self, event: &str, handler: js_sys::Function) -> Result<(), WebError> {
        if let Some(existing) = self.handler_for(event, &handler) {
            return Ok(self.navigator.bind(event, existing)?);
        }

        let wrapped = js_handler(handler.clone());
        self.navigator.bind(event, wrapped.clone())?;
        self.bindings.borrow_mut().push(JsBinding {
            event: event.to_string(),
            function: handler,
            handler: wrapped,
        });
        Ok(())
    }

    /// Removes `handler` from `event`, or every handler of `event` when omitted.
    #[wasm_bindgen]
    pub fn unbind(&self, event: &str, handler: Option<js_sys::Function>) {
        match handler {
            Some(function) => {
                if let Some(bound) = self.handler_for(event, &function) {
                    self.navigator.unbind(event, Some(&bound));
                    self.bindings
                        .borrow_mut()
                        .retain(|binding| !binding.handler.same_as(&bound));
                }
            }
            None => {
                self.navigator.unbind(event, None);
                self.bindings
                    .borrow_mut()
                    .retain(|binding| binding.event != event);
            }
        }
    }

    /// Dispatches a `{anchor, event, params}` object without touching the address.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is malformed or a handler throws.
    #[wasm_bindgen]
    pub fn fire(&self, descriptor: &JsValue) -> Result<(), WebError> {
        let descriptor = descriptor_from_js(descriptor)?;
        Ok(self.navigator.fire(&descriptor)?)
    }

    /// Sets the console log level (`error`, `warn`, `info`, `debug` or `trace`).
    #[wasm_bindgen(js_name = setLogLevel)]
    pub fn set_log_level(level: &str) {
        crate::logging::set_log_level(level);
    }
}

/// JavaScript handle to a running polling chain.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WebPollHandle {
    handle: PollHandle,
}

#[wasm_bindgen]
impl WebPollHandle {
    /// Stops further ticks of this chain.
    #[wasm_bindgen]
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Whether this chain is still polling.
    #[wasm_bindgen(getter, js_name = isRunning)]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }
}
