//! Google Identity Services code client.
//!
//! Wraps `google.accounts.oauth2.initCodeClient(...).requestCode()`. The SDK
//! reports through callbacks; both the success and the error callback
//! resolve one `oneshot` channel, so callers simply `.await` a
//! [`CodeResponse`]. Requires a browser environment.

use super::{CodeResponse, CodeSource, OAuthError};

/// [`CodeSource`] backed by the Google Identity Services script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleCodeClient {
    client_id: String,
}

impl GoogleCodeClient {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self { client_id: client_id.into() }
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

#[async_trait::async_trait(?Send)]
impl CodeSource for GoogleCodeClient {
    async fn request_code(&self) -> Result<CodeResponse, OAuthError> {
        #[cfg(feature = "csr")]
        {
            sdk::request_code(&self.client_id).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(OAuthError::SdkUnavailable)
        }
    }
}

#[cfg(feature = "csr")]
mod sdk {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::wasm_bindgen;

    use super::super::{GOOGLE_SCOPE, GOOGLE_UX_MODE};
    use super::{CodeResponse, OAuthError};

    #[wasm_bindgen]
    extern "C" {
        type CodeClient;

        #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "oauth2"], js_name = initCodeClient)]
        fn init_code_client(config: &js_sys::Object) -> Result<CodeClient, JsValue>;

        #[wasm_bindgen(method, catch, js_name = requestCode)]
        fn request_code_popup(this: &CodeClient) -> Result<(), JsValue>;
    }

    type Reply = Rc<RefCell<Option<oneshot::Sender<CodeResponse>>>>;

    fn sdk_loaded() -> bool {
        let mut node: JsValue = js_sys::global().into();
        for key in ["google", "accounts", "oauth2"] {
            node = match js_sys::Reflect::get(&node, &JsValue::from_str(key)) {
                Ok(next) if next.is_object() => next,
                _ => return false,
            };
        }
        true
    }

    fn read_string(obj: &JsValue, key: &str) -> Option<String> {
        js_sys::Reflect::get(obj, &JsValue::from_str(key)).ok().and_then(|v| v.as_string())
    }

    fn set(obj: &js_sys::Object, key: &str, value: &JsValue) {
        let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), value);
    }

    fn reply(tx: &Reply, response: CodeResponse) {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(response);
        }
    }

    pub(super) async fn request_code(client_id: &str) -> Result<CodeResponse, OAuthError> {
        if !sdk_loaded() {
            return Err(OAuthError::SdkUnavailable);
        }

        let (tx, rx) = oneshot::channel::<CodeResponse>();
        let tx: Reply = Rc::new(RefCell::new(Some(tx)));

        let on_code = {
            let tx = tx.clone();
            Closure::wrap(Box::new(move |resp: JsValue| {
                reply(
                    &tx,
                    CodeResponse {
                        code: read_string(&resp, "code"),
                        error: read_string(&resp, "error"),
                        error_description: read_string(&resp, "error_description"),
                        state: read_string(&resp, "state"),
                    },
                );
            }) as Box<dyn FnMut(JsValue)>)
        };
        // Popup closed or blocked.
        let on_error = {
            let tx = tx.clone();
            Closure::wrap(Box::new(move |err: JsValue| {
                reply(
                    &tx,
                    CodeResponse {
                        error: Some(read_string(&err, "type").unwrap_or_else(|| "unknown".to_owned())),
                        error_description: read_string(&err, "message"),
                        ..CodeResponse::default()
                    },
                );
            }) as Box<dyn FnMut(JsValue)>)
        };

        let config = js_sys::Object::new();
        set(&config, "client_id", &JsValue::from_str(client_id));
        set(&config, "scope", &JsValue::from_str(GOOGLE_SCOPE));
        set(&config, "ux_mode", &JsValue::from_str(GOOGLE_UX_MODE));
        set(&config, "callback", on_code.as_ref());
        set(&config, "error_callback", on_error.as_ref());

        let client = init_code_client(&config).map_err(|e| {
            log::error!("initCodeClient failed: {e:?}");
            OAuthError::SdkUnavailable
        })?;
        client.request_code_popup().map_err(|e| {
            log::error!("requestCode failed: {e:?}");
            OAuthError::SdkUnavailable
        })?;

        let response = rx.await.map_err(|_| OAuthError::Cancelled);
        drop(on_code);
        drop(on_error);
        response
    }
}
