//! Telegram WebApp host
//!
//! Reads `window.Telegram.WebApp` through `js_sys::Reflect`. When the page
//! is opened outside Telegram the object is missing and the host reports no
//! identity and no payments.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use football_stars::client::{ClientError, ClientResult, HostPlatform, PaymentStatus};

/// Read `target[key]`, treating `undefined` and `null` as missing
fn prop(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Walk a dotted path of properties
fn path(target: &JsValue, keys: &[&str]) -> Option<JsValue> {
    keys.iter()
        .try_fold(target.clone(), |value, key| prop(&value, key))
}

/// `target[key]` when it is a callable function
fn method(target: &JsValue, key: &str) -> Option<Function> {
    prop(target, key).and_then(|f| f.dyn_into::<Function>().ok())
}

pub struct TelegramHost {
    web_app: Option<JsValue>,
}

impl TelegramHost {
    /// Look up the WebApp object on the current window
    pub fn detect() -> Self {
        let web_app = web_sys::window().and_then(|window| path(&window.into(), &["Telegram", "WebApp"]));
        Self::from_web_app(web_app)
    }

    pub fn from_web_app(web_app: Option<JsValue>) -> Self {
        Self { web_app }
    }

    /// `PaymentRequest` and its `showInvoice` function, if the client has a payment sheet
    fn payment_sheet(&self) -> Option<(JsValue, Function)> {
        let request = self.web_app.as_ref().and_then(|app| prop(app, "PaymentRequest"))?;
        let show = method(&request, "showInvoice")?;
        Some((request, show))
    }
}

#[async_trait(?Send)]
impl HostPlatform for TelegramHost {
    fn user_id(&self) -> Option<i64> {
        let app = self.web_app.as_ref()?;
        path(app, &["initDataUnsafe", "user", "id"])
            .and_then(|id| id.as_f64())
            .map(|id| id as i64)
    }

    fn expand(&self) {
        let Some(app) = &self.web_app else { return };
        if let Some(expand) = method(app, "expand") {
            if let Err(e) = expand.call0(app) {
                web_sys::console::warn_2(&"WebApp.expand failed".into(), &e);
            }
        }
    }

    fn supports_payments(&self) -> bool {
        self.payment_sheet().is_some()
    }

    async fn show_invoice(&self, invoice: &Value) -> ClientResult<PaymentStatus> {
        let (request, show) = self.payment_sheet().ok_or(ClientError::PaymentUnavailable)?;

        let invoice = js_sys::JSON::parse(&invoice.to_string())
            .map_err(|_| ClientError::Decode("invoice".to_string()))?;
        let promise: Promise = show
            .call1(&request, &invoice)
            .map_err(|e| ClientError::Transport(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| ClientError::Decode("showInvoice did not return a promise".to_string()))?;

        let result = JsFuture::from(promise)
            .await
            .map_err(|e| ClientError::Transport(format!("{:?}", e)))?;

        let status = prop(&result, "status")
            .and_then(|s| s.as_string())
            .unwrap_or_default();
        Ok(PaymentStatus::from_label(&status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use js_sys::Object;
    use serde_json::json;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn object(entries: &[(&str, JsValue)]) -> JsValue {
        let obj = Object::new();
        for (key, value) in entries {
            Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
        }
        obj.into()
    }

    fn web_app(payment_request: Option<JsValue>) -> JsValue {
        let user = object(&[("id", JsValue::from_f64(777.0))]);
        let init = object(&[("user", user)]);
        let mut entries = vec![("initDataUnsafe", init)];
        if let Some(request) = payment_request {
            entries.push(("PaymentRequest", request));
        }
        object(&entries)
    }

    fn sheet_answering(status: &str) -> JsValue {
        let show = Function::new_with_args(
            "invoice",
            &format!("return Promise.resolve({{ status: '{}' }});", status),
        );
        object(&[("showInvoice", show.into())])
    }

    #[wasm_bindgen_test]
    fn test_outside_telegram() {
        let host = TelegramHost::from_web_app(None);
        assert_eq!(host.user_id(), None);
        assert!(!host.supports_payments());
    }

    #[wasm_bindgen_test]
    fn test_user_id_from_init_data() {
        let host = TelegramHost::from_web_app(Some(web_app(None)));
        assert_eq!(host.user_id(), Some(777));
    }

    #[wasm_bindgen_test]
    fn test_no_payment_request_means_no_payments() {
        let host = TelegramHost::from_web_app(Some(web_app(None)));
        assert!(!host.supports_payments());
    }

    #[wasm_bindgen_test]
    fn test_payment_request_without_show_invoice() {
        let request = object(&[("showInvoice", JsValue::from_str("not a function"))]);
        let host = TelegramHost::from_web_app(Some(web_app(Some(request))));
        assert!(!host.supports_payments());
    }

    #[wasm_bindgen_test]
    async fn test_paid_status_is_reported() {
        let host = TelegramHost::from_web_app(Some(web_app(Some(sheet_answering("paid")))));
        assert!(host.supports_payments());

        let status = host.show_invoice(&json!({"title": "Buy 100 coins"})).await.unwrap();
        assert_eq!(status, PaymentStatus::Paid);
    }

    #[wasm_bindgen_test]
    async fn test_cancelled_status_is_reported() {
        let host = TelegramHost::from_web_app(Some(web_app(Some(sheet_answering("cancelled")))));

        let status = host.show_invoice(&json!({})).await.unwrap();
        assert_eq!(status, PaymentStatus::Cancelled);
    }

    #[wasm_bindgen_test]
    async fn test_show_invoice_without_sheet_fails() {
        let host = TelegramHost::from_web_app(Some(web_app(None)));
        assert!(matches!(
            host.show_invoice(&json!({})).await,
            Err(ClientError::PaymentUnavailable)
        ));
    }
}
