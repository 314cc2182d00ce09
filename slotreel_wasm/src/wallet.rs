use js_sys::{Function, Promise, Reflect};
use slotreel_core::WalletGate;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use yew::Callback;

const WALLET_EVENTS: [&str; 2] = ["connect", "disconnect"];

/// Wallet provider injected by a browser extension as `window.solana`.
pub struct InjectedWallet;

fn provider() -> Option<JsValue> {
    let window = web_sys::window()?;
    let provider = Reflect::get(window.as_ref(), &JsValue::from_str("solana")).ok()?;
    if provider.is_undefined() || provider.is_null() {
        None
    } else {
        Some(provider)
    }
}

async fn call(method: &str) -> Result<(), JsValue> {
    let provider = provider().ok_or_else(|| JsValue::from_str("no wallet provider"))?;
    let function: Function = Reflect::get(&provider, &JsValue::from_str(method))?.dyn_into()?;
    let result = function.call0(&provider)?;
    if let Ok(promise) = result.dyn_into::<Promise>() {
        JsFuture::from(promise).await?;
    }
    Ok(())
}

fn call_listener_method(
    provider: &JsValue,
    method: &str,
    event: &str,
    listener: &JsValue,
) -> Result<(), JsValue> {
    let function: Function = Reflect::get(provider, &JsValue::from_str(method))?.dyn_into()?;
    function.call2(provider, &JsValue::from_str(event), listener)?;
    Ok(())
}

/// Provider `connect`/`disconnect` subscription. Listeners are removed on drop.
pub struct WalletWatch {
    provider: JsValue,
    listener: Closure<dyn FnMut()>,
}

impl WalletWatch {
    /// Reports the live connection flag whenever the extension changes it.
    pub fn attach(on_change: Callback<bool>) -> Option<Self> {
        let provider = provider()?;
        let listener =
            Closure::<dyn FnMut()>::new(move || on_change.emit(InjectedWallet.is_connected()));
        for event in WALLET_EVENTS {
            if let Err(err) = call_listener_method(&provider, "on", event, listener.as_ref()) {
                warn!(?err, event, "wallet listener not attached");
            }
        }
        Some(Self { provider, listener })
    }
}

impl Drop for WalletWatch {
    fn drop(&mut self) {
        for event in WALLET_EVENTS {
            if let Err(err) = call_listener_method(
                &self.provider,
                "removeListener",
                event,
                self.listener.as_ref(),
            ) {
                debug!(?err, event, "wallet listener not removed");
            }
        }
    }
}

impl InjectedWallet {
    pub async fn connect() -> Result<(), JsValue> {
        call("connect").await
    }

    pub async fn disconnect() -> Result<(), JsValue> {
        call("disconnect").await
    }
}

impl WalletGate for InjectedWallet {
    fn is_connected(&self) -> bool {
        provider()
            .and_then(|p| Reflect::get(&p, &JsValue::from_str("isConnected")).ok())
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}
