mod dom;
mod wallet;

use std::rc::Rc;

use slotreel_core::{EngineConfig, ReelEngine, SlotResult, ThreadRandom, WalletGate};
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::dom::{AudioCue, BrowserRuntime, DomSlots};
use crate::wallet::{InjectedWallet, WalletWatch};

const REEL_SPIN_SOUND: &str = "reel-spin.wav";

fn build_engine(root: HtmlElement, on_result: Callback<String>) -> SlotResult<ReelEngine> {
    ReelEngine::new(
        EngineConfig::default(),
        Rc::new(DomSlots::attach(root, on_result)),
        Rc::new(InjectedWallet),
        Rc::new(AudioCue::new(REEL_SPIN_SOUND)),
        Rc::new(BrowserRuntime),
        Box::new(ThreadRandom),
    )
}

#[derive(Properties, PartialEq)]
struct WalletButtonProps {
    connected: bool,
    on_change: Callback<bool>,
}

#[function_component(WalletButton)]
fn wallet_button(props: &WalletButtonProps) -> Html {
    let toggle = {
        let connected = props.connected;
        let on_change = props.on_change.clone();
        Callback::from(move |_| {
            let on_change = on_change.clone();
            spawn_local(async move {
                let res = if connected {
                    InjectedWallet::disconnect().await
                } else {
                    InjectedWallet::connect().await
                };
                if let Err(err) = res {
                    warn!(?err, "wallet request failed");
                }
                on_change.emit(InjectedWallet.is_connected());
            });
        })
    };

    html! {
        <div style="position: fixed; right: 10px; top: 10px;">
            <button onclick={toggle}>
                { if props.connected { "Disconnect" } else { "Select Wallet" } }
            </button>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let slots_ref = use_node_ref();
    let result_text = use_state(String::new);
    let spinning = use_state(|| false);
    let connected = use_state(|| InjectedWallet.is_connected());
    let engine = use_state(|| None::<Rc<ReelEngine>>);

    {
        let slots_ref = slots_ref.clone();
        let engine = engine.clone();
        let result_text = result_text.clone();
        use_effect_with((), move |_| {
            if let Some(root) = slots_ref.cast::<HtmlElement>() {
                let on_result = Callback::from(move |text: String| result_text.set(text));
                match build_engine(root, on_result) {
                    Ok(built) => engine.set(Some(Rc::new(built))),
                    Err(err) => error!(%err, "reel engine unavailable"),
                }
            }
        });
    }

    {
        let connected = connected.clone();
        use_effect_with((), move |_| {
            let watch =
                WalletWatch::attach(Callback::from(move |now: bool| connected.set(now)));
            move || drop(watch)
        });
    }

    let do_spin = {
        let engine = engine.clone();
        let spinning = spinning.clone();
        let connected = connected.clone();
        Callback::from(move |_| {
            let Some(engine) = (*engine).clone() else {
                return;
            };
            let spinning = spinning.clone();
            let connected = connected.clone();
            spinning.set(true);
            spawn_local(async move {
                if let Err(err) = engine.spin().await {
                    warn!(%err, "spin refused");
                }
                spinning.set(false);
                connected.set(InjectedWallet.is_connected());
            });
        })
    };

    let on_wallet_change = {
        let connected = connected.clone();
        Callback::from(move |now: bool| connected.set(now))
    };

    let can_spin = *connected && !*spinning && engine.is_some();
    let reel_count = EngineConfig::default().reel_count;

    html! {
        <>
            <WalletButton connected={*connected} on_change={on_wallet_change} />
            <div class="slots" ref={slots_ref}>
                { for (0..reel_count).map(|_| html! { <div class="reel"></div> }) }
            </div>
            <div style="margin-top: 20px;">
                <button
                    type="button"
                    id="spin-button"
                    onclick={do_spin}
                    disabled={!can_spin}
                    style="width: 100%;"
                >
                    {"Spin"}
                </button>
            </div>
            <div id="debug" class="debug">{ (*result_text).clone() }</div>
        </>
    }
}

#[wasm_bindgen(start)]
pub fn run() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
    yew::Renderer::<App>::new().render();
}
