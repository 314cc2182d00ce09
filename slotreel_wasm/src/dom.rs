use std::{rc::Rc, time::Duration};

use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use slotreel_core::{ReelSurface, Runtime, SlotsSurface, SoundCue, Transition, WinKind};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{HtmlAudioElement, HtmlElement};
use yew::Callback;

/// Parses a computed `background-position-y` such as `"158px"`.
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        warn!(?err, property, "failed to set style");
    }
}

/// A `.reel` element whose background image is the icon strip.
pub struct DomReel(HtmlElement);

impl ReelSurface for DomReel {
    fn offset(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.get_computed_style(&self.0).ok().flatten())
            .and_then(|style| style.get_property_value("background-position-y").ok())
            .and_then(|value| parse_px(&value))
            .unwrap_or(0.0)
    }

    fn set_offset(&self, offset: f64) {
        set_style(&self.0, "background-position-y", &format!("{offset}px"));
    }

    fn set_transition(&self, transition: &Transition) {
        set_style(&self.0, "transition", &transition.css());
    }
}

/// The `.slots` container. Win markers are CSS classes on it; the result
/// line is pushed back into component state.
pub struct DomSlots {
    root: HtmlElement,
    reels: Vec<Rc<dyn ReelSurface>>,
    on_result: Callback<String>,
}

impl DomSlots {
    pub fn attach(root: HtmlElement, on_result: Callback<String>) -> Self {
        let mut reels: Vec<Rc<dyn ReelSurface>> = Vec::new();
        if let Ok(nodes) = root.query_selector_all(".reel") {
            for i in 0..nodes.length() {
                if let Some(element) = nodes
                    .item(i)
                    .and_then(|node| node.dyn_into::<HtmlElement>().ok())
                {
                    reels.push(Rc::new(DomReel(element)));
                }
            }
        }
        Self {
            root,
            reels,
            on_result,
        }
    }
}

impl SlotsSurface for DomSlots {
    fn reels(&self) -> Vec<Rc<dyn ReelSurface>> {
        self.reels.clone()
    }

    fn add_win_marker(&self, kind: WinKind) {
        if let Err(err) = self.root.class_list().add_1(kind.marker()) {
            warn!(?err, "failed to add win marker");
        }
    }

    fn remove_win_marker(&self, kind: WinKind) {
        if let Err(err) = self.root.class_list().remove_1(kind.marker()) {
            warn!(?err, "failed to remove win marker");
        }
    }

    fn set_result_text(&self, text: &str) {
        self.on_result.emit(text.to_string());
    }
}

/// Browser timers and `spawn_local`.
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = duration.as_millis().min(u32::MAX as u128) as u32;
        Box::pin(TimeoutFuture::new(millis))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

pub struct AudioCue(Option<HtmlAudioElement>);

impl AudioCue {
    pub fn new(src: &str) -> Self {
        let audio = HtmlAudioElement::new_with_src(src)
            .map_err(|err| warn!(?err, src, "audio unavailable"))
            .ok();
        Self(audio)
    }
}

impl SoundCue for AudioCue {
    fn play_reel_spin(&self) {
        let Some(audio) = &self.0 else { return };
        audio.set_current_time(0.0);
        if let Err(err) = audio.play() {
            warn!(?err, "failed to play reel sound");
        }
    }
}
