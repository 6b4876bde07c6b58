use linkboard_core::MediaItem;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::renderer::{media_view, MediaContext};

const CLOSE_GLYPH: &str = "\u{2716}";

#[derive(Properties, PartialEq)]
pub(crate) struct PreviewOverlayProps {
    pub(crate) index: usize,
    pub(crate) total: usize,
    pub(crate) item: MediaItem,
    pub(crate) on_close: Callback<()>,
    pub(crate) on_previous: Callback<()>,
    pub(crate) on_next: Callback<()>,
}

/// Single-item overlay. Clicking the backdrop or the close glyph closes it.
#[function_component(PreviewOverlay)]
pub(crate) fn preview_overlay(props: &PreviewOverlayProps) -> Html {
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_event: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|event: MouseEvent| event.stop_propagation());
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_close.emit(());
        })
    };
    let on_previous = {
        let on_previous = props.on_previous.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_previous.emit(());
        })
    };
    let on_next = {
        let on_next = props.on_next.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_next.emit(());
        })
    };
    let at_first = props.index == 0;
    let at_last = props.index + 1 >= props.total;

    html! {
        <div class="preview-overlay" onclick={on_backdrop}>
            <div class="preview-content" onclick={keep_open}>
                <span class="preview-close" title="Close" onclick={on_close}>{CLOSE_GLYPH}</span>
                {media_view(&props.item, MediaContext::Preview, props.index, None)}
                <div class="preview-nav">
                    <button type="button" disabled={at_first} onclick={on_previous}>{"\u{2039}"}</button>
                    <span class="preview-position">{format!("{} / {}", props.index + 1, props.total)}</span>
                    <button type="button" disabled={at_last} onclick={on_next}>{"\u{203a}"}</button>
                </div>
            </div>
        </div>
    }
}
