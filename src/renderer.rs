use std::cell::RefCell;
use std::rc::Rc;

use linkboard_core::MediaItem;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, MouseEvent};
use yew::prelude::*;

pub(crate) const CARD_CLASS: &str = "card";
pub(crate) const REVEALED_CLASS: &str = "revealed";
const DELETE_GLYPH: &str = "\u{2716}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MediaContext {
    Card,
    Preview,
}

/// Per-variant markup shared by grid cards and the preview overlay.
pub(crate) fn media_view(
    item: &MediaItem,
    context: MediaContext,
    index: usize,
    onclick: Option<Callback<MouseEvent>>,
) -> Html {
    let data_index = index.to_string();
    match item {
        MediaItem::Image { source } => {
            let class = match context {
                MediaContext::Card => "card-media",
                MediaContext::Preview => "preview-media",
            };
            html! {
                <img class={class} src={source.clone()} alt="Image" data-index={data_index} {onclick} />
            }
        }
        MediaItem::Gif { source } => {
            let class = match context {
                MediaContext::Card => classes!("card-media", "gif"),
                MediaContext::Preview => classes!("preview-media", "gif"),
            };
            html! {
                <img class={class} src={source.clone()} alt="GIF" data-index={data_index} {onclick} />
            }
        }
        MediaItem::YouTube { url, thumbnail_url } => {
            let alt = match context {
                MediaContext::Card => "YouTube Video",
                MediaContext::Preview => "YouTube Video Preview",
            };
            html! {
                <a href={url.clone()} target="_blank" rel="noopener noreferrer" data-index={data_index}>
                    <img src={thumbnail_url.clone()} alt={alt} />
                </a>
            }
        }
        MediaItem::Link { url } => {
            let link = html! {
                <a class="link-box" href={url.clone()} target="_blank" rel="noopener noreferrer" data-index={data_index}>
                    {url.clone()}
                </a>
            };
            match context {
                MediaContext::Card => link,
                MediaContext::Preview => html! { <div class="link-preview">{link}</div> },
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct CardGridProps {
    pub(crate) items: Rc<Vec<MediaItem>>,
    pub(crate) on_delete: Callback<usize>,
    pub(crate) on_preview: Callback<usize>,
}

#[function_component(CardGrid)]
pub(crate) fn card_grid(props: &CardGridProps) -> Html {
    let container = use_node_ref();
    let observer = use_mut_ref(|| None::<RevealObserver>);

    {
        let container = container.clone();
        let observer = observer.clone();
        use_effect_with(props.items.clone(), move |_| {
            attach_reveal(&observer, &container);
            || ()
        });
    }
    {
        let observer = observer.clone();
        use_effect_with((), move |_| move || drop(observer.borrow_mut().take()));
    }

    let cards = props.items.iter().enumerate().map(|(index, item)| {
        let on_delete = {
            let on_delete = props.on_delete.clone();
            Callback::from(move |event: MouseEvent| {
                event.stop_propagation();
                on_delete.emit(index);
            })
        };
        let on_open = item.opens_preview().then(|| {
            let on_preview = props.on_preview.clone();
            Callback::from(move |_event: MouseEvent| on_preview.emit(index))
        });
        let holder_class = match item {
            MediaItem::Link { .. } => classes!("holder", "link-holder"),
            MediaItem::Image { .. } | MediaItem::Gif { .. } | MediaItem::YouTube { .. } => {
                classes!("holder")
            }
        };
        html! {
            <div key={index} class={CARD_CLASS} data-index={index.to_string()} data-kind={item.kind().as_str()}>
                <div class={holder_class}>
                    {media_view(item, MediaContext::Card, index, on_open)}
                    <span class="delete" title="Delete" onclick={on_delete}>{DELETE_GLYPH}</span>
                </div>
            </div>
        }
    });

    html! {
        <section class="section" ref={container}>
            {for cards}
        </section>
    }
}

fn attach_reveal(slot: &Rc<RefCell<Option<RevealObserver>>>, container: &NodeRef) {
    let Some(root) = container.cast::<Element>() else {
        return;
    };
    let mut slot = slot.borrow_mut();
    if slot.is_none() {
        match RevealObserver::new() {
            Ok(observer) => *slot = Some(observer),
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                {
                    gloo::console::warn!("render: reveal observer unavailable", _err);
                }
                return;
            }
        }
    }
    if let Some(observer) = slot.as_ref() {
        observer.observe_cards(&root);
    }
}

/// One observer per grid. Targets are re-attached after every render since
/// the card set is rebuilt from the sequence.
pub(crate) struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub(crate) fn new() -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let class_list = entry.target().class_list();
                    let _ = if entry.is_intersecting() {
                        class_list.add_1(REVEALED_CLASS)
                    } else {
                        class_list.remove_1(REVEALED_CLASS)
                    };
                }
            },
        );
        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub(crate) fn observe_cards(&self, root: &Element) {
        self.observer.disconnect();
        let Ok(cards) = root.query_selector_all(&format!(".{CARD_CLASS}")) else {
            return;
        };
        for index in 0..cards.length() {
            let Some(node) = cards.item(index) else {
                continue;
            };
            if let Ok(card) = node.dyn_into::<Element>() {
                self.observer.observe(&card);
            }
        }
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
