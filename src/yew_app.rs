use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent, Event, HtmlInputElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use linkboard_core::PreviewKey;

use crate::app_config::AppConfig;
use crate::gallery_handle::GalleryHandle;
use crate::ingest;
use crate::preview::PreviewOverlay;
use crate::renderer::CardGrid;

const ROOT_ELEMENT_ID: &str = "linkboard-root";

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) gallery: Rc<GalleryHandle>,
    pub(crate) config: Rc<AppConfig>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.gallery, &other.gallery) && Rc::ptr_eq(&self.config, &other.config)
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let gallery = props.gallery.clone();
    let snapshot = use_state(|| gallery.snapshot());
    let drag_active = use_state(|| false);
    let url_input = use_node_ref();
    let file_input = use_node_ref();

    {
        let gallery = gallery.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let gallery_for_cb = gallery.clone();
            let subscription = gallery.subscribe(Rc::new(move || {
                snapshot.set(gallery_for_cb.snapshot());
            }));
            move || drop(subscription)
        });
    }

    {
        let gallery = gallery.clone();
        use_effect_with((), move |_| {
            let listeners = install_global_listeners(gallery);
            move || drop(listeners)
        });
    }

    let ondragover = {
        let drag_active = drag_active.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            if !*drag_active {
                drag_active.set(true);
            }
        })
    };
    let ondragleave = {
        let drag_active = drag_active.clone();
        Callback::from(move |_event: DragEvent| drag_active.set(false))
    };
    let ondrop = {
        let drag_active = drag_active.clone();
        let gallery = gallery.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            drag_active.set(false);
            ingest::ingest_drop(&gallery, &event);
        })
    };

    let on_files = {
        let gallery = gallery.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(files) = input.files() else {
                return;
            };
            let files = ingest::file_list_to_vec(&files);
            input.set_value("");
            ingest::ingest_files(&gallery, files);
        })
    };
    let on_pick = {
        let file_input = file_input.clone();
        Callback::from(move |_event: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let submit_url = {
        let gallery = gallery.clone();
        let url_input = url_input.clone();
        Rc::new(move || {
            let Some(input) = url_input.cast::<HtmlInputElement>() else {
                return;
            };
            let value = input.value();
            if value.trim().is_empty() {
                return;
            }
            ingest::ingest_url(&gallery, &value);
            input.set_value("");
        })
    };
    let on_url_key = {
        let submit_url = submit_url.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                submit_url();
            }
        })
    };
    let on_url_submit = {
        let submit_url = submit_url.clone();
        Callback::from(move |_event: MouseEvent| submit_url())
    };

    let on_clear = {
        let gallery = gallery.clone();
        let message = props.config.confirm_clear_message.clone();
        Callback::from(move |_event: MouseEvent| {
            gallery.clear_all(|| gloo::dialogs::confirm(&message));
        })
    };

    let on_delete = {
        let gallery = gallery.clone();
        Callback::from(move |index: usize| gallery.delete_at(index))
    };
    let on_preview = {
        let gallery = gallery.clone();
        Callback::from(move |index: usize| gallery.open_preview(index))
    };

    let preview = snapshot.preview_item().map(|(index, item)| {
        let on_close = {
            let gallery = gallery.clone();
            Callback::from(move |()| gallery.close_preview())
        };
        let on_previous = {
            let gallery = gallery.clone();
            Callback::from(move |()| gallery.previous_preview())
        };
        let on_next = {
            let gallery = gallery.clone();
            Callback::from(move |()| gallery.next_preview())
        };
        html! {
            <PreviewOverlay
                index={index}
                total={snapshot.items.len()}
                item={item.clone()}
                {on_close}
                {on_previous}
                {on_next}
            />
        }
    });

    let drop_class = classes!("drop-area", drag_active.then_some("dragover"));

    html! {
        <main class="linkboard">
            <div class={drop_class} {ondragover} {ondragleave} {ondrop}>
                <p>{"Drop images, GIFs or links here, or paste from the clipboard"}</p>
                <input
                    ref={file_input}
                    id="file-input"
                    type="file"
                    accept="image/*"
                    multiple={true}
                    hidden={true}
                    onchange={on_files}
                />
                <button type="button" class="pick" onclick={on_pick}>{"Choose files"}</button>
            </div>
            <div class="url-entry">
                <input
                    ref={url_input}
                    id="url-input"
                    type="text"
                    placeholder="Paste an image, YouTube or page URL"
                    onkeydown={on_url_key}
                />
                <button type="button" onclick={on_url_submit}>{"Add"}</button>
                <button type="button" id="clear-button" class="clear" onclick={on_clear}>{"Clear all"}</button>
            </div>
            <CardGrid items={snapshot.items.clone()} {on_delete} {on_preview} />
            {for preview}
        </main>
    }
}

struct GlobalListeners {
    _paste: EventListener,
    _keydown: EventListener,
    _unload: EventListener,
}

fn install_global_listeners(gallery: Rc<GalleryHandle>) -> Option<GlobalListeners> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let paste = {
        let gallery = gallery.clone();
        EventListener::new(&document, "paste", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<ClipboardEvent>() {
                ingest::ingest_paste(&gallery, event);
            }
        })
    };

    let keydown = {
        let gallery = gallery.clone();
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };
        EventListener::new_with_options(&window, "keydown", options, move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(key) = PreviewKey::from_key(&event.key()) else {
                return;
            };
            if gallery.handle_preview_key(key) && key.suppresses_default() {
                event.prevent_default();
            }
        })
    };

    let unload = EventListener::new(&window, "beforeunload", move |_event: &Event| {
        gallery.persist();
    });

    Some(GlobalListeners {
        _paste: paste,
        _keydown: keydown,
        _unload: unload,
    })
}

pub(crate) fn run(gallery: Rc<GalleryHandle>, config: AppConfig) {
    let props = AppProps {
        gallery,
        config: Rc::new(config),
    };
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(ROOT_ELEMENT_ID));
    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, props).render();
        }
        None => {
            yew::Renderer::<App>::with_props(props).render();
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use linkboard_core::MediaItem;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(storage_key: &str) -> (Rc<GalleryHandle>, web_sys::Element) {
        set_panic_hook();
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .expect("local storage available");
        storage.remove_item(storage_key).expect("reset storage");
        let config = AppConfig {
            storage_key: storage_key.to_string(),
            ..AppConfig::default()
        };
        let gallery = GalleryHandle::new(&config);
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        yew::Renderer::<App>::with_root_and_props(
            root.clone(),
            AppProps {
                gallery: gallery.clone(),
                config: Rc::new(config),
            },
        )
        .render();
        (gallery, root)
    }

    fn card_count(root: &web_sys::Element) -> u32 {
        root.query_selector_all(".card").expect("query cards").length()
    }

    fn card(root: &web_sys::Element, index: usize) -> web_sys::Element {
        root.query_selector(&format!(".card[data-index=\"{index}\"]"))
            .expect("query card")
            .expect("card rendered")
    }

    #[wasm_bindgen_test(async)]
    async fn visible_card_gains_revealed_class() {
        let (gallery, root) = mount("linkboard.test.reveal");
        gallery.append(MediaItem::link("https://example.com/visible"));
        let mut revealed = false;
        for _ in 0..40 {
            TimeoutFuture::new(25).await;
            if card(&root, 0).class_list().contains("revealed") {
                revealed = true;
                break;
            }
        }
        assert!(revealed, "card in viewport was never revealed");
    }

    #[wasm_bindgen_test(async)]
    async fn arrow_key_in_open_preview_advances_and_prevents_scroll() {
        let (gallery, _root) = mount("linkboard.test.keys");
        gallery.append(MediaItem::image("https://example.com/0.png"));
        gallery.append(MediaItem::image("https://example.com/1.png"));
        TimeoutFuture::new(10).await;
        gallery.open_preview(0);

        let init = web_sys::KeyboardEventInit::new();
        init.set_key("ArrowRight");
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .expect("keyboard event");
        web_sys::window()
            .expect("window available")
            .dispatch_event(&event)
            .expect("dispatch keydown");

        assert!(event.default_prevented());
        assert_eq!(gallery.snapshot().preview.current(), Some(1));
    }

    #[wasm_bindgen_test(async)]
    async fn dropped_uri_list_adds_one_card_per_url() {
        let (gallery, root) = mount("linkboard.test.drop");
        TimeoutFuture::new(10).await;
        let transfer = web_sys::DataTransfer::new().expect("data transfer");
        transfer
            .set_data(
                "text/uri-list",
                "https://example.com/a.gif\r\n# comment\r\nhttps://example.com/page",
            )
            .expect("set uri list");
        let init = web_sys::DragEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_data_transfer(Some(&transfer));
        let event = DragEvent::new_with_event_init_dict("drop", &init).expect("drag event");
        root.query_selector(".drop-area")
            .expect("query drop area")
            .expect("drop area rendered")
            .dispatch_event(&event)
            .expect("dispatch drop");
        TimeoutFuture::new(10).await;

        assert_eq!(card_count(&root), 2);
        assert_eq!(
            gallery.snapshot().items.as_slice(),
            &[
                MediaItem::gif("https://example.com/a.gif"),
                MediaItem::link("https://example.com/page"),
            ]
        );
        assert_eq!(card(&root, 0).get_attribute("data-kind").as_deref(), Some("gif"));
    }

    #[wasm_bindgen_test(async)]
    async fn appended_items_render_one_card_each() {
        let (gallery, root) = mount("linkboard.test.render");
        gallery.append(MediaItem::image("https://example.com/a.png"));
        gallery.append(MediaItem::link("https://example.com/article"));
        TimeoutFuture::new(10).await;
        assert_eq!(card_count(&root), 2);
        let link = root
            .query_selector(".card[data-index=\"1\"] .link-box")
            .expect("query link")
            .expect("link card rendered");
        assert_eq!(link.text_content().as_deref(), Some("https://example.com/article"));
    }

    #[wasm_bindgen_test(async)]
    async fn clicking_an_image_opens_preview_at_its_index() {
        let (gallery, root) = mount("linkboard.test.preview");
        gallery.append(MediaItem::link("https://example.com"));
        gallery.append(MediaItem::gif("https://example.com/b.gif"));
        TimeoutFuture::new(10).await;
        let gif = root
            .query_selector(".card[data-index=\"1\"] img")
            .expect("query gif")
            .expect("gif rendered")
            .dyn_into::<web_sys::HtmlElement>()
            .expect("html element");
        gif.click();
        TimeoutFuture::new(10).await;
        assert_eq!(gallery.snapshot().preview.current(), Some(1));
        assert!(root.query_selector(".preview-overlay").expect("query").is_some());
    }

    #[wasm_bindgen_test(async)]
    async fn delete_glyph_removes_card_and_persists() {
        let key = "linkboard.test.delete";
        let (gallery, root) = mount(key);
        gallery.append(MediaItem::image("https://example.com/0.png"));
        gallery.append(MediaItem::image("https://example.com/1.png"));
        TimeoutFuture::new(10).await;
        let delete = root
            .query_selector(".card[data-index=\"0\"] .delete")
            .expect("query delete")
            .expect("delete rendered")
            .dyn_into::<web_sys::HtmlElement>()
            .expect("html element");
        delete.click();
        TimeoutFuture::new(10).await;
        assert_eq!(card_count(&root), 1);
        let saved = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(key).ok().flatten())
            .expect("saved payload");
        assert!(saved.contains("1.png"));
        assert!(!saved.contains("0.png"));
    }
}
