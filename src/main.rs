mod app_config;
mod gallery_handle;
mod ingest;
mod local_store;
mod preview;
mod renderer;
mod yew_app;

use crate::gallery_handle::GalleryHandle;

fn main() {
    let config = app_config::load();
    let gallery = GalleryHandle::new(&config);
    yew_app::run(gallery, config);
}
