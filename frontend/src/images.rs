use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlImageElement, MutationObserver,
    MutationObserverInit, MutationRecord, Node, NodeList,
};

use crate::error::DomError;
use crate::orientation::{apply_orientation, Orientation, OrientationThresholds};
use crate::utils::dom;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub image_selector: String,
    pub container_selector: String,
    pub thresholds: OrientationThresholds,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        crate::config::RuntimeConfig::default().classifier()
    }
}

/// Labels the image's container with its orientation. Returns `None` when
/// there is no container or the image has no usable dimensions.
pub fn classify(
    image: &HtmlImageElement,
    config: &ClassifierConfig,
) -> Result<Option<Orientation>, DomError> {
    let Some(container) = image
        .closest(&config.container_selector)
        .map_err(|err| DomError::js("closest", err))?
    else {
        return Ok(None);
    };
    let Some(orientation) = Orientation::from_dimensions(
        image.natural_width(),
        image.natural_height(),
        &config.thresholds,
    ) else {
        return Ok(None);
    };
    apply_orientation(&container.class_list(), orientation)?;
    Ok(Some(orientation))
}

/// Classifies now if the image has finished loading, otherwise once its
/// `load` event fires.
pub fn schedule_classification(image: &HtmlImageElement, config: &Rc<ClassifierConfig>) {
    if image.complete() {
        run_classification(image, config);
        return;
    }

    let loaded = image.clone();
    let config = Rc::clone(config);
    let on_load = Closure::once_into_js(move || run_classification(&loaded, &config));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(err) = image.add_event_listener_with_callback_and_add_event_listener_options(
        "load",
        on_load.unchecked_ref(),
        &options,
    ) {
        log::warn!(
            "post image will not be classified: {}",
            DomError::js("addEventListener", err)
        );
    }
}

fn run_classification(image: &HtmlImageElement, config: &ClassifierConfig) {
    match classify(image, config) {
        Ok(Some(orientation)) => {
            log::debug!("{} classified as {}", image.src(), orientation.class_name())
        }
        Ok(None) => log::debug!("{} left unclassified", image.src()),
        Err(err) => log::warn!("failed to classify post image: {}", err),
    }
}

/// The node itself when it matches `selector`, followed by every matching
/// descendant. Non-element nodes yield nothing.
pub fn collect_candidates(node: &Node, selector: &str) -> Result<Vec<HtmlImageElement>, DomError> {
    let Some(element) = node.dyn_ref::<Element>() else {
        return Ok(Vec::new());
    };

    let mut candidates = Vec::new();
    if element
        .matches(selector)
        .map_err(|err| DomError::js("matches", err))?
    {
        if let Some(image) = element.dyn_ref::<HtmlImageElement>() {
            candidates.push(image.clone());
        }
    }
    let descendants = element
        .query_selector_all(selector)
        .map_err(|err| DomError::js("querySelectorAll", err))?;
    candidates.extend(dom::nodes_of::<HtmlImageElement>(&descendants));
    Ok(candidates)
}

/// Classifies the post images already on the page and every one inserted
/// under `<body>` afterwards. Dropping the observer disconnects it.
pub struct ImageObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl ImageObserver {
    pub fn start(document: &Document, config: Rc<ClassifierConfig>) -> Result<Self, DomError> {
        let existing = document
            .query_selector_all(&config.image_selector)
            .map_err(|err| DomError::js("querySelectorAll", err))?;
        let mut scheduled = 0;
        for image in dom::nodes_of::<HtmlImageElement>(&existing) {
            schedule_classification(&image, &config);
            scheduled += 1;
        }
        log::debug!("scheduled {} post images present at startup", scheduled);

        let body = document.body().ok_or(DomError::NoBody)?;
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |records: js_sys::Array, _: MutationObserver| {
                for record in records.iter() {
                    if let Ok(record) = record.dyn_into::<MutationRecord>() {
                        schedule_added(&record.added_nodes(), &config);
                    }
                }
            },
        );
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|err| DomError::js("MutationObserver", err))?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer
            .observe_with_options(&body, &init)
            .map_err(|err| DomError::js("MutationObserver.observe", err))?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Stops watching for insertions. Images already waiting on `load` are
    /// still classified when it fires.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for ImageObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn schedule_added(nodes: &NodeList, config: &Rc<ClassifierConfig>) {
    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };
        match collect_candidates(&node, &config.image_selector) {
            Ok(images) => {
                for image in &images {
                    schedule_classification(image, config);
                }
            }
            Err(err) => log::warn!("failed to scan inserted node: {}", err),
        }
    }
}

/// Starts the observer on the current document.
pub fn initialize_detection(config: Rc<ClassifierConfig>) -> Result<ImageObserver, DomError> {
    ImageObserver::start(&dom::document()?, config)
}
