/// Content-script side: the launcher bubble and the floating panel that hosts
/// the blurb browser in an iframe.
pub mod geometry;
mod listener;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::error::DomError;
use geometry::{BubbleDrag, GestureOutcome, PanelGeometry, Point, ResizeDrag, Size, Visibility};
use listener::{GestureSession, ListenerGuard};

pub const BUBBLE_ID: &str = "blurbinator-bubble";
pub const CONTAINER_ID: &str = "floating-blurb-viewer";
pub const IFRAME_ID: &str = "blurbinator-iframe";

const LOGO_PATH: &str = "BlurbinatorLogo.png";
const APP_PAGE: &str = "index.html";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = getURL)]
    fn extension_url(path: &str) -> Result<String, JsValue>;
}

/// Resolve a packaged file; outside an extension the path is used as is
fn asset_url(path: &str) -> String {
    extension_url(path).unwrap_or_else(|e| {
        log::debug!("No extension runtime for {}: {:?}", path, e);
        path.to_string()
    })
}

thread_local! {
    static HOST_PANEL: RefCell<Option<HostPanel>> = const { RefCell::new(None) };
}

/// Inject the bubble and panel into the current page. Safe to call twice.
pub fn install() -> Result<(), DomError> {
    let document = web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::Unavailable("document"))?;

    if document.get_element_by_id(BUBBLE_ID).is_some() {
        log::debug!("Blurbinator already present on this page");
        return Ok(());
    }

    let panel = HostPanel::inject(&document)?;
    HOST_PANEL.with(|slot| *slot.borrow_mut() = Some(panel));
    log::info!("Blurbinator panel injected");
    Ok(())
}

struct PanelElements {
    document: Document,
    body: HtmlElement,
    bubble: HtmlElement,
    container: HtmlElement,
    iframe: HtmlElement,
}

impl PanelElements {
    fn show(&self, visibility: Visibility) -> Result<(), DomError> {
        let (container, bubble) = match visibility {
            Visibility::Panel => ("block", "none"),
            Visibility::Bubble => ("none", "block"),
        };
        self.container.style().set_property("display", container)?;
        self.bubble.style().set_property("display", bubble)?;
        Ok(())
    }

    fn place_bubble(&self, at: Point) -> Result<(), DomError> {
        let style = self.bubble.style();
        style.set_property("left", &format!("{}px", at.x))?;
        style.set_property("top", &format!("{}px", at.y))?;
        Ok(())
    }

    fn resize_panel(&self, size: Size) -> Result<(), DomError> {
        let style = self.container.style();
        style.set_property("width", &format!("{}px", size.width))?;
        style.set_property("height", &format!("{}px", size.height))?;

        let frame = self.iframe.style();
        frame.set_property("width", "100%")?;
        frame.set_property("height", "100%")?;
        Ok(())
    }

    fn set_cursor(&self, cursor: &str) -> Result<(), DomError> {
        self.body.style().set_property("cursor", cursor)?;
        Ok(())
    }

    fn stop_pulse(&self) -> Result<(), DomError> {
        self.bubble.style().set_property("animation", "none")?;
        Ok(())
    }
}

type Shared<T> = Rc<RefCell<T>>;

struct HostPanel {
    _listeners: Vec<ListenerGuard>,
}

impl HostPanel {
    fn inject(document: &Document) -> Result<HostPanel, DomError> {
        let body = document.body().ok_or(DomError::NoBody)?;
        let window = web_sys::window().ok_or(DomError::NoWindow)?;

        let bubble = create_element(document, "img")?;
        bubble.set_id(BUBBLE_ID);
        bubble.set_attribute("src", &asset_url(LOGO_PATH))?;
        bubble.set_attribute("draggable", "false")?;
        bubble.set_attribute("alt", "Open Blurbinator")?;
        bubble.style().set_property("position", "fixed")?;
        body.append_child(&bubble)?;

        let container = create_element(document, "div")?;
        container.set_id(CONTAINER_ID);
        body.append_child(&container)?;

        let iframe = create_element(document, "iframe")?;
        iframe.set_id(IFRAME_ID);
        iframe.set_attribute("src", &asset_url(APP_PAGE))?;
        container.append_child(&iframe)?;

        let minimize = create_element(document, "button")?;
        minimize.set_inner_text("−");
        minimize.set_class_name("minimize-button");
        container.append_child(&minimize)?;

        let handle = create_element(document, "div")?;
        handle.set_class_name("resize-handle");
        container.append_child(&handle)?;

        let viewport = (
            window.inner_width()?.as_f64().unwrap_or_default() as i32,
            window.inner_height()?.as_f64().unwrap_or_default() as i32,
        );
        let geometry = Rc::new(RefCell::new(PanelGeometry::new(
            PanelGeometry::default_bubble(viewport.0, viewport.1),
        )));

        let elements = Rc::new(PanelElements {
            document: document.clone(),
            body,
            bubble,
            container,
            iframe,
        });

        {
            let geometry = geometry.borrow();
            elements.place_bubble(geometry.bubble)?;
            elements.resize_panel(geometry.panel)?;
            elements.show(geometry.visibility)?;
        }

        let listeners = vec![
            ListenerGuard::attach(&minimize, "click", {
                let elements = elements.clone();
                let geometry = geometry.clone();
                move |_| toggle(&elements, &geometry)
            })?,
            ListenerGuard::attach(&elements.bubble, "mousedown", {
                let elements = elements.clone();
                let geometry = geometry.clone();
                let session: Shared<Option<GestureSession<BubbleDrag>>> = Rc::new(RefCell::new(None));
                move |e: MouseEvent| {
                    e.prevent_default();
                    if let Err(e) = start_bubble_gesture(&e, &elements, &geometry, &session) {
                        log::error!("Bubble drag failed to start: {}", e);
                    }
                }
            })?,
            ListenerGuard::attach(&handle, "mousedown", {
                let elements = elements.clone();
                let geometry = geometry.clone();
                let session: Shared<Option<GestureSession<ResizeDrag>>> = Rc::new(RefCell::new(None));
                move |e: MouseEvent| {
                    e.prevent_default();
                    if let Err(e) = start_resize_gesture(&e, &elements, &geometry, &session) {
                        log::error!("Resize failed to start: {}", e);
                    }
                }
            })?,
        ];

        Ok(HostPanel {
            _listeners: listeners,
        })
    }
}

fn create_element(document: &Document, tag: &str) -> Result<HtmlElement, DomError> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Unavailable("HTML element"))
}

fn pointer(e: &MouseEvent) -> Point {
    Point::new(e.client_x(), e.client_y())
}

fn toggle(elements: &PanelElements, geometry: &Shared<PanelGeometry>) {
    let visibility = geometry.borrow_mut().toggle();
    if let Err(e) = elements.show(visibility) {
        log::error!("Failed to toggle panel: {}", e);
    }
}

fn start_bubble_gesture(
    press: &MouseEvent,
    elements: &Rc<PanelElements>,
    geometry: &Shared<PanelGeometry>,
    session: &Shared<Option<GestureSession<BubbleDrag>>>,
) -> Result<(), DomError> {
    let on_move = ListenerGuard::attach(&elements.document, "mousemove", {
        let elements = elements.clone();
        let geometry = geometry.clone();
        let session = session.clone();
        move |e: MouseEvent| {
            let delta = session
                .borrow_mut()
                .as_mut()
                .and_then(|s| s.state.motion(pointer(&e)));
            if let Some(delta) = delta {
                let mut geometry = geometry.borrow_mut();
                geometry.bubble = geometry.bubble.offset(delta);
                if let Err(e) = elements.place_bubble(geometry.bubble) {
                    log::error!("Failed to move bubble: {}", e);
                }
            }
        }
    })?;

    let on_release = ListenerGuard::attach(&elements.document, "mouseup", {
        let elements = elements.clone();
        let geometry = geometry.clone();
        let session = session.clone();
        move |_: MouseEvent| {
            let Some(outcome) = session.borrow_mut().take().map(|s| s.finish().release()) else {
                return;
            };
            if let Err(e) = elements.stop_pulse() {
                log::warn!("Failed to stop bubble animation: {}", e);
            }
            if outcome == GestureOutcome::Clicked {
                toggle(&elements, &geometry);
            }
        }
    })?;

    // Replacing a stale session detaches its listeners
    *session.borrow_mut() = Some(GestureSession::new(
        BubbleDrag::press(pointer(press)),
        on_move,
        on_release,
    ));
    Ok(())
}

fn start_resize_gesture(
    press: &MouseEvent,
    elements: &Rc<PanelElements>,
    geometry: &Shared<PanelGeometry>,
    session: &Shared<Option<GestureSession<ResizeDrag>>>,
) -> Result<(), DomError> {
    let initial = Size {
        width: elements.container.offset_width(),
        height: elements.container.offset_height(),
    };

    let on_move = ListenerGuard::attach(&elements.document, "mousemove", {
        let elements = elements.clone();
        let geometry = geometry.clone();
        let session = session.clone();
        move |e: MouseEvent| {
            let size = session.borrow().as_ref().map(|s| s.state.size_at(pointer(&e)));
            if let Some(size) = size {
                geometry.borrow_mut().panel = size;
                if let Err(e) = elements.resize_panel(size) {
                    log::error!("Failed to resize panel: {}", e);
                }
            }
        }
    })?;

    let on_release = ListenerGuard::attach(&elements.document, "mouseup", {
        let elements = elements.clone();
        let session = session.clone();
        move |_: MouseEvent| {
            session.borrow_mut().take();
            if let Err(e) = elements.set_cursor("default") {
                log::warn!("Failed to reset cursor: {}", e);
            }
        }
    })?;

    elements.set_cursor("nwse-resize")?;
    *session.borrow_mut() = Some(GestureSession::new(
        ResizeDrag::press(pointer(press), initial),
        on_move,
        on_release,
    ));
    Ok(())
}
