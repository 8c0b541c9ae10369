use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList, Window};

use crate::error::DomError;

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn root_element() -> Result<Element, DomError> {
    document()?.document_element().ok_or(DomError::NoRootElement)
}

/// Iterates a static `NodeList`, keeping only nodes of type `T`.
pub fn nodes_of<T>(list: &NodeList) -> impl Iterator<Item = T> + '_
where
    T: JsCast,
{
    (0..list.length())
        .filter_map(move |index| list.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
}
