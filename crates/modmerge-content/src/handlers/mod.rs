//! Format handlers

mod json;
mod xml;

pub use self::json::JsonHandler;
pub use self::xml::XmlHandler;
