pub mod doc;
pub mod links;
pub mod text;
