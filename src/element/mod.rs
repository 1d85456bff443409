pub mod element_kind;
pub mod resolver;
pub mod type_resolver;
