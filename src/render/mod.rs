pub mod annotate;
pub mod compositor;
pub(crate) mod convert;
pub mod frame;
pub mod layout;
pub(crate) mod text;
