pub mod mindmap;
pub mod status;
