//! File format handlers for Content Patcher, SMAPI and sidecar metadata

pub mod json;
pub mod sidecar;

pub use json::{parse_json5, read_json5, read_json5_object, to_pretty_json, write_json};
pub use sidecar::{
    PORTRAIT_BASE_SIZE, PortraitMetadata, PytkAnimation, PytkMetadata, pytk_sidecar_path,
    read_pytk_sidecar,
};
