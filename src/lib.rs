#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_host as host;
pub use vc_snapshot as snapshot;
