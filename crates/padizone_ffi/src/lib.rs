//! Flutter bridge surface for Padizone core.

pub mod api;
