#![forbid(unsafe_code)]

//! Query-string state for filters and column choices.
//!
//! The grammar is `name=value` for scalars, `name[]=v1&name[]=v2` for
//! ordered lists, and `outer[inner]=v` for nesting. Values are
//! percent-encoded. Any edit to the state leaves the page through
//! [`navigate()`], a full reload rendered by the server.

pub mod codec;
pub mod edits;
pub mod merge;
pub mod navigate;
pub mod state;

pub use codec::{MAX_DEPTH, parse, serialize, try_parse};
pub use edits::{
    apply_column_change, apply_filter_change, column_update, field_name, filter_update,
    selected_values,
};
pub use hookwire_core::MergePolicy;
pub use merge::merge;
pub use navigate::{navigate, update_query};
pub use state::{QueryState, QueryValue};
