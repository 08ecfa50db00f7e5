#![forbid(unsafe_code)]

//! hookwire keeps imperative client widgets in step with server-pushed
//! markup patches.
//!
//! This facade re-exports the workspace crates and offers a [`prelude`]
//! for the common host-adapter imports.
//!
//! | Module | Crate |
//! |--------|-------|
//! | [`core`] | element snapshots, data channel, config, errors |
//! | [`i18n`] | user-visible labels |
//! | [`query`] | query-string state codec and navigation |
//! | [`widgets`] | registry, lifecycle hooks, bulk selection, section highlight |

pub use hookwire_core as core;
pub use hookwire_i18n as i18n;
#[cfg(feature = "query")]
pub use hookwire_query as query;
#[cfg(feature = "widgets")]
pub use hookwire_widgets as widgets;

pub use hookwire_core::{
    ConfigError, ElementNode, HookConfig, Location, MergePolicy, Navigator, ParseError,
    ParseErrorKind, Viewport,
};

pub mod prelude {
    //! Imports for host adapters.

    pub use hookwire_core::channel;
    pub use hookwire_core::{ElementNode, HookConfig, MergePolicy, Navigator, Viewport};
    pub use hookwire_i18n::LabelCatalog;

    #[cfg(feature = "query")]
    pub use hookwire_query::{QueryState, QueryValue, navigate, parse, serialize, update_query};

    #[cfg(feature = "widgets")]
    pub use hookwire_widgets::{
        ClickTarget, HookOutcome, HookTable, Lifecycle, PageContext, WidgetFactory, WidgetHandle,
        WidgetKind,
    };
}
