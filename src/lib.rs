//! Theme path resolution for design-token themes.
//!
//! A nested theme is flattened once per rebuild into a [`theme::FlatThemeTable`]
//! and published through [`snapshot::ThemeProvider`]. Queries then run
//! against one snapshot at a time:
//!
//! - [`completion`]: next path segment after `theme.palette.`
//! - [`hover`]: value behind the accessor under the cursor
//! - [`inlay`]: `= #1976d2` style labels for every accessor in view

#![allow(clippy::collapsible_if)]

pub mod cancel;
pub mod completion;
pub mod config;
pub mod diagnostics;
pub mod hover;
pub mod inlay;
pub mod lsp;
pub mod matcher;
pub mod service;
pub mod snapshot;
pub mod span;
pub mod text;
pub mod theme;
