//! Asset build helpers for static sites.
//!
//! A [`Build`] renders templates, concatenates and minifies scripts and
//! stylesheets, compiles SCSS and copies assets from a source root into a
//! distribution root.

pub mod assets;
pub mod bootstrap;
pub mod builder;
pub mod concat;
pub mod copy;
pub mod error;
pub mod paths;
pub mod settings;
pub mod stylesheet;
pub mod templates;

pub use assets::{MinifiedCss, MinifiedJs, MinifyRequest};
pub use bootstrap::{LessCompiler, Lessc};
pub use builder::Build;
pub use concat::ConcatEntry;
pub use copy::CopyRequest;
pub use error::{BuildError, Result};
pub use settings::{BuildSettings, Containment, TextEncoding};
pub use stylesheet::{CompiledCss, OutputStyle, ScssOptions};
pub use templates::{RenderedTemplate, TemplateData, TemplateJob};
