//! Translation lookup for nested locale dictionaries.
//!
//! A dotted key such as `"menu.title"` is walked through the dictionary of
//! the requested locale, falling back to the default locale. The resolved
//! value is either a plain string or a pluralization map whose branch is
//! chosen by category name or by count (CLDR cardinal rules). The chosen
//! string then has its `{{name}}` or `%s`-style placeholders filled in.
//!
//! Resolution is a pure function of its inputs: every call gets the full
//! dictionary and options, and any failure yields the configured fallback
//! string plus a [`Diagnostic`] for the [`DiagnosticSink`].
//!
//! ```
//! use lexis_core::{Content, ResolutionOptions, Replacements, t};
//!
//! let content: Content = serde_yaml::from_str(r#"
//! en:
//!   hello: "Hello %s, you have %d messages"
//! "#).unwrap();
//!
//! let options = ResolutionOptions::new()
//!     .locale("en")
//!     .content(&content)
//!     .replacements(Replacements::Positional(vec!["Ana".into(), 3.into()]));
//!
//! assert_eq!(t("hello", &options), "Hello Ana, you have 3 messages");
//! ```

pub mod diagnostic;
pub mod dictionary;
pub mod error;
pub mod options;
pub mod plural;
pub mod replace;
pub mod resolve;
pub mod settings;

pub use diagnostic::{Diagnostic, DiagnosticSink, NoopSink, TracingSink};
pub use dictionary::{Content, DictionaryNode, PLURAL_CATEGORIES};
pub use error::{Failure, ResolveError};
pub use options::{PluralSelector, ReplacementValue, Replacements, ResolutionOptions};
pub use replace::{ReplacementKind, ReplacementStyle};
pub use resolve::{
    ContentSelection, KeyResolution, ResolutionState, Resolver, Shape, resolve, resolve as t,
};
pub use settings::{ResolverSettings, SettingsError};
