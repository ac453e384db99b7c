//! The resolution pipeline.
//!
//! ```text
//! validate -> select_content -> resolve_key -> classify -> select_plural -> substitute
//! ```
//!
//! Every stage consumes a [`ResolutionState`] and returns the next one, or a
//! [`Failure`] carrying the state it stopped in. Nothing is shared between
//! calls.

mod state;

pub use state::{ContentSelection, KeyResolution, ResolutionState, Shape};

use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{Failure, ResolveError};
use crate::options::{PluralSelector, Replacements, ResolutionOptions};
use crate::plural;
use crate::replace::{self, ReplacementKind};

/// Resolves translation keys and reports failures to a [`DiagnosticSink`].
///
/// ```
/// use lexis_core::{Content, Resolver, ResolutionOptions, Replacements};
///
/// let content: Content = serde_yaml::from_str(r#"
/// en:
///   inbox:
///     count:
///       one: "1 message"
///       other: "{{n}} messages"
/// "#).unwrap();
///
/// let resolver = Resolver::new();
/// let options = ResolutionOptions::new()
///     .locale("en")
///     .content(&content)
///     .plural(4)
///     .replacements(Replacements::named([("n", 4)]));
///
/// assert_eq!(resolver.resolve("inbox.count", &options), "4 messages");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver<S = TracingSink> {
    sink: S,
}

impl Resolver<TracingSink> {
    /// Resolver that reports failures as `tracing` warnings.
    pub fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl<S: DiagnosticSink> Resolver<S> {
    /// Resolver that reports failures to `sink`.
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Resolves `key`, returning the configured fallback on any failure.
    ///
    /// Failures are reported to the sink unless `options.silent` is set and
    /// the failure is silenceable.
    pub fn resolve(&self, key: &str, options: &ResolutionOptions<'_>) -> String {
        match self.try_resolve(key, options) {
            Ok(text) => text,
            Err(failure) => {
                if !options.silent || !failure.error.is_silenceable() {
                    self.sink.emit(&Diagnostic {
                        key,
                        options,
                        error: failure.error,
                        state: &failure.state,
                    });
                }
                options.fallback_value().to_string()
            }
        }
    }

    /// Runs the pipeline without reporting anything.
    pub fn try_resolve<'a>(
        &self,
        key: &'a str,
        options: &'a ResolutionOptions<'a>,
    ) -> Result<String, Failure<'a>> {
        let state = ResolutionState::new(key);
        let state = validate(state, options)?;
        let state = select_content(state, options)?;
        let state = resolve_key(state)?;
        let state = classify(state)?;
        let state = select_plural(state, options)?;
        let state = substitute(state, options)?;

        Ok(state.text.unwrap_or_default())
    }
}

/// Resolves `key` with a default [`Resolver`].
pub fn resolve(key: &str, options: &ResolutionOptions<'_>) -> String {
    Resolver::new().resolve(key, options)
}

type Stage<'a> = Result<ResolutionState<'a>, Failure<'a>>;

fn validate<'a>(state: ResolutionState<'a>, options: &ResolutionOptions<'_>) -> Stage<'a> {
    if state.key.is_empty() {
        return Err(state.fail(ResolveError::MissingKey));
    }
    if !options.has_locale() {
        return Err(state.fail(ResolveError::MissingLocale));
    }
    if options.content.is_none() {
        return Err(state.fail(ResolveError::MissingContent));
    }
    Ok(state)
}

fn select_content<'a>(state: ResolutionState<'a>, options: &'a ResolutionOptions<'a>) -> Stage<'a> {
    let Some(content) = options.content else {
        return Err(state.fail(ResolveError::MissingContent));
    };

    let state = ResolutionState {
        primary: ContentSelection::select(content, options.locale.as_deref()),
        secondary: ContentSelection::select(content, options.default_locale.as_deref()),
        ..state
    };

    if !state.primary.valid && !state.secondary.valid {
        return Err(state.fail(ResolveError::LocaleNotFound));
    }
    Ok(state)
}

// The default locale gets a full walk of its own when the primary misses.
fn resolve_key(state: ResolutionState<'_>) -> Stage<'_> {
    let mut resolution = KeyResolution::walk(state.key, &state.primary);
    if !resolution.valid && state.secondary.valid {
        resolution = KeyResolution::walk(state.key, &state.secondary);
    }

    let state = ResolutionState { resolution, ..state };
    if !state.resolution.valid {
        return Err(state.fail(ResolveError::KeyNotFound));
    }
    Ok(state)
}

fn classify(state: ResolutionState<'_>) -> Stage<'_> {
    let Some(node) = state.resolution.selected else {
        return Err(state.fail(ResolveError::KeyNotFound));
    };

    let shape = Shape::of(node);
    let replacement = match shape {
        Shape::PlainString(text) => replace::classify(text),
        Shape::PluralMap(map) => {
            replace::classify_branches(map.values().filter_map(|branch| branch.as_str()))
        }
        Shape::InvalidShape => None,
    };

    let state = ResolutionState {
        resolution: KeyResolution {
            shape: Some(shape),
            replacement,
            ..state.resolution
        },
        ..state
    };

    match (shape, replacement) {
        (Shape::InvalidShape, _) => Err(state.fail(ResolveError::KeyNotFound)),
        (_, Some(ReplacementKind::Inconsistent)) => {
            Err(state.fail(ResolveError::InconsistentReplacementStyle))
        }
        _ => Ok(state),
    }
}

fn select_plural<'a>(state: ResolutionState<'a>, options: &ResolutionOptions<'_>) -> Stage<'a> {
    let text = match state.resolution.shape {
        Some(Shape::PlainString(text)) => text.to_string(),
        Some(Shape::PluralMap(map)) => {
            let Some(selector) = &options.plural else {
                return Err(state.fail(ResolveError::MissingPluralSelector));
            };

            let category = match selector {
                PluralSelector::Category(name) => name.as_str(),
                PluralSelector::Count(count) => {
                    plural::category_for(state.resolution.locale.unwrap_or_default(), *count)
                }
            };

            match map.get(category).and_then(|branch| branch.as_str()) {
                Some(branch) if !branch.is_empty() => branch.to_string(),
                _ => return Err(state.fail(ResolveError::PluralCategoryNotFound)),
            }
        }
        Some(Shape::InvalidShape) | None => return Err(state.fail(ResolveError::KeyNotFound)),
    };

    Ok(ResolutionState {
        text: Some(text),
        ..state
    })
}

// Only the selected text decides whether values are needed; the key-level
// classification decides which algorithm fills them.
fn substitute<'a>(state: ResolutionState<'a>, options: &ResolutionOptions<'_>) -> Stage<'a> {
    let needs_values = state.text.as_deref().and_then(replace::classify).is_some();
    if !needs_values {
        return Ok(state);
    }

    let text = state.text.as_deref().unwrap_or_default();

    let replaced = match (state.resolution.replacement, &options.replacements) {
        (Some(ReplacementKind::Template), Some(Replacements::Named(values))) => {
            replace::substitute_template(text, values)
        }
        (Some(ReplacementKind::Positional), Some(Replacements::Positional(values))) => {
            replace::substitute_positional(text, values)
        }
        _ => return Err(state.fail(ResolveError::MissingOrInvalidReplacements)),
    };

    Ok(ResolutionState {
        text: Some(replaced),
        ..state
    })
}
