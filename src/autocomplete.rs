crate::reexport!(result);
crate::reexport!(suggestion);
crate::reexport!(classifier);
crate::reexport!(subject);
crate::reexport!(resolver);

use crate::{
    sql::{SQL_AUTOCOMPLETE, SqlGrammar},
    *,
};

/// Context-aware completions for a query being typed.
///
/// Everything up to the intents is synchronous and shares no state between
/// calls; only schema resolution talks to the backend.
pub struct Autocomplete<B, G: 'static = SqlGrammar> {
    data: &'static AutocompleteData<G>,
    resolver: SchemaResolver<B>,
}

impl<B: QueryBackend> Autocomplete<B> {
    /// SQL completions resolved against `backend`.
    pub fn new(backend: B, settings: ResolverSettings) -> Self {
        Self::with_language(&SQL_AUTOCOMPLETE, backend, settings)
    }
}

impl<B: QueryBackend, G: Grammar> Autocomplete<B, G> {
    pub fn with_language(
        data: &'static AutocompleteData<G>,
        backend: B,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            data,
            resolver: SchemaResolver::new(backend, settings),
        }
    }

    pub fn resolver(&self) -> &SchemaResolver<B> {
        &self.resolver
    }

    /// Ordered suggestions at `cursor`: column fields, values, column
    /// aliases, then keywords.
    ///
    /// Callers fall back to an empty list on `Err`.
    pub async fn get_suggestions(&self, query: &str, cursor: CursorPosition) -> Result<Suggestions> {
        let (base, _) = self.data.subject(query, cursor).parse_query()?;
        trace!("Intents at {cursor}: {base:?}");
        let suggestions = self.resolver.resolve(&base, &self.data.symbols).await?;
        debug!("{} suggestion(s) at {cursor}", suggestions.len());
        Ok(suggestions)
    }

    /// Suggestions for a single-line editor selection; completion happens at
    /// its start.
    pub async fn get_suggestions_at(&self, query: &str, selection: Selection) -> Result<Suggestions> {
        self.get_suggestions(query, selection.position()).await
    }
}
