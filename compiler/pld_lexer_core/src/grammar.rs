//! Grammar tables: states, rules, fallbacks.
//!
//! Grammars are described with [`GrammarBuilder`] using state names and
//! compiled once into a [`Grammar`] where every name is resolved to a
//! [`StateId`] and every pattern to an anchored [`Regex`].

use std::fmt;

use pld_ir::TokenKind;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::GrammarError;

/// Index of a compiled state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateId(pub(crate) u16);

/// Normalizes a matched slice into a token value.
type ValueFn = fn(&str) -> String;

#[derive(Clone, Debug)]
enum MatcherSpec {
    Literal(String),
    Pattern(String),
}

#[derive(Clone, Debug)]
enum TransitionSpec {
    Stay,
    Push(&'static str),
    Pop,
    Next(&'static str),
}

/// A match rule with its state transition, as written in a grammar table.
#[derive(Clone)]
pub struct Rule<K> {
    kind: K,
    matcher: MatcherSpec,
    transition: TransitionSpec,
    value: Option<ValueFn>,
}

impl<K: fmt::Debug> fmt::Debug for Rule<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("matcher", &self.matcher)
            .field("transition", &self.transition)
            .field("normalized", &self.value.is_some())
            .finish()
    }
}

impl<K> Rule<K> {
    /// Match `text` exactly.
    pub fn literal(kind: K, text: impl Into<String>) -> Self {
        Rule {
            kind,
            matcher: MatcherSpec::Literal(text.into()),
            transition: TransitionSpec::Stay,
            value: None,
        }
    }

    /// Match a regular expression at the current offset.
    pub fn pattern(kind: K, pattern: impl Into<String>) -> Self {
        Rule {
            kind,
            matcher: MatcherSpec::Pattern(pattern.into()),
            transition: TransitionSpec::Stay,
            value: None,
        }
    }

    /// Enter `state` after this token; `pop` returns here.
    #[must_use]
    pub fn push(mut self, state: &'static str) -> Self {
        self.transition = TransitionSpec::Push(state);
        self
    }

    /// Return to the state that pushed the current one.
    #[must_use]
    pub fn pop(mut self) -> Self {
        self.transition = TransitionSpec::Pop;
        self
    }

    /// Replace the current state with `state`.
    #[must_use]
    pub fn next(mut self, state: &'static str) -> Self {
        self.transition = TransitionSpec::Next(state);
        self
    }

    /// Compute the token value from the matched text.
    #[must_use]
    pub fn value(mut self, normalize: ValueFn) -> Self {
        self.value = Some(normalize);
        self
    }
}

/// What a state does with input no rule matches.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Fallback<K> {
    /// Fatal [`LexError::UnexpectedChar`](crate::LexError::UnexpectedChar).
    Error,
    /// Consume one character as a token of this kind.
    Token(K),
    /// Return to the pushing state without consuming.
    Pop,
    /// Switch to another state without consuming.
    Next(StateId),
}

#[derive(Clone, Debug)]
enum FallbackSpec<K> {
    Error,
    Token(K),
    Pop,
    Next(&'static str),
}

/// Builder for one state's rule list.
pub struct StateBuilder<K> {
    name: &'static str,
    rules: Vec<Rule<K>>,
    fallback: FallbackSpec<K>,
    must_close: Option<&'static str>,
}

impl<K> StateBuilder<K> {
    fn new(name: &'static str) -> Self {
        StateBuilder {
            name,
            rules: Vec::new(),
            fallback: FallbackSpec::Error,
            must_close: None,
        }
    }

    /// Add a rule object.
    #[must_use]
    pub fn rule(mut self, rule: Rule<K>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add a literal rule with no transition.
    #[must_use]
    pub fn literal(self, kind: K, text: impl Into<String>) -> Self {
        self.rule(Rule::literal(kind, text))
    }

    /// Add a pattern rule with no transition.
    #[must_use]
    pub fn pattern(self, kind: K, pattern: impl Into<String>) -> Self {
        self.rule(Rule::pattern(kind, pattern))
    }

    /// Unmatched input becomes a one-character token of `kind`.
    #[must_use]
    pub fn fallback_token(mut self, kind: K) -> Self {
        self.fallback = FallbackSpec::Token(kind);
        self
    }

    /// Unmatched input returns to the pushing state.
    #[must_use]
    pub fn fallback_pop(mut self) -> Self {
        self.fallback = FallbackSpec::Pop;
        self
    }

    /// Unmatched input switches to `state`.
    #[must_use]
    pub fn fallback_next(mut self, state: &'static str) -> Self {
        self.fallback = FallbackSpec::Next(state);
        self
    }

    /// Reaching end of input inside this state is an error. `label` names
    /// the construct in the message (e.g., `"block comment"`).
    #[must_use]
    pub fn must_close(mut self, label: &'static str) -> Self {
        self.must_close = Some(label);
        self
    }
}

/// Describes a grammar by state name. The first state is the start state.
pub struct GrammarBuilder<K> {
    states: Vec<StateBuilder<K>>,
}

impl<K> Default for GrammarBuilder<K> {
    fn default() -> Self {
        GrammarBuilder { states: Vec::new() }
    }
}

impl<K: TokenKind> GrammarBuilder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a state.
    #[must_use]
    pub fn state(
        mut self,
        name: &'static str,
        define: impl FnOnce(StateBuilder<K>) -> StateBuilder<K>,
    ) -> Self {
        self.states.push(define(StateBuilder::new(name)));
        self
    }

    /// Resolve state names and compile patterns.
    pub fn build(self) -> Result<Grammar<K>, GrammarError> {
        if self.states.is_empty() {
            return Err(GrammarError::NoStates);
        }

        let mut names: FxHashMap<&'static str, StateId> = FxHashMap::default();
        for (index, state) in self.states.iter().enumerate() {
            let id = u16::try_from(index)
                .map(StateId)
                .map_err(|_| GrammarError::TooManyStates)?;
            if names.insert(state.name, id).is_some() {
                return Err(GrammarError::DuplicateState(state.name));
            }
        }

        let mut states = Vec::with_capacity(self.states.len());
        for spec in self.states {
            let resolve = |target: &'static str| {
                names.get(target).copied().ok_or(GrammarError::UnknownState {
                    from: spec.name,
                    target,
                })
            };

            let mut rules = Vec::with_capacity(spec.rules.len());
            for rule in &spec.rules {
                let matcher = compile_matcher(spec.name, &rule.matcher)?;
                let transition = match rule.transition {
                    TransitionSpec::Stay => Transition::Stay,
                    TransitionSpec::Push(target) => Transition::Push(resolve(target)?),
                    TransitionSpec::Pop => Transition::Pop,
                    TransitionSpec::Next(target) => Transition::Next(resolve(target)?),
                };
                rules.push(CompiledRule {
                    kind: rule.kind,
                    matcher,
                    transition,
                    value: rule.value,
                });
            }

            let fallback = match spec.fallback {
                FallbackSpec::Error => Fallback::Error,
                FallbackSpec::Token(kind) => Fallback::Token(kind),
                FallbackSpec::Pop => Fallback::Pop,
                FallbackSpec::Next(target) => Fallback::Next(resolve(target)?),
            };

            states.push(State {
                name: spec.name,
                rules,
                fallback,
                must_close: spec.must_close,
            });
        }

        Ok(Grammar { states })
    }
}

fn compile_matcher(state: &'static str, spec: &MatcherSpec) -> Result<Matcher, GrammarError> {
    match spec {
        MatcherSpec::Literal(text) => {
            if text.is_empty() {
                return Err(GrammarError::EmptyMatch {
                    state,
                    pattern: String::new(),
                });
            }
            Ok(Matcher::Literal(text.clone()))
        }
        MatcherSpec::Pattern(pattern) => {
            let regex =
                Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                    GrammarError::InvalidPattern {
                        state,
                        pattern: pattern.clone(),
                        source,
                    }
                })?;
            if regex.is_match("") {
                return Err(GrammarError::EmptyMatch {
                    state,
                    pattern: pattern.clone(),
                });
            }
            Ok(Matcher::Pattern(regex))
        }
    }
}

#[derive(Clone, Debug)]
enum Matcher {
    Literal(String),
    Pattern(Regex),
}

impl Matcher {
    /// Byte length of the match at the start of `rest`, if non-empty.
    #[inline]
    fn match_len(&self, rest: &str) -> Option<usize> {
        match self {
            Matcher::Literal(text) => rest.starts_with(text.as_str()).then_some(text.len()),
            Matcher::Pattern(regex) => regex
                .find(rest)
                .map(|m| m.end())
                .filter(|&len| len > 0),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Transition {
    Stay,
    Push(StateId),
    Pop,
    Next(StateId),
}

#[derive(Clone)]
pub(crate) struct CompiledRule<K> {
    pub(crate) kind: K,
    matcher: Matcher,
    pub(crate) transition: Transition,
    value: Option<ValueFn>,
}

impl<K: fmt::Debug> fmt::Debug for CompiledRule<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRule")
            .field("kind", &self.kind)
            .field("matcher", &self.matcher)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

impl<K> CompiledRule<K> {
    #[inline]
    pub(crate) fn match_len(&self, rest: &str) -> Option<usize> {
        self.matcher.match_len(rest)
    }

    pub(crate) fn value_of(&self, text: &str) -> String {
        self.value.map_or_else(|| text.to_owned(), |normalize| normalize(text))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct State<K> {
    pub(crate) name: &'static str,
    pub(crate) rules: Vec<CompiledRule<K>>,
    pub(crate) fallback: Fallback<K>,
    pub(crate) must_close: Option<&'static str>,
}

/// A compiled, immutable grammar. Share it across lexers by reference.
#[derive(Clone, Debug)]
pub struct Grammar<K> {
    states: Vec<State<K>>,
}

impl<K> Grammar<K> {
    /// The start state (the first one defined).
    pub fn start(&self) -> StateId {
        StateId(0)
    }

    /// Look up a state by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name == name)
            .and_then(|index| u16::try_from(index).ok())
            .map(StateId)
    }

    /// Name of a state.
    pub fn state_name(&self, id: StateId) -> &'static str {
        self.state(id).name
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub(crate) fn state(&self, id: StateId) -> &State<K> {
        &self.states[usize::from(id.0)]
    }
}

#[cfg(test)]
mod tests;
