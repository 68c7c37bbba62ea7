use simkit_toolchain::TargetKey;
use thiserror::Error;

/// Top-level command words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verb {
    Build,
    Run,
    Debug,
    Memcheck,
    Clean,
    Count,
    Format,
}

impl Verb {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Verb::Build => "build",
            Verb::Run => "run",
            Verb::Debug => "debug",
            Verb::Memcheck => "memcheck",
            Verb::Clean => "clean",
            Verb::Count => "count",
            Verb::Format => "format",
        }
    }

    /// Number of arguments after the verb
    const fn arity(self) -> usize {
        match self {
            Verb::Build | Verb::Run | Verb::Debug | Verb::Memcheck => 1,
            Verb::Clean | Verb::Count | Verb::Format => 0,
        }
    }
}

/// What a resolved verb position selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Verb(Verb),
    /// A primary target key in verb position: build it, then run it
    BuildAndRun(TargetKey),
}

impl Route {
    fn arity(&self) -> usize {
        match self {
            Route::Verb(verb) => verb.arity(),
            Route::BuildAndRun(_) => 0,
        }
    }

    fn name(&self) -> &str {
        match self {
            Route::Verb(verb) => verb.name(),
            Route::BuildAndRun(key) => key.as_str(),
        }
    }
}

/// A fully validated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Command {
    pub(crate) route: Route,
    pub(crate) target: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum UsageError {
    #[error("missing verb: expected one of {0}")]
    MissingVerb(String),

    #[error("'{verb}' takes {expected} argument(s), got {got}")]
    Arity {
        verb: String,
        expected: usize,
        got: usize,
    },
}

/// Ordered verb names; the first whose name starts with the input wins
#[derive(Debug, Clone)]
pub(crate) struct VerbTable {
    entries: Vec<(String, Route)>,
}

impl VerbTable {
    /// `build, run, debug, <primary keys>, memcheck, clean, count, format`
    pub(crate) fn new(primary_keys: &[TargetKey]) -> Self {
        let mut entries: Vec<(String, Route)> = [Verb::Build, Verb::Run, Verb::Debug]
            .into_iter()
            .map(|verb| (verb.name().to_string(), Route::Verb(verb)))
            .collect();
        entries.extend(
            primary_keys
                .iter()
                .map(|key| (key.as_str().to_lowercase(), Route::BuildAndRun(key.clone()))),
        );
        entries.extend(
            [Verb::Memcheck, Verb::Clean, Verb::Count, Verb::Format]
                .into_iter()
                .map(|verb| (verb.name().to_string(), Route::Verb(verb))),
        );
        Self { entries }
    }

    /// Case-insensitive prefix match; `None` for unrecognized input
    pub(crate) fn resolve(&self, input: &str) -> Option<&Route> {
        let lowered = input.to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| name.starts_with(&lowered))
            .map(|(_, route)| route)
    }

    fn names(&self) -> String {
        self.entries
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve the verb and check arity; `Ok(None)` means "do nothing"
    pub(crate) fn parse(&self, args: &[String]) -> Result<Option<Command>, UsageError> {
        let Some((verb, rest)) = args.split_first() else {
            return Err(UsageError::MissingVerb(self.names()));
        };
        let Some(route) = self.resolve(verb) else {
            log::debug!("'{verb}' matches no verb, nothing to do");
            return Ok(None);
        };
        if rest.len() != route.arity() {
            return Err(UsageError::Arity {
                verb: route.name().to_string(),
                expected: route.arity(),
                got: rest.len(),
            });
        }
        Ok(Some(Command {
            route: route.clone(),
            target: rest.first().cloned(),
        }))
    }
}
