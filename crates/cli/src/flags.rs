use clap::ValueEnum;
use simkit_source::MarkerPolicy;

#[derive(Copy, Clone, Default, ValueEnum)]
pub(crate) enum MarkerPolicyFlag {
    /// `<headers/x.h>` becomes `"headers/x.h"`
    #[default]
    Retain,
    /// `<headers/x.h>` becomes `"x.h"`
    Strip,
}

impl MarkerPolicyFlag {
    pub(crate) const fn as_domain(self) -> MarkerPolicy {
        match self {
            MarkerPolicyFlag::Retain => MarkerPolicy::Retain,
            MarkerPolicyFlag::Strip => MarkerPolicy::Strip,
        }
    }
}
