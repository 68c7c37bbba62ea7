//! `#include` directive rewriting.
//!
//! Only directives written flush against column 0 with an angle-bracket target
//! are touched:
//!
//! ```text
//! #include<headers/cpu.h>   ->  #include "headers/cpu.h"
//! #include<stdio.h>         ->  #include <stdio.h>
//! #include   <stdio.h>      ->  #include <stdio.h>
//! #include "local.h"        ->  (unchanged)
//! ```

use std::borrow::Cow;

const DIRECTIVE: &str = "#include";

/// Marker segment that identifies a project-local header path
pub const LOCAL_HEADER_MARKER: &str = "headers/";

/// What happens to the local marker when a directive is turned into a quote include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPolicy {
    /// `<headers/cpu.h>` becomes `"headers/cpu.h"`
    #[default]
    Retain,
    /// `<headers/cpu.h>` becomes `"cpu.h"`
    Strip,
}

/// An angle-bracket include recognized at the start of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AngleInclude<'a> {
    /// Target starts with the local marker; `path` excludes the marker,
    /// `rest` is everything after the closing `>`
    Local { path: &'a str, rest: &'a str },
    /// Any other target; `target` starts at `<`
    System { target: &'a str },
}

fn parse<'a>(line: &'a str, marker: &str) -> Option<AngleInclude<'a>> {
    let after_directive = line.strip_prefix(DIRECTIVE)?;
    let target = after_directive.trim_start_matches(' ');
    let inner = target.strip_prefix('<')?;

    match inner.strip_prefix(marker) {
        Some(local) => {
            // a local include with no closing bracket is left alone
            let close = local.find('>')?;
            Some(AngleInclude::Local {
                path: &local[..close],
                rest: &local[close + 1..],
            })
        }
        None => Some(AngleInclude::System { target }),
    }
}

/// Rewrite one line (terminator included) if it is an angle-bracket include
pub fn rewrite_include<'a>(line: &'a str, marker: &str, policy: MarkerPolicy) -> Cow<'a, str> {
    match parse(line, marker) {
        Some(AngleInclude::Local { path, rest }) => {
            let kept = match policy {
                MarkerPolicy::Retain => marker,
                // nothing would be left between the quotes
                MarkerPolicy::Strip if path.is_empty() => return Cow::Borrowed(line),
                MarkerPolicy::Strip => "",
            };
            Cow::Owned(format!("{DIRECTIVE} \"{kept}{path}\"{rest}"))
        }
        Some(AngleInclude::System { target }) => {
            if line.len() == DIRECTIVE.len() + 1 + target.len() {
                Cow::Borrowed(line)
            } else {
                Cow::Owned(format!("{DIRECTIVE} {target}"))
            }
        }
        None => Cow::Borrowed(line),
    }
}
