//! Display forms shared by all value types

use std::fmt;

/// Two textual forms per entity.
///
/// `Display` yields the short form used when building filters and
/// comparing against identifiers (`file[/etc/hosts]`). `repr` yields the
/// type-tagged form used in logs and diagnostics. The tag style differs per
/// type (`<Node: ...>` vs `Fact: ...`) and callers match on the exact text.
pub trait Displayable: fmt::Display {
    fn repr(&self) -> String;
}
