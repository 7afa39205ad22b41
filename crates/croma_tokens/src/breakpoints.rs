//! Breakpoint tiers and per-breakpoint value carriers

use serde::{Deserialize, Serialize};

/// The three named viewport tiers a token may carry distinct values at.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    /// All tiers, smallest first. Fallback chains anchor on `sm`.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Sm, Breakpoint::Md, Breakpoint::Lg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token's value at each breakpoint. `sm` is mandatory since every
/// fallback chain bottoms out there; `md` and `lg` inherit downward when
/// absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Breakpoints<T> {
    pub sm: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lg: Option<T>,
}

impl<T> Breakpoints<T> {
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Breakpoints {
            md: Some(value.clone()),
            lg: Some(value.clone()),
            sm: value,
        }
    }

    /// Value at a tier, inheriting from the nearest smaller tier.
    pub fn get(&self, breakpoint: Breakpoint) -> &T {
        match breakpoint {
            Breakpoint::Sm => &self.sm,
            Breakpoint::Md => self.md.as_ref().unwrap_or(&self.sm),
            Breakpoint::Lg => self
                .lg
                .as_ref()
                .or(self.md.as_ref())
                .unwrap_or(&self.sm),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Breakpoints<U> {
        Breakpoints {
            sm: f(&self.sm),
            md: self.md.as_ref().map(&mut f),
            lg: self.lg.as_ref().map(&mut f),
        }
    }
}
