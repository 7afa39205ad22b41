//! Column grid expansion.
//!
//! A layout may configure a different column count per breakpoint
//! (commonly 8 on small viewports, 12 above). Each distinct count gets
//! its own width variable, `--theme-layout-column-of-<N>`, and the
//! theme tree expands every fraction `<j>/<N>col` up front so grid
//! spans are addressable like any other token.

use croma_tokens::{format_number, Breakpoint, LayoutConfig, LayoutMax};

use crate::fallback::ValueContext;

/// The distinct configured column counts, in breakpoint
/// first-occurrence order (sm, md, lg).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGrid {
    counts: Vec<u32>,
}

impl ColumnGrid {
    pub fn from_layout(layout: &LayoutConfig) -> Option<ColumnGrid> {
        let columns = layout.columns.as_ref()?;
        let mut counts = Vec::new();
        for breakpoint in Breakpoint::ALL {
            let count = *columns.get(breakpoint);
            if count > 0 && !counts.contains(&count) {
                counts.push(count);
            }
        }
        if counts.is_empty() {
            None
        } else {
            Some(ColumnGrid { counts })
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn contains(&self, count: u32) -> bool {
        self.counts.contains(&count)
    }

    /// Expands every `<j>/<N>col` fraction into its theme tree entry.
    pub fn fraction_entries(
        &self,
        ctx: &ValueContext,
        layout: &LayoutConfig,
    ) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for &count in &self.counts {
            for j in 1..=count {
                entries.push((
                    format!("{j}/{count}col"),
                    self.tree_fraction(ctx, layout, j, count),
                ));
            }
        }
        entries
    }

    fn tree_fraction(&self, ctx: &ValueContext, layout: &LayoutConfig, j: u32, count: u32) -> String {
        if ctx.suppressed() {
            return inline_fraction(ctx, layout, f64::from(j), count);
        }
        format!(
            "calc(var(--theme-layout-column-of-{count}) * {j} + var(--theme-layout-gutter, var(--theme-layout-gutter--sm)) * {})",
            j - 1
        )
    }

    /// The width of a `<columns>/<count>col` span, as emitted by the
    /// width/height utility rules. `columns` may be fractional
    /// (`2.5/12col`); the gutter multiplier only counts whole gaps.
    pub fn rule_fraction(
        &self,
        ctx: &ValueContext,
        layout: &LayoutConfig,
        columns: f64,
        count: u32,
    ) -> String {
        if ctx.suppressed() {
            return inline_fraction(ctx, layout, columns, count);
        }
        let gaps = gutter_gaps(columns);
        format!(
            "calc({} * var(--theme-layout-column-of-{count}, var(--theme-layout-column-of-{count}--sm)) + {gaps} * var(--theme-layout-gutter, var(--theme-layout-gutter--sm)))",
            format_number(columns)
        )
    }
}

fn gutter_gaps(columns: f64) -> u32 {
    (columns.ceil() as i64 - 1).max(0) as u32
}

/// The variable-free width of a single column: the scaling base minus
/// both page margins and the inter-column gutters, divided evenly.
fn inline_column_width(ctx: &ValueContext, layout: &LayoutConfig, count: u32) -> String {
    let base = match layout.max {
        Some(LayoutMax::Px(px)) => format!("min(100vw, {}px)", format_number(px)),
        _ => "100vw".to_string(),
    };
    let margin = ctx.inline("layout-margin").unwrap_or_else(|| "0px".to_string());
    let gutter = ctx.inline("layout-gutter").unwrap_or_else(|| "0px".to_string());
    format!(
        "(({base} - 2 * {margin} - {} * {gutter}) / {count})",
        count.saturating_sub(1)
    )
}

fn inline_fraction(ctx: &ValueContext, layout: &LayoutConfig, columns: f64, count: u32) -> String {
    let width = inline_column_width(ctx, layout, count);
    let gutter = ctx.inline("layout-gutter").unwrap_or_else(|| "0px".to_string());
    format!(
        "calc({} * {width} + {} * {gutter})",
        format_number(columns),
        gutter_gaps(columns)
    )
}
