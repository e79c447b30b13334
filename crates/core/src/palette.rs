//! Fixed display colors for timeline groups.
//!
//! Trade-grouped projects (no phases defined) draw group colors from a fixed
//! cyclic palette indexed by first-seen order, so the same trade set always
//! renders with the same colors.

/// Cyclic palette for synthetic trade groups.
pub const TRADE_PALETTE: [&str; 8] = [
    "#3b82f6", // blue
    "#f59e0b", // amber
    "#10b981", // emerald
    "#ef4444", // red
    "#8b5cf6", // violet
    "#06b6d4", // cyan
    "#f97316", // orange
    "#ec4899", // pink
];

/// Color of the synthetic trailing "Unassigned Tasks" group.
pub const UNASSIGNED_COLOR: &str = "#94a3b8";

/// Default color assigned to a phase when none is supplied at creation.
pub const DEFAULT_PHASE_COLOR: &str = "#3b82f6";

/// Color for the trade group at the given first-seen index, cycling through
/// the palette.
pub fn trade_color(index: usize) -> &'static str {
    TRADE_PALETTE[index % TRADE_PALETTE.len()]
}
