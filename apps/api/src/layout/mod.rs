// Measurement and flow layout.
// Static font metrics stand in for browser text measurement; everything here is
// pure and CPU-bound, so callers on the async runtime use spawn_blocking.

pub mod flow;
pub mod font_metrics;
pub mod page_fill;
pub mod text;
pub mod units;

