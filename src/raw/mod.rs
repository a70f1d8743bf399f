mod insert;
mod iter;
mod node;
mod order_statistic;
mod range;
mod remove;
mod rotation;

pub(crate) use insert::insert;
pub(crate) use iter::RawIter;
pub(crate) use node::{Link, get, height, is_balanced, size, validate};
pub use node::Violation;
pub(crate) use order_statistic::{ceiling, closest, collect_ranks, floor, kth_largest, rank, rank_of, select};
pub(crate) use range::{collect as collect_range, count as count_range, max_in, min_in, sum as sum_range};
pub(crate) use remove::{remove, remove_max, remove_min};
