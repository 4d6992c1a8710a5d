//! Operator implementations.
//!
//! Each operator is a struct holding its upstream, plus the observer that
//! upstream gets subscribed with. Build them through the methods of
//! [`ObservableExt`](crate::observable::ObservableExt).

pub mod all;
pub mod collect;
pub mod contains;
pub mod count;
pub mod default_if_empty;
pub mod distinct;
pub mod distinct_until_changed;
pub mod element_at;
pub mod filter;
pub mod filter_map;
pub mod first;
pub mod group_by;
pub mod ignore_elements;
pub mod is_empty;
pub mod last;
pub mod map;
pub mod map_err;
pub mod materialize;
pub mod merge_all;
pub mod on_complete;
pub mod reduce;
pub mod scan;
pub mod sequence_equal;
pub mod single;
pub mod skip;
pub mod skip_last;
pub mod skip_until;
pub mod skip_while;
pub mod take;
pub mod take_for;
pub mod take_last;
pub mod take_until;
pub mod take_while;
pub mod tap;
