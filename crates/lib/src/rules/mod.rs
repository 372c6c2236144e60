//! Rules: the script-facing vocabulary for building a [`Graph`](crate::graph::Graph).
//!
//! A rule call arrives as an [`Args`] list, is bound against the rule's
//! [`ParamSpec`] list, and is then applied as exactly one graph operation.
//! The Lua binding in [`lua`] is a thin adapter over [`dispatch`].

mod catalogue;
mod dispatch;
mod error;
pub mod lua;
mod params;
mod value;

pub use catalogue::{Namespace, RuleCategory, RuleKind};
pub use dispatch::{call, dispatch};
pub use error::RuleError;
pub use params::{Arg, Bound, ParamDefault, ParamKind, ParamSpec, bind};
pub use value::{Args, Value};
