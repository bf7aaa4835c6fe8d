//! Query state, fetching and paging.
//!
//! Data flows one way: an input changes the [`SearchSession`], the session
//! issues a [`FetchTicket`], the [`Fetcher`] runs the request and reports a
//! [`FetchEvent`], and the session applies the event if it still belongs to
//! the newest ticket. [`SearchController`] wires the pieces together for the
//! interactive UI.
//!
//! Per query the lifecycle is Idle → Loading → {Success, Error, Cancelled}.
//! Starting a new request aborts the previous one, so at most one request's
//! outcome is ever applied.

mod controller;
mod fetcher;
mod pager;
mod state;

pub use controller::SearchController;
pub use fetcher::{FetchEvent, FetchOutcome, FetchTicket, Fetcher, DEFAULT_DEBOUNCE};
pub use pager::{total_pages, Pager};
pub use state::SearchSession;
