//! Unit test harness

mod common;
mod test_session;
mod test_view;
