//! Use cases (application services)

pub mod exchange;
pub mod retry;
pub mod run_story;

#[cfg(test)]
pub(crate) mod test_support;
