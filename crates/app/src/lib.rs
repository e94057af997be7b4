//! Health certificate domain, hosted-backend client and application context.

pub mod backend;
pub mod context;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
