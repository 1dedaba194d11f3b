//! Integration tests driving the client layer against an in-process mock
//! backend.

#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod refresh_tests;


#[cfg(test)]
mod candidate_tests;

#[cfg(test)]
mod user_admin_tests;
